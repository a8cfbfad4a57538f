//! Error types for panescript.
//!
//! All errors in panescript are represented by [`PanescriptError`], which covers
//! layout document problems, settings issues, and failures talking to `osascript`.

use std::path::PathBuf;
use thiserror::Error;

/// All possible errors that can occur in panescript.
#[derive(Error, Debug)]
pub enum PanescriptError {
    /// A window names a layout policy that does not exist.
    #[error("Unsupported layout: {0}")]
    UnsupportedLayout(String),

    /// The layout document has no `windows` list.
    #[error("No windows defined in {}", .0.display())]
    MissingWindows(PathBuf),

    /// Layout file does not exist at the resolved path.
    #[error("There is no file at: {}", .0.display())]
    LayoutNotFound(PathBuf),

    /// Neither `~/.panescript` nor `~/.teamocil` exists.
    #[error("No ~/.panescript or ~/.teamocil directory")]
    NoLayoutDir,

    /// No layout name was given and no `panescript.yml` exists here.
    #[error("No layout specified and no panescript.yml in the current directory")]
    NoLayoutSpecified,

    /// Could not determine the user's home or config directory.
    #[error("Could not determine home directory")]
    NoConfigDir,

    /// Failed to read a file from disk.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML layout parsing failed.
    #[error("Failed to parse layout: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML settings parsing failed.
    #[error("Failed to parse settings: {0}")]
    Toml(#[from] toml::de::Error),

    /// The terminal reported a pre-release build we cannot drive.
    #[error("Unsupported beta build of iTerm: {0} (try the latest nightly or a stable build)")]
    UnsupportedBuild(String),

    /// An `osascript` invocation failed.
    #[error("osascript error: {0}")]
    Osascript(String),

    /// Launching the editor failed.
    #[error("Editor error: {0}")]
    Editor(String),
}

/// Convenient Result type alias for panescript operations.
pub type Result<T> = std::result::Result<T, PanescriptError>;
