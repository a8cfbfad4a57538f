//! Layout and settings discovery and loading.
//!
//! Layout files are looked up by name in these directories, in order:
//!
//! 1. `~/.panescript/<name>.yml`
//! 2. `~/.teamocil/<name>.yml`
//!
//! Settings are read from the first existing file of:
//!
//! 1. `$XDG_CONFIG_HOME/panescript/config.toml`
//! 2. `~/.config/panescript/config.toml`

use crate::config::Settings;
use crate::document::Document;
use crate::error::{PanescriptError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Layout file used when no name is given.
pub const LOCAL_LAYOUT: &str = "panescript.yml";

const LAYOUT_EXTENSION: &str = "yml";

/// Characters stripped from layout names before they become paths.
const UNSAFE_CHARS: &[char] = &[
    '*', '?', '[', ']', '\'', '"', '\\', '$', ';', '&', '(', ')', '|', '^', '<', '>',
];

/// Directories searched for named layouts, in order of preference.
///
/// # Errors
///
/// Returns [`PanescriptError::NoConfigDir`] if the home directory cannot be determined.
pub fn layout_dirs() -> Result<Vec<PathBuf>> {
    let home = dirs::home_dir().ok_or(PanescriptError::NoConfigDir)?;
    Ok(vec![home.join(".panescript"), home.join(".teamocil")])
}

/// Strip shell metacharacters from a layout name.
///
/// ```
/// use panescript::loader::sanitize_name;
///
/// assert_eq!(sanitize_name("dev;rm -rf *"), "devrm -rf ");
/// ```
pub fn sanitize_name(name: &str) -> String {
    name.chars().filter(|c| !UNSAFE_CHARS.contains(c)).collect()
}

/// Work out which file a layout name refers to.
///
/// - No name: `./panescript.yml`, if it exists.
/// - `as_file`: the name is a path relative to `cwd`.
/// - Otherwise the first of `dirs` holding `<name>.yml`. If none does, the
///   path in the last directory is returned so it can be created by `--edit`.
///
/// The returned path is not guaranteed to exist.
///
/// # Errors
///
/// - [`PanescriptError::NoLayoutSpecified`] if there is no name and no local layout
/// - [`PanescriptError::NoLayoutDir`] if none of `dirs` exists
pub fn resolve_layout_path(
    name: Option<&str>,
    as_file: bool,
    cwd: &Path,
    dirs: &[PathBuf],
) -> Result<PathBuf> {
    let Some(name) = name else {
        let local = cwd.join(LOCAL_LAYOUT);
        return if local.is_file() {
            Ok(local)
        } else {
            Err(PanescriptError::NoLayoutSpecified)
        };
    };
    let name = sanitize_name(name);

    if as_file {
        return Ok(cwd.join(name));
    }

    if !dirs.iter().any(|dir| dir.is_dir()) {
        return Err(PanescriptError::NoLayoutDir);
    }

    let file_name = format!("{name}.{LAYOUT_EXTENSION}");
    let candidates: Vec<PathBuf> = dirs.iter().map(|dir| dir.join(&file_name)).collect();
    let path = candidates
        .iter()
        .find(|path| path.is_file())
        .or(candidates.last())
        .cloned()
        .ok_or(PanescriptError::NoLayoutDir)?;

    debug!(path = %path.display(), "resolved layout");
    Ok(path)
}

/// Layout names available in each existing directory, sorted.
pub fn list_layouts(dirs: &[PathBuf]) -> Result<Vec<(PathBuf, Vec<String>)>> {
    let mut listings = Vec::new();
    for dir in dirs.iter().filter(|dir| dir.is_dir()) {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == LAYOUT_EXTENSION) {
                if let Some(stem) = path.file_stem() {
                    names.push(stem.to_string_lossy().into_owned());
                }
            }
        }
        names.sort();
        listings.push((dir.clone(), names));
    }
    Ok(listings)
}

/// Load and parse a layout document.
///
/// # Errors
///
/// - [`PanescriptError::LayoutNotFound`] if the file doesn't exist
/// - [`PanescriptError::Io`] if reading fails
/// - [`PanescriptError::Yaml`] if YAML parsing fails
pub fn load_document(path: &Path) -> Result<Document> {
    let contents = read_layout(path)?;
    Ok(Document::from_yaml(&contents)?)
}

/// Raw text of a layout file.
pub fn read_layout(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(PanescriptError::LayoutNotFound(path.to_path_buf()));
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Determine the settings file path, if one exists.
///
/// Checks locations in order of preference:
/// 1. `$XDG_CONFIG_HOME/panescript/config.toml` (if XDG_CONFIG_HOME is set)
/// 2. `~/.config/panescript/config.toml`
pub fn settings_path() -> Option<PathBuf> {
    let xdg = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from);
    let home = dirs::home_dir().map(|home| home.join(".config"));

    xdg.into_iter()
        .chain(home)
        .map(|base| base.join("panescript").join("config.toml"))
        .find(|path| path.is_file())
}

/// Load and parse a settings file.
///
/// # Errors
///
/// - [`PanescriptError::Io`] if reading fails
/// - [`PanescriptError::Toml`] if TOML parsing fails
pub fn load_settings_from(path: &Path) -> Result<Settings> {
    let contents = std::fs::read_to_string(path)?;
    Ok(Settings::from_toml(&contents)?)
}

/// Load settings from the default location, or defaults if there is no file.
pub fn load_settings() -> Result<Settings> {
    match settings_path() {
        Some(path) => {
            debug!(path = %path.display(), "loading settings");
            load_settings_from(&path)
        }
        None => Ok(Settings::default()),
    }
}

/// Open a layout file for editing.
///
/// Uses `$EDITOR` when set. Otherwise the file is created if needed and
/// handed to `open`.
pub fn edit_layout(path: &Path) -> Result<()> {
    let status = match std::env::var("EDITOR") {
        Ok(editor) if !editor.trim().is_empty() => {
            let mut words = editor.split_whitespace();
            let program = words.next().unwrap_or_default();
            Command::new(program).args(words).arg(path).status()
        }
        _ => {
            if !path.exists() {
                std::fs::File::create(path)?;
            }
            Command::new("open").arg(path).status()
        }
    }
    .map_err(|e| PanescriptError::Editor(e.to_string()))?;

    if !status.success() {
        return Err(PanescriptError::Editor(format!(
            "editor exited with {status}"
        )));
    }
    Ok(())
}
