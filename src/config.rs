//! Tool settings.
//!
//! Settings live in an optional TOML file and only tune defaults; every key
//! may be omitted.
//!
//! # Settings Format
//!
//! ```toml
//! [defaults]
//! layout = "tiled"
//! mode = "relative"
//!
//! [timing]
//! window_delay_ms = 300
//! settle_delay_ms = 2000
//! ```

use crate::topology::AddressingMode;
use serde::Deserialize;
use std::time::Duration;

/// Layout used by windows that don't name one.
pub const DEFAULT_LAYOUT: &str = "tiled";

/// Global default settings applied when not overridden.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct Defaults {
    /// Layout for windows without a `layout` key.
    pub layout: Option<String>,
    /// Forces an addressing mode instead of probing the terminal.
    pub mode: Option<AddressingMode>,
}

/// Fixed waits inserted into keystroke-driven scripts.
///
/// Relative mode cannot observe when the terminal has caught up with a
/// keystroke, so scripts sleep for these durations instead.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Timing {
    /// Wait before and after opening a tab by keystroke.
    pub window_delay_ms: u64,
    /// Wait after building a window's panes by keystroke.
    pub settle_delay_ms: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            window_delay_ms: 300,
            settle_delay_ms: 2000,
        }
    }
}

impl Timing {
    pub fn window_delay(&self) -> Duration {
        Duration::from_millis(self.window_delay_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

/// Top-level settings structure.
///
/// Parsed from `~/.config/panescript/config.toml` (or XDG equivalent).
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct Settings {
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub timing: Timing,
}

impl Settings {
    /// Parse settings from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns `toml::de::Error` if the TOML is malformed or doesn't match
    /// the expected structure.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Layout for windows that don't name one.
    pub fn default_layout(&self) -> &str {
        self.defaults.layout.as_deref().unwrap_or(DEFAULT_LAYOUT)
    }
}
