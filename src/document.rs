//! Layout document types.
//!
//! A layout document is a teamocil-style YAML file describing the windows to
//! open and the panes inside each one.
//!
//! # Document Format
//!
//! ```yaml
//! pre: open -a Docker
//! windows:
//!   - name: api
//!     root: ~/src/api
//!     layout: main-vertical
//!     panes:
//!       - vim
//!       - commands:
//!           - cargo watch -x test
//!         name: tests
//!         focus: true
//!       - git status
//!   - name: logs
//!     command: tail -f /var/log/system.log
//! ```

use serde::{Deserialize, Deserializer};

/// Command field that accepts either a single string or array of strings.
///
/// ```yaml
/// commands: single command
/// # or
/// commands:
///   - command 1
///   - command 2
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Cmd {
    /// A single command string.
    Single(String),
    /// Multiple commands executed in sequence.
    Multiple(Vec<String>),
}

impl Cmd {
    /// Convert to a `Vec<String>`, normalizing both variants.
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            Cmd::Single(s) => vec![s.clone()],
            Cmd::Multiple(v) => v.clone(),
        }
    }
}

/// A parsed layout document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Document {
    /// Shell command run once before any window is configured.
    #[serde(default)]
    pub pre: Option<String>,
    /// Windows in the order they are built. `None` when the key is absent.
    #[serde(default)]
    pub windows: Option<Vec<WindowSpec>>,
}

impl Document {
    /// Parse a document from YAML text.
    ///
    /// # Errors
    ///
    /// Returns `serde_yaml::Error` if the YAML is malformed or doesn't match
    /// the expected structure.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }
}

/// One window (tab) of a layout.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WindowSpec {
    /// Name applied to panes that don't carry their own.
    #[serde(default)]
    pub name: Option<String>,
    /// Starting directory for every pane.
    ///
    /// `None` when the key is absent, `Some(None)` when it is declared empty.
    #[serde(default, deserialize_with = "declared")]
    pub root: Option<Option<String>>,
    /// Layout policy name; the caller's default applies when absent.
    #[serde(default)]
    pub layout: Option<String>,
    /// Panes in creation order.
    #[serde(default)]
    pub panes: Option<Vec<PaneEntry>>,
    /// Window-level command shorthand, used when there are no panes.
    #[serde(default)]
    pub command: Option<Cmd>,
    /// Alias for `command`.
    #[serde(default)]
    pub commands: Option<Cmd>,
}

impl WindowSpec {
    /// Commands from `command`, falling back to `commands`.
    pub fn window_commands(&self) -> Vec<String> {
        self.command
            .as_ref()
            .or(self.commands.as_ref())
            .map(Cmd::to_vec)
            .unwrap_or_default()
    }
}

/// Distinguishes a declared-but-empty key from a missing one.
fn declared<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// A pane entry: a bare command string or a full record.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum PaneEntry {
    /// Shorthand for a pane running one command.
    Command(String),
    /// Full pane record.
    Spec(PaneSpec),
}

impl PaneEntry {
    /// Normalize to a [`PaneSpec`].
    pub fn to_spec(&self) -> PaneSpec {
        match self {
            PaneEntry::Command(command) => PaneSpec {
                commands: Some(Cmd::Single(command.clone())),
                ..PaneSpec::default()
            },
            PaneEntry::Spec(spec) => spec.clone(),
        }
    }
}

/// Commands and metadata for one pane.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct PaneSpec {
    /// Commands to run; a pane without any only gets the window's `cd`.
    #[serde(default)]
    pub commands: Option<Cmd>,
    /// Display name for the pane.
    #[serde(default)]
    pub name: Option<String>,
    /// Whether this pane should hold focus once the window is built.
    #[serde(default)]
    pub focus: bool,
}

impl PaneSpec {
    /// The pane's commands, empty if none were given.
    pub fn command_list(&self) -> Vec<String> {
        self.commands.as_ref().map(Cmd::to_vec).unwrap_or_default()
    }
}
