//! Script assembly and rendering.
//!
//! [`ScriptAssembler`] walks a document's windows in order, synthesizes each
//! window's topology, and collects the emitted [`Statement`]s into a
//! [`Script`]. [`Renderer`] turns statements into AppleScript for the
//! addressing mode in use.

use crate::config::{DEFAULT_LAYOUT, Timing};
use crate::document::Document;
use crate::emit::{Action, CommandEmitter, Statement, Target};
use crate::error::{PanescriptError, Result};
use crate::topology::{AddressingMode, FocusDirection, Orientation, synthesize};
use std::path::{Path, PathBuf};
use tracing::info;

const APPLICATION: &str = "iTerm";
const SYSTEM_EVENTS: &str = "tell i term application \"System Events\" to ";

/// Builds a whole script from a layout document.
#[derive(Debug, Clone)]
pub struct ScriptAssembler {
    mode: AddressingMode,
    here: Option<PathBuf>,
    default_layout: String,
    timing: Timing,
}

impl ScriptAssembler {
    pub fn new(mode: AddressingMode) -> Self {
        Self {
            mode,
            here: None,
            default_layout: DEFAULT_LAYOUT.to_string(),
            timing: Timing::default(),
        }
    }

    /// Build the first window in the current tab instead of a new one.
    pub fn here(mut self, cwd: PathBuf) -> Self {
        self.here = Some(cwd);
        self
    }

    pub fn default_layout(mut self, layout: impl Into<String>) -> Self {
        self.default_layout = layout.into();
        self
    }

    pub fn timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    /// Assemble the script for `document`, read from `source`.
    ///
    /// # Errors
    ///
    /// - [`PanescriptError::MissingWindows`] if the document has no `windows`
    /// - [`PanescriptError::UnsupportedLayout`] if any window names an
    ///   unknown layout; no partial script is returned
    pub fn assemble(&self, document: &Document, source: &Path) -> Result<Script> {
        let windows = document
            .windows
            .as_ref()
            .ok_or_else(|| PanescriptError::MissingWindows(source.to_path_buf()))?;

        let mut emitter =
            CommandEmitter::new(self.mode).settle_delay(self.timing.settle_delay());
        if let Some(cwd) = &self.here {
            emitter = emitter.here(cwd);
        }

        let mut statements = Vec::new();
        if let Some(pre) = &document.pre {
            statements.push(Statement::RunShell(pre.clone()));
        }
        if self.here.is_none() {
            self.open_window(&mut statements);
        }

        for (index, window) in windows.iter().enumerate() {
            if index > 0 {
                self.open_window(&mut statements);
            }

            let topology = match &window.panes {
                Some(panes) => {
                    let layout = window.layout.as_deref().unwrap_or(&self.default_layout);
                    info!(window = index, layout, panes = panes.len(), "building window");
                    synthesize(panes.len() as u32, layout, self.mode)?
                }
                None => {
                    info!(window = index, "window without panes");
                    Vec::new()
                }
            };
            statements.extend(emitter.emit(window, &topology));
        }

        Ok(Script {
            mode: self.mode,
            statements,
        })
    }

    fn open_window(&self, statements: &mut Vec<Statement>) {
        match self.mode {
            AddressingMode::Direct => statements.push(Statement::CreateWindow),
            AddressingMode::Relative => statements.extend([
                Statement::Delay(self.timing.window_delay()),
                Statement::CreateWindow,
                Statement::Delay(self.timing.window_delay()),
            ]),
        }
    }
}

/// An assembled script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    pub mode: AddressingMode,
    pub statements: Vec<Statement>,
}

impl Script {
    /// The script as executable text.
    pub fn render(&self) -> String {
        Renderer::new(self.mode).render(&self.statements)
    }

    /// The script indented for reading.
    pub fn pretty(&self) -> String {
        pretty(&self.render())
    }
}

/// Renders statements as AppleScript for one addressing mode.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    mode: AddressingMode,
}

impl Renderer {
    pub fn new(mode: AddressingMode) -> Self {
        Self { mode }
    }

    /// Full script text, wrapped in the application `tell` block.
    pub fn render(&self, statements: &[Statement]) -> String {
        let mut lines = vec![
            format!("tell application \"{APPLICATION}\""),
            "activate".to_string(),
        ];
        for statement in statements {
            lines.extend(self.lines(statement));
        }
        lines.push("end tell".to_string());
        lines.join("\n")
    }

    /// Lines for one statement.
    pub fn lines(&self, statement: &Statement) -> Vec<String> {
        match statement {
            Statement::RunShell(command) => vec![format!("do shell script \"{command};\"")],
            Statement::CreateWindow => match self.mode {
                AddressingMode::Direct => vec![
                    "tell current window".to_string(),
                    "create tab with default profile".to_string(),
                    "end tell".to_string(),
                ],
                AddressingMode::Relative => vec![keystroke("\"t\" using command down")],
            },
            Statement::Delay(duration) => vec![format!("delay {}", duration.as_secs_f64())],
            Statement::BindFirstPane => {
                vec!["set pane_1 to (current session of current window)".to_string()]
            }
            Statement::Split(split) => vec![
                format!("tell pane_{}", split.parent),
                format!(
                    "set pane_{} to (split {}ly with same profile)",
                    split.child,
                    orientation_word(split.orientation)
                ),
                "end tell".to_string(),
            ],
            Statement::SplitAlong(orientation) => vec![match orientation {
                Orientation::Vertical => keystroke("\"d\" using command down"),
                Orientation::Horizontal => keystroke("\"D\" using command down"),
            }],
            Statement::FocusStep(direction) => vec![match direction {
                FocusDirection::Next => keystroke("\"]\" using command down"),
                FocusDirection::Previous => keystroke("\"[\" using command down"),
                FocusDirection::SpatialDown => {
                    format!("{SYSTEM_EVENTS}key code 125 using {{command down, option down}}")
                }
            }],
            Statement::AddressPane { target, actions } => {
                let mut lines = vec![format!("tell {}", self.target(*target))];
                lines.extend(actions.iter().map(|action| match action {
                    Action::WriteText(text) => format!("write text \"{text}\""),
                    // Names go out verbatim; a `"` in one ends the literal early.
                    Action::SetName(name) => format!("set name to \"{name}\""),
                    Action::Select => "select".to_string(),
                }));
                lines.push("end tell".to_string());
                lines
            }
        }
    }

    fn target(&self, target: Target) -> String {
        match (target, self.mode) {
            (Target::Pane(pane), _) => format!("pane_{pane}"),
            (Target::Window, _) | (Target::Current, AddressingMode::Direct) => {
                "current session of current window".to_string()
            }
            (Target::Current, AddressingMode::Relative) => {
                "current session of current terminal".to_string()
            }
        }
    }
}

fn keystroke(keys: &str) -> String {
    format!("{SYSTEM_EVENTS}keystroke {keys}")
}

fn orientation_word(orientation: Orientation) -> &'static str {
    match orientation {
        Orientation::Horizontal => "horizontal",
        Orientation::Vertical => "vertical",
    }
}

/// Indent a rendered script for reading.
///
/// Lines inside `tell` blocks are indented with tabs and each multi-line
/// `tell` starts after a blank line. One-line System Events statements are
/// left alone.
pub fn pretty(script: &str) -> String {
    let mut indent = String::new();
    let mut formatted = Vec::new();

    for line in script.lines().map(str::trim_start) {
        let opens = line.starts_with("tell") && !line.starts_with("tell i ");
        if line.starts_with("end tell") {
            indent.pop();
        }
        if opens {
            formatted.push(String::new());
        }
        formatted.push(format!("{indent}{line}"));
        if opens {
            indent.push('\t');
        }
    }

    formatted.push(String::new());
    formatted.join("\n")
}
