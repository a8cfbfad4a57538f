//! Per-window statement emission.
//!
//! [`CommandEmitter`] turns one window's synthesized topology and pane
//! metadata into [`Statement`]s. Statements are structured; the terminal's
//! actual script syntax is only produced later by [`crate::script::Renderer`].

use crate::document::WindowSpec;
use crate::focus::{FocusTracker, PaneWalker};
use crate::topology::{AddressingMode, FocusDirection, FocusOp, Orientation, PaneId, PaneOp, SplitOp};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

/// Separator between shell commands sent as one line.
const COMMAND_SEPARATOR: &str = "; ";

/// Which session a [`Statement::AddressPane`] talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// A pane bound by id (direct mode only).
    Pane(PaneId),
    /// Whatever session currently has focus.
    Current,
    /// The focused session of the current window, named the same way in
    /// both modes.
    Window,
}

/// Something done to an addressed pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Type a line into the pane. The text is ready to sit inside a string
    /// literal: quotes in commands are already escaped.
    WriteText(String),
    /// Set the pane's title.
    SetName(String),
    /// Give the pane focus.
    Select,
}

/// One automation statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// Run a shell command before anything else happens.
    RunShell(String),
    /// Open a new window/tab and make it current.
    CreateWindow,
    /// Sleep; stands in for an acknowledgment the terminal never sends.
    Delay(Duration),
    /// Bind the current session as pane 1 (direct mode).
    BindFirstPane,
    /// Split a bound pane (direct mode).
    Split(SplitOp),
    /// Split the focused pane (relative mode).
    SplitAlong(Orientation),
    /// Move focus one step (relative mode).
    FocusStep(FocusDirection),
    /// Run actions against one session.
    AddressPane { target: Target, actions: Vec<Action> },
}

impl From<PaneOp> for Statement {
    fn from(op: PaneOp) -> Self {
        match op {
            PaneOp::Split(split) => Statement::Split(split),
            PaneOp::Focus(FocusOp::SplitAlong { orientation, .. }) => {
                Statement::SplitAlong(orientation)
            }
            PaneOp::Focus(FocusOp::FocusStep(direction)) => Statement::FocusStep(direction),
        }
    }
}

/// Escape quotes so a command can sit inside a string literal.
///
/// Nothing else is touched.
///
/// ```
/// use panescript::emit::escape_quotes;
///
/// assert_eq!(escape_quotes(r#"echo "hi""#), r#"echo \"hi\""#);
/// ```
pub fn escape_quotes(command: &str) -> String {
    command.replace('"', "\\\"")
}

/// Escape spaces in a path for the shell, as it appears inside a literal.
fn escape_path(path: &str) -> String {
    path.replace(' ', "\\\\ ")
}

/// Emits the statements for one window.
#[derive(Debug, Clone)]
pub struct CommandEmitter<'a> {
    mode: AddressingMode,
    here: Option<&'a Path>,
    settle_delay: Duration,
}

impl<'a> CommandEmitter<'a> {
    pub fn new(mode: AddressingMode) -> Self {
        Self {
            mode,
            here: None,
            settle_delay: Duration::ZERO,
        }
    }

    /// Running in the caller's tab: an empty `root` means `cwd`.
    pub fn here(mut self, cwd: &'a Path) -> Self {
        self.here = Some(cwd);
        self
    }

    /// Wait emitted after a keystroke-built topology.
    pub fn settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Emit statements for `window`, whose panes were laid out by `topology`.
    ///
    /// A window without `panes` gets a single command statement against the
    /// current session and `topology` is ignored.
    pub fn emit(&self, window: &WindowSpec, topology: &[PaneOp]) -> Vec<Statement> {
        let root = self.root_command(window);

        let Some(panes) = &window.panes else {
            let commands = root
                .into_iter()
                .chain(window.window_commands().iter().map(|c| escape_quotes(c)))
                .collect::<Vec<_>>();
            return vec![Statement::AddressPane {
                target: Target::Window,
                actions: vec![Action::WriteText(commands.join(COMMAND_SEPARATOR))],
            }];
        };

        let mut out = Vec::new();
        if self.mode == AddressingMode::Direct {
            out.push(Statement::BindFirstPane);
        }
        out.extend(topology.iter().copied().map(Statement::from));
        if self.mode == AddressingMode::Relative && !topology.is_empty() {
            out.push(Statement::Delay(self.settle_delay));
        }

        let walker = PaneWalker::sequential(panes.len() as u32);
        let mut visited = self.terminal_focus(topology);
        let mut focus = None;

        for (pane_id, entry) in (1..).zip(panes) {
            let spec = entry.to_spec();
            let target = self.visit(&walker, &mut visited, pane_id, &mut out);

            let commands = root
                .iter()
                .cloned()
                .chain(spec.command_list().iter().map(|c| escape_quotes(c)))
                .collect::<Vec<_>>();

            let mut actions = vec![Action::WriteText(commands.join(COMMAND_SEPARATOR))];
            if let Some(name) = spec.name.as_ref().or(window.name.as_ref()) {
                actions.push(Action::SetName(name.clone()));
            }
            out.push(Statement::AddressPane { target, actions });

            if spec.focus {
                if let Some(previous) = focus {
                    warn!(previous, pane_id, "several panes request focus, last one wins");
                }
                focus = Some(pane_id);
            }
        }

        if let Some(pane_id) = focus {
            match self.mode {
                AddressingMode::Direct => out.push(Statement::AddressPane {
                    target: Target::Pane(pane_id),
                    actions: vec![Action::Select],
                }),
                AddressingMode::Relative => {
                    self.visit(&walker, &mut visited, pane_id, &mut out);
                }
            }
        }

        out
    }

    /// Make `pane` addressable, returning the target to address it by.
    fn visit(
        &self,
        walker: &PaneWalker,
        visited: &mut PaneId,
        pane: PaneId,
        out: &mut Vec<Statement>,
    ) -> Target {
        match self.mode {
            AddressingMode::Direct => Target::Pane(pane),
            AddressingMode::Relative => {
                out.extend(walker.walk(*visited, pane).into_iter().map(Statement::FocusStep));
                *visited = pane;
                Target::Current
            }
        }
    }

    /// Pane focused once the topology has been built.
    fn terminal_focus(&self, topology: &[PaneOp]) -> PaneId {
        let tracker = FocusTracker::replay(topology.iter().filter_map(|op| match op {
            PaneOp::Focus(focus) => Some(focus),
            PaneOp::Split(_) => None,
        }));
        tracker.focus()
    }

    fn root_command(&self, window: &WindowSpec) -> Option<String> {
        match &window.root {
            Some(Some(root)) if !root.is_empty() => Some(format!("cd {}", escape_path(root))),
            Some(_) => self.here.map(|cwd| {
                debug!(cwd = %cwd.display(), "empty root, using working directory");
                format!("cd {}", escape_path(&cwd.to_string_lossy()))
            }),
            None => {
                warn!(window = ?window.name, "window has no root");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::topology::synthesize;

    fn window(yaml: &str) -> WindowSpec {
        Document::from_yaml(yaml).unwrap().windows.unwrap().remove(0)
    }

    fn write_texts(statements: &[Statement]) -> Vec<String> {
        statements
            .iter()
            .filter_map(|s| match s {
                Statement::AddressPane { actions, .. } => match actions.first() {
                    Some(Action::WriteText(text)) => Some(text.clone()),
                    _ => None,
                },
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_direct_panes_addressed_by_id() {
        let win = window(
            "windows:\n  - root: ~/src\n    layout: even-horizontal\n    panes:\n      - vim\n      - commands: [make, make test]\n        name: build\n",
        );
        let ops = synthesize(2, "even-horizontal", AddressingMode::Direct).unwrap();
        let out = CommandEmitter::new(AddressingMode::Direct).emit(&win, &ops);

        assert_eq!(out[0], Statement::BindFirstPane);
        assert!(matches!(out[1], Statement::Split(_)));
        assert_eq!(
            out[2],
            Statement::AddressPane {
                target: Target::Pane(1),
                actions: vec![Action::WriteText("cd ~/src; vim".into())],
            }
        );
        assert_eq!(
            out[3],
            Statement::AddressPane {
                target: Target::Pane(2),
                actions: vec![
                    Action::WriteText("cd ~/src; make; make test".into()),
                    Action::SetName("build".into()),
                ],
            }
        );
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn test_quotes_escaped() {
        let win = window("windows:\n  - root: /tmp\n    panes:\n      - echo \"hi there\"\n");
        let out = CommandEmitter::new(AddressingMode::Direct).emit(&win, &[]);
        let texts = write_texts(&out);
        assert_eq!(texts, vec![r#"cd /tmp; echo \"hi there\""#]);
    }

    #[test]
    fn test_root_spaces_escaped() {
        let win = window("windows:\n  - root: ~/My Projects\n    panes:\n      - ls\n");
        let out = CommandEmitter::new(AddressingMode::Direct).emit(&win, &[]);
        assert_eq!(write_texts(&out), vec![r"cd ~/My\\ Projects; ls"]);
    }

    #[test]
    fn test_empty_root_uses_cwd_only_here() {
        let win = window("windows:\n  - root:\n    panes:\n      - ls\n");
        let cwd = Path::new("/work/dir");

        let away = CommandEmitter::new(AddressingMode::Direct).emit(&win, &[]);
        assert_eq!(write_texts(&away), vec!["ls"]);

        let here = CommandEmitter::new(AddressingMode::Direct).here(cwd).emit(&win, &[]);
        assert_eq!(write_texts(&here), vec!["cd /work/dir; ls"]);
    }

    #[test]
    fn test_window_name_fallback() {
        let win = window("windows:\n  - name: server\n    panes:\n      - a\n      - commands: [b]\n        name: own\n");
        let ops = synthesize(2, "tiled", AddressingMode::Direct).unwrap();
        let out = CommandEmitter::new(AddressingMode::Direct).emit(&win, &ops);
        let names: Vec<_> = out
            .iter()
            .filter_map(|s| match s {
                Statement::AddressPane { actions, .. } => actions.iter().find_map(|a| match a {
                    Action::SetName(n) => Some(n.as_str()),
                    _ => None,
                }),
                _ => None,
            })
            .collect();
        assert_eq!(names, vec!["server", "own"]);
    }

    #[test]
    fn test_last_focus_wins_direct() {
        let win = window(
            "windows:\n  - panes:\n      - commands: [a]\n        focus: true\n      - b\n      - commands: [c]\n        focus: true\n",
        );
        let ops = synthesize(3, "tiled", AddressingMode::Direct).unwrap();
        let out = CommandEmitter::new(AddressingMode::Direct).emit(&win, &ops);
        assert_eq!(
            out.last(),
            Some(&Statement::AddressPane {
                target: Target::Pane(3),
                actions: vec![Action::Select],
            })
        );
    }

    #[test]
    fn test_relative_walks_between_panes() {
        let win = window("windows:\n  - layout: main-vertical\n    panes:\n      - a\n      - b\n      - commands: [c]\n        focus: true\n");
        let ops = synthesize(3, "main-vertical", AddressingMode::Relative).unwrap();
        let out = CommandEmitter::new(AddressingMode::Relative)
            .settle_delay(Duration::from_secs(2))
            .emit(&win, &ops);

        let write = |text: &str| Statement::AddressPane {
            target: Target::Current,
            actions: vec![Action::WriteText(text.into())],
        };
        let next = Statement::FocusStep(FocusDirection::Next);
        assert_eq!(
            out,
            vec![
                Statement::SplitAlong(Orientation::Vertical),
                Statement::SplitAlong(Orientation::Horizontal),
                next.clone(),
                Statement::Delay(Duration::from_secs(2)),
                write("a"),
                next.clone(),
                write("b"),
                next,
                write("c"),
            ]
        );
    }

    #[test]
    fn test_relative_focus_walks_back() {
        let win = window("windows:\n  - layout: even-vertical\n    panes:\n      - commands: [a]\n        focus: true\n      - b\n");
        let ops = synthesize(2, "even-vertical", AddressingMode::Relative).unwrap();
        let out = CommandEmitter::new(AddressingMode::Relative).emit(&win, &ops);
        assert_eq!(out.last(), Some(&Statement::FocusStep(FocusDirection::Previous)));
    }

    #[test]
    fn test_relative_single_pane_has_no_delay() {
        let win = window("windows:\n  - panes:\n      - top\n");
        let out = CommandEmitter::new(AddressingMode::Relative).emit(&win, &[]);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_window_command_shorthand() {
        let win = window("windows:\n  - root: /srv\n    command: tail -f \"log\"\n");
        let out = CommandEmitter::new(AddressingMode::Relative).emit(&win, &[]);
        assert_eq!(
            out,
            vec![Statement::AddressPane {
                target: Target::Window,
                actions: vec![Action::WriteText(r#"cd /srv; tail -f \"log\""#.into())],
            }]
        );
    }
}
