//! # Panescript
//!
//! Builds multi-pane terminal windows from teamocil-style YAML layouts.
//!
//! Panescript reads a layout document, works out the exact sequence of splits
//! (and, where the terminal only supports keystrokes, focus moves) that
//! produces each window's pane arrangement, and emits an AppleScript that
//! builds the windows and runs every pane's commands.
//!
//! ## Quick Example
//!
//! ```yaml
//! # ~/.panescript/api.yml
//! windows:
//!   - name: api
//!     root: ~/src/api
//!     layout: main-vertical
//!     panes:
//!       - vim
//!       - cargo watch -x test
//!       - git status
//! ```
//!
//! ```
//! use panescript::document::Document;
//! use panescript::script::ScriptAssembler;
//! use panescript::topology::AddressingMode;
//! use std::path::Path;
//!
//! let doc = Document::from_yaml("windows:\n  - layout: tiled\n    panes: [top, htop]\n").unwrap();
//! let script = ScriptAssembler::new(AddressingMode::Direct)
//!     .assemble(&doc, Path::new("api.yml"))
//!     .unwrap();
//! assert!(script.render().contains("split horizontally"));
//! ```
//!
//! ## Architecture
//!
//! Data flows one way: document → topology → statements → script text.
//!
//! - [`document`]: YAML layout document types
//! - [`layout`]: named layout policies and their split plans
//! - [`topology`]: operation types and [`topology::synthesize`]
//! - [`focus`]: focus tracking and walking for keystroke-only terminals
//! - [`emit`]: per-window statement emission
//! - [`script`]: script assembly and rendering
//! - [`config`]: TOML tool settings
//! - [`loader`]: layout and settings discovery
//! - [`osascript`]: terminal version probe and script execution
//! - [`cli`]: command-line argument parsing with clap
//! - [`error`]: error types

pub mod cli;
pub mod config;
pub mod document;
pub mod emit;
pub mod error;
pub mod focus;
pub mod layout;
pub mod loader;
pub mod osascript;
pub mod script;
pub mod topology;

pub use document::{Document, PaneEntry, PaneSpec, WindowSpec};
pub use error::{PanescriptError, Result};
pub use layout::LayoutPolicy;
pub use topology::{AddressingMode, PaneOp, synthesize};
