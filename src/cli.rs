//! Command-line interface for panescript.
//!
//! Parses arguments using clap and provides the [`Cli`] struct containing
//! all user-specified options.

use crate::topology::AddressingMode;
use clap::Parser;

/// Command-line arguments for panescript.
///
/// # Examples
///
/// ```bash
/// # Build the layout in ~/.panescript/dev.yml in a new tab
/// panescript dev
///
/// # Build ./panescript.yml in the current tab
/// panescript --here
///
/// # Print the generated script instead of running it
/// panescript --debug dev
///
/// # List all available layouts
/// panescript --list
/// ```
#[derive(Parser, Debug)]
#[command(name = "panescript")]
#[command(version)]
#[command(about = "Build multi-pane terminal windows from teamocil-style layout files")]
#[command(long_about = "Panescript reads a YAML layout describing windows and panes, \
    generates the AppleScript\nthat splits the terminal into that layout, and runs \
    each pane's commands.")]
pub struct Cli {
    /// Layout name, looked up in ~/.panescript then ~/.teamocil.
    ///
    /// With no name, ./panescript.yml is used.
    #[arg(value_name = "NAME")]
    pub name: Option<String>,

    /// Run in the current tab instead of opening a new one.
    #[arg(long)]
    pub here: bool,

    /// Treat NAME as a file path instead of a layout name.
    #[arg(long)]
    pub layout: bool,

    /// Open the layout file in $EDITOR.
    #[arg(long)]
    pub edit: bool,

    /// Print the layout file instead of running it.
    #[arg(long)]
    pub show: bool,

    /// List the available layouts.
    #[arg(long)]
    pub list: bool,

    /// Print the generated script instead of running it.
    #[arg(long)]
    pub debug: bool,

    /// Addressing mode to generate for, instead of probing the terminal.
    #[arg(long, value_name = "MODE", value_enum)]
    pub mode: Option<AddressingMode>,

    /// Log synthesis decisions to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_flag() {
        let cli = Cli::parse_from(["panescript", "--mode", "relative", "dev"]);
        assert_eq!(cli.mode, Some(AddressingMode::Relative));
        assert_eq!(cli.name.as_deref(), Some("dev"));
        assert!(Cli::parse_from(["panescript"]).mode.is_none());

        let cli = Cli::parse_from(["panescript", "--mode", "direct"]);
        assert_eq!(cli.mode, Some(AddressingMode::Direct));
    }

    #[test]
    fn test_rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["panescript", "--mode", "sideways"]).is_err());
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from(["panescript", "--here", "--debug", "--layout", "x.yml"]);
        assert!(cli.here && cli.debug && cli.layout);
        assert!(!cli.list && !cli.edit && !cli.show);
    }
}
