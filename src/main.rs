//! Panescript CLI entry point.
//!
//! This binary provides the `panescript` command for building multi-pane
//! terminal windows from YAML layout files.

use clap::{CommandFactory, Parser};
use panescript::cli::Cli;
use panescript::error::Result;
use panescript::script::ScriptAssembler;
use panescript::{PanescriptError, loader, osascript};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr so `--debug` output stays clean; `RUST_LOG` overrides.
fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Main application logic.
fn run(cli: &Cli) -> Result<()> {
    let dirs = loader::layout_dirs()?;

    if cli.list {
        return print_listings(&dirs);
    }

    let cwd = std::env::current_dir()?;
    let path = match loader::resolve_layout_path(cli.name.as_deref(), cli.layout, &cwd, &dirs) {
        Err(PanescriptError::NoLayoutSpecified) => {
            Cli::command().print_help()?;
            std::process::exit(1);
        }
        other => other?,
    };

    if cli.edit {
        return loader::edit_layout(&path);
    }

    if cli.show {
        print!("{}", loader::read_layout(&path)?);
        return Ok(());
    }

    run_layout(cli, path, cwd)
}

/// Print every layout directory and the layouts in it.
fn print_listings(dirs: &[PathBuf]) -> Result<()> {
    for (dir, names) in loader::list_layouts(dirs)? {
        println!("{}", dir.display());
        for name in names {
            println!("  {}", name);
        }
    }
    Ok(())
}

/// Build the script for a layout file and run or print it.
fn run_layout(cli: &Cli, path: PathBuf, cwd: PathBuf) -> Result<()> {
    let settings = loader::load_settings()?;
    let document = loader::load_document(&path)?;

    // Mode precedence: CLI flag > settings > terminal probe
    let mode = match cli.mode.or(settings.defaults.mode) {
        Some(mode) => mode,
        None => osascript::probe_mode()?,
    };
    tracing::info!(?mode, path = %path.display(), "building layout");

    let mut assembler = ScriptAssembler::new(mode)
        .default_layout(settings.default_layout())
        .timing(settings.timing.clone());
    if cli.here {
        assembler = assembler.here(cwd);
    }

    let script = assembler.assemble(&document, &path)?;

    if cli.debug {
        print!("{}", script.pretty());
    } else {
        osascript::execute(&script.render())?;
    }

    Ok(())
}
