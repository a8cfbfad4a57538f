//! Talking to the terminal through `osascript`.
//!
//! Two jobs: probing which addressing mode the installed terminal supports,
//! and running an assembled script.
//!
//! # Versions
//!
//! Releases before 2.9 have no per-session scripting handles, so panes there
//! can only be reached by keystrokes ([`AddressingMode::Relative`]). 2.9 and
//! later expose sessions directly ([`AddressingMode::Direct`]).

use crate::error::{PanescriptError, Result};
use crate::topology::AddressingMode;
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::debug;

const VERSION_SCRIPT: &str = "set iterm_version to (get version of application \"iTerm\")";

/// Oldest nightly build with working session scripting.
const MIN_NIGHTLY_BUILD: u64 = 20150805;

/// Major version used when the reported version can't be read.
const UNKNOWN_MAJOR: f64 = 99.0;

/// Run an AppleScript and return its standard output.
///
/// # Errors
///
/// Returns [`PanescriptError::Osascript`] if `osascript` can't be started or
/// exits with a failure status.
pub fn execute(script: &str) -> Result<String> {
    run_with_input(Command::new("osascript").arg("-"), script)
}

/// Spawn `command`, feed it `input` on stdin, and collect its stdout.
///
/// The child is always waited on, including when stdin can't be written.
fn run_with_input(command: &mut Command, input: &str) -> Result<String> {
    let mut child = command
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| PanescriptError::Osascript(e.to_string()))?;

    if let Some(mut stdin) = child.stdin.take() {
        if let Err(e) = stdin.write_all(input.as_bytes()) {
            drop(stdin);
            let _ = child.wait();
            return Err(PanescriptError::Osascript(e.to_string()));
        }
    }

    let output = child
        .wait_with_output()
        .map_err(|e| PanescriptError::Osascript(e.to_string()))?;

    if !output.status.success() {
        return Err(PanescriptError::Osascript(
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Ask the terminal for its version string.
pub fn version_string() -> Result<String> {
    execute(VERSION_SCRIPT)
}

/// Probe the installed terminal and pick an addressing mode.
pub fn probe_mode() -> Result<AddressingMode> {
    let version = version_string()?;
    debug!(version = %version, "probed terminal version");
    mode_for_version(&version)
}

/// Major version: the first three characters read as a number.
///
/// ```
/// use panescript::osascript::major_version;
///
/// assert_eq!(major_version("2.1.4"), 2.1);
/// assert_eq!(major_version("3.4.19"), 3.4);
/// assert_eq!(major_version("garbage"), 99.0);
/// ```
pub fn major_version(version: &str) -> f64 {
    version
        .get(..3)
        .and_then(|prefix| prefix.parse().ok())
        .unwrap_or(UNKNOWN_MAJOR)
}

/// Choose the addressing mode for a reported version string.
///
/// # Errors
///
/// Returns [`PanescriptError::UnsupportedBuild`] for nightly builds older
/// than the first one with working session scripting.
pub fn mode_for_version(version: &str) -> Result<AddressingMode> {
    // Compare in tenths so 2.9 isn't lost to float rounding.
    if (major_version(version) * 10.0).round() < 29.0 {
        return Ok(AddressingMode::Relative);
    }

    if version.contains("-nightly") {
        let build = version
            .split('.')
            .nth(2)
            .map(|bits| bits.replace("-nightly", ""))
            .and_then(|build| build.parse::<u64>().ok());
        if build.is_some_and(|build| build < MIN_NIGHTLY_BUILD) {
            return Err(PanescriptError::UnsupportedBuild(version.to_string()));
        }
    }

    Ok(AddressingMode::Direct)
}
