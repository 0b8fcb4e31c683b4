//! ui::output
//!
//! Diagnostics printed around tool runs.
//!
//! # Design
//!
//! Diagnostics go to stderr and respect the quiet flag; errors always
//! print. Captured tool output is passed through untouched regardless of
//! verbosity, since it is the reason the hook failed.

use std::fmt::Display;
use std::io::Write;

use crate::core::types::ResolvedFile;
use crate::env::ProcessOutput;

/// How much the hook says besides tool output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - errors and tool output only
    Quiet,
    /// Normal mode - adds warnings
    Normal,
    /// Debug mode - adds discovery and command details
    Debug,
}

impl Verbosity {
    /// `--quiet` beats `--debug`.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        match (quiet, debug) {
            (true, _) => Verbosity::Quiet,
            (false, true) => Verbosity::Debug,
            (false, false) => Verbosity::Normal,
        }
    }
}

/// Discovery and command details, shown with `--debug`.
pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity == Verbosity::Debug {
        eprintln!("[debug] {}", message);
    }
}

/// Printed even with `--quiet`.
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Suppressed by `--quiet`.
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// Forward a tool's captured output to our own streams.
///
/// Stdout is flushed before stderr is written so a group's output is not
/// interleaved with the next group's diagnostics.
pub fn passthrough(output: &ProcessOutput) {
    if !output.stdout.is_empty() {
        print!("{}", output.stdout);
        let _ = std::io::stdout().flush();
    }
    if !output.stderr.is_empty() {
        eprint!("{}", output.stderr);
    }
}

/// Indented file listing for skip warnings and debug summaries.
pub fn file_list(files: &[ResolvedFile]) -> String {
    let mut listing = String::new();
    for (i, file) in files.iter().enumerate() {
        if i > 0 {
            listing.push('\n');
        }
        listing.push_str("  ");
        listing.push_str(&file.path().to_string_lossy());
    }
    listing
}
