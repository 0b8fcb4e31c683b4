//! cli
//!
//! Command-line interface layer.
//!
//! # Responsibilities
//!
//! - Parse arguments and load configuration
//! - Pick the dispatch root and working directory
//! - Hand the file list to the [`crate::engine::Dispatcher`]
//! - Print diagnostics and pass captured tool output through
//!
//! The engine never prints; everything user-visible happens here.

pub mod args;

pub use args::Cli;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::config::Config;
use crate::core::paths;
use crate::core::types::ToolSpec;
use crate::engine::{DispatchReport, Dispatcher, RunOutcome};
use crate::git;
use crate::ui::output::{self, Verbosity};

/// Run the CLI application.
///
/// Returns the process exit code. Errors are configuration or startup
/// failures; tool failures are reported through the exit code.
pub fn run() -> Result<i32> {
    let cli = Cli::parse_args();
    let verbosity = cli.verbosity();

    let process_cwd = std::env::current_dir().context("failed to read current directory")?;
    let cwd = match &cli.cwd {
        Some(dir) => paths::resolve(dir, &process_cwd).into_path(),
        None => process_cwd,
    };
    let root = default_root(cli.root.as_deref(), &cwd);

    let config = Config::load(&root).context("failed to load configuration")?;
    for source in config.sources() {
        output::debug(format!("loaded config {}", source.display()), verbosity);
    }

    let tool = ToolSpec::new(cli.tool.clone(), cli.tool_args());
    let dispatcher = Dispatcher::from_config(&config, tool, &root, &cwd);

    if cli.files.is_empty() {
        output::error("no files to check");
        return Ok(dispatcher.run(&cli.files));
    }

    output::debug(
        format!(
            "root {}, {} environment(s) with {}",
            dispatcher.registry().root().display(),
            dispatcher.registry().locations().len(),
            dispatcher.registry().manifest()
        ),
        verbosity,
    );

    let report = dispatcher.dispatch(&cli.files);
    print_report(&dispatcher, &report, verbosity);
    Ok(report.exit_code())
}

/// Explicit `--root`, else the enclosing work tree, else `cwd`.
fn default_root(explicit: Option<&Path>, cwd: &Path) -> PathBuf {
    match explicit {
        Some(root) => paths::resolve(root, cwd).into_path(),
        None => git::work_dir(cwd).unwrap_or_else(|| cwd.to_path_buf()),
    }
}

fn print_report(dispatcher: &Dispatcher, report: &DispatchReport, verbosity: Verbosity) {
    let manifest = dispatcher.registry().manifest();
    let tool = dispatcher.tool();

    if !report.unmanaged.is_empty() {
        output::warn(
            format!(
                "skipping {} file(s) outside any {} project:\n{}",
                report.unmanaged.len(),
                manifest,
                output::file_list(&report.unmanaged)
            ),
            verbosity,
        );
    }
    if report.groups.is_empty() {
        output::error(format!(
            "none of the given files belong to a {} project",
            manifest
        ));
        return;
    }

    for entry in &report.groups {
        let env_dir = &entry.group.env_dir;
        output::debug(
            format!(
                "{} in {}:\n{}",
                tool,
                env_dir,
                output::file_list(&entry.group.files)
            ),
            verbosity,
        );

        match &entry.outcome {
            RunOutcome::NotInstalled => output::error(format!(
                "{} is not installed in the environment at {}",
                tool, env_dir
            )),
            RunOutcome::Ran(result) => {
                output::passthrough(result);
                match result.code {
                    Some(0) => {}
                    Some(code) => output::debug(
                        format!("{} exited with {} in {}", tool, code, env_dir),
                        verbosity,
                    ),
                    None => output::error(format!(
                        "{} was terminated by a signal in {}",
                        tool, env_dir
                    )),
                }
            }
            RunOutcome::LaunchFault(reason) => output::error(format!(
                "could not run {} in {}: {}",
                tool, env_dir, reason
            )),
        }
    }
}
