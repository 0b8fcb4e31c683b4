//! engine::runner
//!
//! Runs the tool once per environment group.
//!
//! # Failure Taxonomy
//!
//! Each group run ends in a [`RunOutcome`]:
//!
//! - `NotInstalled` - the installation probe failed; the tool was not run
//! - `Ran` - the tool ran; its exit status is the group's result
//! - `LaunchFault` - launching failed or the manager panicked
//!
//! Nothing here returns an error. Every outcome maps to an exit code via
//! [`RunOutcome::exit_code`].
//!
//! # Direct vs Wrapped
//!
//! When the manager reports the process already runs inside the target
//! environment, commands run directly; otherwise they go through the
//! manager's "run inside environment" primitive.

use std::ffi::OsString;
use std::panic::{self, AssertUnwindSafe};

use crate::core::types::{InvocationResult, ManifestLocation, ResolvedFile, ToolSpec, FAILURE};
use crate::env::{EnvManager, ProcessOutput};

/// Result of running the tool for one environment group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The tool is not available in the environment.
    NotInstalled,
    /// The tool ran to completion.
    Ran(ProcessOutput),
    /// The tool could not be launched.
    LaunchFault(String),
}

impl RunOutcome {
    /// Exit code for this outcome.
    ///
    /// Signal termination and every non-`Ran` outcome map to [`FAILURE`].
    pub fn exit_code(&self) -> InvocationResult {
        match self {
            RunOutcome::Ran(output) => output.code.unwrap_or(FAILURE),
            RunOutcome::NotInstalled | RunOutcome::LaunchFault(_) => FAILURE,
        }
    }

    /// Whether the group passed.
    pub fn is_success(&self) -> bool {
        self.exit_code() == 0
    }
}

/// Checks tool availability and runs the tool inside environments.
pub struct ToolRunner {
    manager: Box<dyn EnvManager>,
    probe_args: Vec<String>,
}

impl std::fmt::Debug for ToolRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRunner")
            .field("probe_args", &self.probe_args)
            .finish_non_exhaustive()
    }
}

impl ToolRunner {
    /// Create a runner.
    pub fn new(manager: Box<dyn EnvManager>, probe_args: Vec<String>) -> Self {
        Self {
            manager,
            probe_args,
        }
    }

    /// Whether `tool` can be run inside the environment at `env_dir`.
    ///
    /// A probe that exits nonzero, cannot be launched, or panics counts as
    /// not installed.
    pub fn is_tool_installed(&self, env_dir: &ManifestLocation, tool: &ToolSpec) -> bool {
        let argv = tool.probe_command(&self.probe_args);
        matches!(self.launch(env_dir, &argv), Ok(output) if output.success())
    }

    /// Run `tool` on `files` inside the environment at `env_dir`.
    pub fn run_group(
        &self,
        env_dir: &ManifestLocation,
        files: &[ResolvedFile],
        tool: &ToolSpec,
    ) -> RunOutcome {
        if files.is_empty() {
            return RunOutcome::LaunchFault("no files to check".to_string());
        }
        if !self.is_tool_installed(env_dir, tool) {
            return RunOutcome::NotInstalled;
        }

        let argv = tool.command_for(files);
        match self.launch(env_dir, &argv) {
            Ok(output) => RunOutcome::Ran(output),
            Err(fault) => RunOutcome::LaunchFault(fault),
        }
    }

    fn launch(
        &self,
        env_dir: &ManifestLocation,
        argv: &[OsString],
    ) -> Result<ProcessOutput, String> {
        let dir = env_dir.path();
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            if self.manager.is_active(dir) {
                self.manager.run_direct(dir, argv)
            } else {
                self.manager.run_in(dir, argv)
            }
        }));

        match result {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(err)) => Err(err.to_string()),
            Err(_) => Err(format!("environment manager panicked in {}", env_dir)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::mock::{MockEnvManager, MockResponse};

    fn env_dir() -> ManifestLocation {
        ManifestLocation::new("/repo/project1")
    }

    fn files() -> Vec<ResolvedFile> {
        vec![
            ResolvedFile::new("/repo/project1/src/file1.py"),
            ResolvedFile::new("/repo/project1/src/file2.py"),
        ]
    }

    fn runner(mock: &MockEnvManager) -> ToolRunner {
        ToolRunner::new(Box::new(mock.clone()), vec!["--version".to_string()])
    }

    fn ruff() -> ToolSpec {
        ToolSpec::new("ruff", Vec::new())
    }

    #[test]
    fn installed_probe_runs_directly_when_active() {
        let mock = MockEnvManager::new().with_active(true);
        assert!(runner(&mock).is_tool_installed(&env_dir(), &ruff()));

        let calls = mock.invocations();
        assert_eq!(calls.len(), 1);
        assert!(!calls[0].wrapped);
        assert_eq!(calls[0].argv, ["ruff", "--version"]);
    }

    #[test]
    fn installed_probe_is_wrapped_when_inactive() {
        let mock = MockEnvManager::new();
        assert!(runner(&mock).is_tool_installed(&env_dir(), &ruff()));

        let calls = mock.invocations();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].wrapped);
        assert_eq!(calls[0].env_dir, env_dir().path());
    }

    #[test]
    fn failing_probe_means_not_installed() {
        let mock = MockEnvManager::new().with_probe_response(MockResponse::Exit(1));
        assert!(!runner(&mock).is_tool_installed(&env_dir(), &ruff()));
    }

    #[test]
    fn missing_executable_means_not_installed() {
        let mock = MockEnvManager::new().with_probe_response(MockResponse::NotFound);
        assert!(!runner(&mock).is_tool_installed(&env_dir(), &ruff()));
    }

    #[test]
    fn panicking_probe_means_not_installed() {
        let mock = MockEnvManager::new().with_probe_response(MockResponse::Panic);
        assert!(!runner(&mock).is_tool_installed(&env_dir(), &ruff()));
    }

    #[test]
    fn run_group_success() {
        let mock = MockEnvManager::new();
        let outcome = runner(&mock).run_group(&env_dir(), &files(), &ruff());

        assert_eq!(outcome, RunOutcome::Ran(ProcessOutput::exited(0)));
        assert!(outcome.is_success());
        let runs = mock.tool_runs();
        assert_eq!(runs.len(), 1);
        assert_eq!(
            runs[0].argv,
            [
                "ruff",
                "/repo/project1/src/file1.py",
                "/repo/project1/src/file2.py"
            ]
        );
    }

    #[test]
    fn configured_probe_args_are_not_counted_as_runs() {
        let probe_args = vec!["-c".to_string(), "exit 0".to_string()];
        let mock = MockEnvManager::new()
            .with_probe_args(&probe_args)
            .with_run_response(MockResponse::Exit(5));
        let runner = ToolRunner::new(Box::new(mock.clone()), probe_args);

        let outcome = runner.run_group(&env_dir(), &files(), &ToolSpec::new("sh", Vec::new()));
        assert_eq!(outcome.exit_code(), 5);

        let calls = mock.invocations();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].argv, ["sh", "-c", "exit 0"]);
        assert!(calls[0].is_probe());
        assert_eq!(mock.tool_runs().len(), 1);
    }

    #[test]
    fn run_group_passes_tool_args_before_files() {
        let mock = MockEnvManager::new();
        let tool = ToolSpec::new("ruff", vec!["--fix".to_string()]);
        runner(&mock).run_group(&env_dir(), &files()[..1], &tool);

        let runs = mock.tool_runs();
        assert_eq!(runs[0].argv, ["ruff", "--fix", "/repo/project1/src/file1.py"]);
    }

    #[test]
    fn run_group_propagates_exit_code_verbatim() {
        let mock = MockEnvManager::new().with_run_response(MockResponse::Exit(7));
        let outcome = runner(&mock).run_group(&env_dir(), &files(), &ruff());
        assert_eq!(outcome.exit_code(), 7);
    }

    #[test]
    fn not_installed_skips_the_tool() {
        let mock = MockEnvManager::new().with_probe_response(MockResponse::NotFound);
        let outcome = runner(&mock).run_group(&env_dir(), &files(), &ruff());

        assert_eq!(outcome, RunOutcome::NotInstalled);
        assert_eq!(outcome.exit_code(), FAILURE);
        assert!(mock.tool_runs().is_empty());
    }

    #[test]
    fn launch_error_is_a_fault() {
        let mock = MockEnvManager::new().with_run_response(MockResponse::LaunchError);
        let outcome = runner(&mock).run_group(&env_dir(), &files(), &ruff());

        assert!(matches!(outcome, RunOutcome::LaunchFault(_)));
        assert_eq!(outcome.exit_code(), FAILURE);
    }

    #[test]
    fn panic_during_run_is_a_fault() {
        let mock = MockEnvManager::new().with_run_response(MockResponse::Panic);
        let outcome = runner(&mock).run_group(&env_dir(), &files(), &ruff());
        assert!(matches!(outcome, RunOutcome::LaunchFault(_)));
    }

    #[test]
    fn signal_termination_fails() {
        let mock = MockEnvManager::new().with_run_response(MockResponse::Signal);
        let outcome = runner(&mock).run_group(&env_dir(), &files(), &ruff());

        assert!(matches!(outcome, RunOutcome::Ran(_)));
        assert_eq!(outcome.exit_code(), FAILURE);
    }

    #[test]
    fn empty_batch_is_not_run() {
        let mock = MockEnvManager::new();
        let outcome = runner(&mock).run_group(&env_dir(), &[], &ruff());

        assert!(!outcome.is_success());
        assert!(mock.invocations().is_empty());
    }
}
