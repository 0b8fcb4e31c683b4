//! env::traits
//!
//! Environment manager trait definition.
//!
//! # Design
//!
//! The dispatcher only needs three things from an environment manager:
//! whether the current process already runs inside a given environment,
//! a way to run a command inside an environment, and a way to run a command
//! directly. Every launch takes the environment directory explicitly and
//! uses it as the child's working directory.

use std::ffi::OsString;
use std::path::Path;
use std::process::Output;

use thiserror::Error;

/// Errors from launching a command.
#[derive(Debug, Error)]
pub enum EnvError {
    /// The executable could not be found.
    #[error("executable not found: {program}")]
    NotFound { program: String },

    /// Launching the process failed for another reason.
    #[error("failed to launch '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Captured result of a finished child process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, or `None` if the child was terminated by a signal.
    pub code: Option<i32>,
    /// Captured standard output (lossy UTF-8).
    pub stdout: String,
    /// Captured standard error (lossy UTF-8).
    pub stderr: String,
}

impl ProcessOutput {
    /// Output of a process that exited with `code` and printed nothing.
    pub fn exited(code: i32) -> Self {
        Self {
            code: Some(code),
            ..Default::default()
        }
    }

    /// Whether the process exited with status zero.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<Output> for ProcessOutput {
    fn from(output: Output) -> Self {
        Self {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// An isolated, directory-scoped execution context provider.
pub trait EnvManager: Send + Sync {
    /// Whether the current process already runs inside the environment
    /// rooted at `env_dir`.
    fn is_active(&self, env_dir: &Path) -> bool;

    /// Run `argv` inside the environment rooted at `env_dir`.
    fn run_in(&self, env_dir: &Path, argv: &[OsString]) -> Result<ProcessOutput, EnvError>;

    /// Run `argv` as-is, with `env_dir` as the working directory.
    fn run_direct(&self, env_dir: &Path, argv: &[OsString]) -> Result<ProcessOutput, EnvError>;
}
