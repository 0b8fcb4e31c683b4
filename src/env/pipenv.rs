//! env::pipenv
//!
//! Pipenv-backed environment manager.
//!
//! # Commands
//!
//! - Wrapped: `<program> <run_args...> <argv...>` (default `pipenv run ...`),
//!   with `PIPENV_PIPFILE` pointing at the environment's manifest and
//!   `PIPENV_IGNORE_VIRTUALENVS=1`, so an activated virtualenv of the caller
//!   is not reused for every project
//! - Direct: `<argv...>`
//!
//! Both run with the environment directory as the child's working directory.
//!
//! # Ambient Detection
//!
//! Pipenv exports `PIPENV_ACTIVE=1` inside `pipenv shell` and `pipenv run`.
//! The values are captured once in [`Ambient`] so the manager never reads
//! process environment mid-dispatch.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::traits::{EnvError, EnvManager, ProcessOutput};
use crate::core::config::Config;

/// Snapshot of the ambient Pipenv state of this process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ambient {
    /// `PIPENV_ACTIVE` was set to `1`.
    pub active: bool,
    /// Value of `PIPENV_PIPFILE`, if set.
    pub pipfile: Option<PathBuf>,
}

impl Ambient {
    /// Capture the current process environment.
    pub fn from_env() -> Self {
        Self {
            active: std::env::var("PIPENV_ACTIVE").is_ok_and(|v| v == "1"),
            pipfile: std::env::var_os("PIPENV_PIPFILE").map(PathBuf::from),
        }
    }
}

/// Runs commands through `pipenv run` (or a configured equivalent).
#[derive(Debug, Clone)]
pub struct PipenvManager {
    program: String,
    run_args: Vec<String>,
    manifest: String,
    ambient: Ambient,
}

impl PipenvManager {
    /// Create a manager from explicit settings.
    pub fn new(
        program: impl Into<String>,
        run_args: Vec<String>,
        manifest: impl Into<String>,
        ambient: Ambient,
    ) -> Self {
        Self {
            program: program.into(),
            run_args,
            manifest: manifest.into(),
            ambient,
        }
    }

    /// Create a manager from loaded configuration.
    pub fn from_config(config: &Config, ambient: Ambient) -> Self {
        Self::new(
            config.manager_program(),
            config.run_args(),
            config.manifest(),
            ambient,
        )
    }
}

impl EnvManager for PipenvManager {
    fn is_active(&self, env_dir: &Path) -> bool {
        if !self.ambient.active {
            return false;
        }
        match &self.ambient.pipfile {
            None => true,
            Some(pipfile) => {
                let pipfile = pipfile.canonicalize().unwrap_or_else(|_| pipfile.clone());
                pipfile.parent() == Some(env_dir)
            }
        }
    }

    fn run_in(&self, env_dir: &Path, argv: &[OsString]) -> Result<ProcessOutput, EnvError> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.run_args)
            .args(argv)
            .current_dir(env_dir)
            .env("PIPENV_PIPFILE", env_dir.join(&self.manifest))
            .env("PIPENV_IGNORE_VIRTUALENVS", "1");
        spawn(command, &self.program)
    }

    fn run_direct(&self, env_dir: &Path, argv: &[OsString]) -> Result<ProcessOutput, EnvError> {
        let Some((program, args)) = argv.split_first() else {
            return Err(EnvError::NotFound {
                program: String::new(),
            });
        };
        let mut command = Command::new(program);
        command.args(args).current_dir(env_dir);
        spawn(command, &program.to_string_lossy())
    }
}

/// Run a prepared command to completion, capturing its output.
fn spawn(mut command: Command, program: &str) -> Result<ProcessOutput, EnvError> {
    match command.output() {
        Ok(output) => Ok(ProcessOutput::from(output)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(EnvError::NotFound {
            program: program.to_string(),
        }),
        Err(source) => Err(EnvError::Launch {
            program: program.to_string(),
            source,
        }),
    }
}
