//! env::mock
//!
//! Mock environment manager for deterministic testing.
//!
//! # Design
//!
//! The mock records every launch and answers from a small script:
//! installation probes (`<tool> <probe args>`, `--version` unless set with
//! [`MockEnvManager::with_probe_args`]) get the probe response, every other
//! command gets the per-directory run response or the default one. Whether a
//! launch was a probe is decided when it is recorded.
//!
//! # Example
//!
//! ```
//! use pipenv_tools_hook::env::mock::{MockEnvManager, MockResponse};
//! use pipenv_tools_hook::env::EnvManager;
//! use std::ffi::OsString;
//! use std::path::Path;
//!
//! let env = MockEnvManager::new().with_run_response(MockResponse::Exit(1));
//! let argv = vec![OsString::from("ruff"), OsString::from("a.py")];
//! let output = env.run_in(Path::new("/repo/project1"), &argv).unwrap();
//!
//! assert_eq!(output.code, Some(1));
//! assert_eq!(env.invocations().len(), 1);
//! ```

use std::collections::HashMap;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use super::traits::{EnvError, EnvManager, ProcessOutput};

/// Probe arguments the mock recognizes unless told otherwise.
pub const DEFAULT_PROBE_ARGS: &[&str] = &["--version"];

/// Scripted answer for a launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockResponse {
    /// Process exits with this code.
    Exit(i32),
    /// Process is killed by a signal.
    Signal,
    /// Executable cannot be found.
    NotFound,
    /// Launch fails with a non-`NotFound` I/O error.
    LaunchError,
    /// The manager itself panics.
    Panic,
}

/// One recorded launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Environment directory passed to the manager.
    pub env_dir: PathBuf,
    /// Command line.
    pub argv: Vec<OsString>,
    /// `true` for `run_in`, `false` for `run_direct`.
    pub wrapped: bool,
    /// Matched the configured probe arguments.
    pub probe: bool,
}

impl Invocation {
    /// Whether this launch was an installation probe.
    pub fn is_probe(&self) -> bool {
        self.probe
    }
}

/// Mock environment manager for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share state.
#[derive(Debug, Clone)]
pub struct MockEnvManager {
    inner: Arc<Mutex<MockEnvInner>>,
}

#[derive(Debug)]
struct MockEnvInner {
    active: bool,
    probe_args: Vec<OsString>,
    probe: MockResponse,
    run_default: MockResponse,
    run_by_dir: HashMap<PathBuf, MockResponse>,
    invocations: Vec<Invocation>,
}

impl Default for MockEnvManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEnvManager {
    /// Create a mock where every command exits 0 and no environment is active.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockEnvInner {
                active: false,
                probe_args: DEFAULT_PROBE_ARGS.iter().map(OsString::from).collect(),
                probe: MockResponse::Exit(0),
                run_default: MockResponse::Exit(0),
                run_by_dir: HashMap::new(),
                invocations: Vec::new(),
            })),
        }
    }

    /// Report every environment as already active.
    pub fn with_active(self, active: bool) -> Self {
        self.lock().active = active;
        self
    }

    /// Treat `<tool> <args...>` as the installation probe.
    ///
    /// Must match the probe arguments of the runner under test.
    pub fn with_probe_args<S: AsRef<OsStr>>(self, args: &[S]) -> Self {
        self.lock().probe_args = args.iter().map(|a| a.as_ref().to_os_string()).collect();
        self
    }

    /// Set the response to installation probes.
    pub fn with_probe_response(self, response: MockResponse) -> Self {
        self.lock().probe = response;
        self
    }

    /// Set the default response to tool runs.
    pub fn with_run_response(self, response: MockResponse) -> Self {
        self.lock().run_default = response;
        self
    }

    /// Set the response to tool runs inside one environment.
    pub fn with_run_response_in(self, env_dir: impl Into<PathBuf>, response: MockResponse) -> Self {
        self.lock().run_by_dir.insert(env_dir.into(), response);
        self
    }

    /// All recorded launches, in order.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.lock().invocations.clone()
    }

    /// Recorded launches that were not installation probes.
    pub fn tool_runs(&self) -> Vec<Invocation> {
        self.invocations()
            .into_iter()
            .filter(|inv| !inv.is_probe())
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, MockEnvInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn launch(
        &self,
        env_dir: &Path,
        argv: &[OsString],
        wrapped: bool,
    ) -> Result<ProcessOutput, EnvError> {
        let response = {
            let mut inner = self.lock();
            let probe = !argv.is_empty() && argv[1..] == inner.probe_args[..];
            inner.invocations.push(Invocation {
                env_dir: env_dir.to_path_buf(),
                argv: argv.to_vec(),
                wrapped,
                probe,
            });
            if probe {
                inner.probe.clone()
            } else {
                inner
                    .run_by_dir
                    .get(env_dir)
                    .cloned()
                    .unwrap_or_else(|| inner.run_default.clone())
            }
        };

        let program = argv
            .first()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();
        match response {
            MockResponse::Exit(code) => Ok(ProcessOutput::exited(code)),
            MockResponse::Signal => Ok(ProcessOutput::default()),
            MockResponse::NotFound => Err(EnvError::NotFound { program }),
            MockResponse::LaunchError => Err(EnvError::Launch {
                program,
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            }),
            MockResponse::Panic => panic!("mock environment manager failure"),
        }
    }
}

impl EnvManager for MockEnvManager {
    fn is_active(&self, _env_dir: &Path) -> bool {
        self.lock().active
    }

    fn run_in(&self, env_dir: &Path, argv: &[OsString]) -> Result<ProcessOutput, EnvError> {
        self.launch(env_dir, argv, true)
    }

    fn run_direct(&self, env_dir: &Path, argv: &[OsString]) -> Result<ProcessOutput, EnvError> {
        self.launch(env_dir, argv, false)
    }
}
