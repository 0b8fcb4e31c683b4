//! engine::dispatch
//!
//! Public entry point: group files, run the tool per group, aggregate.
//!
//! # Aggregation
//!
//! - Empty input fails without touching the filesystem or any environment
//! - Input where no file maps to an environment fails
//! - Otherwise the result is the first nonzero group code, or `0` when
//!   every group passed
//!
//! Groups run sequentially in first-occurrence order; each tool process is
//! awaited before the next group starts.

use std::path::{Path, PathBuf};

use crate::core::config::Config;
use crate::core::paths;
use crate::core::types::{InvocationResult, ResolvedFile, ToolSpec, FAILURE, SUCCESS};
use crate::env::{Ambient, PipenvManager};

use super::grouper::{self, EnvironmentGroup};
use super::registry::EnvironmentRegistry;
use super::runner::{RunOutcome, ToolRunner};

/// Outcome of one group's run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupReport {
    /// The group that ran.
    pub group: EnvironmentGroup,
    /// What happened.
    pub outcome: RunOutcome,
}

/// Everything a dispatch did, for callers that want diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Per-group outcomes, in execution order.
    pub groups: Vec<GroupReport>,
    /// Input files no environment controls.
    pub unmanaged: Vec<ResolvedFile>,
}

impl DispatchReport {
    /// Aggregated exit code.
    pub fn exit_code(&self) -> InvocationResult {
        if self.groups.is_empty() {
            return FAILURE;
        }
        self.groups
            .iter()
            .map(|g| g.outcome.exit_code())
            .find(|&code| code != SUCCESS)
            .unwrap_or(SUCCESS)
    }

    /// Whether every group passed.
    pub fn is_success(&self) -> bool {
        self.exit_code() == SUCCESS
    }
}

/// Runs a tool over files, one invocation per controlling environment.
#[derive(Debug)]
pub struct Dispatcher {
    tool: ToolSpec,
    registry: EnvironmentRegistry,
    runner: ToolRunner,
    cwd: PathBuf,
}

impl Dispatcher {
    /// Create a dispatcher from parts.
    ///
    /// `cwd` is the directory relative input paths are resolved against.
    pub fn new(
        tool: ToolSpec,
        registry: EnvironmentRegistry,
        runner: ToolRunner,
        cwd: impl Into<PathBuf>,
    ) -> Self {
        Self {
            tool,
            registry,
            runner,
            cwd: cwd.into(),
        }
    }

    /// Create a Pipenv-backed dispatcher from loaded configuration.
    ///
    /// `root` is resolved against `cwd` before discovery.
    pub fn from_config(config: &Config, tool: ToolSpec, root: &Path, cwd: &Path) -> Self {
        let root = paths::resolve(root, cwd).into_path();
        let registry = EnvironmentRegistry::new(root, config.manifest(), config.ignore_dirs());
        let manager = PipenvManager::from_config(config, Ambient::from_env());
        let runner = ToolRunner::new(Box::new(manager), config.probe_args());
        Self::new(tool, registry, runner, cwd)
    }

    /// The tool being dispatched.
    pub fn tool(&self) -> &ToolSpec {
        &self.tool
    }

    /// The environment registry.
    pub fn registry(&self) -> &EnvironmentRegistry {
        &self.registry
    }

    /// Run the tool and return the aggregated exit code.
    pub fn run<S: AsRef<Path>>(&self, files: &[S]) -> InvocationResult {
        self.dispatch(files).exit_code()
    }

    /// Run the tool and return the full report.
    pub fn dispatch<S: AsRef<Path>>(&self, files: &[S]) -> DispatchReport {
        if files.is_empty() {
            return DispatchReport::default();
        }

        let (groups, unmanaged) = grouper::group(files, &self.registry, &self.cwd).into_parts();
        let groups = groups
            .into_iter()
            .map(|group| {
                let outcome = self.runner.run_group(&group.env_dir, &group.files, &self.tool);
                GroupReport { group, outcome }
            })
            .collect();

        DispatchReport { groups, unmanaged }
    }
}
