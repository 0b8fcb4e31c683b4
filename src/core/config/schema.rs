//! core::config::schema
//!
//! Configuration schema types.
//!
//! Both the global and the project file share one schema; every field is
//! optional so a project file can override a single value.
//!
//! # Example
//!
//! ```toml
//! manifest = "Pipfile"
//! ignore_dirs = [".git", "node_modules"]
//!
//! [manager]
//! program = "pipenv"
//! run_args = ["run"]
//! probe_args = ["--version"]
//! ```

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Hook configuration file contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct HookConfig {
    /// File name that marks an environment root
    pub manifest: Option<String>,

    /// Directory names skipped during manifest discovery
    pub ignore_dirs: Option<Vec<String>>,

    /// Environment manager settings
    pub manager: Option<ManagerConfig>,
}

impl HookConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(manifest) = &self.manifest {
            if manifest.is_empty() {
                return Err(ConfigError::InvalidValue(
                    "manifest name cannot be empty".to_string(),
                ));
            }
            if manifest.contains('/') || manifest.contains('\\') {
                return Err(ConfigError::InvalidValue(format!(
                    "manifest '{}' must be a file name, not a path",
                    manifest
                )));
            }
        }

        if let Some(manager) = &self.manager {
            manager.validate()?;
        }

        Ok(())
    }

    /// Overlay `other` on top of `self`, field by field.
    pub fn merged_with(self, other: HookConfig) -> HookConfig {
        HookConfig {
            manifest: other.manifest.or(self.manifest),
            ignore_dirs: other.ignore_dirs.or(self.ignore_dirs),
            manager: match (self.manager, other.manager) {
                (Some(base), Some(over)) => Some(base.merged_with(over)),
                (base, over) => over.or(base),
            },
        }
    }
}

/// Environment manager command settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ManagerConfig {
    /// Manager executable (default: "pipenv")
    pub program: Option<String>,

    /// Arguments placed between the program and the wrapped command (default: ["run"])
    pub run_args: Option<Vec<String>>,

    /// Arguments appended to the tool name for installation checks (default: ["--version"])
    pub probe_args: Option<Vec<String>>,
}

impl ManagerConfig {
    /// Validate the manager settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(program) = &self.program {
            if program.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "manager program cannot be empty".to_string(),
                ));
            }
        }
        Ok(())
    }

    fn merged_with(self, other: ManagerConfig) -> ManagerConfig {
        ManagerConfig {
            program: other.program.or(self.program),
            run_args: other.run_args.or(self.run_args),
            probe_args: other.probe_args.or(self.probe_args),
        }
    }
}
