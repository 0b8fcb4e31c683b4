//! core::config
//!
//! Configuration schema and loading.
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Project config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Location
//!
//! 1. `$PIPENV_TOOLS_HOOK_CONFIG` if set (a missing file means no global config)
//! 2. Otherwise `<config dir>/pipenv-tools-hook/config.toml`
//!
//! # Project Config Location
//!
//! `<root>/.pipenv-tools-hook.toml`
//!
//! # Example
//!
//! ```no_run
//! use pipenv_tools_hook::core::config::Config;
//! use std::path::Path;
//!
//! let config = Config::load(Path::new("/path/to/checkout")).unwrap();
//! println!("Manifest: {}", config.manifest());
//! println!("Manager: {}", config.manager_program());
//! ```

pub mod schema;

pub use schema::{HookConfig, ManagerConfig};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming an explicit global config file.
pub const CONFIG_ENV_VAR: &str = "PIPENV_TOOLS_HOOK_CONFIG";

/// Project config file name, looked up at the dispatch root.
pub const PROJECT_CONFIG_FILE: &str = ".pipenv-tools-hook.toml";

const DEFAULT_MANIFEST: &str = "Pipfile";
const DEFAULT_PROGRAM: &str = "pipenv";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Merged configuration from all sources.
///
/// Accessors apply defaults for anything neither file sets.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Merged file contents (project over global)
    pub file: HookConfig,
    /// Paths of the files that were loaded, global first
    sources: Vec<PathBuf>,
}

impl Config {
    /// Load configuration for a dispatch rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed,
    /// or validated. Missing files are not an error.
    pub fn load(root: &Path) -> Result<Config, ConfigError> {
        Self::load_from(Self::global_config_path().as_deref(), root)
    }

    /// Load configuration with an explicit global config path.
    pub fn load_from(global_path: Option<&Path>, root: &Path) -> Result<Config, ConfigError> {
        let mut sources = Vec::new();
        let mut file = HookConfig::default();

        if let Some(path) = global_path.filter(|p| p.is_file()) {
            let global = Self::read_config(path)?;
            global.validate()?;
            file = file.merged_with(global);
            sources.push(path.to_path_buf());
        }

        let project_path = Self::project_config_path(root);
        if project_path.is_file() {
            let project = Self::read_config(&project_path)?;
            project.validate()?;
            file = file.merged_with(project);
            sources.push(project_path);
        }

        Ok(Config { file, sources })
    }

    /// Resolve the global config file location.
    ///
    /// Returns `None` only when no config directory can be determined.
    pub fn global_config_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("pipenv-tools-hook/config.toml"))
    }

    /// Get the project config path for a root.
    pub fn project_config_path(root: &Path) -> PathBuf {
        root.join(PROJECT_CONFIG_FILE)
    }

    /// Read and parse a config file.
    fn read_config(path: &Path) -> Result<HookConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Config files that contributed to this configuration.
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    // =========================================================================
    // Accessor methods with defaults
    // =========================================================================

    /// Manifest file name. Defaults to `Pipfile`.
    pub fn manifest(&self) -> &str {
        self.file.manifest.as_deref().unwrap_or(DEFAULT_MANIFEST)
    }

    /// Directory names skipped during discovery. Defaults to `[".git"]`.
    pub fn ignore_dirs(&self) -> Vec<String> {
        self.file
            .ignore_dirs
            .clone()
            .unwrap_or_else(|| vec![".git".to_string()])
    }

    /// Environment manager executable. Defaults to `pipenv`.
    pub fn manager_program(&self) -> &str {
        self.manager()
            .and_then(|m| m.program.as_deref())
            .unwrap_or(DEFAULT_PROGRAM)
    }

    /// Arguments between the manager program and the wrapped command.
    ///
    /// Defaults to `["run"]`.
    pub fn run_args(&self) -> Vec<String> {
        self.manager()
            .and_then(|m| m.run_args.clone())
            .unwrap_or_else(|| vec!["run".to_string()])
    }

    /// Arguments used to probe whether a tool is installed.
    ///
    /// Defaults to `["--version"]`.
    pub fn probe_args(&self) -> Vec<String> {
        self.manager()
            .and_then(|m| m.probe_args.clone())
            .unwrap_or_else(|| vec!["--version".to_string()])
    }

    fn manager(&self) -> Option<&ManagerConfig> {
        self.file.manager.as_ref()
    }
}
