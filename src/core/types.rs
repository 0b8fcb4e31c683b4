//! core::types
//!
//! Strong types for the dispatch pipeline.
//!
//! # Types
//!
//! - [`ManifestLocation`] - A directory that contains an environment manifest
//! - [`ResolvedFile`] - An absolute, normalized path to a target file
//! - [`ToolSpec`] - The tool to run and its fixed leading arguments
//! - [`InvocationResult`] - Integer exit status, `0` meaning success
//!
//! # Example
//!
//! ```
//! use pipenv_tools_hook::core::types::{ResolvedFile, ToolSpec};
//!
//! let tool = ToolSpec::new("ruff", vec!["--fix".to_string()]);
//! let argv = tool.command_for(&[ResolvedFile::new("/repo/app/main.py")]);
//! assert_eq!(argv, ["ruff", "--fix", "/repo/app/main.py"]);
//! ```

use std::borrow::Borrow;
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

/// Integer exit status of a dispatch or of one group's tool run.
pub type InvocationResult = i32;

/// Exit status reported when every group succeeded.
pub const SUCCESS: InvocationResult = 0;

/// Generic failure status: usage errors, missing tools, launch faults.
pub const FAILURE: InvocationResult = 1;

/// An absolute directory known to contain an environment manifest.
///
/// Uniqueness is by directory path. Implements `Borrow<Path>` so sets of
/// locations can be probed with plain `&Path` values while walking ancestors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ManifestLocation(PathBuf);

impl ManifestLocation {
    /// Wrap a directory path.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self(dir.into())
    }

    /// The environment root directory.
    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl Borrow<Path> for ManifestLocation {
    fn borrow(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for ManifestLocation {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for ManifestLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// An absolute, normalized path to a target source file.
///
/// Built by [`crate::core::paths::resolve`]; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResolvedFile(PathBuf);

impl ResolvedFile {
    /// Wrap an already-resolved path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// The resolved path.
    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Consume into the underlying path.
    pub fn into_path(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for ResolvedFile {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl PartialEq<Path> for ResolvedFile {
    fn eq(&self, other: &Path) -> bool {
        self.0 == other
    }
}

impl PartialEq<PathBuf> for ResolvedFile {
    fn eq(&self, other: &PathBuf) -> bool {
        &self.0 == other
    }
}

impl fmt::Display for ResolvedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// The external tool to run and the arguments placed before the file list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSpec {
    name: String,
    args: Vec<String>,
}

impl ToolSpec {
    /// Create a tool spec.
    pub fn new(name: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// Executable name of the tool.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Extra arguments passed before the files.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Build `[name, ...args, ...files]`.
    pub fn command_for(&self, files: &[ResolvedFile]) -> Vec<OsString> {
        let mut argv = Vec::with_capacity(1 + self.args.len() + files.len());
        argv.push(OsString::from(&self.name));
        argv.extend(self.args.iter().map(OsString::from));
        argv.extend(files.iter().map(|f| f.path().as_os_str().to_os_string()));
        argv
    }

    /// Build `[name, ...probe_args]` for installation checks.
    pub fn probe_command(&self, probe_args: &[String]) -> Vec<OsString> {
        let mut argv = Vec::with_capacity(1 + probe_args.len());
        argv.push(OsString::from(&self.name));
        argv.extend(probe_args.iter().map(OsString::from));
        argv
    }
}

impl fmt::Display for ToolSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
