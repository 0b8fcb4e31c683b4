//! engine::grouper
//!
//! Partition input files by controlling environment.
//!
//! # Invariants
//!
//! - Every grouped file has exactly one controlling environment: the
//!   nearest ancestor directory that is a discovered manifest location
//! - Groups appear in order of first occurrence among the input files
//! - Files keep their input order within a group
//! - Environments without any matching file are absent
//! - Files with no controlling environment are reported as unmanaged, not
//!   errors

use std::collections::HashMap;
use std::path::Path;

use crate::core::paths;
use crate::core::types::{ManifestLocation, ResolvedFile};

use super::registry::EnvironmentRegistry;

/// Files sharing one controlling environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentGroup {
    /// Environment root.
    pub env_dir: ManifestLocation,
    /// Files in input order.
    pub files: Vec<ResolvedFile>,
}

/// Result of grouping a file list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grouping {
    groups: Vec<EnvironmentGroup>,
    unmanaged: Vec<ResolvedFile>,
}

impl Grouping {
    /// Groups in first-occurrence order.
    pub fn groups(&self) -> &[EnvironmentGroup] {
        &self.groups
    }

    /// Files that no environment controls.
    pub fn unmanaged(&self) -> &[ResolvedFile] {
        &self.unmanaged
    }

    /// Number of environments with at least one file.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// True when no file belongs to any environment.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Files controlled by the environment at `env_dir`.
    pub fn get(&self, env_dir: &Path) -> Option<&[ResolvedFile]> {
        self.groups
            .iter()
            .find(|g| g.env_dir.path() == env_dir)
            .map(|g| g.files.as_slice())
    }

    /// Split into groups and unmanaged files.
    pub fn into_parts(self) -> (Vec<EnvironmentGroup>, Vec<ResolvedFile>) {
        (self.groups, self.unmanaged)
    }
}

/// Group `files` by controlling environment.
///
/// Relative paths are resolved against `cwd`. Discovery runs on first use
/// of the registry and is reused afterwards.
pub fn group<S: AsRef<Path>>(
    files: &[S],
    registry: &EnvironmentRegistry,
    cwd: &Path,
) -> Grouping {
    let known = registry.locations();
    let mut groups: Vec<EnvironmentGroup> = Vec::new();
    let mut slots: HashMap<&ManifestLocation, usize> = HashMap::new();
    let mut unmanaged = Vec::new();

    for raw in files {
        let file = paths::resolve(raw, cwd);
        let Some(env_dir) = paths::nearest_manifest_dir(&file, known) else {
            unmanaged.push(file);
            continue;
        };

        let slot = *slots.entry(env_dir).or_insert_with(|| {
            groups.push(EnvironmentGroup {
                env_dir: env_dir.clone(),
                files: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].files.push(file);
    }

    Grouping { groups, unmanaged }
}
