//! engine::registry
//!
//! Discovery of environment roots under a checkout.
//!
//! # Discovery Rules
//!
//! - A directory is an environment root when it directly contains a file
//!   named like the configured manifest (existence only, never parsed)
//! - The scan has no depth limit
//! - Symlinked directories are not followed, so link cycles cannot recurse
//! - Directories named in `ignore_dirs` are pruned (default: `.git`)
//! - Unreadable entries are skipped; a missing root yields no environments
//!
//! # Caching
//!
//! [`EnvironmentRegistry::locations`] scans once and keeps the result for
//! the registry's lifetime. [`EnvironmentRegistry::discover`] always rescans.

use std::cell::OnceCell;
use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::core::types::ManifestLocation;

/// Set of discovered environment roots below one root directory.
#[derive(Debug)]
pub struct EnvironmentRegistry {
    root: PathBuf,
    manifest: String,
    ignore_dirs: Vec<String>,
    locations: OnceCell<HashSet<ManifestLocation>>,
}

impl EnvironmentRegistry {
    /// Create a registry for `root`.
    ///
    /// `root` should already be absolute and normalized (see
    /// [`crate::core::paths::resolve`]) so discovered directories compare
    /// equal to resolved file ancestors.
    pub fn new(
        root: impl Into<PathBuf>,
        manifest: impl Into<String>,
        ignore_dirs: Vec<String>,
    ) -> Self {
        Self {
            root: root.into(),
            manifest: manifest.into(),
            ignore_dirs,
            locations: OnceCell::new(),
        }
    }

    /// The directory that is scanned.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Manifest file name that marks an environment root.
    pub fn manifest(&self) -> &str {
        &self.manifest
    }

    /// Scan the root for manifests and return their directories.
    pub fn discover(&self) -> HashSet<ManifestLocation> {
        let manifest = OsStr::new(&self.manifest);
        WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| !self.is_ignored(entry))
            .filter_map(Result::ok)
            .filter(|entry| !entry.file_type().is_dir() && entry.file_name() == manifest)
            .filter_map(|entry| entry.path().parent().map(ManifestLocation::new))
            .collect()
    }

    /// Discovered locations, scanning on first use.
    pub fn locations(&self) -> &HashSet<ManifestLocation> {
        self.locations.get_or_init(|| self.discover())
    }

    fn is_ignored(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && self
                .ignore_dirs
                .iter()
                .any(|name| entry.file_name() == OsStr::new(name))
    }
}
