//! git
//!
//! Work-tree discovery for the default dispatch root.
//!
//! Pre-commit runs hooks from the top of the work tree, but the binary can
//! also be invoked by hand from a subdirectory. The enclosing work tree is
//! the natural root for manifest discovery in both cases.
//!
//! No other module imports `git2`.

use std::path::{Path, PathBuf};

use git2::Repository;

/// Top directory of the work tree containing `start`.
///
/// Returns `None` outside a repository and for bare repositories.
pub fn work_dir(start: &Path) -> Option<PathBuf> {
    let repo = Repository::discover(start).ok()?;
    let dir = repo.workdir()?;
    Some(dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf()))
}
