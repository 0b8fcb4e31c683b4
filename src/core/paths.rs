//! core::paths
//!
//! Path normalization and nearest-manifest lookup.
//!
//! # Working Directory
//!
//! Relative inputs are resolved against an explicit `cwd` argument. Nothing in
//! this crate changes the process-wide current directory, so resolution is
//! safe to call from concurrent tests and the result never depends on who
//! called `chdir` last.
//!
//! # Example
//!
//! ```
//! use std::collections::HashSet;
//! use std::path::Path;
//! use pipenv_tools_hook::core::paths::nearest_manifest_dir;
//! use pipenv_tools_hook::core::types::{ManifestLocation, ResolvedFile};
//!
//! let known: HashSet<_> = [
//!     ManifestLocation::new("/repo"),
//!     ManifestLocation::new("/repo/services/api"),
//! ]
//! .into_iter()
//! .collect();
//!
//! let file = ResolvedFile::new("/repo/services/api/src/main.py");
//! let env = nearest_manifest_dir(&file, &known).unwrap();
//! assert_eq!(env.path(), Path::new("/repo/services/api"));
//! ```

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use super::types::{ManifestLocation, ResolvedFile};

/// Resolve a possibly-relative path against `cwd`.
///
/// Symlinks are resolved for every prefix that exists on disk, including
/// the ones a `..` steps out of; the remaining components are appended
/// lexically. The file itself does not need to exist.
pub fn resolve(path: impl AsRef<Path>, cwd: &Path) -> ResolvedFile {
    let path = path.as_ref();
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };
    ResolvedFile::new(normalize(&joined))
}

/// Find the controlling environment of `file`.
///
/// Walks upward from the file's parent directory and returns the first
/// directory present in `known`. The nearest ancestor wins when manifests
/// are nested.
pub fn nearest_manifest_dir<'a>(
    file: &ResolvedFile,
    known: &'a HashSet<ManifestLocation>,
) -> Option<&'a ManifestLocation> {
    file.path()
        .ancestors()
        .skip(1)
        .find_map(|dir| known.get(dir))
}

fn normalize(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }

    let collapsed = collapse_parents(path);
    let mut tail = Vec::new();
    let mut cursor = collapsed.as_path();
    while let Some(parent) = cursor.parent() {
        if let Some(name) = cursor.file_name() {
            tail.push(name.to_os_string());
        }
        if let Ok(mut base) = parent.canonicalize() {
            base.extend(tail.iter().rev());
            return base;
        }
        cursor = parent;
    }
    collapsed
}

/// Remove `.` and `..` components in order.
///
/// A `..` applies to the symlink-resolved prefix while that prefix exists,
/// so `link/..` is the parent of the link's target. Past the first missing
/// component, `..` just drops the previous component.
fn collapse_parents(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if let Ok(canonical) = out.canonicalize() {
                    out = canonical;
                }
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn canonical_tmp() -> (TempDir, PathBuf) {
        let dir = TempDir::new().expect("failed to create temp dir");
        let root = dir.path().canonicalize().unwrap();
        (dir, root)
    }

    fn known(dirs: &[&Path]) -> HashSet<ManifestLocation> {
        dirs.iter().map(|d| ManifestLocation::new(*d)).collect()
    }

    #[test]
    fn relative_path_resolves_against_cwd() {
        let (_tmp, root) = canonical_tmp();
        fs::create_dir_all(root.join("project1/src")).unwrap();
        fs::write(root.join("project1/src/file1.py"), "").unwrap();

        let resolved = resolve("project1/src/file1.py", &root);
        assert_eq!(resolved, root.join("project1/src/file1.py"));
    }

    #[test]
    fn absolute_path_ignores_cwd() {
        let (_tmp, root) = canonical_tmp();
        fs::write(root.join("a.py"), "").unwrap();

        let resolved = resolve(root.join("a.py"), Path::new("/somewhere/else"));
        assert_eq!(resolved, root.join("a.py"));
    }

    #[test]
    fn missing_file_keeps_its_name() {
        let (_tmp, root) = canonical_tmp();
        fs::create_dir(root.join("src")).unwrap();

        let resolved = resolve("src/not_yet.py", &root);
        assert_eq!(resolved, root.join("src/not_yet.py"));
    }

    #[test]
    fn missing_directories_are_appended_lexically() {
        let (_tmp, root) = canonical_tmp();

        let resolved = resolve("a/b/./c.py", &root);
        assert_eq!(resolved, root.join("a/b/c.py"));
    }

    #[test]
    fn parent_components_are_collapsed() {
        let (_tmp, root) = canonical_tmp();
        fs::create_dir_all(root.join("project1/src")).unwrap();

        let resolved = resolve("project1/src/../other.py", &root);
        assert_eq!(resolved, root.join("project1/other.py"));
    }

    #[cfg(unix)]
    #[test]
    fn parent_of_symlink_is_parent_of_its_target() {
        let (_tmp, root) = canonical_tmp();
        fs::create_dir_all(root.join("project1/src")).unwrap();
        fs::create_dir_all(root.join("project1/project2/src")).unwrap();
        fs::write(root.join("project1/project2/src/real.py"), "").unwrap();
        std::os::unix::fs::symlink(root.join("project1/src"), root.join("link")).unwrap();

        let existing = resolve("link/../project2/src/real.py", &root);
        let missing = resolve("link/../project2/src/gone.py", &root);

        assert_eq!(existing, root.join("project1/project2/src/real.py"));
        assert_eq!(missing, root.join("project1/project2/src/gone.py"));
        assert_eq!(existing.path().parent(), missing.path().parent());
    }

    #[cfg(unix)]
    #[test]
    fn parent_past_missing_directory_is_lexical() {
        let (_tmp, root) = canonical_tmp();
        fs::create_dir(root.join("real")).unwrap();
        std::os::unix::fs::symlink(root.join("real"), root.join("link")).unwrap();

        let resolved = resolve("link/missing/../new.py", &root);
        assert_eq!(resolved, root.join("real/new.py"));
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directories_are_resolved() {
        let (_tmp, root) = canonical_tmp();
        fs::create_dir(root.join("real")).unwrap();
        fs::write(root.join("real/a.py"), "").unwrap();
        std::os::unix::fs::symlink(root.join("real"), root.join("link")).unwrap();

        let resolved = resolve("link/a.py", &root);
        assert_eq!(resolved, root.join("real/a.py"));
    }

    #[test]
    fn nearest_finds_single_ancestor() {
        let known = known(&[Path::new("/repo/project1")]);
        let file = ResolvedFile::new("/repo/project1/src/pkg/mod.py");
        let found = nearest_manifest_dir(&file, &known).unwrap();
        assert_eq!(found.path(), Path::new("/repo/project1"));
    }

    #[test]
    fn nearest_prefers_inner_manifest() {
        let known = known(&[Path::new("/repo"), Path::new("/repo/inner")]);
        let file = ResolvedFile::new("/repo/inner/src/a.py");
        let found = nearest_manifest_dir(&file, &known).unwrap();
        assert_eq!(found.path(), Path::new("/repo/inner"));

        let outer_file = ResolvedFile::new("/repo/tools/b.py");
        let found = nearest_manifest_dir(&outer_file, &known).unwrap();
        assert_eq!(found.path(), Path::new("/repo"));
    }

    #[test]
    fn nearest_includes_files_own_directory() {
        let known = known(&[Path::new("/repo/project1")]);
        let file = ResolvedFile::new("/repo/project1/setup.py");
        assert!(nearest_manifest_dir(&file, &known).is_some());
    }

    #[test]
    fn nearest_returns_none_outside_any_environment() {
        let known = known(&[Path::new("/repo/project1"), Path::new("/repo/project2")]);
        let file = ResolvedFile::new("/repo/outside.py");
        assert!(nearest_manifest_dir(&file, &known).is_none());
    }

    #[test]
    fn nearest_never_matches_the_file_itself() {
        // A file named like an environment root is still governed by its parent.
        let known = known(&[Path::new("/repo/project1")]);
        let file = ResolvedFile::new("/repo/project1");
        assert!(nearest_manifest_dir(&file, &known).is_none());
    }
}
