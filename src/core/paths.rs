//! core::paths
//!
//! Centralized path handling for repository discovery and repo-relative paths.
//!
//! # Responsibilities
//!
//! - Locate the nearest repository marker (`.git` or `.hg`) above a path
//! - Express a file path relative to a repository root, `/`-separated
//! - Route the repo-scoped config file location
//!
//! # Example
//!
//! ```
//! use forgelink::core::paths::repo_relative;
//! use std::path::Path;
//!
//! assert_eq!(
//!     repo_relative(Path::new("/nowhere/repo"), Path::new("/nowhere/repo/src/a.rs")),
//!     Some("src/a.rs".to_string())
//! );
//! assert_eq!(repo_relative(Path::new("/nowhere/repo"), Path::new("/etc/hosts")), None);
//! ```

use std::path::{Component, Path, PathBuf};

/// Name of the repo-scoped config file, placed at the repository root.
pub const REPO_CONFIG_FILE: &str = ".forgelink.toml";

/// Version-control marker directories, in no particular precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoMarker {
    /// `.git` (directory, or file for worktrees and submodules)
    Git,
    /// `.hg`
    Mercurial,
}

/// Find the nearest ancestor of `start` (inclusive) holding a repo marker.
///
/// When one directory holds both markers, git wins.
pub fn find_repo_root(start: &Path) -> Option<(PathBuf, RepoMarker)> {
    let start = if start.is_file() {
        start.parent()?
    } else {
        start
    };

    start.ancestors().find_map(|dir| {
        if dir.join(".git").exists() {
            Some((dir.to_path_buf(), RepoMarker::Git))
        } else if dir.join(".hg").is_dir() {
            Some((dir.to_path_buf(), RepoMarker::Mercurial))
        } else {
            None
        }
    })
}

/// Express `path` relative to `root` with `/` separators.
///
/// Relative paths are joined onto `root`. `root` should be canonical;
/// the parent directory of `path` is canonicalized when it exists so
/// symlinked prefixes line up. The last component is kept as named, so a
/// symlinked file stays itself rather than turning into its target.
/// Returns `None` when `path` is not under `root`.
pub fn repo_relative(root: &Path, path: &Path) -> Option<String> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    };
    let absolute = canonical_parent(&absolute).unwrap_or(absolute);

    let rel = absolute.strip_prefix(root).ok()?;

    let mut parts = Vec::new();
    for component in rel.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::CurDir => {}
            // `..` left after a failed canonicalize may climb out of the root.
            _ => return None,
        }
    }

    Some(parts.join("/"))
}

/// Canonicalize everything but the last component of `path`.
fn canonical_parent(path: &Path) -> Option<PathBuf> {
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => Some(parent.canonicalize().ok()?.join(name)),
        _ => path.canonicalize().ok(),
    }
}

/// Path of the repo-scoped config file.
pub fn repo_config_path(root: &Path) -> PathBuf {
    root.join(REPO_CONFIG_FILE)
}
