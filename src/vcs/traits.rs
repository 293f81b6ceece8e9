//! vcs::traits
//!
//! The backend-neutral view of a repository that link building needs.
//!
//! # Design
//!
//! A [`RepoInfo`] is opened for one repository root; root resolution happens
//! when the backend is constructed (see [`super::discover`]). Every query is
//! synchronous and read-only.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::git::GitError;

/// Errors from repository queries.
#[derive(Debug, Error)]
pub enum RepoError {
    /// No repository contains the path.
    #[error("{} is not inside a git or mercurial repository", path.display())]
    NotARepo {
        /// The path that was searched
        path: PathBuf,
    },

    /// The path is not under the repository root.
    #[error("{} is outside the repository at {}", path.display(), root.display())]
    OutsideRoot {
        /// The offending path
        path: PathBuf,
        /// The repository root
        root: PathBuf,
    },

    /// The working directory has no revision to link to yet.
    #[error("the {backend} repository has no commits yet")]
    NoRevision {
        /// Backend name
        backend: &'static str,
    },

    /// A Git operation failed.
    #[error(transparent)]
    Git(#[from] GitError),

    /// An `hg` invocation failed.
    #[error("hg {command} failed: {message}")]
    Hg {
        /// The subcommand that failed
        command: String,
        /// Captured stderr or spawn error
        message: String,
    },
}

/// Read-only repository queries used to build a permalink.
pub trait RepoInfo {
    /// Short backend name for messages (`git`, `hg`).
    fn backend(&self) -> &'static str;

    /// Repository root (canonical).
    fn root(&self) -> &Path;

    /// Name of the default remote, if the repository has one.
    fn default_remote(&self) -> Result<Option<String>, RepoError>;

    /// URL of a remote. `Ok(None)` means the remote is not configured.
    fn remote_url(&self, name: &str) -> Result<Option<String>, RepoError>;

    /// Identifier of the checked-out revision, suitable for a permalink.
    fn working_revision(&self) -> Result<String, RepoError>;

    /// Whether a repo-relative path is under version control.
    fn is_tracked(&self, relative: &str) -> Result<bool, RepoError>;

    /// Express a path relative to the root, `/`-separated.
    fn relative_path(&self, path: &Path) -> Result<String, RepoError>;
}
