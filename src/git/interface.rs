//! git::interface
//!
//! Git interface implementation using git2.
//!
//! This module provides the **single doorway** to all Git operations in
//! forgelink. All Git interactions flow through this interface, which
//! provides structured results and normalizes errors into typed failure
//! categories.
//!
//! # Error Handling
//!
//! Git errors are categorized into typed variants:
//! - [`GitError::NotARepo`]: Not inside a Git repository
//! - [`GitError::BareRepo`]: Repository has no working directory
//! - [`GitError::RefNotFound`]: Requested ref does not exist (e.g. unborn HEAD)
//! - [`GitError::OutsideWorkdir`]: Path is not inside the working directory
//!
//! # Example
//!
//! ```ignore
//! use forgelink::git::Git;
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("src/main.rs"))?;
//! println!("HEAD is at {}", git.head_oid()?);
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::paths::repo_relative;

/// Errors from Git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not inside a Git repository.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was searched
        path: PathBuf,
    },

    /// Repository is bare (no working directory).
    #[error("bare repository not supported")]
    BareRepo,

    /// Requested ref does not exist.
    #[error("ref not found: {refname}")]
    RefNotFound {
        /// The ref that was not found
        refname: String,
    },

    /// Path does not live under the working directory.
    #[error("{path} is outside the repository at {root}")]
    OutsideWorkdir {
        /// The offending path
        path: PathBuf,
        /// The working directory
        root: PathBuf,
    },

    /// Permission or filesystem error.
    #[error("repository access error: {message}")]
    AccessError {
        /// Description of the error
        message: String,
    },

    /// Internal git2 error.
    #[error("git error: {message}")]
    Internal {
        /// The error message
        message: String,
    },
}

impl GitError {
    /// Create a GitError from a git2::Error with richer context.
    fn from_git2(err: git2::Error, context: &str) -> Self {
        match err.code() {
            git2::ErrorCode::NotFound | git2::ErrorCode::UnbornBranch => GitError::RefNotFound {
                refname: context.to_string(),
            },
            git2::ErrorCode::Locked => GitError::AccessError {
                message: format!("repository is locked: {}", err.message()),
            },
            _ => GitError::Internal {
                message: format!("{}: {}", context, err.message()),
            },
        }
    }
}

/// The Git interface.
///
/// This is the **single point of interaction** with Git. No other module
/// should import `git2` directly.
pub struct Git {
    /// The underlying git2 repository
    repo: git2::Repository,
    /// Canonical working directory
    work_dir: PathBuf,
}

impl std::fmt::Debug for Git {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("path", &self.repo.path())
            .field("work_dir", &self.work_dir)
            .finish()
    }
}

impl Git {
    // =========================================================================
    // Repository Opening and Info
    // =========================================================================

    /// Open the repository containing `path`.
    ///
    /// `path` may be a file or a directory anywhere inside the working tree;
    /// discovery starts from the file's directory.
    ///
    /// # Errors
    ///
    /// - [`GitError::NotARepo`] if no repository is found
    /// - [`GitError::BareRepo`] if the repository has no working directory
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let start = if path.is_file() {
            path.parent().unwrap_or(path)
        } else {
            path
        };

        let repo = git2::Repository::discover(start).map_err(|_| GitError::NotARepo {
            path: path.to_path_buf(),
        })?;

        // Ensure it's not a bare repository
        if repo.is_bare() {
            return Err(GitError::BareRepo);
        }

        let work_dir = repo.workdir().ok_or(GitError::BareRepo)?;
        let work_dir = work_dir
            .canonicalize()
            .map_err(|e| GitError::AccessError {
                message: format!("{}: {}", work_dir.display(), e),
            })?;

        Ok(Self { repo, work_dir })
    }

    /// Get the working directory (canonicalized).
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    // =========================================================================
    // Revisions
    // =========================================================================

    /// Get the full HEAD commit id.
    ///
    /// # Errors
    ///
    /// - [`GitError::RefNotFound`] if HEAD is unborn (new repository)
    pub fn head_oid(&self) -> Result<String, GitError> {
        let head = self
            .repo
            .head()
            .map_err(|e| GitError::from_git2(e, "HEAD"))?;

        let oid = head
            .peel_to_commit()
            .map_err(|e| GitError::from_git2(e, "HEAD"))?
            .id();

        Ok(oid.to_string())
    }

    // =========================================================================
    // Paths and Tracking
    // =========================================================================

    /// Express `path` relative to the working directory, `/`-separated.
    ///
    /// Relative paths are taken relative to the working directory.
    ///
    /// # Errors
    ///
    /// - [`GitError::OutsideWorkdir`] if the path is not under the working tree
    pub fn relative_path(&self, path: &Path) -> Result<String, GitError> {
        repo_relative(&self.work_dir, path).ok_or_else(|| GitError::OutsideWorkdir {
            path: path.to_path_buf(),
            root: self.work_dir.clone(),
        })
    }

    /// Check whether a repo-relative path is in the index.
    pub fn is_tracked(&self, relative: &str) -> Result<bool, GitError> {
        let index = self.repo.index().map_err(|e| GitError::Internal {
            message: e.message().to_string(),
        })?;

        // Stage 0 holds every non-conflicted entry.
        Ok(index.get_path(Path::new(relative), 0).is_some())
    }

    // =========================================================================
    // Remote Operations
    // =========================================================================

    /// Get the URL for a remote.
    ///
    /// Returns `None` if the remote doesn't exist.
    pub fn remote_url(&self, name: &str) -> Result<Option<String>, GitError> {
        match self.repo.find_remote(name) {
            Ok(remote) => Ok(remote.url().map(String::from)),
            Err(e)
                if e.code() == git2::ErrorCode::NotFound
                    || e.code() == git2::ErrorCode::InvalidSpec =>
            {
                Ok(None)
            }
            Err(e) => Err(GitError::Internal {
                message: e.message().to_string(),
            }),
        }
    }

    /// Get the default remote name (usually "origin").
    ///
    /// Returns the first remote found, or `None` if no remotes exist.
    pub fn default_remote(&self) -> Result<Option<String>, GitError> {
        let remotes = self.repo.remotes().map_err(|e| GitError::Internal {
            message: e.message().to_string(),
        })?;

        // Prefer "origin" if it exists
        for name in remotes.iter().flatten() {
            if name == "origin" {
                return Ok(Some(name.to_string()));
            }
        }

        // Otherwise return first remote
        Ok(remotes.iter().flatten().next().map(String::from))
    }
}
