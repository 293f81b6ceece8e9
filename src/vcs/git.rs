//! vcs::git
//!
//! [`RepoInfo`] for Git repositories, backed by [`crate::git::Git`].

use std::path::Path;

use super::traits::{RepoError, RepoInfo};
use crate::git::{Git, GitError};

impl RepoInfo for Git {
    fn backend(&self) -> &'static str {
        "git"
    }

    fn root(&self) -> &Path {
        self.work_dir()
    }

    fn default_remote(&self) -> Result<Option<String>, RepoError> {
        Ok(Git::default_remote(self)?)
    }

    fn remote_url(&self, name: &str) -> Result<Option<String>, RepoError> {
        Ok(Git::remote_url(self, name)?)
    }

    fn working_revision(&self) -> Result<String, RepoError> {
        match self.head_oid() {
            Ok(oid) => Ok(oid),
            Err(GitError::RefNotFound { .. }) => Err(RepoError::NoRevision { backend: "git" }),
            Err(e) => Err(e.into()),
        }
    }

    fn is_tracked(&self, relative: &str) -> Result<bool, RepoError> {
        Ok(Git::is_tracked(self, relative)?)
    }

    fn relative_path(&self, path: &Path) -> Result<String, RepoError> {
        match Git::relative_path(self, path) {
            Ok(rel) => Ok(rel),
            Err(GitError::OutsideWorkdir { path, root }) => {
                Err(RepoError::OutsideRoot { path, root })
            }
            Err(e) => Err(e.into()),
        }
    }
}
