//! vcs::mock
//!
//! In-memory [`RepoInfo`] for deterministic testing.
//!
//! # Example
//!
//! ```
//! use forgelink::vcs::mock::MockRepo;
//! use forgelink::vcs::RepoInfo;
//!
//! let repo = MockRepo::new("/repo")
//!     .with_remote("origin", "git@github.com:o/r.git")
//!     .with_revision("abc123")
//!     .with_tracked("src/lib.rs");
//!
//! assert_eq!(repo.default_remote().unwrap().as_deref(), Some("origin"));
//! assert!(repo.is_tracked("src/lib.rs").unwrap());
//! assert!(!repo.is_tracked("notes.txt").unwrap());
//! ```

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::traits::{RepoError, RepoInfo};
use crate::core::paths::repo_relative;

/// Mock repository.
///
/// The first remote added becomes the default remote unless
/// [`MockRepo::with_default_remote`] says otherwise.
#[derive(Debug, Clone)]
pub struct MockRepo {
    backend: &'static str,
    root: PathBuf,
    remotes: Vec<(String, String)>,
    failing_remotes: HashSet<String>,
    default_remote: Option<String>,
    revision: Option<String>,
    tracked: HashSet<String>,
    lookups: Rc<RefCell<HashMap<String, usize>>>,
}

impl MockRepo {
    /// Create an empty git-flavored mock rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            backend: "git",
            root: root.into(),
            remotes: Vec::new(),
            failing_remotes: HashSet::new(),
            default_remote: None,
            revision: None,
            tracked: HashSet::new(),
            lookups: Default::default(),
        }
    }

    /// Report a different backend name.
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = backend;
        self
    }

    /// Add a remote.
    pub fn with_remote(mut self, name: &str, url: &str) -> Self {
        if self.default_remote.is_none() {
            self.default_remote = Some(name.to_string());
        }
        self.remotes.push((name.to_string(), url.to_string()));
        self
    }

    /// Make lookups of `name` fail with an error.
    pub fn with_failing_remote(mut self, name: &str) -> Self {
        self.failing_remotes.insert(name.to_string());
        self
    }

    /// Override the default remote name.
    pub fn with_default_remote(mut self, name: &str) -> Self {
        self.default_remote = Some(name.to_string());
        self
    }

    /// Set the working revision.
    pub fn with_revision(mut self, revision: &str) -> Self {
        self.revision = Some(revision.to_string());
        self
    }

    /// Mark a repo-relative path as tracked.
    pub fn with_tracked(mut self, relative: &str) -> Self {
        self.tracked.insert(relative.to_string());
        self
    }

    /// Number of times `remote_url(name)` was called.
    pub fn lookups(&self, name: &str) -> usize {
        self.lookups.borrow().get(name).copied().unwrap_or(0)
    }
}

impl RepoInfo for MockRepo {
    fn backend(&self) -> &'static str {
        self.backend
    }

    fn root(&self) -> &Path {
        &self.root
    }

    fn default_remote(&self) -> Result<Option<String>, RepoError> {
        Ok(self.default_remote.clone())
    }

    fn remote_url(&self, name: &str) -> Result<Option<String>, RepoError> {
        *self.lookups.borrow_mut().entry(name.to_string()).or_insert(0) += 1;

        if self.failing_remotes.contains(name) {
            return Err(RepoError::Hg {
                command: "paths".to_string(),
                message: format!("simulated failure for {}", name),
            });
        }

        Ok(self
            .remotes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, url)| url.clone()))
    }

    fn working_revision(&self) -> Result<String, RepoError> {
        self.revision.clone().ok_or(RepoError::NoRevision {
            backend: self.backend,
        })
    }

    fn is_tracked(&self, relative: &str) -> Result<bool, RepoError> {
        Ok(self.tracked.contains(relative))
    }

    fn relative_path(&self, path: &Path) -> Result<String, RepoError> {
        repo_relative(&self.root, path).ok_or_else(|| RepoError::OutsideRoot {
            path: path.to_path_buf(),
            root: self.root.clone(),
        })
    }
}
