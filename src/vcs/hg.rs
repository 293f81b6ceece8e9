//! vcs::hg
//!
//! [`RepoInfo`] for Mercurial repositories.
//!
//! Mercurial has no library binding in our stack, so this backend shells out
//! to the `hg` binary with `HGPLAIN=1` for stable, unlocalized output.
//!
//! The working revision is the full changeset node of the working directory
//! parent. Mercurial's local revision numbers differ between clones and
//! cannot appear in a permalink.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use super::traits::{RepoError, RepoInfo};
use crate::core::paths::repo_relative;

/// Node of the null revision (empty repository).
const NULL_NODE: &str = "0000000000000000000000000000000000000000";

/// Name of Mercurial's default path.
const DEFAULT_PATH: &str = "default";

/// A Mercurial repository rooted at a known directory.
#[derive(Debug, Clone)]
pub struct Hg {
    root: PathBuf,
}

impl Hg {
    /// Open the repository rooted at `root`.
    ///
    /// `root` must hold the `.hg` directory.
    pub fn open(root: &Path) -> Result<Self, RepoError> {
        if !root.join(".hg").is_dir() {
            return Err(RepoError::NotARepo {
                path: root.to_path_buf(),
            });
        }

        let root = root.canonicalize().map_err(|_| RepoError::NotARepo {
            path: root.to_path_buf(),
        })?;

        Ok(Self { root })
    }

    /// Run `hg <args>` in the repository root.
    fn run(&self, args: &[&str]) -> Result<Output, RepoError> {
        Command::new("hg")
            .arg("--cwd")
            .arg(&self.root)
            .args(args)
            .env("HGPLAIN", "1")
            .output()
            .map_err(|e| RepoError::Hg {
                command: args.first().copied().unwrap_or_default().to_string(),
                message: e.to_string(),
            })
    }

    /// Run `hg <args>`, failing on a non-zero exit.
    fn run_ok(&self, args: &[&str]) -> Result<String, RepoError> {
        let output = self.run(args)?;
        if !output.status.success() {
            return Err(RepoError::Hg {
                command: args.first().copied().unwrap_or_default().to_string(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl RepoInfo for Hg {
    fn backend(&self) -> &'static str {
        "hg"
    }

    fn root(&self) -> &Path {
        &self.root
    }

    fn default_remote(&self) -> Result<Option<String>, RepoError> {
        Ok(self
            .remote_url(DEFAULT_PATH)?
            .map(|_| DEFAULT_PATH.to_string()))
    }

    fn remote_url(&self, name: &str) -> Result<Option<String>, RepoError> {
        // `hg paths NAME` exits 1 when the path is not configured.
        let output = self.run(&["paths", "--", name])?;
        if !output.status.success() {
            return Ok(None);
        }

        let url = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(if url.is_empty() { None } else { Some(url) })
    }

    fn working_revision(&self) -> Result<String, RepoError> {
        let node = self.run_ok(&["log", "-r", ".", "--template", "{node}"])?;
        if node.is_empty() || node == NULL_NODE {
            return Err(RepoError::NoRevision { backend: "hg" });
        }
        Ok(node)
    }

    fn is_tracked(&self, relative: &str) -> Result<bool, RepoError> {
        // `hg files` exits 1 when nothing matches. A `path:` pattern also
        // matches every file below a directory, so only an exact line counts.
        let pattern = format!("path:{}", relative);
        let output = self.run(&["files", "--", &pattern])?;
        if !output.status.success() {
            return Ok(false);
        }
        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .any(|line| line == relative))
    }

    fn relative_path(&self, path: &Path) -> Result<String, RepoError> {
        repo_relative(&self.root, path).ok_or_else(|| RepoError::OutsideRoot {
            path: path.to_path_buf(),
            root: self.root.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn open_requires_hg_dir() {
        let temp = TempDir::new().unwrap();
        assert!(matches!(
            Hg::open(temp.path()),
            Err(RepoError::NotARepo { .. })
        ));
    }

    #[test]
    fn open_canonicalizes_root() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join(".hg")).unwrap();

        let hg = Hg::open(temp.path()).unwrap();
        assert_eq!(hg.root(), temp.path().canonicalize().unwrap());
        assert_eq!(hg.backend(), "hg");
    }

    #[test]
    fn relative_path_without_hg_binary() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join(".hg")).unwrap();
        let hg = Hg::open(temp.path()).unwrap();

        assert_eq!(hg.relative_path(Path::new("a/b.txt")).unwrap(), "a/b.txt");
        assert!(matches!(
            hg.relative_path(Path::new("/not/in/repo")),
            Err(RepoError::OutsideRoot { .. })
        ));
    }
}
