//! engine::link
//!
//! Build a permalink for a file in a working copy.
//!
//! # Lifecycle
//!
//! ```text
//! relative path -> tracked? -> remote candidates -> revision -> resolve
//! ```
//!
//! The tracking check comes first: an untracked file fails with
//! [`LinkError::UntrackedFile`] before any remote lookup or forge matching.
//! Remote candidates are tried in order; a candidate that is not configured
//! or whose lookup errors is skipped and recorded in
//! [`Permalink::skipped_remotes`].

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::types::{LinkRequest, Selection};
use crate::forge::{resolve_link, ForgeKind, ForgeRegistry, ResolveError};
use crate::vcs::{self, RepoError, RepoInfo};

/// Errors from building a permalink.
#[derive(Debug, Error)]
pub enum LinkError {
    /// The path is not inside any repository.
    #[error("{} is not inside a git or mercurial repository", path.display())]
    RootResolution {
        /// The path that was searched
        path: PathBuf,
    },

    /// The file is not under version control.
    #[error("{path} is not tracked by {backend}")]
    UntrackedFile {
        /// Repo-relative path of the file
        path: String,
        /// Backend name
        backend: &'static str,
    },

    /// No remote candidate yielded a URL a forge rule matched.
    #[error("Could not build a remote link")]
    NoMatch {
        /// The remote URL that was tried, if any candidate had one
        remote_url: Option<String>,
    },

    /// A repository query failed.
    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl From<ResolveError> for LinkError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::NoMatch { remote_url } => LinkError::NoMatch {
                remote_url: Some(remote_url),
            },
        }
    }
}

/// How to pick the remote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkOptions {
    /// Remote names tried before the backend's default remote
    pub preferred_remotes: Vec<String>,
    /// Use exactly this remote instead of the candidate walk
    pub remote: Option<String>,
}

impl Default for LinkOptions {
    fn default() -> Self {
        Self {
            preferred_remotes: vec!["upstream".to_string()],
            remote: None,
        }
    }
}

/// A remote candidate that did not produce a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRemote {
    /// Remote name
    pub name: String,
    /// Why it was skipped
    pub reason: String,
}

/// A built permalink with the facts that went into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permalink {
    /// The link
    pub url: String,
    /// Backend of the repository
    pub backend: &'static str,
    /// Remote the link points at
    pub remote: String,
    /// URL of that remote
    pub remote_url: String,
    /// Revision pinned by the link
    pub revision: String,
    /// Repo-relative file path
    pub path: String,
    /// Host of the forge table entry that matched
    pub forge_host: String,
    /// Kind of the forge table entry that matched
    pub forge_kind: ForgeKind,
    /// Candidates tried before `remote`
    pub skipped_remotes: Vec<SkippedRemote>,
}

/// Ordered, de-duplicated remote names to try.
///
/// With an explicit remote, only that remote. Otherwise the preferred names,
/// then the backend's default remote.
pub fn remote_candidates(
    repo: &dyn RepoInfo,
    options: &LinkOptions,
) -> Result<Vec<String>, RepoError> {
    if let Some(remote) = &options.remote {
        return Ok(vec![remote.clone()]);
    }

    let mut candidates: Vec<String> = Vec::new();
    let default = repo.default_remote()?;
    for name in options.preferred_remotes.iter().chain(default.iter()) {
        if !candidates.contains(name) {
            candidates.push(name.clone());
        }
    }
    Ok(candidates)
}

/// Build a permalink for `file` in an already-opened repository.
///
/// # Errors
///
/// - [`LinkError::UntrackedFile`] if `file` is not under version control
/// - [`LinkError::NoMatch`] if no candidate remote maps to a known forge
/// - [`LinkError::Repo`] if a repository query fails
pub fn permalink(
    repo: &dyn RepoInfo,
    registry: &ForgeRegistry,
    file: &Path,
    selection: Option<Selection>,
    options: &LinkOptions,
) -> Result<Permalink, LinkError> {
    let path = repo.relative_path(file)?;
    if path.is_empty() || !repo.is_tracked(&path)? {
        return Err(LinkError::UntrackedFile {
            path: if path.is_empty() {
                file.display().to_string()
            } else {
                path
            },
            backend: repo.backend(),
        });
    }

    let mut skipped = Vec::new();
    let mut found = None;
    for name in remote_candidates(repo, options)? {
        match repo.remote_url(&name) {
            Ok(Some(url)) => {
                found = Some((name, url));
                break;
            }
            Ok(None) => skipped.push(SkippedRemote {
                name,
                reason: "not configured".to_string(),
            }),
            Err(e) => skipped.push(SkippedRemote {
                name,
                reason: e.to_string(),
            }),
        }
    }
    let (remote, remote_url) = found.ok_or(LinkError::NoMatch { remote_url: None })?;

    let revision = repo.working_revision()?;

    let request = LinkRequest {
        remote_url: remote_url.clone(),
        path: path.clone(),
        revision: revision.clone(),
        selection,
    };
    let resolved = resolve_link(registry, &request)?;

    Ok(Permalink {
        url: resolved.url,
        backend: repo.backend(),
        remote,
        remote_url,
        revision,
        path,
        forge_host: resolved.rule_host,
        forge_kind: resolved.kind,
        skipped_remotes: skipped,
    })
}

/// Discover the repository holding `file` and build a permalink for it.
///
/// # Errors
///
/// [`LinkError::RootResolution`] if `file` is not inside a repository,
/// otherwise as [`permalink`].
pub fn permalink_for_path(
    file: &Path,
    registry: &ForgeRegistry,
    selection: Option<Selection>,
    options: &LinkOptions,
) -> Result<Permalink, LinkError> {
    let repo = vcs::discover(file).map_err(|e| match e {
        RepoError::NotARepo { path } => LinkError::RootResolution { path },
        other => LinkError::Repo(other),
    })?;

    permalink(repo.as_ref(), registry, file, selection, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vcs::mock::MockRepo;

    fn repo() -> MockRepo {
        MockRepo::new("/repo")
            .with_revision("deadbeef")
            .with_tracked("src/lib.py")
    }

    fn link(repo: &MockRepo, selection: Option<Selection>) -> Result<Permalink, LinkError> {
        permalink(
            repo,
            &ForgeRegistry::with_defaults(),
            Path::new("/repo/src/lib.py"),
            selection,
            &LinkOptions::default(),
        )
    }

    mod scenario {
        use super::*;

        #[test]
        fn gitlab_single_line() {
            let repo = repo().with_remote("origin", "git@gitlab.com:group/proj.git");
            let link = link(&repo, Some(Selection::lines(3, 3).unwrap())).unwrap();

            assert_eq!(
                link.url,
                "https://gitlab.com/group/proj/-/blob/deadbeef/src/lib.py#L3"
            );
            assert_eq!(link.remote, "origin");
            assert_eq!(link.revision, "deadbeef");
            assert_eq!(link.path, "src/lib.py");
            assert_eq!(link.forge_kind, ForgeKind::GitLab);
            assert_eq!(link.backend, "git");
        }

        #[test]
        fn relative_file_path() {
            let repo = repo().with_remote("origin", "git@github.com:o/r.git");
            let link = permalink(
                &repo,
                &ForgeRegistry::with_defaults(),
                Path::new("src/lib.py"),
                None,
                &LinkOptions::default(),
            )
            .unwrap();
            assert_eq!(link.url, "https://github.com/o/r/blob/deadbeef/src/lib.py");
        }
    }

    mod tracking {
        use super::*;

        #[test]
        fn untracked_fails_before_remote_lookup() {
            let repo = MockRepo::new("/repo")
                .with_backend("hg")
                .with_revision("deadbeef")
                .with_remote("default", "https://example.com/o/r");

            let err = link(&repo, None).unwrap_err();
            match err {
                LinkError::UntrackedFile { ref path, backend } => {
                    assert_eq!(path, "src/lib.py");
                    assert_eq!(backend, "hg");
                }
                other => panic!("expected UntrackedFile, got {other:?}"),
            }
            assert_eq!(err.to_string(), "src/lib.py is not tracked by hg");
            assert_eq!(repo.lookups("default"), 0);
            assert_eq!(repo.lookups("upstream"), 0);
        }

        #[test]
        fn repository_root_is_not_a_file() {
            let repo = repo().with_remote("origin", "git@github.com:o/r.git");
            let result = permalink(
                &repo,
                &ForgeRegistry::with_defaults(),
                Path::new("/repo"),
                None,
                &LinkOptions::default(),
            );
            assert!(matches!(result, Err(LinkError::UntrackedFile { .. })));
        }

        #[test]
        fn outside_repository() {
            let repo = repo().with_remote("origin", "git@github.com:o/r.git");
            let result = permalink(
                &repo,
                &ForgeRegistry::with_defaults(),
                Path::new("/elsewhere/file.txt"),
                None,
                &LinkOptions::default(),
            );
            assert!(matches!(
                result,
                Err(LinkError::Repo(RepoError::OutsideRoot { .. }))
            ));
        }
    }

    mod remotes {
        use super::*;

        #[test]
        fn upstream_beats_default_remote() {
            let repo = repo()
                .with_remote("origin", "git@github.com:me/fork.git")
                .with_remote("upstream", "git@gitlab.com:them/proj.git");

            let link = link(&repo, None).unwrap();
            assert_eq!(link.remote, "upstream");
            assert_eq!(
                link.url,
                "https://gitlab.com/them/proj/-/blob/deadbeef/src/lib.py"
            );
            assert_eq!(repo.lookups("origin"), 0);
        }

        #[test]
        fn falls_back_to_default_remote() {
            let repo = repo().with_remote("origin", "git@github.com:me/fork.git");

            let link = link(&repo, None).unwrap();
            assert_eq!(link.remote, "origin");
            assert_eq!(
                link.skipped_remotes,
                vec![SkippedRemote {
                    name: "upstream".to_string(),
                    reason: "not configured".to_string(),
                }]
            );
        }

        #[test]
        fn backend_default_remote_need_not_be_first() {
            let repo = repo()
                .with_remote("mirror", "git@gitlab.com:m/proj.git")
                .with_remote("origin", "git@github.com:o/r.git")
                .with_default_remote("origin");

            let link = link(&repo, None).unwrap();
            assert_eq!(link.remote, "origin");
            assert_eq!(repo.lookups("mirror"), 0);
        }

        #[test]
        fn failing_lookup_tries_next_candidate() {
            let repo = repo()
                .with_remote("origin", "git@github.com:me/fork.git")
                .with_failing_remote("upstream");

            let link = link(&repo, None).unwrap();
            assert_eq!(link.remote, "origin");
            assert_eq!(link.skipped_remotes.len(), 1);
            assert!(link.skipped_remotes[0].reason.contains("simulated"));
        }

        #[test]
        fn no_remotes_is_no_match() {
            let result = link(&repo(), None);
            assert!(matches!(
                result,
                Err(LinkError::NoMatch { remote_url: None })
            ));
        }

        #[test]
        fn unsupported_forge_is_no_match() {
            let repo = repo().with_remote("origin", "https://example.com/o/r.git");
            let err = link(&repo, None).unwrap_err();

            assert!(matches!(
                err,
                LinkError::NoMatch { remote_url: Some(ref url) } if url == "https://example.com/o/r.git"
            ));
            assert_eq!(err.to_string(), "Could not build a remote link");
        }

        #[test]
        fn explicit_remote_skips_candidates() {
            let repo = repo()
                .with_remote("origin", "git@github.com:me/fork.git")
                .with_remote("upstream", "git@gitlab.com:them/proj.git");
            let options = LinkOptions {
                remote: Some("origin".to_string()),
                ..Default::default()
            };

            let link = permalink(
                &repo,
                &ForgeRegistry::with_defaults(),
                Path::new("/repo/src/lib.py"),
                None,
                &options,
            )
            .unwrap();
            assert_eq!(link.remote, "origin");
            assert_eq!(repo.lookups("upstream"), 0);
        }

        #[test]
        fn candidates_are_deduplicated() {
            let repo = repo().with_remote("upstream", "git@github.com:o/r.git");
            let candidates = remote_candidates(&repo, &LinkOptions::default()).unwrap();
            assert_eq!(candidates, vec!["upstream".to_string()]);
        }

        #[test]
        fn preferred_order_is_kept() {
            let repo = repo().with_remote("origin", "git@github.com:o/r.git");
            let options = LinkOptions {
                preferred_remotes: vec!["mirror".to_string(), "upstream".to_string()],
                remote: None,
            };
            let candidates = remote_candidates(&repo, &options).unwrap();
            assert_eq!(candidates, vec!["mirror", "upstream", "origin"]);
        }
    }

    mod revision {
        use super::*;

        #[test]
        fn missing_revision_is_repo_error() {
            let repo = MockRepo::new("/repo")
                .with_tracked("src/lib.py")
                .with_remote("origin", "git@github.com:o/r.git");
            let result = link(&repo, None);
            assert!(matches!(
                result,
                Err(LinkError::Repo(RepoError::NoRevision { backend: "git" }))
            ));
        }
    }
}
