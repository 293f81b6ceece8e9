//! forge::kind
//!
//! The closed set of forge flavors and their per-kind URL shapes.
//!
//! # Design
//!
//! Every supported forge is a variant of [`ForgeKind`]. The match pattern and
//! the link templates for a kind are chosen by a single exhaustive `match`,
//! so adding a forge means adding a variant and the compiler points at every
//! place that needs a decision.
//!
//! Templates use `%x` placeholders expanded by [`super::template::expand`]:
//!
//! | Key | Value |
//! |-----|-------|
//! | `p` | protocol |
//! | `h` | host (the captured sub-host for sourcehut) |
//! | `n` | namespace (`org/repo`, possibly nested) |
//! | `r` | revision |
//! | `f` | repo-relative file path |
//! | `s` | first selected line |
//! | `e` | last selected line (ranges only) |

use serde::{Deserialize, Serialize};

/// Characters allowed in a captured namespace.
const NAMESPACE: &str = r"[.A-Za-z0-9_/-]";

/// Supported forge flavors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForgeKind {
    GitHub,
    GitLab,
    Gitea,
    Bitbucket,
    Pagure,
    Savannah,
    Sourcehut,
}

/// Link templates for one forge kind.
///
/// `start` is appended when a selection is present; `end` is appended after
/// it only for multi-line selections, and only when the forge can express
/// ranges at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkTemplates {
    /// Base URL of the file at a revision
    pub base: &'static str,
    /// Fragment addressing the first selected line
    pub start: &'static str,
    /// Fragment addressing the last selected line, if ranges are supported
    pub end: Option<&'static str>,
}

impl ForgeKind {
    /// All kinds, in a stable order.
    pub fn all() -> &'static [ForgeKind] {
        &[
            ForgeKind::GitHub,
            ForgeKind::GitLab,
            ForgeKind::Gitea,
            ForgeKind::Bitbucket,
            ForgeKind::Pagure,
            ForgeKind::Savannah,
            ForgeKind::Sourcehut,
        ]
    }

    /// Get the kind name as used in configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            ForgeKind::GitHub => "github",
            ForgeKind::GitLab => "gitlab",
            ForgeKind::Gitea => "gitea",
            ForgeKind::Bitbucket => "bitbucket",
            ForgeKind::Pagure => "pagure",
            ForgeKind::Savannah => "savannah",
            ForgeKind::Sourcehut => "sourcehut",
        }
    }

    /// Parse a kind from a string (case-insensitive).
    ///
    /// # Example
    ///
    /// ```
    /// use forgelink::forge::ForgeKind;
    ///
    /// assert_eq!(ForgeKind::parse("GitLab"), Some(ForgeKind::GitLab));
    /// assert_eq!(ForgeKind::parse("fossil"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.to_lowercase();
        Self::all().iter().copied().find(|k| k.name() == lower)
    }

    /// Whether the forge's line fragment can address a range of lines.
    pub fn supports_ranges(&self) -> bool {
        self.templates(None).end.is_some()
    }

    /// Build the regex source matching a remote URL for `host`.
    ///
    /// The pattern requires a `/` or `@` right before the host, and is
    /// anchored at the end of the URL. Named groups: `host` (the host to put
    /// in links), `ns` (the namespace), and for sourcehut `vcs`.
    pub fn pattern(&self, host: &str) -> String {
        let host = regex::escape(host);
        match self {
            ForgeKind::GitHub
            | ForgeKind::GitLab
            | ForgeKind::Gitea
            | ForgeKind::Bitbucket
            | ForgeKind::Pagure => {
                format!(r"(?i:[/@](?P<host>{host}))[/:](?P<ns>{NAMESPACE}+?)(?:\.git)?/?$")
            }
            // cgit addresses repositories by their `.git` directory name.
            ForgeKind::Savannah => format!(
                r"(?i:[/@](?P<host>{host}))[/:]/?(?:srv/)?(?:git/)?(?P<ns>{NAMESPACE}+?\.git)/?$"
            ),
            ForgeKind::Sourcehut => format!(
                r"(?i:[/@](?P<host>(?P<vcs>git|hg)\.{host}))[/:](?P<ns>~{NAMESPACE}+?)(?:\.git)?/?$"
            ),
        }
    }

    /// Select link templates.
    ///
    /// `vcs` is the captured sourcehut sub-host (`git` or `hg`); other kinds
    /// ignore it.
    pub fn templates(&self, vcs: Option<&str>) -> LinkTemplates {
        match self {
            ForgeKind::GitHub => LinkTemplates {
                base: "%p://%h/%n/blob/%r/%f",
                start: "#L%s",
                end: Some("-L%e"),
            },
            ForgeKind::GitLab => LinkTemplates {
                base: "%p://%h/%n/-/blob/%r/%f",
                start: "#L%s",
                end: Some("-L%e"),
            },
            ForgeKind::Gitea => LinkTemplates {
                base: "%p://%h/%n/src/commit/%r/%f",
                start: "#L%s",
                end: Some("-L%e"),
            },
            ForgeKind::Bitbucket => LinkTemplates {
                base: "%p://%h/%n/src/%r/%f",
                start: "#lines-%s",
                end: Some(":%e"),
            },
            ForgeKind::Pagure => LinkTemplates {
                base: "%p://%h/%n/blob/%r/f/%f",
                start: "#_%s",
                end: Some("-%e"),
            },
            ForgeKind::Savannah => LinkTemplates {
                base: "%p://%h/cgit/%n/tree/%f?id=%r",
                start: "#n%s",
                end: None,
            },
            ForgeKind::Sourcehut => LinkTemplates {
                base: if vcs.is_some_and(|v| v.eq_ignore_ascii_case("hg")) {
                    "%p://%h/%n/browse/%f?rev=%r"
                } else {
                    "%p://%h/%n/tree/%r/%f"
                },
                start: "#L%s",
                end: None,
            },
        }
    }
}

impl std::fmt::Display for ForgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
