//! forge::registry
//!
//! The ordered table of known forge hosts and its compiled form.
//!
//! # Design
//!
//! A [`ForgeEntry`] is one `(host, kind, protocol)` row of the table. Building
//! a [`ForgeRegistry`] compiles each row into a [`ForgeRule`] whose regex and
//! templates come from the row's [`ForgeKind`]. Rules are immutable and kept
//! in declaration order; the resolver takes the first rule that matches.
//!
//! Hosts must be unique (case-insensitively). Distinct hosts can still
//! overlap: `https://github.com/gitlab.com/o/r` matches a `github.com` rule
//! (namespace `gitlab.com/o/r`) and a `gitlab.com` rule (namespace `o/r`),
//! and then the earlier entry wins.
//!
//! # Process-wide registry
//!
//! [`ForgeRegistry::global`] builds the default table on first use and hands
//! out shared references. [`ForgeRegistry::install`] swaps in another
//! registry (for user-configured tables). Both go through one lock, so a
//! reader sees either no registry yet or a complete one.

use std::sync::{Arc, PoisonError, RwLock};

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::kind::{ForgeKind, LinkTemplates};

/// Errors from building a registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Two entries share a host.
    #[error("duplicate forge host '{host}' in forge table")]
    DuplicateHost {
        /// The repeated host
        host: String,
    },

    /// An entry has an empty host.
    #[error("forge table entry for {kind} has an empty host")]
    EmptyHost {
        /// Kind of the offending entry
        kind: ForgeKind,
    },

    /// An entry's pattern did not compile.
    #[error("invalid pattern for forge host '{host}': {source}")]
    InvalidPattern {
        /// Host of the offending entry
        host: String,
        /// Underlying regex error
        source: regex::Error,
    },
}

/// One row of the forge table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForgeEntry {
    /// Host domain, e.g. `github.com`
    pub host: String,
    /// Forge flavor serving that host
    pub kind: ForgeKind,
    /// Protocol used in generated links, e.g. `https`
    pub protocol: String,
}

impl ForgeEntry {
    /// Create an entry.
    pub fn new(host: impl Into<String>, kind: ForgeKind, protocol: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            kind,
            protocol: protocol.into(),
        }
    }

    /// Create an `https` entry.
    pub fn https(host: impl Into<String>, kind: ForgeKind) -> Self {
        Self::new(host, kind, "https")
    }
}

/// The built-in forge table, in declaration order.
pub fn default_table() -> Vec<ForgeEntry> {
    vec![
        ForgeEntry::https("github.com", ForgeKind::GitHub),
        ForgeEntry::https("gitlab.com", ForgeKind::GitLab),
        ForgeEntry::https("salsa.debian.org", ForgeKind::GitLab),
        ForgeEntry::https("invent.kde.org", ForgeKind::GitLab),
        ForgeEntry::https("framagit.org", ForgeKind::GitLab),
        ForgeEntry::https("codeberg.org", ForgeKind::Gitea),
        ForgeEntry::https("gitea.com", ForgeKind::Gitea),
        ForgeEntry::https("bitbucket.org", ForgeKind::Bitbucket),
        ForgeEntry::https("pagure.io", ForgeKind::Pagure),
        ForgeEntry::https("src.fedoraproject.org", ForgeKind::Pagure),
        ForgeEntry::https("git.savannah.gnu.org", ForgeKind::Savannah),
        ForgeEntry::https("git.sv.gnu.org", ForgeKind::Savannah),
        ForgeEntry::https("sr.ht", ForgeKind::Sourcehut),
    ]
}

/// A compiled forge table entry.
#[derive(Debug, Clone)]
pub struct ForgeRule {
    entry: ForgeEntry,
    pattern: Regex,
}

impl ForgeRule {
    /// Compile a table entry.
    pub fn compile(entry: ForgeEntry) -> Result<Self, RegistryError> {
        if entry.host.trim().is_empty() {
            return Err(RegistryError::EmptyHost { kind: entry.kind });
        }

        let pattern =
            Regex::new(&entry.kind.pattern(&entry.host)).map_err(|source| {
                RegistryError::InvalidPattern {
                    host: entry.host.clone(),
                    source,
                }
            })?;

        Ok(Self { entry, pattern })
    }

    /// The table entry this rule was built from.
    pub fn entry(&self) -> &ForgeEntry {
        &self.entry
    }

    pub fn host(&self) -> &str {
        &self.entry.host
    }

    pub fn kind(&self) -> ForgeKind {
        self.entry.kind
    }

    pub fn protocol(&self) -> &str {
        &self.entry.protocol
    }

    /// Match a remote URL, returning the captures on success.
    pub fn captures<'u>(&self, remote_url: &'u str) -> Option<Captures<'u>> {
        self.pattern.captures(remote_url)
    }

    /// Link templates for a match produced by this rule.
    pub fn templates(&self, captures: &Captures<'_>) -> LinkTemplates {
        self.entry
            .kind
            .templates(captures.name("vcs").map(|m| m.as_str()))
    }
}

static GLOBAL: RwLock<Option<Arc<ForgeRegistry>>> = RwLock::new(None);

/// Ordered, immutable list of compiled forge rules.
#[derive(Debug, Clone)]
pub struct ForgeRegistry {
    rules: Vec<ForgeRule>,
}

impl ForgeRegistry {
    /// Compile a forge table.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::DuplicateHost`] if a host appears twice
    /// - [`RegistryError::EmptyHost`] if a host is blank
    ///
    /// # Example
    ///
    /// ```
    /// use forgelink::forge::{ForgeEntry, ForgeKind, ForgeRegistry};
    ///
    /// let registry = ForgeRegistry::build(vec![
    ///     ForgeEntry::https("git.example.com", ForgeKind::Gitea),
    /// ]).unwrap();
    /// assert_eq!(registry.rules().len(), 1);
    ///
    /// assert!(ForgeRegistry::build(vec![
    ///     ForgeEntry::https("a.org", ForgeKind::GitHub),
    ///     ForgeEntry::https("A.org", ForgeKind::GitLab),
    /// ]).is_err());
    /// ```
    pub fn build(table: Vec<ForgeEntry>) -> Result<Self, RegistryError> {
        let mut rules: Vec<ForgeRule> = Vec::with_capacity(table.len());

        for entry in table {
            if rules
                .iter()
                .any(|r| r.host().eq_ignore_ascii_case(&entry.host))
            {
                return Err(RegistryError::DuplicateHost { host: entry.host });
            }
            rules.push(ForgeRule::compile(entry)?);
        }

        Ok(Self { rules })
    }

    /// Compile the built-in table.
    pub fn with_defaults() -> Self {
        // The default table is static and covered by tests.
        Self::build(default_table()).expect("built-in forge table is valid")
    }

    /// The compiled rules, in match order.
    pub fn rules(&self) -> &[ForgeRule] {
        &self.rules
    }

    /// The table this registry was compiled from.
    pub fn table(&self) -> Vec<ForgeEntry> {
        self.rules.iter().map(|r| r.entry().clone()).collect()
    }

    /// Find the first rule matching a remote URL.
    pub fn find<'r, 'u>(&'r self, remote_url: &'u str) -> Option<(&'r ForgeRule, Captures<'u>)> {
        self.rules
            .iter()
            .find_map(|rule| rule.captures(remote_url).map(|caps| (rule, caps)))
    }

    /// Get the process-wide registry, building the defaults on first use.
    pub fn global() -> Arc<ForgeRegistry> {
        if let Some(registry) = GLOBAL
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            return Arc::clone(registry);
        }

        let mut slot = GLOBAL.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(slot.get_or_insert_with(|| Arc::new(Self::with_defaults())))
    }

    /// Replace the process-wide registry.
    ///
    /// Readers holding the previous registry keep using it; later calls to
    /// [`ForgeRegistry::global`] see the new one.
    pub fn install(registry: ForgeRegistry) -> Arc<ForgeRegistry> {
        let registry = Arc::new(registry);
        let mut slot = GLOBAL.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(Arc::clone(&registry));
        registry
    }
}

impl Default for ForgeRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
