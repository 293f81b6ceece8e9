//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$FORGELINK_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/forgelink/config.toml`
//! 3. `~/.forgelink/config.toml`
//!
//! # Repo Config
//!
//! Located at `<repo root>/.forgelink.toml`.
//!
//! # Validation
//!
//! Config values are validated after parsing: forge kinds must be known,
//! hosts must be bare domains, protocols must be `http` or `https`, and
//! remote names cannot be empty.

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::forge::{ForgeEntry, ForgeKind};

/// Protocols accepted for generated links.
pub const VALID_PROTOCOLS: &[&str] = &["https", "http"];

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// remotes = ["upstream"]
/// copy = true
///
/// [[forges]]
/// host = "git.example.com"
/// kind = "gitea"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Preferred remote names, tried before the default remote
    pub remotes: Option<Vec<String>>,

    /// Copy links to the clipboard by default
    pub copy: Option<bool>,

    /// Extra or overriding forge table entries
    pub forges: Option<Vec<ForgeConfig>>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_remotes(self.remotes.as_deref())?;
        validate_forges(self.forges.as_deref())
    }
}

/// Repository configuration.
///
/// # Example
///
/// ```toml
/// remotes = ["fork", "upstream"]
///
/// [[forges]]
/// host = "code.internal.example"
/// kind = "gitlab"
/// protocol = "http"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RepoConfig {
    /// Preferred remote names (replaces the global list)
    pub remotes: Option<Vec<String>>,

    /// Extra or overriding forge table entries
    pub forges: Option<Vec<ForgeConfig>>,
}

impl RepoConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_remotes(self.remotes.as_deref())?;
        validate_forges(self.forges.as_deref())
    }
}

/// One configured forge table entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ForgeConfig {
    /// Host domain, e.g. `git.example.com`
    pub host: String,

    /// Forge kind name, e.g. `gitea`
    pub kind: String,

    /// Link protocol (default: `https`)
    #[serde(default)]
    pub protocol: Option<String>,
}

impl ForgeConfig {
    /// Validate this entry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let host = self.host.trim();
        if host.is_empty() {
            return Err(ConfigError::InvalidValue(
                "forge host cannot be empty".to_string(),
            ));
        }
        if host.contains(['/', '@', ':']) || host.contains(char::is_whitespace) {
            return Err(ConfigError::InvalidValue(format!(
                "invalid forge host '{}', expected a bare domain like 'git.example.com'",
                self.host
            )));
        }

        if ForgeKind::parse(&self.kind).is_none() {
            let names: Vec<_> = ForgeKind::all().iter().map(|k| k.name()).collect();
            return Err(ConfigError::InvalidValue(format!(
                "invalid forge kind '{}', must be one of: {}",
                self.kind,
                names.join(", ")
            )));
        }

        if let Some(protocol) = &self.protocol {
            if !VALID_PROTOCOLS.contains(&protocol.as_str()) {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid protocol '{}' for forge '{}', must be one of: {}",
                    protocol,
                    self.host,
                    VALID_PROTOCOLS.join(", ")
                )));
            }
        }

        Ok(())
    }

    /// Convert to a forge table entry.
    pub fn to_entry(&self) -> Result<ForgeEntry, ConfigError> {
        self.validate()?;
        let kind = ForgeKind::parse(&self.kind)
            .ok_or_else(|| ConfigError::InvalidValue(format!("invalid forge kind '{}'", self.kind)))?;

        Ok(ForgeEntry::new(
            self.host.trim().to_lowercase(),
            kind,
            self.protocol.as_deref().unwrap_or("https"),
        ))
    }
}

fn validate_remotes(remotes: Option<&[String]>) -> Result<(), ConfigError> {
    for remote in remotes.unwrap_or_default() {
        if remote.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "remote names cannot be empty".to_string(),
            ));
        }
    }
    Ok(())
}

fn validate_forges(forges: Option<&[ForgeConfig]>) -> Result<(), ConfigError> {
    forges
        .unwrap_or_default()
        .iter()
        .try_for_each(ForgeConfig::validate)
}
