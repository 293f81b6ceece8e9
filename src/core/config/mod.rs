//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! forgelink has two configuration scopes:
//! - **Global**: User-level settings
//! - **Repo**: Repository-level overrides
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Repo config file
//! 4. CLI flags (not handled here)
//!
//! Forge entries are merged rather than replaced: global entries, then repo
//! entries, are laid over the built-in table. An entry for a host that is
//! already present replaces it in place; a new host is appended.
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$FORGELINK_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/forgelink/config.toml`
//! 3. `~/.forgelink/config.toml`
//!
//! # Repo Config Location
//!
//! `<repo root>/.forgelink.toml`
//!
//! # Example
//!
//! ```no_run
//! use forgelink::core::config::Config;
//! use std::path::Path;
//!
//! let result = Config::load(Some(Path::new("/path/to/repo"))).unwrap();
//! let config = result.config;
//!
//! println!("Remotes tried first: {:?}", config.remotes());
//! println!("Copy by default: {}", config.copy());
//! ```

pub mod schema;

pub use schema::{ForgeConfig, GlobalConfig, RepoConfig};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::paths::repo_config_path;
use crate::forge::{default_table, ForgeEntry};

/// Remote names tried before the backend's default remote.
pub const DEFAULT_REMOTES: &[&str] = &["upstream"];

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Merged configuration from all sources.
///
/// Accessor methods apply precedence rules automatically.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Repository configuration (if in a repo)
    pub repo: Option<RepoConfig>,
    /// Path to the global config file (if loaded)
    global_path: Option<PathBuf>,
    /// Path to the repo config file (if loaded)
    repo_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// If `repo_root` is provided, also loads repo-specific config.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed or fail
    /// validation. Missing config files are not an error (defaults are used).
    pub fn load(repo_root: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
        let mut warnings = Vec::new();
        let global_path = Self::find_global(&mut warnings);
        let mut result = Self::load_from(global_path.as_deref(), repo_root)?;
        warnings.append(&mut result.warnings);
        result.warnings = warnings;
        Ok(result)
    }

    /// Load configuration from an explicit global config path.
    ///
    /// A `None` or missing global path means global defaults.
    pub fn load_from(
        global_path: Option<&Path>,
        repo_root: Option<&Path>,
    ) -> Result<ConfigLoadResult, ConfigError> {
        let mut warnings = Vec::new();

        let (global, global_path) = match global_path {
            Some(path) if path.exists() => (read_toml::<GlobalConfig>(path)?, Some(path.to_path_buf())),
            _ => (GlobalConfig::default(), None),
        };

        let (repo, repo_path) = match repo_root.map(repo_config_path) {
            Some(path) if path.exists() => (Some(read_toml::<RepoConfig>(&path)?), Some(path)),
            _ => (None, None),
        };

        // Validate loaded configs
        global.validate()?;
        if let Some(ref r) = repo {
            r.validate()?;
        }

        if let (Some(repo), Some(path)) = (&repo, &repo_path) {
            for forge in repo.forges.iter().flatten() {
                if default_table()
                    .iter()
                    .any(|e| e.host.eq_ignore_ascii_case(forge.host.trim()))
                {
                    warnings.push(ConfigWarning {
                        message: format!("forge entry for '{}' overrides the built-in entry", forge.host),
                        path: path.clone(),
                    });
                }
            }
        }

        Ok(ConfigLoadResult {
            config: Config {
                global,
                repo,
                global_path,
                repo_path,
            },
            warnings,
        })
    }

    /// Locate the global config file.
    fn find_global(warnings: &mut Vec<ConfigWarning>) -> Option<PathBuf> {
        // 1. Check $FORGELINK_CONFIG
        if let Ok(path) = std::env::var("FORGELINK_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
            warnings.push(ConfigWarning {
                message: "FORGELINK_CONFIG points at a missing file, ignoring it".to_string(),
                path,
            });
        }

        // 2. Check $XDG_CONFIG_HOME/forgelink/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("forgelink/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        // 3. Check ~/.forgelink/config.toml
        dirs::home_dir()
            .map(|home| home.join(".forgelink/config.toml"))
            .filter(|path| path.exists())
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Remote names to try before the backend's default remote.
    ///
    /// Repo config replaces global config; defaults to `["upstream"]`.
    pub fn remotes(&self) -> Vec<String> {
        self.repo
            .as_ref()
            .and_then(|r| r.remotes.clone())
            .or_else(|| self.global.remotes.clone())
            .unwrap_or_else(|| DEFAULT_REMOTES.iter().map(|s| s.to_string()).collect())
    }

    /// Whether links are copied to the clipboard by default.
    ///
    /// Defaults to `false` if not configured.
    pub fn copy(&self) -> bool {
        self.global.copy.unwrap_or(false)
    }

    /// Whether any config scope adds or overrides forge entries.
    pub fn has_custom_forges(&self) -> bool {
        let global = self.global.forges.as_ref().is_some_and(|f| !f.is_empty());
        let repo = self
            .repo
            .as_ref()
            .and_then(|r| r.forges.as_ref())
            .is_some_and(|f| !f.is_empty());
        global || repo
    }

    /// The effective forge table: built-ins overlaid with configured entries.
    pub fn forge_table(&self) -> Result<Vec<ForgeEntry>, ConfigError> {
        let mut table = default_table();

        let configured = self
            .global
            .forges
            .iter()
            .flatten()
            .chain(self.repo.iter().flat_map(|r| r.forges.iter().flatten()));

        for forge in configured {
            let entry = forge.to_entry()?;
            match table
                .iter_mut()
                .find(|e| e.host.eq_ignore_ascii_case(&entry.host))
            {
                Some(existing) => *existing = entry,
                None => table.push(entry),
            }
        }

        Ok(table)
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Get the path to the loaded repo config file.
    pub fn repo_config_loaded_from(&self) -> Option<&Path> {
        self.repo_path.as_deref()
    }
}

/// Read and parse a TOML config file.
fn read_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
