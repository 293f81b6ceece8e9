//! engine
//!
//! Orchestrates link building: discover the repository, check the file,
//! pick a remote, then resolve against the forge registry.
//!
//! # Architecture
//!
//! The engine sits between the CLI and the pure forge layer:
//!
//! 1. **Discover**: find the repository root and backend ([`crate::vcs`])
//! 2. **Check**: the file must be tracked by that backend
//! 3. **Remote**: walk the remote candidates until one has a URL
//! 4. **Resolve**: match the URL against the registry ([`crate::forge`])
//!
//! # Invariants
//!
//! - An untracked file fails before any remote is looked up
//! - The engine never writes to the repository
//!
//! # Example
//!
//! ```ignore
//! use forgelink::engine::link::{permalink_for_path, LinkOptions};
//! use forgelink::forge::ForgeRegistry;
//!
//! let link = permalink_for_path(
//!     Path::new("src/main.rs"),
//!     &ForgeRegistry::global(),
//!     None,
//!     &LinkOptions::default(),
//! )?;
//! println!("{}", link.url);
//! ```

pub mod link;

pub use link::{permalink, permalink_for_path, LinkError, LinkOptions, Permalink, SkippedRemote};

use std::path::{Path, PathBuf};

use crate::ui::output::Verbosity;

/// Execution context for commands.
///
/// Contains global settings derived from CLI flags that affect command behavior.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Working directory override.
    pub cwd: Option<PathBuf>,
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
}

impl Context {
    /// Output verbosity implied by the flags.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }

    /// Resolve a user-supplied path to an absolute one.
    ///
    /// Relative paths are taken from `cwd`, itself taken from the process
    /// working directory when relative or unset.
    pub fn resolve_path(&self, path: &Path) -> std::io::Result<PathBuf> {
        if path.is_absolute() {
            return Ok(path.to_path_buf());
        }
        let base = match &self.cwd {
            Some(cwd) if cwd.is_absolute() => cwd.clone(),
            Some(cwd) => std::env::current_dir()?.join(cwd),
            None => std::env::current_dir()?,
        };
        Ok(base.join(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_from_flags() {
        let mut ctx = Context::default();
        assert_eq!(ctx.verbosity(), Verbosity::Normal);

        ctx.debug = true;
        assert_eq!(ctx.verbosity(), Verbosity::Debug);

        ctx.quiet = true;
        assert_eq!(ctx.verbosity(), Verbosity::Quiet);
    }

    #[test]
    fn resolve_path_uses_cwd() {
        let ctx = Context {
            cwd: Some(PathBuf::from("/work")),
            ..Default::default()
        };
        assert_eq!(
            ctx.resolve_path(Path::new("a/b.rs")).unwrap(),
            PathBuf::from("/work/a/b.rs")
        );
        assert_eq!(
            ctx.resolve_path(Path::new("/abs.rs")).unwrap(),
            PathBuf::from("/abs.rs")
        );
    }

    #[test]
    fn resolve_path_is_absolute_without_cwd() {
        let resolved = Context::default().resolve_path(Path::new("a.rs")).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("a.rs"));
    }
}
