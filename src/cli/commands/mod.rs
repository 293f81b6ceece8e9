//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Validates command-specific arguments
//! 2. Calls the engine to execute the command
//! 3. Formats and displays output
//!
//! Handlers never write to the repository.

mod completion;
mod forges;
mod link;

pub use completion::completion;
pub use forges::forges;
pub use link::link;

use std::path::Path;

use anyhow::{Context as _, Result};

use super::args::{Command, LinkArgs};
use crate::core::config::Config;
use crate::core::paths::find_repo_root;
use crate::engine::Context;
use crate::forge::ForgeRegistry;
use crate::ui::output;

/// Dispatch a parsed command line to its handler.
///
/// Without a subcommand the command line describes a link.
pub fn dispatch(command: Option<Command>, link_args: LinkArgs, ctx: &Context) -> Result<()> {
    match command {
        Some(Command::Forges { json }) => forges::forges(ctx, json),
        Some(Command::Completion { shell }) => completion::completion(shell),
        None => link::link(ctx, link_args),
    }
}

/// Load configuration for the repository containing `start` and install
/// the resulting forge registry.
///
/// Config warnings are printed. The built-in registry is left in place when
/// no config scope adds forge entries.
pub(crate) fn load_config(ctx: &Context, start: &Path) -> Result<Config> {
    let verbosity = ctx.verbosity();
    let repo_root = find_repo_root(start).map(|(root, _)| root);

    let loaded = Config::load(repo_root.as_deref()).context("Failed to load configuration")?;
    for warning in &loaded.warnings {
        output::warn(
            format!("{} ({})", warning.message, warning.path.display()),
            verbosity,
        );
    }

    let config = loaded.config;
    if let Some(path) = config.global_config_loaded_from() {
        output::debug(format!("global config: {}", path.display()), verbosity);
    }
    if let Some(path) = config.repo_config_loaded_from() {
        output::debug(format!("repo config: {}", path.display()), verbosity);
    }

    if config.has_custom_forges() {
        let registry = ForgeRegistry::build(config.forge_table()?)
            .context("Invalid forge table in configuration")?;
        output::debug(
            format!("installed forge table with {} entries", registry.rules().len()),
            verbosity,
        );
        ForgeRegistry::install(registry);
    }

    Ok(config)
}
