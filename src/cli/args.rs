//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::core::types::Selection;

/// forgelink - print a permalink to a file on its forge
#[derive(Parser, Debug)]
#[command(name = "forgelink")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
#[command(
    after_help = "\
EXAMPLES:
    # Link to a file at the checked-out revision
    forgelink src/main.rs

    # Link to a single line, or a range
    forgelink src/main.rs --line 42
    forgelink src/main.rs --range 10:20

    # Use a specific remote and copy the link
    forgelink src/main.rs --remote origin --copy

    # See which hosts are recognized
    forgelink forges"
)]
pub struct Cli {
    /// Run as if forgelink was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output; only the link is printed
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(flatten)]
    pub link: LinkArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Arguments for building a link.
#[derive(Args, Debug, Clone, Default)]
pub struct LinkArgs {
    /// File to link to
    pub path: Option<PathBuf>,

    /// Point the link at one line
    #[arg(short, long, value_name = "N", conflicts_with = "range")]
    pub line: Option<u32>,

    /// Point the link at a line range (N:M or N-M)
    #[arg(short, long, value_name = "N:M")]
    pub range: Option<Selection>,

    /// Use this remote instead of the preferred and default remotes
    #[arg(long, value_name = "NAME")]
    pub remote: Option<String>,

    /// Copy the link to the clipboard
    #[arg(short, long)]
    pub copy: bool,

    /// Open the link in the browser
    #[arg(short, long)]
    pub open: bool,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List recognized forge hosts in match order
    #[command(
        long_about = "List recognized forge hosts in match order.\n\n\
            Shows the built-in table merged with any [[forges]] entries from the \
            global and repository configuration. When two entries could match the \
            same remote, the one listed first wins."
    )]
    Forges {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
