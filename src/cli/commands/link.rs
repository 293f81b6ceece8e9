//! link command - Print a permalink for a file
//!
//! # Flow
//!
//! The path is resolved against `--cwd`, config is loaded for the enclosing
//! repository, then [`crate::engine::link::permalink_for_path`] builds the
//! link. The link is printed even when `--copy` or `--open` fails; those
//! failures are warnings.

use anyhow::{bail, Context as _, Result};

use super::load_config;
use crate::cli::args::LinkArgs;
use crate::core::types::Selection;
use crate::engine::link::{permalink_for_path, LinkOptions};
use crate::engine::Context;
use crate::forge::ForgeRegistry;
use crate::ui::output::{self, Verbosity};

/// Build, print, and optionally copy or open a permalink.
pub fn link(ctx: &Context, args: LinkArgs) -> Result<()> {
    let verbosity = ctx.verbosity();

    let Some(path) = args.path else {
        bail!("No file given. Run 'forgelink --help' for usage.");
    };

    let file = ctx
        .resolve_path(&path)
        .context("Failed to read the current directory")?;

    let selection = match (args.line, args.range) {
        (Some(n), _) => Some(Selection::line(n)?),
        (None, range) => range,
    };

    let config = load_config(ctx, &file)?;
    let options = LinkOptions {
        preferred_remotes: config.remotes(),
        remote: args.remote,
    };
    output::debug(
        format!(
            "remote preference: {}",
            match &options.remote {
                Some(remote) => remote.clone(),
                None => options.preferred_remotes.join(", "),
            }
        ),
        verbosity,
    );

    let registry = ForgeRegistry::global();
    let link = permalink_for_path(&file, &registry, selection, &options)?;

    for skipped in &link.skipped_remotes {
        output::debug(
            format!("skipped remote '{}': {}", skipped.name, skipped.reason),
            verbosity,
        );
    }
    output::debug(
        format!("{} remote '{}': {}", link.backend, link.remote, link.remote_url),
        verbosity,
    );
    output::debug(format!("revision: {}", link.revision), verbosity);
    output::debug(
        format!("matched {} ({})", link.forge_host, link.forge_kind),
        verbosity,
    );
    if let Some(selection) = selection {
        if selection.is_range() && !link.forge_kind.supports_ranges() {
            output::debug(
                format!(
                    "{} links cannot express a range end; linking line {}",
                    link.forge_kind,
                    selection.start()
                ),
                verbosity,
            );
        }
    }

    output::result(&link.url);

    if args.copy || config.copy() {
        copy_to_clipboard(&link.url, verbosity);
    }
    if args.open {
        if let Err(e) = open::that(&link.url) {
            output::warn(format!("Failed to open the link: {}", e), verbosity);
        }
    }

    Ok(())
}

fn copy_to_clipboard(url: &str, verbosity: Verbosity) {
    let copied = arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(url));
    match copied {
        Ok(()) => output::debug("copied link to clipboard", verbosity),
        Err(e) => output::warn(format!("Failed to copy the link: {}", e), verbosity),
    }
}
