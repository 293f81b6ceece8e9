//! forges command - List the effective forge table

use std::path::Path;

use anyhow::{Context as _, Result};

use super::load_config;
use crate::engine::Context;
use crate::forge::{ForgeEntry, ForgeRegistry};
use crate::ui::output;

/// Print the forge table in match order.
///
/// Config from the repository at `--cwd` (or the current directory) is
/// applied, so the listing matches what a link command there would use.
pub fn forges(ctx: &Context, json: bool) -> Result<()> {
    let cwd = ctx
        .resolve_path(Path::new("."))
        .context("Failed to read the current directory")?;
    load_config(ctx, &cwd)?;

    let table = ForgeRegistry::global().table();

    if json {
        let rendered =
            serde_json::to_string_pretty(&table).context("Failed to serialize forge table")?;
        output::result(rendered);
    } else {
        output::result(render(&table));
    }

    Ok(())
}

fn render(table: &[ForgeEntry]) -> String {
    let rows: Vec<Vec<String>> = table
        .iter()
        .map(|entry| {
            vec![
                entry.host.clone(),
                entry.kind.to_string(),
                entry.protocol.clone(),
            ]
        })
        .collect();
    output::format_table(&rows)
}
