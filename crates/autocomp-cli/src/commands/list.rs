//! List discovered and external components

use std::collections::BTreeMap;
use std::path::Path;

use autocomp_core::{ImportInfo, Options, resolve_external_imports};
use colored::Colorize;
use serde::Serialize;

use super::load_context;
use crate::error::Result;

#[derive(Serialize)]
struct Listing<'a> {
    components: &'a BTreeMap<String, ImportInfo>,
    external: &'a [ImportInfo],
}

/// Run the list command
pub fn run_list(root: &Path, overrides: &Options, json: bool) -> Result<()> {
    let mut ctx = load_context(root, overrides)?;
    ctx.search_glob()?;

    let components = ctx.registry().all_components();
    let external = resolve_external_imports(&ctx.options().external);

    if json {
        let listing = Listing {
            components: &components,
            external: &external,
        };
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    println!("{}", "Components".bold());
    if components.is_empty() {
        println!("  {}", "(none found)".dimmed());
    }
    for (name, info) in &components {
        let from = autocomp_fs::NormalizedPath::new(&info.from);
        let shown = if from.is_absolute() {
            from.relative_to(ctx.root())
        } else {
            info.from.clone()
        };
        println!("  {:<24} {}", name.green(), shown.dimmed());
    }

    if !external.is_empty() {
        println!();
        println!("{}", "External".bold());
        for info in &external {
            let export = info.name.as_deref().unwrap_or(&info.alias);
            println!(
                "  {:<24} {} ({})",
                info.alias.cyan(),
                info.from,
                export.dimmed()
            );
        }
    }

    println!();
    println!(
        "{} {} components, {} external.",
        "Total:".dimmed(),
        components.len(),
        external.len()
    );

    Ok(())
}
