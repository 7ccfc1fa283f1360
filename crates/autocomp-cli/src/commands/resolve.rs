//! Resolve a single component name

use std::path::Path;

use autocomp_core::Options;
use colored::Colorize;

use super::{load_context, project_path};
use crate::error::{CliError, Result};

/// Run the resolve command
pub fn run_resolve(
    root: &Path,
    overrides: &Options,
    name: &str,
    from: Option<&Path>,
) -> Result<()> {
    let mut ctx = load_context(root, overrides)?;
    ctx.search_glob()?;

    let consumer = from.map(|file| project_path(ctx.root(), file));
    let exclude: Vec<&str> = consumer.iter().map(|p| p.as_str()).collect();

    let info = ctx
        .find_component(name, &exclude)
        .ok_or_else(|| CliError::user(format!("Component '{}' not found", name)))?;

    tracing::debug!(%name, from = %info.from, "Resolved component");
    println!("{}", info.to_statement().green());
    Ok(())
}
