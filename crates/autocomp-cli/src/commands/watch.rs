//! Keep artifacts current while component files come and go

use std::path::Path;

use autocomp_core::{Options, watch_components};
use colored::Colorize;

use super::load_context;
use crate::error::Result;

/// Run the watch command until interrupted
pub async fn run_watch(root: &Path, overrides: &Options) -> Result<()> {
    let mut ctx = load_context(root, overrides)?;
    ctx.search_glob()?;
    ctx.generate_artifacts()?;

    let (_watcher, events) = watch_components(ctx.options())?;
    for glob in &ctx.options().globs {
        println!("{} {}", "Watching".green().bold(), glob);
    }

    tokio::select! {
        result = ctx.watch(events) => result?,
        _ = tokio::signal::ctrl_c() => {
            tracing::debug!("Interrupted, writing final artifacts");
        }
    }

    // A regeneration may still be parked when the loop is interrupted
    ctx.generate_artifacts()?;
    Ok(())
}
