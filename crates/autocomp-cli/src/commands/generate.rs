//! Write declaration and lint artifacts

use std::path::Path;

use autocomp_core::Options;
use colored::Colorize;

use super::load_context;
use crate::error::Result;

/// Run the generate command
pub fn run_generate(root: &Path, overrides: &Options) -> Result<()> {
    let mut ctx = load_context(root, overrides)?;
    let options = ctx.options();

    if options.dts.is_none() && !options.eslintrc.enabled {
        eprintln!(
            "{} Nothing to generate. Set {} or {} in autocomp.toml.",
            "warning:".yellow().bold(),
            "dts = true".cyan(),
            "[eslintrc] enabled = true".cyan()
        );
        return Ok(());
    }

    ctx.search_glob()?;
    ctx.generate_artifacts()?;

    let options = ctx.options();
    if let Some(dts) = &options.dts {
        println!("{} {}", "Wrote".green().bold(), dts.relative_to(ctx.root()));
    }
    if options.eslintrc.enabled {
        println!(
            "{} {}",
            "Wrote".green().bold(),
            options.eslintrc.filepath.relative_to(ctx.root())
        );
    }

    Ok(())
}
