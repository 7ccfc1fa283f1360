//! Inject imports into one file

use std::path::Path;

use autocomp_core::{Options, Plugin};
use autocomp_fs::io::{read_text, write_text};
use colored::Colorize;

use super::{load_context, project_path};
use crate::error::{CliError, Result};

/// Run the transform command
pub async fn run_transform(
    root: &Path,
    overrides: &Options,
    file: &Path,
    write: bool,
) -> Result<()> {
    let mut ctx = load_context(root, overrides)?;
    let path = project_path(ctx.root(), file);
    if !path.is_file() {
        return Err(CliError::user(format!("File not found: {}", path)));
    }

    let code = read_text(&path)?;
    // Artifacts are only refreshed when the file itself is written
    let result = if write {
        Plugin::new(ctx).transform(&code, path.as_str()).await?
    } else {
        ctx.transform(&code, path.as_str()).await?
    };

    match (result, write) {
        (Some(result), true) => {
            write_text(&path, &result.code)?;
            eprintln!("{} {}", "Updated".green().bold(), path);
        }
        (Some(result), false) => print!("{}", result.code),
        (None, true) => eprintln!("{} {}", "Up to date".dimmed(), path),
        (None, false) => print!("{}", code),
    }

    Ok(())
}
