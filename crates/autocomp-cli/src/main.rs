//! autocomp CLI
//!
//! Discovers components, injects their imports into template files and
//! keeps the declaration and lint artifacts up to date.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Control log verbosity (default: `info`, `debug` with `-v`)
//! - `AUTOCOMP_ROOT`: Project root when `--root` is not given

mod cli;
mod commands;
mod error;

use std::path::Path;

use autocomp_core::Options;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let overrides = cli.overrides();

    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Some(cmd) => execute_command(cmd, &root, &overrides),
        None => {
            println!(
                "{} Automatic component imports",
                "autocomp".green().bold()
            );
            println!();
            println!("Run {} for available commands.", "autocomp --help".cyan());
            Ok(())
        }
    }
}

/// Logs go to stderr so `transform` output can be piped.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .try_init();
}

fn execute_command(cmd: Commands, root: &Path, overrides: &Options) -> Result<()> {
    match cmd {
        Commands::List { json } => commands::run_list(root, overrides, json),
        Commands::Resolve { name, from } => {
            commands::run_resolve(root, overrides, &name, from.as_deref())
        }
        Commands::Transform { file, write } => {
            block_on(commands::run_transform(root, overrides, &file, write))
        }
        Commands::Generate => commands::run_generate(root, overrides),
        Commands::Watch => block_on(commands::run_watch(root, overrides)),
    }
}

fn block_on<F>(future: F) -> Result<()>
where
    F: std::future::Future<Output = Result<()>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(future)
}
