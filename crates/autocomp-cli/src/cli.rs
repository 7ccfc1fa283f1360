//! CLI argument parsing using clap derive

use std::path::PathBuf;

use autocomp_core::Options;
use autocomp_core::config::DtsOption;
use clap::{Parser, Subcommand};

/// autocomp - Automatic component imports for template files
#[derive(Parser, Debug)]
#[command(name = "autocomp")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project root (defaults to the current directory)
    #[arg(long, global = true, env = "AUTOCOMP_ROOT")]
    pub root: Option<PathBuf>,

    /// Override the declaration artifact: `true`, `false` or a path
    #[arg(long, global = true, value_name = "BOOL|PATH")]
    pub dts: Option<String>,

    /// Prefix component names with their folder names
    #[arg(long, global = true)]
    pub namespace: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Options set on the command line, merged over `autocomp.toml`.
    pub fn overrides(&self) -> Options {
        Options {
            dts: self.dts.as_deref().map(|dts| match dts {
                "true" => DtsOption::Enabled(true),
                "false" => DtsOption::Enabled(false),
                path => DtsOption::Path(path.to_string()),
            }),
            directory_as_namespace: self.namespace.then_some(true),
            ..Default::default()
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List discovered components and external declarations
    List {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Show the import a component name resolves to
    ///
    /// Examples:
    ///   autocomp resolve Card
    ///   autocomp resolve Card --from src/components/Card.svelte
    Resolve {
        /// Component name as written in markup
        name: String,

        /// Resolve as seen from this file (it never imports itself)
        #[arg(long)]
        from: Option<PathBuf>,
    },

    /// Inject missing component imports into a file
    ///
    /// Prints the transformed file unless --write is given.
    Transform {
        /// File to transform
        file: PathBuf,

        /// Rewrite the file in place
        #[arg(short, long)]
        write: bool,
    },

    /// Write the declaration and lint artifacts enabled in autocomp.toml
    Generate,

    /// Watch component directories and keep artifacts up to date
    Watch,
}
