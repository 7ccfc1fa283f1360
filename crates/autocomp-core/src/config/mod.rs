//! Configuration loading and resolution
//!
//! Configuration comes from `autocomp.toml` at the project root, optionally
//! overlaid with command-line overrides, and is validated once into
//! [`ResolvedOptions`]:
//!
//! ```toml
//! dirs = ["src/components", "src/lib/ui"]
//! extensions = ["svelte"]
//! directory-as-namespace = true
//! collapse-same-prefixes = true
//! dts = "types/components.d.ts"
//!
//! [[external]]
//! from = "@acme/ui"
//! names = ["Button as AcmeButton", "Dialog"]
//!
//! [eslintrc]
//! enabled = true
//! ```

mod options;
mod resolver;

pub use options::{CONFIG_FILE, DtsOption, EslintrcOptions, GlobalsPropValue, Options};
pub use resolver::{
    DEFAULT_DTS_FILE, DEFAULT_ESLINTRC_FILE, ResolvedEslintrc, ResolvedOptions, resolve_options,
};
