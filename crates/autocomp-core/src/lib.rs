//! Component auto-import engine for autocomp
//!
//! This crate discovers component files, derives a canonical name for each,
//! and rewrites consumer templates so every referenced component is imported:
//!
//! - **Configuration**: `autocomp.toml` options resolved into absolute globs
//! - **Naming**: deterministic path → PascalCase name derivation
//! - **Registry**: component paths, name map, custom map and usage map
//! - **Resolution**: local registry first, then external library declarations
//! - **Transform**: usage scan and idempotent import injection
//! - **Invalidation**: add/unlink events, live-session notification and
//!   throttled artifact regeneration
//!
//! # Architecture
//!
//! ```text
//!                 autocomp-cli
//!                      |
//!                autocomp-core
//!                 /          \
//!       autocomp-fs      autocomp-markup
//! ```
//!
//! # Example
//!
//! ```no_run
//! use autocomp_core::{Context, Options, Result};
//! use autocomp_fs::NormalizedPath;
//!
//! async fn example() -> Result<()> {
//!     let root = NormalizedPath::new("/path/to/project");
//!     let mut ctx = Context::new(Options::load(&root)?, root)?;
//!     let result = ctx.transform("<Card />", "/path/to/project/src/App.svelte").await?;
//!     if let Some(result) = result {
//!         println!("{}", result.code);
//!     }
//!     Ok(())
//! }
//! ```

pub mod artifacts;
pub mod config;
pub mod context;
pub mod error;
pub mod filter;
pub mod imports;
pub mod naming;
pub mod plugin;
pub mod registry;
pub mod search;
pub mod session;
pub mod throttle;
pub mod transform;
pub mod watch;

pub use config::{Options, ResolvedOptions, resolve_options};
pub use context::{Context, ImportPathTransform};
pub use error::{Error, Result};
pub use filter::PathFilter;
pub use imports::{ExportSpec, ExternalImport, ImportInfo, resolve_external_imports};
pub use naming::{derive_name, name_from_path, pascal_case};
pub use plugin::Plugin;
pub use registry::Registry;
pub use search::search_components;
pub use session::{ChannelSession, LiveSession, Update, UpdatePayload};
pub use throttle::{Cancelled, Fire, Throttle};
pub use transform::{DISABLE_MARKER, ParsedId, Preprocessor, TransformResult, parse_id};
pub use watch::{WatchEvent, watch_components};
