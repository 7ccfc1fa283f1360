//! Command implementations for autocomp-cli

pub mod generate;
pub mod list;
pub mod resolve;
pub mod transform;
pub mod watch;

pub use generate::run_generate;
pub use list::run_list;
pub use resolve::run_resolve;
pub use transform::run_transform;
pub use watch::run_watch;

use std::path::Path;

use autocomp_core::{Context, Options};
use autocomp_fs::{NormalizedPath, canonicalize_root};

use crate::error::Result;

/// Build a context for `root` from its `autocomp.toml` and `overrides`.
pub(crate) fn load_context(root: &Path, overrides: &Options) -> Result<Context> {
    let root = canonicalize_root(root)?;
    let mut options = Options::load(&root)?;
    options.merge(overrides);
    Ok(Context::new(options, root)?)
}

/// Absolute path of `file`, taken relative to the project root when relative.
pub(crate) fn project_path(root: &NormalizedPath, file: &Path) -> NormalizedPath {
    let file = NormalizedPath::new(file);
    if file.is_absolute() {
        file
    } else {
        NormalizedPath::resolve(root, file.as_str())
    }
}
