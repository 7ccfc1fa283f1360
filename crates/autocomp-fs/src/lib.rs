//! Filesystem helpers for autocomp
//!
//! Provides forward-slash path normalisation (component paths are compared
//! as strings everywhere else in the workspace) and atomic artifact writes.

pub mod error;
pub mod io;
pub mod path;

pub use error::{Error, Result};
pub use path::{NormalizedPath, canonicalize_root, slash};
