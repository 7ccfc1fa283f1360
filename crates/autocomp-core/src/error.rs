//! Error types for autocomp-core

use std::path::PathBuf;

/// Result type for autocomp-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in autocomp-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No extensions to build search globs from
    #[error("`extensions` option is required to search for components")]
    MissingExtensions,

    /// A glob pattern could not be compiled
    #[error("Invalid glob pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    /// An include/exclude pattern is not a valid regular expression
    #[error("Invalid filter pattern '{pattern}': {source}")]
    InvalidFilter {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The configuration file could not be parsed
    #[error("Invalid configuration in {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The filesystem watcher failed
    #[error("Watcher error: {0}")]
    Watch(#[from] notify::Error),

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from autocomp-fs
    #[error(transparent)]
    Fs(#[from] autocomp_fs::Error),

    /// Template error from autocomp-markup
    #[error(transparent)]
    Markup(#[from] autocomp_markup::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),
}
