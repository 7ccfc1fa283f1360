//! Raw, partially specified options as read from `autocomp.toml`.

use std::path::PathBuf;

use autocomp_fs::NormalizedPath;
use serde::{Deserialize, Serialize};

use crate::imports::ExternalImport;
use crate::{Error, Result};

/// File name of the project configuration.
pub const CONFIG_FILE: &str = "autocomp.toml";

/// `dts = true | false | "path/to/file.d.ts"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DtsOption {
    Enabled(bool),
    Path(String),
}

/// Value written for every global in the lint artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GlobalsPropValue {
    Bool(bool),
    /// `readonly`, `readable`, `writable` or `writeable`
    Access(String),
}

impl Default for GlobalsPropValue {
    fn default() -> Self {
        Self::Bool(true)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct EslintrcOptions {
    pub enabled: Option<bool>,
    pub filepath: Option<String>,
    pub globals_prop_value: Option<GlobalsPropValue>,
}

/// Every field is optional; unset fields fall back to defaults during
/// resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Options {
    /// Directories searched for components, relative to the root.
    pub dirs: Option<Vec<String>>,
    /// Component file extensions.
    pub extensions: Option<Vec<String>>,
    /// Explicit glob patterns; when set, `dirs` and `extensions` are ignored.
    pub globs: Option<Vec<String>>,
    /// Search subdirectories.
    pub deep: Option<bool>,
    pub dts: Option<DtsOption>,
    pub directory_as_namespace: Option<bool>,
    /// Folder names that never contribute a namespace segment.
    pub global_namespaces: Option<Vec<String>>,
    pub collapse_same_prefixes: Option<bool>,
    /// Let later components silently replace earlier ones with the same name.
    pub allow_overrides: Option<bool>,
    pub strip_non_alphanumeric: Option<bool>,
    pub sourcemap: Option<bool>,
    /// Regular expressions selecting files to transform.
    pub include: Option<Vec<String>>,
    /// Regular expressions selecting files to leave alone.
    pub exclude: Option<Vec<String>>,
    pub external: Option<Vec<ExternalImport>>,
    pub eslintrc: Option<EslintrcOptions>,
}

impl Options {
    /// Parse options from TOML content.
    ///
    /// ```
    /// use autocomp_core::config::Options;
    ///
    /// let options = Options::parse(r#"
    /// dirs = ["src/ui"]
    /// directory-as-namespace = true
    /// "#).unwrap();
    ///
    /// assert_eq!(options.dirs, Some(vec!["src/ui".to_string()]));
    /// assert_eq!(options.directory_as_namespace, Some(true));
    /// ```
    pub fn parse(content: &str) -> Result<Self> {
        let options: Options = toml::from_str(content)?;
        Ok(options)
    }

    /// Load `autocomp.toml` from `root`; a missing file yields empty options.
    pub fn load(root: &NormalizedPath) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        let Some(content) = autocomp_fs::io::read_text_opt(&path)? else {
            tracing::debug!(%path, "No configuration file, using defaults");
            return Ok(Self::default());
        };
        tracing::debug!(%path, "Loading configuration");
        toml::from_str(&content).map_err(|source| Error::Config {
            path: PathBuf::from(path.as_str()),
            source,
        })
    }

    /// Overlay `other` onto `self`; every field set in `other` wins.
    pub fn merge(&mut self, other: &Options) {
        overlay(&mut self.dirs, &other.dirs);
        overlay(&mut self.extensions, &other.extensions);
        overlay(&mut self.globs, &other.globs);
        overlay(&mut self.deep, &other.deep);
        overlay(&mut self.dts, &other.dts);
        overlay(&mut self.directory_as_namespace, &other.directory_as_namespace);
        overlay(&mut self.global_namespaces, &other.global_namespaces);
        overlay(&mut self.collapse_same_prefixes, &other.collapse_same_prefixes);
        overlay(&mut self.allow_overrides, &other.allow_overrides);
        overlay(&mut self.strip_non_alphanumeric, &other.strip_non_alphanumeric);
        overlay(&mut self.sourcemap, &other.sourcemap);
        overlay(&mut self.include, &other.include);
        overlay(&mut self.exclude, &other.exclude);
        overlay(&mut self.external, &other.external);

        match (&mut self.eslintrc, &other.eslintrc) {
            (Some(base), Some(top)) => {
                overlay(&mut base.enabled, &top.enabled);
                overlay(&mut base.filepath, &top.filepath);
                overlay(&mut base.globals_prop_value, &top.globals_prop_value);
            }
            (None, Some(top)) => self.eslintrc = Some(top.clone()),
            _ => {}
        }
    }
}

fn overlay<T: Clone>(base: &mut Option<T>, other: &Option<T>) {
    if other.is_some() {
        base.clone_from(other);
    }
}
