//! Validation of raw [`Options`] into [`ResolvedOptions`].

use autocomp_fs::NormalizedPath;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use super::options::{DtsOption, GlobalsPropValue, Options};
use crate::filter::{DEFAULT_EXCLUDE, DEFAULT_INCLUDE, PathFilter};
use crate::imports::ExternalImport;
use crate::{Error, Result};

/// Declaration file name used when `dts` is `true` or left to detection.
pub const DEFAULT_DTS_FILE: &str = "components.d.ts";

pub const DEFAULT_ESLINTRC_FILE: &str = "./.eslintrc-components.json";

const DEFAULT_DIRS: &[&str] = &["src/components"];

const DEFAULT_EXTENSIONS: &[&str] = &["svelte"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEslintrc {
    pub enabled: bool,
    pub filepath: NormalizedPath,
    pub globals_prop_value: GlobalsPropValue,
}

/// Fully defaulted, validated configuration for one project root.
#[derive(Debug, Clone)]
pub struct ResolvedOptions {
    pub root: NormalizedPath,
    pub dirs: Vec<String>,
    pub extensions: Vec<String>,
    /// Absolute component directories; empty when explicit globs are used.
    pub resolved_dirs: Vec<NormalizedPath>,
    /// Absolute glob patterns; `{a,b}` alternatives are kept as written.
    pub globs: Vec<String>,
    pub deep: bool,
    /// Absolute path of the declaration artifact, if enabled.
    pub dts: Option<NormalizedPath>,
    pub directory_as_namespace: bool,
    pub global_namespaces: Vec<String>,
    pub collapse_same_prefixes: bool,
    pub allow_overrides: bool,
    pub strip_non_alphanumeric: bool,
    pub sourcemap: bool,
    pub filter: PathFilter,
    pub external: Vec<ExternalImport>,
    pub eslintrc: ResolvedEslintrc,
    matcher: GlobSet,
}

impl ResolvedOptions {
    /// Whether `path` is matched by one of the component globs.
    pub fn matches_globs(&self, path: &NormalizedPath) -> bool {
        self.matcher.is_match(path.as_str())
    }
}

/// Resolve `options` against the project `root`.
///
/// # Errors
///
/// - [`Error::MissingExtensions`] when no explicit globs are given and the
///   extension list is empty
/// - [`Error::InvalidGlob`] / [`Error::InvalidFilter`] for patterns that do
///   not compile
pub fn resolve_options(options: &Options, root: &NormalizedPath) -> Result<ResolvedOptions> {
    let dirs = options.dirs.clone().unwrap_or_else(|| strings(DEFAULT_DIRS));
    let extensions: Vec<String> = options
        .extensions
        .clone()
        .unwrap_or_else(|| strings(DEFAULT_EXTENSIONS))
        .into_iter()
        .map(|ext| ext.trim_start_matches('.').to_string())
        .collect();
    let deep = options.deep.unwrap_or(true);

    let (globs, resolved_dirs) = match &options.globs {
        Some(globs) => {
            let globs: Vec<String> = globs
                .iter()
                .map(|g| NormalizedPath::resolve(root, g).as_str().to_string())
                .collect();
            (globs, Vec::new())
        }
        None => {
            if extensions.is_empty() {
                return Err(Error::MissingExtensions);
            }
            let resolved_dirs: Vec<NormalizedPath> = dirs
                .iter()
                .map(|dir| NormalizedPath::resolve(root, dir))
                .collect();
            let globs: Vec<String> = resolved_dirs
                .iter()
                .flat_map(|dir| {
                    extensions.iter().map(move |ext| {
                        let file = format!("*.{ext}");
                        let pattern = if deep {
                            dir.join("**").join(&file)
                        } else {
                            dir.join(&file)
                        };
                        pattern.as_str().to_string()
                    })
                })
                .collect();
            (globs, resolved_dirs)
        }
    };

    let matcher = compile_globs(&globs)?;

    let dts = match &options.dts {
        Some(DtsOption::Enabled(false)) => None,
        Some(DtsOption::Enabled(true)) => Some(NormalizedPath::resolve(root, DEFAULT_DTS_FILE)),
        Some(DtsOption::Path(path)) => Some(NormalizedPath::resolve(root, path)),
        None => typescript_installed(root).then(|| NormalizedPath::resolve(root, DEFAULT_DTS_FILE)),
    };

    let include = options
        .include
        .clone()
        .unwrap_or_else(|| strings(DEFAULT_INCLUDE));
    let exclude = options
        .exclude
        .clone()
        .unwrap_or_else(|| strings(DEFAULT_EXCLUDE));
    let filter = PathFilter::new(include.as_slice(), exclude.as_slice())?;

    let eslintrc = options.eslintrc.clone().unwrap_or_default();
    let eslintrc = ResolvedEslintrc {
        enabled: eslintrc.enabled.unwrap_or(false),
        filepath: NormalizedPath::resolve(
            root,
            eslintrc.filepath.as_deref().unwrap_or(DEFAULT_ESLINTRC_FILE),
        ),
        globals_prop_value: eslintrc.globals_prop_value.unwrap_or_default(),
    };

    tracing::debug!(%root, ?globs, ?dts, "Resolved options");

    Ok(ResolvedOptions {
        root: root.clone(),
        dirs,
        extensions,
        resolved_dirs,
        globs,
        deep,
        dts,
        directory_as_namespace: options.directory_as_namespace.unwrap_or(false),
        global_namespaces: options.global_namespaces.clone().unwrap_or_default(),
        collapse_same_prefixes: options.collapse_same_prefixes.unwrap_or(false),
        allow_overrides: options.allow_overrides.unwrap_or(false),
        strip_non_alphanumeric: options.strip_non_alphanumeric.unwrap_or(true),
        sourcemap: options.sourcemap.unwrap_or(true),
        filter,
        external: options.external.clone().unwrap_or_default(),
        eslintrc,
        matcher,
    })
}

/// Compiles `globs` into one set; `*` never crosses a `/`, `**` does.
fn compile_globs(globs: &[String]) -> Result<GlobSet> {
    let invalid = |pattern: &str, e: globset::Error| Error::InvalidGlob {
        pattern: pattern.to_string(),
        message: e.to_string(),
    };

    let mut builder = GlobSetBuilder::new();
    for pattern in globs {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| invalid(pattern, e))?;
        builder.add(glob);
    }
    builder.build().map_err(|e| invalid(&globs.join(", "), e))
}

fn typescript_installed(root: &NormalizedPath) -> bool {
    NormalizedPath::resolve(root, "node_modules/typescript/package.json").is_file()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> NormalizedPath {
        NormalizedPath::new("/project")
    }

    #[test]
    fn test_defaults() {
        let resolved = resolve_options(&Options::default(), &root()).unwrap();
        assert_eq!(resolved.globs, vec!["/project/src/components/**/*.svelte"]);
        assert_eq!(
            resolved.resolved_dirs,
            vec![NormalizedPath::new("/project/src/components")]
        );
        assert!(resolved.strip_non_alphanumeric);
        assert!(resolved.sourcemap);
        assert!(!resolved.eslintrc.enabled);
        assert_eq!(
            resolved.eslintrc.filepath.as_str(),
            "/project/.eslintrc-components.json"
        );
    }

    #[test]
    fn test_one_glob_per_extension_and_shallow() {
        let options = Options {
            extensions: Some(vec!["svelte".into(), ".md".into()]),
            deep: Some(false),
            ..Default::default()
        };
        let resolved = resolve_options(&options, &root()).unwrap();
        assert_eq!(
            resolved.globs,
            vec!["/project/src/components/*.svelte", "/project/src/components/*.md"]
        );
    }

    #[test]
    fn test_missing_extensions() {
        let options = Options {
            extensions: Some(vec![]),
            ..Default::default()
        };
        let err = resolve_options(&options, &root()).unwrap_err();
        assert!(matches!(err, Error::MissingExtensions));
    }

    #[test]
    fn test_explicit_globs_skip_extension_check() {
        let options = Options {
            extensions: Some(vec![]),
            globs: Some(vec!["./ui/**/*.{svelte,vue}".into()]),
            ..Default::default()
        };
        let resolved = resolve_options(&options, &root()).unwrap();
        assert_eq!(resolved.globs, vec!["/project/ui/**/*.{svelte,vue}"]);
        assert!(resolved.resolved_dirs.is_empty());
    }

    #[test]
    fn test_glob_matching_respects_depth() {
        let resolved = resolve_options(&Options::default(), &root()).unwrap();
        assert!(resolved.matches_globs(&"/project/src/components/Card.svelte".into()));
        assert!(resolved.matches_globs(&"/project/src/components/a/b/Card.svelte".into()));
        assert!(!resolved.matches_globs(&"/project/src/pages/Card.svelte".into()));

        let shallow = Options {
            deep: Some(false),
            ..Default::default()
        };
        let resolved = resolve_options(&shallow, &root()).unwrap();
        assert!(!resolved.matches_globs(&"/project/src/components/a/Card.svelte".into()));
    }

    #[test]
    fn test_dts_resolution() {
        let off = Options {
            dts: Some(DtsOption::Enabled(false)),
            ..Default::default()
        };
        assert_eq!(resolve_options(&off, &root()).unwrap().dts, None);

        let on = Options {
            dts: Some(DtsOption::Enabled(true)),
            ..Default::default()
        };
        assert_eq!(
            resolve_options(&on, &root()).unwrap().dts,
            Some(NormalizedPath::new("/project/components.d.ts"))
        );

        let custom = Options {
            dts: Some(DtsOption::Path("types/ui.d.ts".into())),
            ..Default::default()
        };
        assert_eq!(
            resolve_options(&custom, &root()).unwrap().dts,
            Some(NormalizedPath::new("/project/types/ui.d.ts"))
        );
    }

    #[test]
    fn test_brace_alternatives_match() {
        let options = Options {
            globs: Some(vec!["src/{ui,lib}/*.{svelte,vue}".into()]),
            ..Default::default()
        };
        let resolved = resolve_options(&options, &root()).unwrap();
        assert!(resolved.matches_globs(&"/project/src/ui/Card.svelte".into()));
        assert!(resolved.matches_globs(&"/project/src/lib/Card.vue".into()));
        assert!(!resolved.matches_globs(&"/project/src/pages/Card.svelte".into()));
        assert!(!resolved.matches_globs(&"/project/src/ui/nested/Card.svelte".into()));
    }

    #[test]
    fn test_invalid_glob_is_reported() {
        let options = Options {
            globs: Some(vec!["src/[ui/*.svelte".into()]),
            ..Default::default()
        };
        let err = resolve_options(&options, &root()).unwrap_err();
        assert!(matches!(err, Error::InvalidGlob { .. }), "got {err:?}");
    }
}
