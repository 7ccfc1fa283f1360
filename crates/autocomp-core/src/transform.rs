//! Usage scanning and import injection for one consumer file.

use std::collections::BTreeMap;

use async_trait::async_trait;
use autocomp_fs::NormalizedPath;
use autocomp_markup::{SourceMap, imported_bindings, plan_imports};

use crate::Result;
use crate::context::Context;
use crate::imports::ImportInfo;

/// Files containing this marker are never rewritten.
pub const DISABLE_MARKER: &str = "/* autocomp disabled */";

/// Rewrites source text before it is scanned for component usage.
///
/// Splice offsets always come from the unprocessed text, so a preprocessor
/// may change the markup freely.
#[async_trait]
pub trait Preprocessor: Send + Sync {
    async fn preprocess(&self, code: &str, filename: &str) -> Result<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformResult {
    pub code: String,
    pub map: Option<SourceMap>,
}

/// A module id split into its file path and query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedId {
    pub path: String,
    pub query: BTreeMap<String, String>,
}

/// Split `path?query` ids.
///
/// ```
/// use autocomp_core::transform::parse_id;
///
/// let id = parse_id("/src/App.svelte?type=style&lang.css");
/// assert_eq!(id.path, "/src/App.svelte");
/// assert_eq!(id.query["type"], "style");
/// assert_eq!(id.query["lang.css"], "");
/// ```
pub fn parse_id(id: &str) -> ParsedId {
    let Some((path, query)) = id.split_once('?') else {
        return ParsedId {
            path: id.to_string(),
            query: BTreeMap::new(),
        };
    };

    let query = url::form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect();

    ParsedId {
        path: path.to_string(),
        query,
    }
}

pub fn should_transform(code: &str) -> bool {
    !code.contains(DISABLE_MARKER)
}

impl Context {
    /// Whether the host should hand `id` to [`Context::transform`].
    pub fn transform_include(&self, id: &str) -> bool {
        self.options().filter.matches(&parse_id(id).path)
    }

    /// Inject imports for every component referenced in `code`.
    ///
    /// Returns `None` when the file is empty, carries the disable marker, or
    /// already imports everything it uses.
    pub async fn transform(&mut self, code: &str, id: &str) -> Result<Option<TransformResult>> {
        if code.is_empty() || !should_transform(code) {
            return Ok(None);
        }

        self.search_glob()?;

        let parsed = parse_id(id);
        let consumer = NormalizedPath::new(&parsed.path);

        let original = self.parser().parse(code)?;
        let processed = match self.preprocessor() {
            Some(preprocessor) => Some(preprocessor.preprocess(code, &parsed.path).await?),
            None => None,
        };
        let (scan_source, scanned) = match &processed {
            Some(text) => (text.as_str(), self.parser().parse(text)?),
            None => (code, original.clone()),
        };

        // Components the author imported by hand are left alone
        let bound = scanned
            .instance
            .as_ref()
            .map(|script| imported_bindings(script.content(scan_source)))
            .unwrap_or_default();
        let names: Vec<String> = scanned
            .component_names()
            .into_iter()
            .filter(|name| !bound.contains(name))
            .collect();
        self.update_usage_map(&consumer, names.iter().cloned());

        let mut imports = Vec::new();
        for name in &names {
            let Some(info) = self.find_component(name, &[consumer.as_str()]) else {
                tracing::trace!(%name, consumer = %consumer, "Unresolved component");
                continue;
            };
            let info = ImportInfo {
                alias: name.clone(),
                from: self.transform_import_path(&info.from),
                ..info
            };
            imports.push(info.to_statement());
        }

        let Some(splice) = plan_imports(code, &original, &imports) else {
            return Ok(None);
        };

        tracing::debug!(consumer = %consumer, count = imports.len(), "Injected component imports");

        let map = self
            .options()
            .sourcemap
            .then(|| SourceMap::for_splice(code, Some(&splice), id));
        Ok(Some(TransformResult {
            code: splice.apply(code),
            map,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_without_query() {
        let id = parse_id("/src/App.svelte");
        assert_eq!(id.path, "/src/App.svelte");
        assert!(id.query.is_empty());
    }

    #[test]
    fn test_query_decoding() {
        let id = parse_id("/a.svelte?name=a+b%21&x=%zz");
        assert_eq!(id.query["name"], "a b!");
        assert_eq!(id.query["x"], "%zz");

        let id = parse_id("/a.svelte?x=%+1&y=%4");
        assert_eq!(id.query["x"], "% 1");
        assert_eq!(id.query["y"], "%4");
    }

    #[test]
    fn test_disable_marker() {
        assert!(should_transform("<Card />"));
        assert!(!should_transform("<!-- /* autocomp disabled */ --><Card />"));
    }
}
