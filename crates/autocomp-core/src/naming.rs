//! Canonical component names.
//!
//! A component's name is derived from its path below one of the resolved
//! component directories:
//!
//! ```text
//! src/components/Button.svelte          -> Button
//! src/components/form/index.svelte      -> Form
//! src/components/form/Input.svelte      -> Input       (no namespace)
//!                                       -> FormInput   (namespace)
//! src/components/form/FormInput.svelte  -> FormInput   (namespace + collapse)
//! ```

use std::sync::LazyLock;

use autocomp_fs::NormalizedPath;
use regex::Regex;

use crate::config::ResolvedOptions;

static DASH_WORD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-(\w)").expect("Invalid dash regex"));

/// Raw, un-cased name for `path`: `form` for `form/index`, `form-Input` for
/// `form/Input` under namespacing.
pub fn name_from_path(path: &NormalizedPath, options: &ResolvedOptions) -> String {
    let parent = path.parent().unwrap_or_else(|| NormalizedPath::new(""));

    // Longest matching root wins so nested roots behave
    let below_root = options
        .resolved_dirs
        .iter()
        .filter_map(|dir| parent.strip_dir(dir).map(|rest| (dir.as_str().len(), rest)))
        .max_by_key(|(len, _)| *len)
        .map(|(_, rest)| rest)
        .unwrap_or("");

    let mut folders: Vec<String> = below_root
        .split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    let strip = options.strip_non_alphanumeric;
    let stem = path.file_stem().unwrap_or_default();
    let mut filename = if strip {
        alphanumeric(stem)
    } else {
        stem.to_string()
    };

    if !options.directory_as_namespace {
        if filename == "index" {
            return folders.pop().unwrap_or(filename);
        }
        return filename;
    }

    folders.retain(|f| !options.global_namespaces.contains(f));
    if strip {
        folders = folders.iter().map(|f| alphanumeric(f)).collect();
    }

    if folders.is_empty() {
        return filename;
    }

    if filename.eq_ignore_ascii_case("index") {
        filename.clear();
    }

    let mut namespaced = folders;
    namespaced.push(filename);
    if options.collapse_same_prefixes {
        namespaced = collapse_same_prefixes(namespaced);
    }

    namespaced
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// The registry key for `path`.
pub fn derive_name(path: &NormalizedPath, options: &ResolvedOptions) -> String {
    pascal_case(&name_from_path(path, options))
}

pub fn pascal_case(s: &str) -> String {
    capitalize(&camel_case(s))
}

/// `-x` becomes `X` for any word character `x`.
pub fn camel_case(s: &str) -> String {
    DASH_WORD_REGEX
        .replace_all(s, |caps: &regex::Captures| caps[1].to_uppercase())
        .into_owned()
}

pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn alphanumeric(s: &str) -> String {
    s.chars().filter(char::is_ascii_alphanumeric).collect()
}

fn collapse_same_prefixes(segments: Vec<String>) -> Vec<String> {
    let mut collapsed: Vec<String> = Vec::with_capacity(segments.len());
    for segment in segments {
        let prefix = collapsed.concat();
        let folded = if prefix.is_empty() {
            None
        } else {
            strip_prefix_ignore_case(&segment, &prefix).map(str::to_string)
        };
        collapsed.push(folded.unwrap_or(segment));
    }
    collapsed
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let mut rest = s;
    for p in prefix.chars() {
        let mut chars = rest.chars();
        let c = chars.next()?;
        if !c.to_lowercase().eq(p.to_lowercase()) {
            return None;
        }
        rest = chars.as_str();
    }
    Some(rest)
}
