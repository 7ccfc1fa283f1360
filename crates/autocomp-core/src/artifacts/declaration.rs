//! TypeScript declaration artifact.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use autocomp_fs::NormalizedPath;
use regex::Regex;

use crate::Result;
use crate::imports::ImportInfo;

const HEADER: &str = "/* eslint-disable */
/* prettier-ignore */
// @ts-nocheck
// Generated by autocomp
";

static ENTRY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*const\s+([A-Za-z_$][\w$]*)\s*:\s*(.+?)\s*$")
        .expect("Invalid declaration entry regex")
});

/// Type expression for one component, relative to the artifact's directory.
pub fn import_type(info: &ImportInfo, dts_dir: &NormalizedPath) -> String {
    let from = NormalizedPath::new(&info.from);
    let specifier = if from.is_absolute() {
        let relative = from.relative_to(dts_dir);
        if relative.starts_with('.') {
            relative
        } else {
            format!("./{relative}")
        }
    } else {
        info.from.clone()
    };

    let export = match (&info.name, info.default_import) {
        (Some(name), _) => name.as_str(),
        (None, true) => "default",
        (None, false) => info.alias.as_str(),
    };

    format!(
        "typeof import({})[{}]",
        serde_json::Value::String(specifier),
        serde_json::Value::String(export.to_string())
    )
}

/// Renders the declaration file from `name -> type` entries.
pub fn render_declaration(entries: &BTreeMap<String, String>) -> String {
    let mut out = String::from(HEADER);
    out.push_str("export {}\n\ndeclare global {\n");
    for (name, ty) in entries {
        out.push_str(&format!("  const {name}: {ty}\n"));
    }
    out.push_str("}\n");
    out
}

/// Reads `name -> type` entries back from a rendered declaration.
pub fn parse_declaration(content: &str) -> BTreeMap<String, String> {
    ENTRY_REGEX
        .captures_iter(content)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect()
}

/// Writes the declaration for `components` to `path`.
///
/// With `remove_unused` off, entries of an existing file that are not among
/// `components` are kept. Returns `true` when the file changed on disk.
pub fn write_declaration(
    path: &NormalizedPath,
    components: &BTreeMap<String, ImportInfo>,
    remove_unused: bool,
) -> Result<bool> {
    let dts_dir = path.parent().unwrap_or_else(|| NormalizedPath::new("/"));
    let mut entries: BTreeMap<String, String> = components
        .iter()
        .map(|(name, info)| (name.clone(), import_type(info, &dts_dir)))
        .collect();

    if !remove_unused {
        if let Some(existing) = autocomp_fs::io::read_text_opt(path)? {
            for (name, ty) in parse_declaration(&existing) {
                entries.entry(name).or_insert(ty);
            }
        }
    }

    let written = autocomp_fs::io::write_text_if_changed(path, &render_declaration(&entries))?;
    if written {
        tracing::info!(%path, count = entries.len(), "Wrote component declarations");
    }
    Ok(written)
}
