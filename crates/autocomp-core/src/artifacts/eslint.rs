//! Lint globals artifact.

use autocomp_fs::NormalizedPath;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::Result;
use crate::config::GlobalsPropValue;

/// Renders `{"globals": {...}}` with four-space indentation.
pub fn render_eslintrc<I>(names: I, value: &GlobalsPropValue) -> Result<String>
where
    I: IntoIterator<Item = String>,
{
    let value = serde_json::to_value(value)?;
    let globals: serde_json::Map<String, serde_json::Value> = names
        .into_iter()
        .filter(|name| !name.is_empty())
        .map(|name| (name, value.clone()))
        .collect();
    let mut data = serde_json::Map::new();
    data.insert("globals".to_string(), serde_json::Value::Object(globals));

    let mut out = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
    data.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Writes the lint globals file. Returns `true` when it changed on disk.
pub fn write_eslintrc(path: &NormalizedPath, content: &str) -> Result<bool> {
    let written = autocomp_fs::io::write_text_if_changed(path, content)?;
    if written {
        tracing::info!(%path, "Wrote lint globals");
    }
    Ok(written)
}
