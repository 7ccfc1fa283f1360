//! Import descriptors and external library declarations.

use serde::{Deserialize, Serialize};

/// How to import one component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ImportInfo {
    /// Local binding the component is imported as.
    #[serde(rename = "as")]
    pub alias: String,
    /// Module specifier.
    pub from: String,
    /// Exported name when it differs from `alias`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub default_import: bool,
}

impl ImportInfo {
    /// A default import of a local component file.
    pub fn local(alias: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            from: from.into(),
            name: None,
            default_import: true,
        }
    }

    /// Renders the import statement.
    ///
    /// ```
    /// use autocomp_core::ImportInfo;
    ///
    /// let info = ImportInfo::local("Card", "/src/Card.svelte");
    /// assert_eq!(info.to_statement(), r#"import Card from "/src/Card.svelte""#);
    /// ```
    pub fn to_statement(&self) -> String {
        let from = serde_json::Value::String(self.from.clone());
        match &self.name {
            Some(name) => format!("import {{ {name} as {} }} from {from}", self.alias),
            None if !self.default_import => format!("import {{ {} }} from {from}", self.alias),
            None => format!("import {} from {from}", self.alias),
        }
    }
}

/// One entry of an external declaration's `names` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportSpec {
    /// `Button`
    Bare(String),
    /// `Button as LButton`
    Aliased { name: String, alias: String },
}

impl ExportSpec {
    /// Parses `Name` or `Name as Alias`.
    ///
    /// Only a standalone `as` token introduces an alias, so identifiers such
    /// as `Canvas` or `Alias` stay bare.
    pub fn parse(spec: &str) -> Self {
        let tokens: Vec<&str> = spec.split_whitespace().collect();
        match tokens.as_slice() {
            [name, "as", alias] => Self::Aliased {
                name: name.to_string(),
                alias: alias.to_string(),
            },
            _ => Self::Bare(spec.trim().to_string()),
        }
    }

    /// The name the export is referenced by in markup.
    pub fn alias(&self) -> &str {
        match self {
            Self::Bare(name) => name,
            Self::Aliased { alias, .. } => alias,
        }
    }
}

/// Components exported by a third-party module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ExternalImport {
    pub from: String,
    #[serde(default)]
    pub names: Vec<String>,
    #[serde(default)]
    pub default_import: bool,
}

impl ExternalImport {
    pub fn specs(&self) -> impl Iterator<Item = ExportSpec> + '_ {
        self.names.iter().map(|n| ExportSpec::parse(n))
    }

    /// Resolves `name` against this declaration's export specs.
    pub fn resolve(&self, name: &str) -> Option<ImportInfo> {
        let spec = self.specs().find(|spec| spec.alias() == name)?;
        Some(match spec {
            ExportSpec::Aliased { name, alias } => ImportInfo {
                alias,
                from: self.from.clone(),
                name: Some(name),
                default_import: false,
            },
            ExportSpec::Bare(name) => ImportInfo {
                alias: name,
                from: self.from.clone(),
                name: None,
                default_import: self.default_import,
            },
        })
    }
}

/// Flattens external declarations into one `ImportInfo` per export.
pub fn resolve_external_imports(external: &[ExternalImport]) -> Vec<ImportInfo> {
    external
        .iter()
        .flat_map(|decl| {
            decl.specs()
                .filter_map(|spec| decl.resolve(spec.alias()))
                .collect::<Vec<_>>()
        })
        .collect()
}
