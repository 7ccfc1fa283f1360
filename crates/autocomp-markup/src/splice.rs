//! Import splicing.
//!
//! Decides where generated import lines go and drops lines the file already
//! contains, so running the injector over its own output changes nothing.

use crate::ast::Ast;

/// A single insertion into a source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Splice {
    /// Byte offset in the original text.
    pub offset: usize,
    /// Text inserted at `offset`.
    pub text: String,
}

impl Splice {
    /// Applies the insertion to `source`.
    pub fn apply(&self, source: &str) -> String {
        let mut out = String::with_capacity(source.len() + self.text.len());
        out.push_str(&source[..self.offset]);
        out.push_str(&self.text);
        out.push_str(&source[self.offset..]);
        out
    }
}

/// Whether `source` already contains `statement`, allowing either quote
/// character around the module specifier.
pub fn contains_import(source: &str, statement: &str) -> bool {
    source.contains(statement)
        || source.contains(&statement.replace('\'', "\""))
        || source.contains(&statement.replace('"', "'"))
}

/// Plans the insertion of `imports` into `source`.
///
/// Lines already present are skipped. The remaining lines go right after the
/// opening tag of the instance script; when there is no instance script a new
/// one is synthesised in front of the markup. Returns `None` when there is
/// nothing left to insert.
///
/// # Example
/// ```
/// use autocomp_markup::{parse, plan_imports};
///
/// let src = "<script>\nlet a\n</script>\n<Card />";
/// let ast = parse(src).unwrap();
/// let imports = vec![r#"import Card from "/c/Card.svelte""#.to_string()];
///
/// let out = plan_imports(src, &ast, &imports).unwrap().apply(src);
/// assert!(out.starts_with("<script>\nimport Card from \"/c/Card.svelte\"\n"));
///
/// let again = parse(&out).unwrap();
/// assert!(plan_imports(&out, &again, &imports).is_none());
/// ```
pub fn plan_imports(source: &str, ast: &Ast, imports: &[String]) -> Option<Splice> {
    let mut fresh: Vec<&str> = Vec::new();
    for statement in imports {
        if contains_import(source, statement) || fresh.contains(&statement.as_str()) {
            continue;
        }
        fresh.push(statement);
    }

    if fresh.is_empty() {
        return None;
    }

    let lines = fresh.join("\n");
    let splice = match &ast.instance {
        Some(script) => Splice {
            offset: script.content_start,
            text: format!("\n{lines}\n"),
        },
        None => Splice {
            offset: ast.html.start,
            text: format!("<script>\n{lines}\n</script>\n"),
        },
    };

    tracing::trace!(offset = splice.offset, count = fresh.len(), "Planned import splice");
    Some(splice)
}
