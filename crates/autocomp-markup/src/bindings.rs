//! Local bindings introduced by import statements in a script body.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// `import Foo from`, `import type Foo from`, `import Foo, { ... } from`
static DEFAULT_IMPORT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bimport\s+(?:type\s+)?([A-Za-z_$][\w$]*)\s*(?:,|\s+from\b)")
        .expect("Invalid default import regex")
});

/// `import { A, B as C } from`, optionally after a default binding
static NAMED_IMPORT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bimport\s+(?:type\s+)?(?:[A-Za-z_$][\w$]*\s*,\s*)?\{([^}]*)\}\s*from\b")
        .expect("Invalid named import regex")
});

/// `import * as ns from`, optionally after a default binding
static NAMESPACE_IMPORT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bimport\s+(?:[A-Za-z_$][\w$]*\s*,\s*)?\*\s*as\s+([A-Za-z_$][\w$]*)")
        .expect("Invalid namespace import regex")
});

/// Returns every local name bound by an import statement in `script`.
///
/// # Example
/// ```
/// use autocomp_markup::imported_bindings;
///
/// let names = imported_bindings("import Card from './Card.svelte'\nimport { a as B } from 'x'");
/// assert!(names.contains("Card"));
/// assert!(names.contains("B"));
/// assert!(!names.contains("a"));
/// ```
pub fn imported_bindings(script: &str) -> HashSet<String> {
    let mut names = HashSet::new();

    for caps in DEFAULT_IMPORT_REGEX.captures_iter(script) {
        names.insert(caps[1].to_string());
    }

    for caps in NAMED_IMPORT_REGEX.captures_iter(script) {
        for item in caps[1].split(',') {
            let tokens: Vec<&str> = item
                .split_whitespace()
                .skip_while(|t| *t == "type")
                .collect();
            match tokens.as_slice() {
                [_, "as", alias] => names.insert(alias.to_string()),
                [name] => names.insert(name.to_string()),
                _ => false,
            };
        }
    }

    for caps in NAMESPACE_IMPORT_REGEX.captures_iter(script) {
        names.insert(caps[1].to_string());
    }

    names
}
