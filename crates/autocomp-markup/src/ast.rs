//! Abstract syntax tree for component templates.
//!
//! All offsets are byte offsets into the source the tree was parsed from.

use std::collections::HashSet;

/// Tag prefix of built-in special elements (`<svelte:head>`, `<svelte:self>`, ...).
pub const RESERVED_PREFIX: &str = "svelte:";

/// A parsed component file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ast {
    /// The instance-level `<script>`, if any.
    pub instance: Option<Script>,
    /// The `<script context="module">` block, if any.
    pub module: Option<Script>,
    /// Top-level markup, excluding script and style blocks.
    pub html: Fragment,
}

/// A top-level `<script>` region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    /// Offset of the opening `<`.
    pub start: usize,
    /// Offset just past the closing `</script>`.
    pub end: usize,
    /// Offset just past the `>` of the opening tag.
    pub content_start: usize,
    /// Offset of the `<` of the closing tag.
    pub content_end: usize,
    pub attributes: Vec<Attribute>,
}

impl Script {
    /// The script body as a slice of `source`.
    pub fn content<'a>(&self, source: &'a str) -> &'a str {
        &source[self.content_start..self.content_end]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: Option<String>,
}

/// A sequence of sibling nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub start: usize,
    pub end: usize,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text { start: usize, end: usize },
    Comment { start: usize, end: usize },
    /// A `{...}` expression or block tag.
    Mustache { start: usize, end: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub kind: ElementKind,
    pub start: usize,
    pub end: usize,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
}

/// How a tag name is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// Lower-case HTML element.
    Html,
    /// Capitalised or dotted tag referring to a component.
    Component,
    /// Built-in element carrying the reserved prefix.
    Special,
}

impl ElementKind {
    pub fn classify(name: &str) -> Self {
        if name.starts_with(RESERVED_PREFIX) {
            Self::Special
        } else if name.chars().next().is_some_and(char::is_uppercase) || name.contains('.') {
            Self::Component
        } else {
            Self::Html
        }
    }
}

impl Node {
    /// Visit this node and its descendants depth-first, parents first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        visit(self);
        if let Node::Element(element) = self {
            for child in &element.children {
                child.walk(visit);
            }
        }
    }
}

impl Ast {
    /// Names of every component element in document order, deduplicated.
    pub fn component_names(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut names = Vec::new();
        for node in &self.html.children {
            node.walk(&mut |n| {
                if let Node::Element(el) = n {
                    if el.kind == ElementKind::Component && seen.insert(el.name.as_str()) {
                        names.push(el.name.clone());
                    }
                }
            });
        }
        names
    }
}
