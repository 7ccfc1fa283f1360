//! Template parser.
//!
//! A small hand-written recursive descent parser for Svelte-style component
//! files. It only recovers the structure the import injector needs: script
//! regions, element names and nesting. Expressions inside `{...}` are skipped
//! as opaque balanced blocks.

use crate::ast::{Ast, Attribute, Element, ElementKind, Fragment, Node, Script};
use crate::error::{Error, Result};

/// Parses component source text into an [`Ast`].
pub trait TemplateParser: Send + Sync {
    fn parse(&self, source: &str) -> Result<Ast>;
}

/// The built-in [`TemplateParser`].
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkupParser;

impl TemplateParser for MarkupParser {
    fn parse(&self, source: &str) -> Result<Ast> {
        parse(source)
    }
}

/// Elements that never have children or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Parses a component file.
///
/// # Errors
/// Returns `Error::Parse` for unterminated tags, comments, blocks or scripts,
/// mismatched closing tags, and duplicate top-level scripts.
///
/// # Example
/// ```
/// use autocomp_markup::parse;
///
/// let ast = parse("<script>let a = 1</script>\n<Card />").unwrap();
/// assert!(ast.instance.is_some());
/// assert_eq!(ast.component_names(), vec!["Card"]);
/// ```
pub fn parse(source: &str) -> Result<Ast> {
    let mut parser = Parser {
        src: source,
        bytes: source.as_bytes(),
        pos: 0,
        instance: None,
        module: None,
    };
    let children = parser.fragment(None, 0)?;

    let (start, end) = match (children.first(), children.last()) {
        (Some(first), Some(last)) => (node_start(first), node_end(last)),
        _ => (source.len(), source.len()),
    };

    Ok(Ast {
        instance: parser.instance,
        module: parser.module,
        html: Fragment {
            start,
            end,
            children,
        },
    })
}

fn node_start(node: &Node) -> usize {
    match node {
        Node::Element(el) => el.start,
        Node::Text { start, .. } | Node::Comment { start, .. } | Node::Mustache { start, .. } => {
            *start
        }
    }
}

fn node_end(node: &Node) -> usize {
    match node {
        Node::Element(el) => el.end,
        Node::Text { end, .. } | Node::Comment { end, .. } | Node::Mustache { end, .. } => *end,
    }
}

struct Parser<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    instance: Option<Script>,
    module: Option<Script>,
}

struct OpenTag {
    name: String,
    attributes: Vec<Attribute>,
    self_closing: bool,
}

impl<'a> Parser<'a> {
    fn error(&self, offset: usize, message: impl Into<String>) -> Error {
        Error::parse(self.src, offset, message)
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    /// Byte-wise, so `pos` may sit inside a multi-byte character.
    fn starts_with(&self, s: &str) -> bool {
        self.bytes
            .get(self.pos..)
            .is_some_and(|rest| rest.starts_with(s.as_bytes()))
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    /// Parses sibling nodes until EOF or the closing tag of `parent`.
    fn fragment(&mut self, parent: Option<(&str, usize)>, depth: usize) -> Result<Vec<Node>> {
        let mut children = Vec::new();

        loop {
            let Some(byte) = self.peek() else {
                return match parent {
                    Some((name, start)) => Err(self.error(start, format!("<{name}> was left open"))),
                    None => Ok(children),
                };
            };

            if self.starts_with("<!--") {
                let start = self.pos;
                let Some(close) = self.src[self.pos + 4..].find("-->") else {
                    return Err(self.error(start, "comment was left open"));
                };
                self.pos += 4 + close + 3;
                children.push(Node::Comment {
                    start,
                    end: self.pos,
                });
            } else if self.starts_with("</") {
                let start = self.pos;
                self.pos += 2;
                let name = self.tag_name();
                self.skip_whitespace();
                if self.peek() != Some(b'>') {
                    return Err(self.error(self.pos, format!("expected '>' to close </{name}>")));
                }
                self.pos += 1;
                return match parent {
                    Some((open, _)) if open == name => Ok(children),
                    _ => Err(self.error(
                        start,
                        format!("</{name}> attempted to close an element that was not open"),
                    )),
                };
            } else if byte == b'<' && self.peek_at(1).is_some_and(|b| b.is_ascii_alphabetic()) {
                if let Some(node) = self.element(depth)? {
                    children.push(node);
                }
            } else if byte == b'{' {
                let start = self.pos;
                self.mustache()?;
                children.push(Node::Mustache {
                    start,
                    end: self.pos,
                });
            } else {
                let start = self.pos;
                self.pos += 1;
                while let Some(b) = self.peek() {
                    if b == b'{' || b == b'<' {
                        break;
                    }
                    self.pos += 1;
                }
                children.push(Node::Text {
                    start,
                    end: self.pos,
                });
            }
        }
    }

    fn tag_name(&mut self) -> String {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b':' | b'.' | b'_'))
        {
            self.pos += 1;
        }
        self.src[start..self.pos].to_string()
    }

    /// Parses an element starting at `<`. Top-level script and style blocks
    /// are consumed without producing a node.
    fn element(&mut self, depth: usize) -> Result<Option<Node>> {
        let start = self.pos;
        self.pos += 1;
        let tag = self.open_tag(start)?;

        if tag.name == "script" || tag.name == "style" {
            let content_start = self.pos;
            let closing = format!("</{}", tag.name);
            let Some(found) = self.src[self.pos..].find(&closing) else {
                return Err(self.error(start, format!("<{}> was left open", tag.name)));
            };
            let content_end = self.pos + found;
            self.pos = content_end + closing.len();
            let Some(gt) = self.src[self.pos..].find('>') else {
                return Err(self.error(content_end, format!("</{}> was left open", tag.name)));
            };
            self.pos += gt + 1;

            if depth == 0 {
                if tag.name == "script" {
                    self.register_script(Script {
                        start,
                        end: self.pos,
                        content_start,
                        content_end,
                        attributes: tag.attributes,
                    })?;
                }
                return Ok(None);
            }

            return Ok(Some(Node::Element(Element {
                kind: ElementKind::Html,
                name: tag.name,
                start,
                end: self.pos,
                attributes: tag.attributes,
                children: Vec::new(),
            })));
        }

        let children = if tag.self_closing || VOID_ELEMENTS.contains(&tag.name.as_str()) {
            Vec::new()
        } else {
            self.fragment(Some((&tag.name, start)), depth + 1)?
        };

        Ok(Some(Node::Element(Element {
            kind: ElementKind::classify(&tag.name),
            name: tag.name,
            start,
            end: self.pos,
            attributes: tag.attributes,
            children,
        })))
    }

    fn register_script(&mut self, script: Script) -> Result<()> {
        let is_module = script.attributes.iter().any(|a| {
            a.name == "module" || (a.name == "context" && a.value.as_deref() == Some("module"))
        });
        let slot = if is_module {
            &mut self.module
        } else {
            &mut self.instance
        };
        if slot.is_some() {
            let kind = if is_module { "module" } else { "instance" };
            return Err(Error::parse(
                self.src,
                script.start,
                format!("a component can only have one {kind}-level <script> element"),
            ));
        }
        *slot = Some(script);
        Ok(())
    }

    /// Parses the tag name and attributes up to and including `>` or `/>`.
    fn open_tag(&mut self, start: usize) -> Result<OpenTag> {
        let name = self.tag_name();
        let mut attributes = Vec::new();

        loop {
            self.skip_whitespace();
            match self.peek() {
                None => return Err(self.error(start, format!("<{name}> tag was left open"))),
                Some(b'>') => {
                    self.pos += 1;
                    return Ok(OpenTag {
                        name,
                        attributes,
                        self_closing: false,
                    });
                }
                Some(b'/') if self.peek_at(1) == Some(b'>') => {
                    self.pos += 2;
                    return Ok(OpenTag {
                        name,
                        attributes,
                        self_closing: true,
                    });
                }
                Some(b'{') => {
                    // Spread or shorthand attribute
                    let attr_start = self.pos;
                    self.mustache()?;
                    attributes.push(Attribute {
                        name: self.src[attr_start..self.pos].to_string(),
                        value: None,
                    });
                }
                Some(_) => attributes.push(self.attribute(start, &name)?),
            }
        }
    }

    fn attribute(&mut self, tag_start: usize, tag: &str) -> Result<Attribute> {
        let name_start = self.pos;
        while self
            .peek()
            .is_some_and(|b| !b.is_ascii_whitespace() && !matches!(b, b'=' | b'>' | b'/'))
        {
            self.pos += 1;
        }
        if self.pos == name_start {
            // Stray '/' that is not part of '/>'
            self.pos += 1;
        }
        let name = self.src[name_start..self.pos].to_string();

        self.skip_whitespace();
        if self.peek() != Some(b'=') {
            return Ok(Attribute { name, value: None });
        }
        self.pos += 1;
        self.skip_whitespace();

        let value = match self.peek() {
            None => return Err(self.error(tag_start, format!("<{tag}> tag was left open"))),
            Some(quote @ (b'"' | b'\'')) => {
                self.pos += 1;
                let value_start = self.pos;
                loop {
                    match self.peek() {
                        None => {
                            return Err(
                                self.error(value_start - 1, "attribute value was left open")
                            );
                        }
                        Some(b'{') => self.mustache()?,
                        Some(b) if b == quote => break,
                        Some(_) => self.pos += 1,
                    }
                }
                let value = self.src[value_start..self.pos].to_string();
                self.pos += 1;
                value
            }
            Some(b'{') => {
                let value_start = self.pos;
                self.mustache()?;
                self.src[value_start..self.pos].to_string()
            }
            Some(_) => {
                let value_start = self.pos;
                while self.peek().is_some_and(|b| !b.is_ascii_whitespace() && b != b'>') {
                    if self.starts_with("/>") {
                        break;
                    }
                    self.pos += 1;
                }
                self.src[value_start..self.pos].to_string()
            }
        };

        Ok(Attribute {
            name,
            value: Some(value),
        })
    }

    /// Skips a balanced `{...}` block, honouring JS string literals.
    fn mustache(&mut self) -> Result<()> {
        let start = self.pos;
        let mut depth = 0usize;

        while let Some(b) = self.peek() {
            match b {
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        self.pos += 1;
                        return Ok(());
                    }
                }
                b'"' | b'\'' | b'`' => {
                    self.pos += 1;
                    while let Some(c) = self.peek() {
                        if c == b'\\' {
                            self.pos += 1;
                        } else if c == b {
                            break;
                        }
                        self.pos += 1;
                    }
                }
                _ => {}
            }
            self.pos += 1;
        }

        Err(self.error(start, "expression block was left open"))
    }
}
