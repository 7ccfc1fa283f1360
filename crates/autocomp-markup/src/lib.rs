//! Template parsing and import splicing for autocomp.
//!
//! This crate is the template-language seam of the workspace:
//!
//! - [`parser`] turns a component file into an [`Ast`]: the instance and
//!   module `<script>` regions plus the markup tree.
//! - [`bindings`] lists the names an instance script already imports.
//! - [`splice`] inserts generated import lines into a file, skipping lines
//!   that are already present so repeated passes are idempotent.
//! - [`sourcemap`] produces a v3 source map for a single splice.
//!
//! ```text
//! <script>                      <- instance script, imports go after '>'
//!   let count = 0
//! </script>
//!
//! <Card title="x" />            <- component element, collected
//! <svelte:head />               <- reserved prefix, ignored
//! ```

pub mod ast;
pub mod bindings;
pub mod error;
pub mod parser;
pub mod sourcemap;
pub mod splice;

pub use ast::{Ast, Attribute, Element, ElementKind, Fragment, Node, RESERVED_PREFIX, Script};
pub use bindings::imported_bindings;
pub use error::{Error, Result};
pub use parser::{MarkupParser, TemplateParser, parse};
pub use sourcemap::SourceMap;
pub use splice::{Splice, contains_import, plan_imports};
