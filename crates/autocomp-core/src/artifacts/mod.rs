//! Generated artifacts for external tooling
//!
//! - [`declaration`]: a TypeScript global declaration listing every known
//!   component, so editors type-check markup without explicit imports
//! - [`eslint`]: a lint globals file so unresolved-identifier rules stay quiet

pub mod declaration;
pub mod eslint;

pub use declaration::{parse_declaration, render_declaration, write_declaration};
pub use eslint::{render_eslintrc, write_eslintrc};
