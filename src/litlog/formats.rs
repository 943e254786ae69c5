//! Output formats
//!
//! Renderers for parsed documents, selected by name through the [`FormatRegistry`]:
//!
//! - `json`: the value tree as indented JSON
//! - `html`: a static, searchable report of log entries
//!
//! The token dump works on the lexer output rather than on a value tree, so it lives
//! beside the registry instead of in it.

pub mod html;
pub mod json;
pub mod registry;
pub mod tokens;

pub use html::{escape_html, pair_entries, HtmlFormatter, Section};
pub use json::{pretty_json, JsonFormatter};
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use tokens::dump_tokens;
