//! Parsing
//!
//!     The grammar side of the crate: a lookahead cursor over the lexer's tokens and a
//!     recursive descent parser that builds a [`Value`] tree.
//!
//!     [`parse`] is the document entry point: the input must be a single `[...]` list,
//!     typically of dict-shaped log entries. [`parse_value`] accepts any single value and
//!     is useful for fragments.
//!
//!     A parse either produces the complete tree or fails with the first [`ParseError`];
//!     there is no recovery and no partial result.

pub mod cursor;
pub mod error;
pub mod literal;
pub mod parser;

pub use cursor::TokenCursor;
pub use error::{CollectionMode, ParseError};
pub use literal::clean_literal;
pub use parser::{Parser, DEFAULT_MAX_DEPTH};

use crate::litlog::lexing::{prepare_source, tokenize};
use crate::litlog::value::Value;

/// Parse a whole document. The top level must be one bracketed list.
pub fn parse(source: &str) -> Result<Value, ParseError> {
    let source = prepare_source(source);
    let tokens = tokenize(&source);
    tracing::debug!(tokens = tokens.len(), "parsing document");
    let value = Parser::new(&source, tokens).parse_document()?;
    if let Value::List(entries) = &value {
        tracing::debug!(entries = entries.len(), "parsed document");
    }
    Ok(value)
}

/// Parse a single value of any form.
pub fn parse_value(source: &str) -> Result<Value, ParseError> {
    let source = prepare_source(source);
    let tokens = tokenize(&source);
    Parser::new(&source, tokens).parse_value()
}
