//! # litlog
//!
//! Converts logs written as literal-syntax values (dicts, lists, tuples, sets, quoted
//! strings, `None`/`True`/`False` and `<Opaque ...>` object placeholders) into a generic
//! value tree, and renders that tree as JSON or as a searchable HTML report.
//!
//! File Layout
//!
//! src/litlog
//!   ├── lexing       logos tokenizer + adapter producing positioned tokens
//!   ├── parsing      lookahead cursor, recursive descent parser, literal cleaning
//!   ├── value        the value tree and its JSON mapping
//!   ├── formats      formatter registry: json, html report, raw token dump
//!   ├── config       layered configuration (embedded defaults + user files)
//!   └── processor    source in, formatted output out
//!
//! The typical entry point is [`litlog::parsing::parse`](crate::litlog::parsing::parse)
//! for the tree, or [`Processor`](crate::litlog::processor::Processor) for formatted output.

pub mod litlog;

pub use litlog::parsing::{parse, ParseError};
pub use litlog::value::Value;
