//! Lexer
//!
//!     This module turns source text into a flat stream of positioned tokens.
//!
//! The Lexing Pipeline
//!
//!     1. Raw tokenization using the logos lexer. See [tokens](tokens). Horizontal
//!        whitespace and line continuations are skipped, every other byte ends up in a
//!        token. Bytes no pattern accepts become single-character error tokens so that
//!        free-form text (object placeholders, call arguments) still flows through.
//!
//!     2. Token adaptation. See [base_tokenization](base_tokenization). Logos spans are
//!        turned into line:column positions and the structural tokens of this family of
//!        tokenizers are synthesized: NEWLINE at the end of a logical line, NL for line
//!        breaks inside brackets or on empty lines, INDENT/DEDENT for top-level
//!        indentation changes, and a final ENDMARKER.
//!
//!     The parser never sees the structural tokens: the lookahead cursor skips them. They
//!     exist so the raw token dump matches what the tokenizer actually produced.
//!
//! Positions
//!
//!     Lines are 1-indexed and columns are 0-indexed character offsets, the convention
//!     every diagnostic and the token dump use.

pub mod base_tokenization;
pub mod kinds;
pub mod position;
pub mod tokens;

pub use base_tokenization::{tokenize, Token};
pub use kinds::TokenKind;
pub use position::{LineIndex, Position};

/// Prepares source text for tokenization.
///
/// Trailing whitespace is stripped and exactly one newline is appended, so the last
/// logical line is always terminated.
pub fn prepare_source(source: &str) -> String {
    format!("{}\n", source.trim_end())
}
