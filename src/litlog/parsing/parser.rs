//! Value parser
//!
//! Recursive descent over the token stream with one token of lookahead. Every value
//! form is chosen by the next token alone:
//!
//!     `<`              opaque object placeholder, captured verbatim
//!     STRING, NUMBER   cleaned literal
//!     NAME             `None`/`True`/`False`, or a raw reference like `Color.RED`
//!     `{`              dict or set, decided by the first separator
//!     `[`              list
//!     `(`              tuple
//!
//! Placeholders and call arguments are never parsed recursively. Their value is the
//! verbatim source text from the first token to the last, whitespace included.
//!
//! Collections recurse, so their depth is capped at [`Parser::max_depth`]. Input nested
//! deeper fails with [`ParseError::NestingTooDeep`] instead of exhausting the stack.

use super::cursor::TokenCursor;
use super::error::{CollectionMode, ParseError};
use super::literal::clean_literal;
use crate::litlog::lexing::{Token, TokenKind};
use crate::litlog::value::Value;
use std::ops::Range;

/// Collections that may be open at once unless [`Parser::with_max_depth`] says otherwise.
pub const DEFAULT_MAX_DEPTH: usize = 256;

pub struct Parser<'a, I: Iterator<Item = Token>> {
    /// The text the tokens were produced from.
    source: &'a str,
    cursor: TokenCursor<I>,
    depth: usize,
    max_depth: usize,
}

impl<'a, I: Iterator<Item = Token>> Parser<'a, I> {
    pub fn new<T>(source: &'a str, tokens: T) -> Self
    where
        T: IntoIterator<Item = Token, IntoIter = I>,
    {
        Parser {
            source,
            cursor: TokenCursor::new(tokens),
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Parse a whole document: exactly one top-level `[...]` list.
    pub fn parse_document(&mut self) -> Result<Value, ParseError> {
        let root = self.parse_list()?;
        if let Some(token) = self.cursor.peek_opt() {
            return Err(ParseError::TrailingInput {
                found: token.clone(),
            });
        }
        Ok(root)
    }

    /// Parse any single value.
    pub fn parse_value(&mut self) -> Result<Value, ParseError> {
        let next = self.cursor.peek()?;
        match next.kind {
            TokenKind::Op if next.text == "<" => self.parse_object(),
            TokenKind::String | TokenKind::Number => {
                let token = self.cursor.advance()?;
                clean_literal(&token)
            }
            TokenKind::Name => self.parse_name(),
            TokenKind::Op if next.text == "{" => self.nested(Self::parse_dict_or_set),
            TokenKind::Op if next.text == "[" => self.parse_list(),
            TokenKind::Op if next.text == "(" => self.parse_tuple(),
            _ => Err(ParseError::UnexpectedToken {
                found: next.clone(),
            }),
        }
    }

    pub fn parse_list(&mut self) -> Result<Value, ParseError> {
        self.nested(|parser| parser.parse_sequence("[", "]"))
            .map(Value::List)
    }

    pub fn parse_tuple(&mut self) -> Result<Value, ParseError> {
        self.nested(|parser| parser.parse_sequence("(", ")"))
            .map(Value::Tuple)
    }

    /// Runs `parse` one collection level deeper, failing at the opening bracket once
    /// the limit is reached.
    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= self.max_depth {
            return Err(ParseError::NestingTooDeep {
                limit: self.max_depth,
                found: self.cursor.peek()?.clone(),
            });
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Shared list/tuple loop. Commas are optional and may repeat or trail.
    fn parse_sequence(&mut self, open: &str, close: &str) -> Result<Vec<Value>, ParseError> {
        self.cursor.expect_op(open)?;
        let mut items = Vec::new();

        loop {
            let next = self.cursor.peek()?;
            if next.is_op(close) {
                self.cursor.advance()?;
                return Ok(items);
            }
            if next.is_op(",") {
                self.cursor.advance()?;
                continue;
            }
            items.push(self.parse_value()?);
        }
    }

    /// `<...>` with nested angle brackets balanced, kept as raw text.
    fn parse_object(&mut self) -> Result<Value, ParseError> {
        let open = self.cursor.expect_op("<")?;
        let mut span = open.span.clone();
        let mut text = open.text;
        let mut depth = 1usize;

        while depth > 0 {
            let token = self.cursor.advance()?;
            if token.is_op(">") {
                depth -= 1;
            } else if token.is_op("<") {
                depth += 1;
            }
            span.end = token.span.end;
            text.push_str(&token.text);
        }

        Ok(Value::Object(self.verbatim(span, text)))
    }

    /// Keywords, or a dotted and possibly called reference kept as raw text.
    fn parse_name(&mut self) -> Result<Value, ParseError> {
        let first = self.cursor.expect(Some(TokenKind::Name), None)?;
        match first.text.as_str() {
            "None" => return Ok(Value::Null),
            "False" => return Ok(Value::Bool(false)),
            "True" => return Ok(Value::Bool(true)),
            _ => {}
        }

        let mut span = first.span.clone();
        let mut text = first.text;
        let mut depth = 0usize;

        loop {
            let continues = match self.cursor.peek_opt() {
                Some(next) if depth > 0 => {
                    if next.is_op("(") {
                        depth += 1;
                    } else if next.is_op(")") {
                        depth -= 1;
                    }
                    true
                }
                Some(next) if next.is_op("(") => {
                    depth += 1;
                    true
                }
                Some(next) => next.is_op(".") || next.kind == TokenKind::Name,
                None if depth > 0 => {
                    // Surfaces the end-of-input error for the open call.
                    self.cursor.advance()?;
                    false
                }
                None => false,
            };
            if !continues {
                return Ok(Value::Str(self.verbatim(span, text)));
            }
            let token = self.cursor.advance()?;
            span.end = token.span.end;
            text.push_str(&token.text);
        }
    }

    /// Source text covered by `span`, or the joined token text if the tokens do not
    /// belong to this source.
    fn verbatim(&self, span: Range<usize>, joined: String) -> String {
        match self.source.get(span) {
            Some(slice) if slice.len() >= joined.len() => slice.to_string(),
            _ => joined,
        }
    }

    /// `{...}`: the first separator commits the scope to dict (`:`) or set (`,`).
    fn parse_dict_or_set(&mut self) -> Result<Value, ParseError> {
        self.cursor.expect_op("{")?;
        if self.cursor.peek()?.is_op("}") {
            self.cursor.advance()?;
            return Ok(Value::Dict(Vec::new()));
        }

        let mut mode: Option<CollectionMode> = None;
        let mut pairs = Vec::new();
        let mut members = Vec::new();

        loop {
            if self.cursor.peek()?.is_op("}") {
                self.cursor.advance()?;
                break;
            }

            let key = self.parse_value()?;
            let next = self.cursor.peek()?;

            if next.is_op("}") {
                if mode == Some(CollectionMode::Dict) {
                    return Err(ParseError::InconsistentCollectionSeparator {
                        mode: CollectionMode::Dict,
                        found: next.clone(),
                    });
                }
                self.cursor.advance()?;
                mode = Some(CollectionMode::Set);
                members.push(key);
                break;
            } else if next.is_op(":") {
                if mode == Some(CollectionMode::Set) {
                    return Err(ParseError::InconsistentCollectionSeparator {
                        mode: CollectionMode::Set,
                        found: next.clone(),
                    });
                }
                mode = Some(CollectionMode::Dict);
                self.cursor.advance()?;
                let value = self.parse_value()?;
                pairs.push((key, value));
                if self.cursor.peek()?.is_op(",") {
                    self.cursor.advance()?;
                }
            } else if next.is_op(",") {
                if mode == Some(CollectionMode::Dict) {
                    return Err(ParseError::InconsistentCollectionSeparator {
                        mode: CollectionMode::Dict,
                        found: next.clone(),
                    });
                }
                mode = Some(CollectionMode::Set);
                self.cursor.advance()?;
                members.push(key);
            } else {
                return Err(ParseError::InvalidToken {
                    expected: "`:`, `,` or `}`".to_string(),
                    found: next.clone(),
                });
            }
        }

        Ok(match mode {
            Some(CollectionMode::Dict) => Value::Dict(pairs),
            Some(CollectionMode::Set) => Value::Set(members),
            None => Value::Dict(Vec::new()),
        })
    }
}
