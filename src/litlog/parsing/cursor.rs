//! Lookahead cursor
//!
//! A one-slot buffer between the token stream and the grammar. The grammar only ever
//! needs the next token, so [`TokenCursor::peek`] fetches at most one token ahead and
//! keeps it until the next [`TokenCursor::advance`].
//!
//! Structural tokens (NEWLINE, NL, COMMENT, INDENT, DEDENT) are skipped here, and
//! ENDMARKER counts as the end of the stream.

use super::error::ParseError;
use crate::litlog::lexing::kinds::display_name;
use crate::litlog::lexing::{Position, Token, TokenKind};

pub struct TokenCursor<I: Iterator<Item = Token>> {
    tokens: I,
    peeked: Option<Token>,
    /// End of the last token pulled from the stream, reported on exhaustion.
    end: Position,
}

impl<I: Iterator<Item = Token>> TokenCursor<I> {
    pub fn new<T>(tokens: T) -> Self
    where
        T: IntoIterator<Item = Token, IntoIter = I>,
    {
        TokenCursor {
            tokens: tokens.into_iter(),
            peeked: None,
            end: Position::default(),
        }
    }

    /// Consume and return the next token.
    pub fn advance(&mut self) -> Result<Token, ParseError> {
        match self.peeked.take() {
            Some(token) => Ok(token),
            None => self
                .next_significant()
                .ok_or(ParseError::UnexpectedEndOfInput { position: self.end }),
        }
    }

    /// Return the next token without consuming it.
    pub fn peek(&mut self) -> Result<&Token, ParseError> {
        self.fill();
        let position = self.end;
        self.peeked
            .as_ref()
            .ok_or(ParseError::UnexpectedEndOfInput { position })
    }

    /// Like [`peek`](Self::peek), but exhaustion is not an error.
    pub fn peek_opt(&mut self) -> Option<&Token> {
        self.fill();
        self.peeked.as_ref()
    }

    /// Consume the next token and check it. Only the constraints given are checked.
    pub fn expect(
        &mut self,
        kind: Option<TokenKind>,
        text: Option<&str>,
    ) -> Result<Token, ParseError> {
        let token = self.advance()?;
        let kind_matches = kind.map_or(true, |kind| token.kind == kind);
        let text_matches = text.map_or(true, |text| token.text == text);
        if kind_matches && text_matches {
            Ok(token)
        } else {
            Err(ParseError::InvalidToken {
                expected: describe_expectation(kind, text),
                found: token,
            })
        }
    }

    /// Consume the next token, which must be the operator `text`.
    pub fn expect_op(&mut self, text: &str) -> Result<Token, ParseError> {
        self.expect(Some(TokenKind::Op), Some(text))
    }

    pub fn is_exhausted(&mut self) -> bool {
        self.peek_opt().is_none()
    }

    fn fill(&mut self) {
        if self.peeked.is_none() {
            self.peeked = self.next_significant();
        }
    }

    fn next_significant(&mut self) -> Option<Token> {
        for token in self.tokens.by_ref() {
            self.end = token.end;
            match token.kind {
                TokenKind::EndMarker => return None,
                kind if kind.is_structural() => continue,
                _ => return Some(token),
            }
        }
        None
    }
}

fn describe_expectation(kind: Option<TokenKind>, text: Option<&str>) -> String {
    match (kind, text) {
        (Some(kind), Some(text)) => format!("`{}`({})", text, display_name(kind, text)),
        (Some(kind), None) => kind.name().to_string(),
        (None, Some(text)) => format!("`{}`", text),
        (None, None) => "any token".to_string(),
    }
}
