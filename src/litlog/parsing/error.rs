//! Parse errors
//!
//! Every variant is fatal to the current parse. Each one renders as a single diagnostic
//! line that includes the offending position.

use crate::litlog::lexing::{Position, Token};
use std::fmt;

/// Which kind a `{...}` scope committed to with its first separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionMode {
    Dict,
    Set,
}

impl CollectionMode {
    /// The separator this mode requires after a member.
    pub fn separator(self) -> &'static str {
        match self {
            CollectionMode::Dict => ":",
            CollectionMode::Set => ",",
        }
    }
}

impl fmt::Display for CollectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectionMode::Dict => f.write_str("dict"),
            CollectionMode::Set => f.write_str("set"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A token was required but the stream was exhausted.
    UnexpectedEndOfInput { position: Position },
    /// A consumed token does not match what the grammar position requires.
    InvalidToken { expected: String, found: Token },
    /// No value starts with this token.
    UnexpectedToken { found: Token },
    /// A `{...}` scope mixed `:` and bare `,` separators.
    InconsistentCollectionSeparator { mode: CollectionMode, found: Token },
    /// Literal cleaning got a token that is neither a string nor a number.
    InvalidLiteralToken { found: Token },
    /// A numeric token that does not denote an integer or a float.
    InvalidNumber { found: Token },
    /// Significant tokens follow the top-level list.
    TrailingInput { found: Token },
    /// A bracket opened more than `limit` collections deep.
    NestingTooDeep { limit: usize, found: Token },
}

impl ParseError {
    /// Where the error was detected.
    pub fn position(&self) -> Position {
        match self {
            ParseError::UnexpectedEndOfInput { position } => *position,
            ParseError::InvalidToken { found, .. }
            | ParseError::UnexpectedToken { found }
            | ParseError::InconsistentCollectionSeparator { found, .. }
            | ParseError::InvalidLiteralToken { found }
            | ParseError::InvalidNumber { found }
            | ParseError::TrailingInput { found }
            | ParseError::NestingTooDeep { found, .. } => found.start,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnexpectedEndOfInput { position } => {
                write!(f, "Unexpected end of input at {}", position)
            }
            ParseError::InvalidToken { expected, found } => {
                write!(f, "Invalid token. Expected {}, got {}", expected, found)
            }
            ParseError::UnexpectedToken { found } => write!(
                f,
                "Unexpected token. Expected STRING, NUMBER, NAME, `{{`, `[`, `(` or `<`, got {}",
                found
            ),
            ParseError::InconsistentCollectionSeparator { mode, found } => write!(
                f,
                "Inconsistent collection separator. Expected `{}` in {} scope, got {}",
                mode.separator(),
                mode,
                found
            ),
            ParseError::InvalidLiteralToken { found } => write!(
                f,
                "Invalid literal token. Expected STRING or NUMBER, got {}",
                found
            ),
            ParseError::InvalidNumber { found } => {
                write!(f, "Invalid numeric literal {}", found)
            }
            ParseError::TrailingInput { found } => {
                write!(f, "Unexpected input after the top-level list: {}", found)
            }
            ParseError::NestingTooDeep { limit, found } => write!(
                f,
                "Nesting too deep. At most {} levels are allowed, got {}",
                limit, found
            ),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<ParseError> for String {
    fn from(err: ParseError) -> Self {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::litlog::lexing::TokenKind;

    fn comma() -> Token {
        Token::new(
            TokenKind::Op,
            ",",
            Position::new(1, 7),
            Position::new(1, 8),
            7..8,
        )
    }

    #[test]
    fn test_messages_are_single_line() {
        let errors = vec![
            ParseError::UnexpectedEndOfInput {
                position: Position::new(2, 0),
            },
            ParseError::InvalidToken {
                expected: "`[`(LSQB)".to_string(),
                found: comma(),
            },
            ParseError::UnexpectedToken { found: comma() },
            ParseError::InconsistentCollectionSeparator {
                mode: CollectionMode::Dict,
                found: comma(),
            },
            ParseError::InvalidLiteralToken { found: comma() },
            ParseError::NestingTooDeep {
                limit: 4,
                found: comma(),
            },
        ];
        for error in errors {
            assert!(!error.to_string().contains('\n'), "{error}");
        }
    }

    #[test]
    fn test_separator_message() {
        let error = ParseError::InconsistentCollectionSeparator {
            mode: CollectionMode::Dict,
            found: comma(),
        };
        assert_eq!(
            error.to_string(),
            "Inconsistent collection separator. Expected `:` in dict scope, got `,`(COMMA) at 1:7-1:8"
        );
        assert_eq!(error.position(), Position::new(1, 7));
    }

    #[test]
    fn test_end_of_input_message() {
        let error = ParseError::UnexpectedEndOfInput {
            position: Position::new(1, 5),
        };
        assert_eq!(error.to_string(), "Unexpected end of input at 1:5");
    }
}
