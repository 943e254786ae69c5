//! Token kinds and their display names
//!
//! The kind set is closed. Operators share the single `OP` kind; diagnostics refine it
//! with the exact operator name (`LSQB`, `COLON`, ...) through [`exact_operator_name`].

use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    EndMarker,
    Name,
    Number,
    String,
    Newline,
    Indent,
    Dedent,
    Op,
    Comment,
    Nl,
    ErrorToken,
}

impl TokenKind {
    pub const ALL: [TokenKind; 11] = [
        TokenKind::EndMarker,
        TokenKind::Name,
        TokenKind::Number,
        TokenKind::String,
        TokenKind::Newline,
        TokenKind::Indent,
        TokenKind::Dedent,
        TokenKind::Op,
        TokenKind::Comment,
        TokenKind::Nl,
        TokenKind::ErrorToken,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TokenKind::EndMarker => "ENDMARKER",
            TokenKind::Name => "NAME",
            TokenKind::Number => "NUMBER",
            TokenKind::String => "STRING",
            TokenKind::Newline => "NEWLINE",
            TokenKind::Indent => "INDENT",
            TokenKind::Dedent => "DEDENT",
            TokenKind::Op => "OP",
            TokenKind::Comment => "COMMENT",
            TokenKind::Nl => "NL",
            TokenKind::ErrorToken => "ERRORTOKEN",
        }
    }

    /// Kinds the grammar never acts on; the lookahead cursor skips them.
    pub fn is_structural(self) -> bool {
        matches!(
            self,
            TokenKind::Newline
                | TokenKind::Nl
                | TokenKind::Comment
                | TokenKind::Indent
                | TokenKind::Dedent
                | TokenKind::EndMarker
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for TokenKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Exact name of an operator token, e.g. `[` -> `LSQB`.
pub fn exact_operator_name(text: &str) -> Option<&'static str> {
    let name = match text {
        "(" => "LPAR",
        ")" => "RPAR",
        "[" => "LSQB",
        "]" => "RSQB",
        ":" => "COLON",
        "," => "COMMA",
        ";" => "SEMI",
        "+" => "PLUS",
        "-" => "MINUS",
        "*" => "STAR",
        "/" => "SLASH",
        "|" => "VBAR",
        "&" => "AMPER",
        "<" => "LESS",
        ">" => "GREATER",
        "=" => "EQUAL",
        "." => "DOT",
        "%" => "PERCENT",
        "{" => "LBRACE",
        "}" => "RBRACE",
        "==" => "EQEQUAL",
        "!=" => "NOTEQUAL",
        "~" => "TILDE",
        "^" => "CIRCUMFLEX",
        "**" => "DOUBLESTAR",
        "+=" => "PLUSEQUAL",
        "-=" => "MINEQUAL",
        "*=" => "STAREQUAL",
        "/=" => "SLASHEQUAL",
        "%=" => "PERCENTEQUAL",
        "&=" => "AMPEREQUAL",
        "|=" => "VBAREQUAL",
        "^=" => "CIRCUMFLEXEQUAL",
        "**=" => "DOUBLESTAREQUAL",
        "//" => "DOUBLESLASH",
        "//=" => "DOUBLESLASHEQUAL",
        "@" => "AT",
        "@=" => "ATEQUAL",
        "->" => "RARROW",
        "..." => "ELLIPSIS",
        ":=" => "COLONEQUAL",
        "!" => "EXCLAMATION",
        _ => return None,
    };
    Some(name)
}

/// Name used in diagnostics: the exact operator name for operators, the kind name
/// otherwise.
pub fn display_name(kind: TokenKind, text: &str) -> &'static str {
    match kind {
        TokenKind::Op => exact_operator_name(text).unwrap_or(kind.name()),
        _ => kind.name(),
    }
}
