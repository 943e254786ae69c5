//! Base tokenization
//!
//! Runs the logos lexer over the whole source and adapts its output into [`Token`]s:
//! positioned, carrying their exact source text, with the structural tokens
//! (NEWLINE, NL, INDENT, DEDENT, ENDMARKER) synthesized along the way.
//!
//! Tokenization never fails. Bytes no pattern accepts become one ERRORTOKEN per
//! character and lexing resumes right after that character, so an unterminated quote
//! inside a placeholder does not swallow the rest of the line.

use super::kinds::{display_name, TokenKind};
use super::position::{LineIndex, Position};
use super::tokens::RawToken;
use logos::Logos;
use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// A lexical token. Serializes as the token dump record
/// `{"type", "string", "start", "end"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    #[serde(rename = "type")]
    pub kind: TokenKind,
    #[serde(rename = "string")]
    pub text: String,
    pub start: Position,
    pub end: Position,
    #[serde(skip)]
    pub span: Range<usize>,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        text: impl Into<String>,
        start: Position,
        end: Position,
        span: Range<usize>,
    ) -> Self {
        Token {
            kind,
            text: text.into(),
            start,
            end,
            span,
        }
    }

    /// True for an operator token with exactly this text.
    pub fn is_op(&self, text: &str) -> bool {
        self.kind == TokenKind::Op && self.text == text
    }

    /// Kind name for diagnostics, refined to the exact operator name for operators.
    pub fn display_name(&self) -> &'static str {
        display_name(self.kind, &self.text)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "`{}`({}) at {}-{}",
            self.text,
            self.display_name(),
            self.start,
            self.end
        )
    }
}

/// Tokenize source text into positioned tokens, ending with ENDMARKER.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut builder = TokenStreamBuilder::new(source);
    let mut lexer = RawToken::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(raw) => builder.push_raw(raw, span),
            Err(()) => {
                let width = source[span.start..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
                let resume = span.start + width;
                builder.push_error(span.start..resume);
                if span.end > resume {
                    lexer = RawToken::lexer(source);
                    lexer.bump(resume);
                }
            }
        }
    }

    let tokens = builder.finish();
    tracing::trace!(count = tokens.len(), "tokenized source");
    tokens
}

struct TokenStreamBuilder<'a> {
    source: &'a str,
    index: LineIndex<'a>,
    tokens: Vec<Token>,
    /// Open `(`, `[` and `{` not yet closed.
    depth: usize,
    /// Whether the current logical line has produced a significant token.
    line_has_content: bool,
    indents: Vec<usize>,
}

impl<'a> TokenStreamBuilder<'a> {
    fn new(source: &'a str) -> Self {
        TokenStreamBuilder {
            source,
            index: LineIndex::new(source),
            tokens: Vec::new(),
            depth: 0,
            line_has_content: false,
            indents: vec![0],
        }
    }

    fn push(&mut self, kind: TokenKind, span: Range<usize>) {
        let text = &self.source[span.clone()];
        let start = self.index.position(span.start);
        // A line break ends on the line it terminates.
        let end = if matches!(kind, TokenKind::Newline | TokenKind::Nl) && !text.is_empty() {
            Position::new(start.line, start.column + 1)
        } else {
            self.index.position(span.end)
        };
        self.tokens.push(Token::new(kind, text, start, end, span));
    }

    fn push_raw(&mut self, raw: RawToken, span: Range<usize>) {
        match raw {
            RawToken::Newline => {
                let kind = if self.depth > 0 || !self.line_has_content {
                    TokenKind::Nl
                } else {
                    TokenKind::Newline
                };
                self.push(kind, span);
                if self.depth == 0 {
                    self.line_has_content = false;
                }
            }
            RawToken::Comment => self.push(TokenKind::Comment, span),
            _ => {
                self.begin_content(span.start);
                if raw.opens_bracket() {
                    self.depth += 1;
                } else if raw.closes_bracket() {
                    self.depth = self.depth.saturating_sub(1);
                }
                self.push(significant_kind(raw), span);
            }
        }
    }

    fn push_error(&mut self, span: Range<usize>) {
        self.begin_content(span.start);
        self.push(TokenKind::ErrorToken, span);
    }

    /// Emits INDENT/DEDENT when a top-level logical line starts at a new column.
    fn begin_content(&mut self, offset: usize) {
        if self.depth > 0 || self.line_has_content {
            return;
        }
        self.line_has_content = true;

        let column = self.index.position(offset).column;
        let current = self.indents.last().copied().unwrap_or(0);
        if column > current {
            self.indents.push(column);
            let line_start = self.index.line_start(offset);
            self.push(TokenKind::Indent, line_start..offset);
        } else {
            while column < self.indents.last().copied().unwrap_or(0) {
                self.indents.pop();
                self.push(TokenKind::Dedent, offset..offset);
            }
        }
    }

    fn finish(mut self) -> Vec<Token> {
        let end = self.source.len();
        if self.line_has_content {
            self.push(TokenKind::Newline, end..end);
        }
        while self.indents.len() > 1 {
            self.indents.pop();
            self.push(TokenKind::Dedent, end..end);
        }
        self.push(TokenKind::EndMarker, end..end);
        self.tokens
    }
}

fn significant_kind(raw: RawToken) -> TokenKind {
    match raw {
        RawToken::Name => TokenKind::Name,
        RawToken::Number => TokenKind::Number,
        RawToken::String => TokenKind::String,
        RawToken::Comment => TokenKind::Comment,
        RawToken::Newline => TokenKind::Newline,
        RawToken::OpenParen
        | RawToken::CloseParen
        | RawToken::OpenBracket
        | RawToken::CloseBracket
        | RawToken::OpenBrace
        | RawToken::CloseBrace
        | RawToken::Less
        | RawToken::Greater
        | RawToken::Operator => TokenKind::Op,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_single_line_list() {
        use TokenKind::*;
        assert_eq!(
            kinds("[1, 'a']\n"),
            vec![Op, Number, Op, String, Op, Newline, EndMarker]
        );
    }

    #[test]
    fn test_token_text_and_positions() {
        let tokens = tokenize("[1, 'a']\n");
        assert_eq!(tokens[3].text, "'a'");
        assert_eq!(tokens[3].start, Position::new(1, 4));
        assert_eq!(tokens[3].end, Position::new(1, 7));
        assert_eq!(tokens[3].span, 4..7);
        assert_eq!(tokens[5].end, Position::new(1, 9));
        assert_eq!(tokens[6].start, Position::new(2, 0));
    }

    #[test]
    fn test_newlines_inside_brackets_are_nl() {
        use TokenKind::*;
        assert_eq!(
            kinds("[\n  1\n]\n"),
            vec![Op, Nl, Number, Nl, Op, Newline, EndMarker]
        );
    }

    #[test]
    fn test_blank_lines_are_nl() {
        use TokenKind::*;
        assert_eq!(kinds("\n[]\n"), vec![Nl, Op, Op, Newline, EndMarker]);
    }

    #[test]
    fn test_indentation_at_top_level() {
        use TokenKind::*;
        let tokens = tokenize("  [1]\n");
        assert_eq!(
            tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![Indent, Op, Number, Op, Newline, Dedent, EndMarker]
        );
        assert_eq!(tokens[0].text, "  ");
    }

    #[test]
    fn test_missing_final_newline_is_synthesized() {
        use TokenKind::*;
        let tokens = tokenize("[]");
        assert_eq!(
            tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![Op, Op, Newline, EndMarker]
        );
        assert_eq!(tokens[2].text, "");
    }

    #[test]
    fn test_comments() {
        use TokenKind::*;
        assert_eq!(
            kinds("[1, # first\n 2]\n"),
            vec![Op, Number, Op, Comment, Nl, Number, Op, Newline, EndMarker]
        );
    }

    #[test]
    fn test_unknown_characters_become_error_tokens() {
        let tokens = tokenize("[$]\n");
        assert_eq!(tokens[1].kind, TokenKind::ErrorToken);
        assert_eq!(tokens[1].text, "$");
        assert!(tokens[2].is_op("]"));
    }

    #[test]
    fn test_unterminated_quote_resumes_after_quote() {
        let tokens = tokenize("<A n='x>\n");
        let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["<", "A", "n", "=", "'", "x", ">", "\n", ""]);
        assert_eq!(tokens[4].kind, TokenKind::ErrorToken);
    }

    #[test]
    fn test_display_uses_exact_operator_name() {
        let tokens = tokenize("[\n");
        assert_eq!(tokens[0].to_string(), "`[`(LSQB) at 1:0-1:1");
    }
}
