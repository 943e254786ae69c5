//! Raw token definitions
//!
//! These are the tokens logos produces directly. Brackets get their own variants because
//! the adapter tracks bracket depth to tell NEWLINE from NL; every other operator is a
//! plain [`RawToken::Operator`].
//!
//! `<` and `>` are always single-character tokens. Object placeholders count them to
//! find their end, so `>>` or `<=` must never swallow one.
use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\f\r]+|\\\r?\n")]
pub enum RawToken {
    #[regex(r"[_\p{L}][_\p{L}\p{N}]*")]
    Name,

    // A leading minus is folded into the literal: the grammar has no operators, and
    // concatenated placeholder text reads the same either way.
    #[regex(r"-?([0-9][0-9_]*(\.[0-9_]*)?|\.[0-9][0-9_]*)([eE][+-]?[0-9][0-9_]*)?[jJ]?")]
    #[regex(r"-?0[xX][0-9a-fA-F_]+")]
    #[regex(r"-?0[oO][0-7_]+")]
    #[regex(r"-?0[bB][01_]+")]
    Number,

    #[regex(r#"([rRbBuUfF]|[rR][bB]|[bB][rR]|[fF][rR]|[rR][fF])?'([^'\\\n]|\\(.|\n))*'"#)]
    #[regex(r#"([rRbBuUfF]|[rR][bB]|[bB][rR]|[fF][rR]|[rR][fF])?"([^"\\\n]|\\(.|\n))*""#)]
    String,

    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token("[")]
    OpenBracket,
    #[token("]")]
    CloseBracket,
    #[token("{")]
    OpenBrace,
    #[token("}")]
    CloseBrace,

    #[token("<")]
    Less,
    #[token(">")]
    Greater,

    #[regex(r"->|:=|\.\.\.|\*\*=?|//=?|[-+*/%&|^@=!]=|[-+*/%&|^~@=;:,.!]")]
    Operator,

    #[regex(r"#[^\n]*")]
    Comment,

    #[token("\n")]
    Newline,
}

impl RawToken {
    pub fn opens_bracket(self) -> bool {
        matches!(
            self,
            RawToken::OpenParen | RawToken::OpenBracket | RawToken::OpenBrace
        )
    }

    pub fn closes_bracket(self) -> bool {
        matches!(
            self,
            RawToken::CloseParen | RawToken::CloseBracket | RawToken::CloseBrace
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<(Result<RawToken, ()>, &str)> {
        let mut lexer = RawToken::lexer(source);
        let mut tokens = Vec::new();
        while let Some(result) = lexer.next() {
            tokens.push((result, lexer.slice()));
        }
        tokens
    }

    #[test]
    fn test_brackets_and_separators() {
        let tokens = lex("{'a': [1, (2,)]}");
        let kinds: Vec<_> = tokens.iter().map(|(t, _)| *t).collect();
        assert_eq!(
            kinds,
            vec![
                Ok(RawToken::OpenBrace),
                Ok(RawToken::String),
                Ok(RawToken::Operator),
                Ok(RawToken::OpenBracket),
                Ok(RawToken::Number),
                Ok(RawToken::Operator),
                Ok(RawToken::OpenParen),
                Ok(RawToken::Number),
                Ok(RawToken::Operator),
                Ok(RawToken::CloseParen),
                Ok(RawToken::CloseBracket),
                Ok(RawToken::CloseBrace),
            ]
        );
    }

    #[test]
    fn test_string_literals() {
        assert_eq!(lex("'it'"), vec![(Ok(RawToken::String), "'it'")]);
        assert_eq!(lex(r#""it's""#), vec![(Ok(RawToken::String), r#""it's""#)]);
        assert_eq!(lex(r"'a\'b'"), vec![(Ok(RawToken::String), r"'a\'b'")]);
        assert_eq!(lex("b'raw'"), vec![(Ok(RawToken::String), "b'raw'")]);
    }

    #[test]
    fn test_numbers() {
        for source in ["42", "3.5", "-7", "1e5", "0x1F", "1_000", ".5", "2j"] {
            assert_eq!(lex(source), vec![(Ok(RawToken::Number), source)], "{source}");
        }
    }

    #[test]
    fn test_angle_brackets_never_combine() {
        let tokens = lex("<<>>");
        assert_eq!(
            tokens,
            vec![
                (Ok(RawToken::Less), "<"),
                (Ok(RawToken::Less), "<"),
                (Ok(RawToken::Greater), ">"),
                (Ok(RawToken::Greater), ">"),
            ]
        );
    }

    #[test]
    fn test_arrow_is_one_operator() {
        assert_eq!(lex("->"), vec![(Ok(RawToken::Operator), "->")]);
    }

    #[test]
    fn test_comment_runs_to_end_of_line() {
        let tokens = lex("1 # note\n2");
        assert_eq!(tokens[1], (Ok(RawToken::Comment), "# note"));
        assert_eq!(tokens[2], (Ok(RawToken::Newline), "\n"));
    }

    #[test]
    fn test_unknown_characters_are_errors() {
        let tokens = lex("$");
        assert_eq!(tokens, vec![(Err(()), "$")]);
    }
}
