//! Raw token dump
//!
//! One JSON record per line for every token the lexer produced, structural ones
//! included:
//!
//!     {"type":"OP","string":"[","start":[1,0],"end":[1,1]}

use super::registry::FormatError;
use crate::litlog::lexing::Token;

pub fn dump_tokens(tokens: &[Token]) -> Result<String, FormatError> {
    let mut output = String::new();
    for token in tokens {
        output.push_str(&serde_json::to_string(token)?);
        output.push('\n');
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::litlog::lexing::{prepare_source, tokenize};

    #[test]
    fn test_dump_small_list() {
        let source = prepare_source("[1]");
        let dump = dump_tokens(&tokenize(&source)).unwrap();
        let lines: Vec<_> = dump.lines().collect();
        assert_eq!(
            lines,
            vec![
                r#"{"type":"OP","string":"[","start":[1,0],"end":[1,1]}"#,
                r#"{"type":"NUMBER","string":"1","start":[1,1],"end":[1,2]}"#,
                r#"{"type":"OP","string":"]","start":[1,2],"end":[1,3]}"#,
                r#"{"type":"NEWLINE","string":"\n","start":[1,3],"end":[1,4]}"#,
                r#"{"type":"ENDMARKER","string":"","start":[2,0],"end":[2,0]}"#,
            ]
        );
    }

    #[test]
    fn test_dump_empty_stream() {
        assert_eq!(dump_tokens(&[]).unwrap(), "");
    }
}
