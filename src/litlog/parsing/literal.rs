//! Literal cleaning
//!
//! Turns STRING and NUMBER token text into scalar values.
//!
//! String cleaning is a textual trim: at most one leading and one trailing quote
//! character (`'` or `"`) is removed, without checking that the quotes match and without
//! decoding escape sequences. String prefixes (`b'...'`) are kept as they are.

use super::error::ParseError;
use crate::litlog::lexing::{Token, TokenKind};
use crate::litlog::value::Value;
use std::num::IntErrorKind;

/// Clean a literal token into a scalar value.
pub fn clean_literal(token: &Token) -> Result<Value, ParseError> {
    match token.kind {
        TokenKind::String => Ok(Value::Str(strip_quotes(&token.text).to_string())),
        TokenKind::Number => parse_number(token),
        _ => Err(ParseError::InvalidLiteralToken {
            found: token.clone(),
        }),
    }
}

pub fn strip_quotes(text: &str) -> &str {
    let text = text.strip_prefix(['\'', '"']).unwrap_or(text);
    text.strip_suffix(['\'', '"']).unwrap_or(text)
}

/// Text with a decimal point or an exponent is a float, anything else an integer.
/// Integers too large for `i64` become floats, whatever their radix.
fn parse_number(token: &Token) -> Result<Value, ParseError> {
    let invalid = || ParseError::InvalidNumber {
        found: token.clone(),
    };
    let text: String = token.text.chars().filter(|c| *c != '_').collect();
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.as_str()),
    };

    if let Some((radix, digits)) = radix_digits(unsigned) {
        let signed = if negative {
            format!("-{}", digits)
        } else {
            digits.to_string()
        };
        return match i64::from_str_radix(&signed, radix) {
            Ok(int) => Ok(Value::Int(int)),
            Err(err) => match err.kind() {
                IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                    let magnitude = radix_magnitude(digits, radix).ok_or_else(invalid)?;
                    Ok(Value::Float(if negative { -magnitude } else { magnitude }))
                }
                _ => Err(invalid()),
            },
        };
    }

    if unsigned.ends_with(['j', 'J']) {
        return Err(invalid());
    }

    if unsigned.contains(['.', 'e', 'E']) {
        return text.parse::<f64>().map(Value::Float).map_err(|_| invalid());
    }

    match text.parse::<i64>() {
        Ok(int) => Ok(Value::Int(int)),
        Err(_) => text.parse::<f64>().map(Value::Float).map_err(|_| invalid()),
    }
}

/// Digits in `radix` as a float, rounded once when they fit in `u128`.
fn radix_magnitude(digits: &str, radix: u32) -> Option<f64> {
    if let Ok(magnitude) = u128::from_str_radix(digits, radix) {
        return Some(magnitude as f64);
    }
    digits.chars().try_fold(0.0f64, |acc, c| {
        Some(acc * f64::from(radix) + f64::from(c.to_digit(radix)?))
    })
}

fn radix_digits(text: &str) -> Option<(u32, &str)> {
    let prefix = text.get(..2)?;
    let digits = &text[2..];
    match prefix {
        "0x" | "0X" => Some((16, digits)),
        "0o" | "0O" => Some((8, digits)),
        "0b" | "0B" => Some((2, digits)),
        _ => None,
    }
}
