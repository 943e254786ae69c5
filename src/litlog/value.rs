//! The value tree
//!
//! A parse produces a strict tree of [`Value`]s: no sharing, no cycles, immutable once
//! built. Collections keep source order, including dict insertion order and set member
//! order.
//!
//! JSON mapping
//!
//!     List, Tuple and Set all become arrays; Dict becomes an object. JSON object keys
//!     must be strings, so dict keys go through [`Value::key_text`]:
//!
//!         Str, Object       their text
//!         Null              "null"
//!         Bool              "true" / "false"
//!         Int, Float        decimal text, floats always with a fraction or exponent
//!         List, Tuple,      compact JSON of the key
//!         Set, Dict
//!
//!     Keys that collide after this mapping are all written, in order.
//!
//! [`Display`](fmt::Display) renders the literal syntax the parser reads. Strings are
//! quoted, never escaped, because the parser does not decode escapes. Text that parses
//! back to the same tree therefore needs no empty sets (they print as `{}`), no string
//! holding both `'` and `"`, and no string ending in a backslash.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Verbatim `<...>` placeholder text, delimiters included.
    Object(String),
    List(Vec<Value>),
    Tuple(Vec<Value>),
    Set(Vec<Value>),
    /// Ordered pairs; keys may be any value.
    Dict(Vec<(Value, Value)>),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Object(_) => "object",
            Value::List(_) => "list",
            Value::Tuple(_) => "tuple",
            Value::Set(_) => "set",
            Value::Dict(_) => "dict",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(text) => Some(text),
            _ => None,
        }
    }

    /// Items of a list, tuple or set.
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) | Value::Tuple(items) | Value::Set(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&[(Value, Value)]> {
        match self {
            Value::Dict(pairs) => Some(pairs),
            _ => None,
        }
    }

    /// First value stored under the string key `key`, if this is a dict.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_dict()?
            .iter()
            .find(|(candidate, _)| candidate.as_str() == Some(key))
            .map(|(_, value)| value)
    }

    /// Follows a chain of string keys through nested dicts.
    pub fn get_path(&self, path: &[&str]) -> Option<&Value> {
        path.iter().try_fold(self, |value, key| value.get(key))
    }

    /// Text used when this value is a JSON object key.
    pub fn key_text(&self) -> String {
        match self {
            Value::Str(text) | Value::Object(text) => text.clone(),
            Value::Null => "null".to_string(),
            Value::Bool(flag) => flag.to_string(),
            Value::Int(int) => int.to_string(),
            Value::Float(float) => format!("{:?}", float),
            Value::List(_) | Value::Tuple(_) | Value::Set(_) | Value::Dict(_) => {
                serde_json::to_string(self).unwrap_or_else(|_| self.to_string())
            }
        }
    }

    /// Plain text for display: strings and placeholders unquoted, everything else in
    /// literal syntax.
    pub fn to_plain_string(&self) -> String {
        match self {
            Value::Str(text) | Value::Object(text) => text.clone(),
            other => other.to_string(),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(flag) => serializer.serialize_bool(*flag),
            Value::Int(int) => serializer.serialize_i64(*int),
            Value::Float(float) => serializer.serialize_f64(*float),
            Value::Str(text) | Value::Object(text) => serializer.serialize_str(text),
            Value::List(items) | Value::Tuple(items) | Value::Set(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Dict(pairs) => {
                let mut map = serializer.serialize_map(Some(pairs.len()))?;
                for (key, value) in pairs {
                    map.serialize_entry(&key.key_text(), value)?;
                }
                map.end()
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("None"),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Int(int) => write!(f, "{}", int),
            Value::Float(float) => write!(f, "{:?}", float),
            Value::Str(text) if text.contains('\'') && !text.contains('"') => {
                write!(f, "\"{}\"", text)
            }
            Value::Str(text) => write!(f, "'{}'", text),
            Value::Object(text) => f.write_str(text),
            Value::List(items) => write_items(f, "[", items, "]"),
            Value::Tuple(items) if items.len() == 1 => write!(f, "({},)", items[0]),
            Value::Tuple(items) => write_items(f, "(", items, ")"),
            Value::Set(items) => write_items(f, "{", items, "}"),
            Value::Dict(pairs) => {
                f.write_str("{")?;
                for (index, (key, value)) in pairs.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                f.write_str("}")
            }
        }
    }
}

fn write_items(f: &mut fmt::Formatter<'_>, open: &str, items: &[Value], close: &str) -> fmt::Result {
    f.write_str(open)?;
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    f.write_str(close)
}
