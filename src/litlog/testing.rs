//! Testing utilities
//!
//! Small factories for building expected value trees without spelling out every
//! `Value::` constructor and `.to_string()`.

pub mod factories {
    use crate::litlog::value::Value;

    pub fn s(text: &str) -> Value {
        Value::Str(text.to_string())
    }

    pub fn object(text: &str) -> Value {
        Value::Object(text.to_string())
    }

    pub fn list(items: Vec<Value>) -> Value {
        Value::List(items)
    }

    pub fn dict(pairs: Vec<(Value, Value)>) -> Value {
        Value::Dict(pairs)
    }

    /// Dict with string keys.
    pub fn record(fields: &[(&str, Value)]) -> Value {
        Value::Dict(
            fields
                .iter()
                .map(|(key, value)| (s(key), value.clone()))
                .collect(),
        )
    }
}
