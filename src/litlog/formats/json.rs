//! JSON output

use super::registry::{FormatError, Formatter};
use crate::litlog::value::Value;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Serialize `value` as JSON indented by `indent` spaces per level.
pub fn pretty_json<T: Serialize + ?Sized>(value: &T, indent: usize) -> Result<String, FormatError> {
    let indent = " ".repeat(indent);
    let mut buffer = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(indent.as_bytes()));
    value.serialize(&mut serializer)?;
    String::from_utf8(buffer).map_err(|err| FormatError::SerializationError(err.to_string()))
}

pub struct JsonFormatter {
    indent: usize,
}

impl JsonFormatter {
    pub fn new(indent: usize) -> Self {
        JsonFormatter { indent }
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new(2)
    }
}

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, value: &Value) -> Result<String, FormatError> {
        pretty_json(value, self.indent)
    }

    fn description(&self) -> &str {
        "Value tree as indented JSON"
    }
}
