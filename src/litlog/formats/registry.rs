//! Formatter registry
//!
//! Each output format implements [`Formatter`] and is looked up by name.

use crate::litlog::config::LitlogConfig;
use crate::litlog::value::Value;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// No formatter registered under this name
    FormatNotFound(String),
    SerializationError(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::FormatNotFound(name) => write!(f, "Format '{name}' not found"),
            FormatError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
        }
    }
}

impl std::error::Error for FormatError {}

impl From<serde_json::Error> for FormatError {
    fn from(err: serde_json::Error) -> Self {
        FormatError::SerializationError(err.to_string())
    }
}

/// Renders a parsed document to text.
pub trait Formatter: Send + Sync {
    fn name(&self) -> &str;

    fn serialize(&self, value: &Value) -> Result<String, FormatError>;

    fn description(&self) -> &str {
        ""
    }
}

pub struct FormatRegistry {
    formatters: HashMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        FormatRegistry {
            formatters: HashMap::new(),
        }
    }

    /// Register a formatter, replacing any previous one with the same name.
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(|f| f.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    pub fn serialize(&self, value: &Value, format: &str) -> Result<String, FormatError> {
        let formatter = self
            .get(format)
            .ok_or_else(|| FormatError::FormatNotFound(format.to_string()))?;
        formatter.serialize(value)
    }

    /// Registered names, sorted.
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formatters.keys().cloned().collect();
        names.sort();
        names
    }

    /// Registry with the built-in formatters configured from `config`.
    pub fn with_config(config: &LitlogConfig) -> Self {
        let mut registry = Self::new();
        registry.register(super::JsonFormatter::new(config.json.indent));
        registry.register(super::HtmlFormatter::new(config.report.clone()));
        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        match crate::litlog::config::load_defaults() {
            Ok(config) => Self::with_config(&config),
            Err(err) => {
                tracing::warn!(error = %err, "default config unavailable, registering json only");
                let mut registry = Self::new();
                registry.register(super::JsonFormatter::default());
                registry
            }
        }
    }
}
