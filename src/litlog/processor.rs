//! Processing pipeline
//!
//! Ties the stages together for a whole input:
//!
//!     read -> prepare (trim trailing whitespace, add final newline) -> tokenize
//!          -> tokens:      dump every token
//!          -> json / html: parse the document, render through the format registry
//!
//! Errors from every stage are folded into [`ProcessingError`].

use crate::litlog::config::LitlogConfig;
use crate::litlog::formats::{dump_tokens, FormatError, FormatRegistry};
use crate::litlog::lexing::{prepare_source, tokenize};
use crate::litlog::parsing::{ParseError, Parser};
use std::fmt;
use std::fs;
use std::path::Path;

/// What to produce from an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Html,
    /// Raw token dump, one JSON record per line
    Tokens,
}

impl OutputFormat {
    /// Parse a format name. `generate` is accepted for the token dump.
    pub fn from_string(name: &str) -> Result<Self, ProcessingError> {
        match name {
            "json" => Ok(OutputFormat::Json),
            "html" => Ok(OutputFormat::Html),
            "tokens" | "generate" => Ok(OutputFormat::Tokens),
            other => Err(ProcessingError::InvalidFormat(other.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Html => "html",
            OutputFormat::Tokens => "tokens",
        }
    }

    pub fn available() -> [OutputFormat; 3] {
        [OutputFormat::Json, OutputFormat::Html, OutputFormat::Tokens]
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProcessingError {
    Io { path: String, message: String },
    Parse(ParseError),
    Format(FormatError),
    Config(String),
    InvalidFormat(String),
}

impl std::error::Error for ProcessingError {}

impl fmt::Display for ProcessingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessingError::Io { path, message } => write!(f, "{path}: {message}"),
            ProcessingError::Parse(err) => write!(f, "{err}"),
            ProcessingError::Format(err) => write!(f, "{err}"),
            ProcessingError::Config(msg) => write!(f, "Configuration error: {msg}"),
            ProcessingError::InvalidFormat(name) => write!(f, "Invalid format: {name}"),
        }
    }
}

impl From<ParseError> for ProcessingError {
    fn from(err: ParseError) -> Self {
        ProcessingError::Parse(err)
    }
}

impl From<FormatError> for ProcessingError {
    fn from(err: FormatError) -> Self {
        ProcessingError::Format(err)
    }
}

impl From<::config::ConfigError> for ProcessingError {
    fn from(err: ::config::ConfigError) -> Self {
        ProcessingError::Config(err.to_string())
    }
}

pub struct Processor {
    registry: FormatRegistry,
    max_depth: usize,
}

impl Processor {
    pub fn new(config: &LitlogConfig) -> Self {
        Processor {
            registry: FormatRegistry::with_config(config),
            max_depth: config.parse.max_depth,
        }
    }

    /// Run the pipeline over in-memory source text.
    pub fn process(&self, source: &str, format: OutputFormat) -> Result<String, ProcessingError> {
        let source = prepare_source(source);
        let tokens = tokenize(&source);
        tracing::debug!(%format, tokens = tokens.len(), "processing source");

        if format == OutputFormat::Tokens {
            return Ok(dump_tokens(&tokens)?);
        }

        let document = Parser::new(&source, tokens)
            .with_max_depth(self.max_depth)
            .parse_document()?;
        Ok(self.registry.serialize(&document, format.name())?)
    }

    pub fn process_file<P: AsRef<Path>>(
        &self,
        path: P,
        format: OutputFormat,
    ) -> Result<String, ProcessingError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| ProcessingError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        tracing::info!(path = %path.display(), bytes = source.len(), "read input");
        self.process(&source, format)
    }
}
