//! Configuration loading
//!
//! `defaults/litlog.default.toml` is embedded into the binary so the documented defaults
//! and the runtime behavior stay in sync. Callers layer user files, `LITLOG_*`
//! environment variables and single-key overrides on top via [`Loader`] before
//! deserializing into [`LitlogConfig`]. Later layers win.

use ::config::builder::DefaultState;
use ::config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/litlog.default.toml");

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LitlogConfig {
    pub json: JsonConfig,
    pub parse: ParseConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonConfig {
    pub indent: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParseConfig {
    pub max_depth: usize,
}

/// Knobs of the HTML report.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    pub title: String,
    pub heading: String,
    pub search_placeholder: String,
    pub json_indent: usize,
    pub summary_limit: usize,
    pub long_text_threshold: usize,
    pub inline_array_limit: usize,
    pub inline_object_limit: usize,
    pub inline_string_limit: usize,
    pub search_debounce_ms: u64,
    pub important_keys: Vec<String>,
}

/// Layers user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file, ignored if absent.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer `LITLOG_<SECTION>__<KEY>` environment variables, e.g. `LITLOG_JSON__INDENT=4`.
    pub fn with_env(mut self) -> Self {
        let source = Environment::with_prefix("LITLOG")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override, e.g. `("json.indent", 4)`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<LitlogConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<LitlogConfig, ConfigError> {
    Loader::new().build()
}
