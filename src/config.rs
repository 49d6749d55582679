//! Layered configuration for the pantry binary and library callers.
//!
//! Values are resolved in this order, later sources winning:
//!
//! 1. built-in defaults
//! 2. an optional `pantry.{toml,yaml,json}` file in the working directory
//!    (or an explicit path via [`PantryConfig::load_from`])
//! 3. `PANTRY__*` environment variables, `__` separating nested keys
//!
//! A `.env` file is honoured when the binary calls `dotenvy` before loading.
//!
//! ## Example TOML
//!
//! ```toml
//! log_level = "debug"
//! seed_path = "data/recipes.json"
//!
//! [analyzer]
//! stop_words = ["cup", "tbsp", "tsp"]
//!
//! [matcher]
//! top_n = 10
//! ```
//!
//! The same `top_n` from the environment: `PANTRY__MATCHER__TOP_N=10`.

use std::fmt;
use std::path::{Path, PathBuf};

use matcher::{AnalyzerConfig, MatchConfig, Matcher};
use serde::{Deserialize, Serialize};

const ENV_PREFIX: &str = "PANTRY";
const ENV_SEPARATOR: &str = "__";
const DEFAULT_FILE: &str = "pantry";

/// Errors raised while loading or validating [`PantryConfig`].
#[derive(Debug)]
pub enum ConfigLoadError {
    Source(config::ConfigError),
    Validation(String),
}

impl fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigLoadError::Source(err) => write!(f, "failed to load configuration: {err}"),
            ConfigLoadError::Validation(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for ConfigLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigLoadError::Source(err) => Some(err),
            ConfigLoadError::Validation(_) => None,
        }
    }
}

impl From<config::ConfigError> for ConfigLoadError {
    fn from(value: config::ConfigError) -> Self {
        ConfigLoadError::Source(value)
    }
}

/// Runtime configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PantryConfig {
    /// `tracing` env-filter directive, e.g. `info` or `matcher=debug,info`.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit logs as JSON lines instead of human-readable text.
    #[serde(default)]
    pub log_json: bool,

    /// Recipes loaded into the in-memory store at startup.
    #[serde(default)]
    pub seed_path: Option<PathBuf>,

    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    #[serde(default)]
    pub matcher: MatchConfig,
}

impl Default for PantryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
            seed_path: None,
            analyzer: AnalyzerConfig::default(),
            matcher: MatchConfig::default(),
        }
    }
}

impl PantryConfig {
    /// Load from the optional `pantry.*` file in the working directory, then
    /// the environment.
    pub fn load() -> Result<Self, ConfigLoadError> {
        Self::build(config::File::with_name(DEFAULT_FILE).required(false))
    }

    /// Load from an explicit file, which must exist, then the environment.
    /// The format follows the file extension.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigLoadError> {
        Self::build(config::File::from(path.as_ref()).required(true))
    }

    fn build<S>(file: S) -> Result<Self, ConfigLoadError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let builder = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            );

        let config: PantryConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check the nested analyzer and matcher settings.
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.log_level.trim().is_empty() {
            return Err(ConfigLoadError::Validation(
                "log_level must not be empty".into(),
            ));
        }
        self.matcher_instance()
            .validate()
            .map_err(|err| ConfigLoadError::Validation(err.to_string()))
    }

    /// Build the matcher described by this configuration.
    pub fn matcher_instance(&self) -> Matcher {
        Matcher::new(self.analyzer.clone(), self.matcher.clone())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
