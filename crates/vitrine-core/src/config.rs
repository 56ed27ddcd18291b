//! Configuration for the recommender.
//!
//! Values are layered with `figment`:
//!
//! 1. Built-in defaults ([`RecommenderConfig::default`])
//! 2. `vitrine.toml` (or an explicit file passed to [`RecommenderConfig::load_from`])
//! 3. Environment variables prefixed with `VITRINE_`
//!
//! ```toml
//! similarity_weight = 0.75
//! neighbor_pool_size = 30
//! ngram_range = [1, 2]
//! data_dirs = ["data", "."]
//! ```
//!
//! Configuration is read once at construction time. A recommender never
//! observes later changes.

use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "vitrine.toml";

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "VITRINE_";

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A provider failed or a value had the wrong type.
    #[error("Failed to load configuration: {0}")]
    Load(#[source] Box<figment::Error>),

    /// A value parsed but is outside its allowed range.
    #[error("Invalid value for '{key}': {message}")]
    InvalidValue {
        /// Configuration key.
        key: String,
        /// What is wrong with it.
        message: String,
    },

    /// The configuration could not be rendered back to TOML.
    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Load(Box::new(err))
    }
}

/// Static recommender configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    /// Weight of textual similarity in the blended score, in `[0, 1]`.
    /// Popularity gets `1 - similarity_weight`.
    pub similarity_weight: f64,
    /// Neighbors retrieved before re-ranking. Clamped to the catalog size.
    pub neighbor_pool_size: usize,
    /// Maximum vocabulary size of the TF-IDF vectorizer.
    pub max_vocabulary_size: usize,
    /// Inclusive n-gram range `(min, max)` used by the vectorizer.
    pub ngram_range: (usize, usize),
    /// Terms appearing in fewer documents are dropped.
    pub min_document_frequency: usize,
    /// Result count used when the caller passes an invalid `top_n`.
    pub default_top_n: usize,
    /// Minimum ratio for "did you mean" suggestions on a resolution miss.
    pub suggestion_cutoff: f64,
    /// Maximum number of suggestions on a resolution miss.
    pub suggestion_limit: usize,
    /// Minimum ratio for autocomplete search.
    pub search_cutoff: f64,
    /// Autocomplete result count when the caller gives none.
    pub default_search_limit: usize,
    /// Dataset file name.
    pub data_file: String,
    /// Directory the `data_dirs` entries are relative to.
    pub base_dir: PathBuf,
    /// Candidate directories searched for `data_file`, in order.
    pub data_dirs: Vec<PathBuf>,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            similarity_weight: 0.75,
            neighbor_pool_size: 30,
            max_vocabulary_size: 20_000,
            ngram_range: (1, 2),
            min_document_frequency: 2,
            default_top_n: 10,
            suggestion_cutoff: 0.6,
            suggestion_limit: 5,
            search_cutoff: 0.4,
            default_search_limit: 10,
            data_file: "clean_data.csv".to_string(),
            base_dir: PathBuf::from("."),
            data_dirs: vec![PathBuf::from("data"), PathBuf::from(".")],
        }
    }
}

impl RecommenderConfig {
    /// Loads configuration from `vitrine.toml` (if present) and environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Loads configuration from a specific TOML file (if present) and environment.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(path.as_ref()).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Returns the provider chain without extracting it.
    #[must_use]
    pub fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Checks that every value is within its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_unit_interval("similarity_weight", self.similarity_weight)?;
        check_unit_interval("suggestion_cutoff", self.suggestion_cutoff)?;
        check_unit_interval("search_cutoff", self.search_cutoff)?;

        check_positive("neighbor_pool_size", self.neighbor_pool_size)?;
        check_positive("max_vocabulary_size", self.max_vocabulary_size)?;
        check_positive("min_document_frequency", self.min_document_frequency)?;
        check_positive("default_top_n", self.default_top_n)?;

        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(invalid(
                "ngram_range",
                format!("expected 1 <= min <= max, got ({min_n}, {max_n})"),
            ));
        }

        if self.data_file.trim().is_empty() {
            return Err(invalid("data_file", "must not be empty".to_string()));
        }
        if self.data_dirs.is_empty() {
            return Err(invalid(
                "data_dirs",
                "at least one directory is required".to_string(),
            ));
        }
        Ok(())
    }

    /// Renders the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

fn invalid(key: &str, message: String) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message,
    }
}

fn check_unit_interval(key: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(key, format!("must be within [0, 1], got {value}")))
    }
}

fn check_positive(key: &str, value: usize) -> Result<(), ConfigError> {
    if value == 0 {
        Err(invalid(key, "must be at least 1".to_string()))
    } else {
        Ok(())
    }
}
