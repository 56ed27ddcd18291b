//! Error types for Vitrine.
//!
//! Every variant here is a construction-time failure: a recommender is either
//! fully built or not built at all. An unresolved product name at query time
//! is not an error, see [`crate::RecommendationResult`].

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Result type alias for Vitrine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a recommender.
#[derive(Error, Debug)]
pub enum Error {
    /// The dataset file was not found in any candidate directory.
    #[error(
        "Unable to locate '{filename}'. Expected to find it in one of: {}",
        format_searched(searched)
    )]
    DataNotFound {
        /// File name that was looked up.
        filename: String,
        /// Every directory that was searched, in search order.
        searched: Vec<PathBuf>,
    },

    /// The dataset contains no product rows.
    #[error("The training dataset is empty; cannot build recommender")]
    EmptyDataset,

    /// The catalog text could not be turned into a usable vector space.
    #[error("Vectorization error: {0}")]
    Vectorization(String),

    /// A required column is absent from the dataset header.
    #[error("Dataset is missing required column '{0}'")]
    MissingColumn(String),

    /// Malformed CSV input.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

fn format_searched(searched: &[PathBuf]) -> String {
    let dirs: Vec<String> = searched
        .iter()
        .map(|p| format!("'{}'", p.display()))
        .collect();
    format!("[{}]", dirs.join(", "))
}

impl Error {
    /// Returns true when the error stems from the dataset content rather than
    /// its location or the configuration.
    #[must_use]
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyDataset | Self::Vectorization(_) | Self::MissingColumn(_) | Self::Csv(_)
        )
    }
}
