//! Dataset file lookup across an ordered list of directories.

use std::path::{Path, PathBuf};

use crate::config::RecommenderConfig;
use crate::error::{Error, Result};

/// Resolves data files against candidate directories, first match wins.
#[derive(Debug, Clone)]
pub struct DataLocator {
    base_dir: PathBuf,
    subdirectories: Vec<PathBuf>,
}

impl DataLocator {
    /// Creates a locator. Relative `subdirectories` are joined onto `base_dir`.
    pub fn new<P: Into<PathBuf>>(base_dir: P, subdirectories: Vec<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            subdirectories,
        }
    }

    /// Builds a locator from `base_dir` and `data_dirs`.
    #[must_use]
    pub fn from_config(config: &RecommenderConfig) -> Self {
        Self::new(config.base_dir.clone(), config.data_dirs.clone())
    }

    /// Candidate directories in search order.
    #[must_use]
    pub fn directories(&self) -> Vec<PathBuf> {
        self.subdirectories
            .iter()
            .map(|dir| self.base_dir.join(dir))
            .collect()
    }

    /// Returns the first existing `dir/filename`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataNotFound`] naming every directory searched.
    pub fn resolve(&self, filename: &str) -> Result<PathBuf> {
        self.resolve_optional(filename)
            .ok_or_else(|| Error::DataNotFound {
                filename: filename.to_string(),
                searched: self
                    .directories()
                    .into_iter()
                    .map(|dir| absolutize(&dir))
                    .collect(),
            })
    }

    /// Like [`resolve`](Self::resolve), but returns `None` when absent.
    #[must_use]
    pub fn resolve_optional(&self, filename: &str) -> Option<PathBuf> {
        self.directories()
            .into_iter()
            .map(|dir| dir.join(filename))
            .find(|candidate| candidate.is_file())
    }
}

fn absolutize(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
