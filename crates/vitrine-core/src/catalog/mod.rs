//! Product catalog: raw records, cleaning, and derived fields.
//!
//! A [`Catalog`] is built once from a dataset and never mutated. Row order is
//! the source order, and the row index is the identity used by the vector
//! space, the neighbor index and the name resolver.

mod loader;
mod locate;
mod normalize;

#[cfg(test)]
mod loader_tests;

pub use loader::REQUIRED_COLUMNS;
pub use locate::DataLocator;
pub use normalize::{combined_text, normalize_brand, normalize_name, popularity_scores};

use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Raw product record as it appears in the dataset.
///
/// Every field may be absent. Cleaning happens in [`Catalog::from_records`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Display name.
    pub name: Option<String>,
    /// Brand label.
    pub brand: Option<String>,
    /// Category label.
    pub category: Option<String>,
    /// Free-form tags.
    pub tags: Option<String>,
    /// Long description.
    pub description: Option<String>,
    /// Average rating.
    pub rating: Option<f64>,
    /// Number of reviews.
    pub review_count: Option<f64>,
    /// Pipe-delimited image URLs.
    pub image_urls: Option<String>,
}

impl ProductRecord {
    /// Creates a record with only a name set.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Sets the brand.
    #[must_use]
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = Some(tags.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets rating and review count.
    #[must_use]
    pub fn with_reviews(mut self, rating: f64, review_count: f64) -> Self {
        self.rating = Some(rating);
        self.review_count = Some(review_count);
        self
    }

    /// Sets the pipe-delimited image URLs.
    #[must_use]
    pub fn with_image_urls(mut self, image_urls: impl Into<String>) -> Self {
        self.image_urls = Some(image_urls.into());
        self
    }
}

/// A cleaned catalog entry with its derived fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    /// Display name, empty when missing from the source.
    pub name: String,
    /// Brand, empty when missing.
    pub brand: String,
    /// Category, empty when missing.
    pub category: String,
    /// Tags, empty when missing.
    pub tags: String,
    /// Description, empty when missing.
    pub description: String,
    /// Rating, `>= 0`.
    pub rating: f64,
    /// Review count, `>= 0`.
    pub review_count: f64,
    /// Pipe-delimited image URLs.
    pub image_urls: String,
    /// Lowercased, trimmed name. Key of the name index.
    pub normalized_name: String,
    /// Vectorizer input.
    pub combined_text: String,
    /// Popularity in `[0, 1]`.
    pub popularity: f64,
}

impl Product {
    /// First non-empty entry of the pipe-delimited image list.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.image_urls
            .split('|')
            .map(str::trim)
            .find(|url| !url.is_empty())
    }
}

/// Immutable, cleaned product table.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Cleans raw records and computes derived fields.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyDataset`] if `records` is empty.
    pub fn from_records(records: Vec<ProductRecord>) -> Result<Self> {
        if records.is_empty() {
            return Err(Error::EmptyDataset);
        }

        let ratings: Vec<f64> = records.iter().map(|r| clean_count(r.rating)).collect();
        let review_counts: Vec<f64> = records
            .iter()
            .map(|r| clean_count(r.review_count))
            .collect();
        let popularity = popularity_scores(&ratings, &review_counts);

        let products = records
            .into_iter()
            .zip(ratings)
            .zip(review_counts)
            .zip(popularity)
            .map(|(((record, rating), review_count), popularity)| {
                let name = record.name.unwrap_or_default();
                let brand = record.brand.unwrap_or_default();
                let category = record.category.unwrap_or_default();
                let tags = record.tags.unwrap_or_default();
                let description = record.description.unwrap_or_default();
                Product {
                    normalized_name: normalize_name(&name),
                    combined_text: combined_text(&name, &brand, &category, &tags, &description),
                    name,
                    brand,
                    category,
                    tags,
                    description,
                    rating,
                    review_count,
                    image_urls: record.image_urls.unwrap_or_default(),
                    popularity,
                }
            })
            .collect();

        Ok(Self { products })
    }

    /// Parses CSV data and builds the catalog.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_records(loader::read_records(reader)?)
    }

    /// Loads a CSV dataset file.
    ///
    /// # Errors
    ///
    /// [`Error::DataNotFound`] when the file does not exist, naming its parent
    /// directory as the searched location. Other open failures are
    /// [`Error::Io`].
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = match std::fs::File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(missing_file(path));
            }
            Err(e) => return Err(e.into()),
        };
        let catalog = Self::from_reader(std::io::BufReader::new(file))?;
        tracing::debug!(path = %path.display(), rows = catalog.len(), "Loaded catalog");
        Ok(catalog)
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Always false for a constructed catalog.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Product at `row`.
    #[must_use]
    pub fn get(&self, row: usize) -> Option<&Product> {
        self.products.get(row)
    }

    /// All products in row order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Iterates over products in row order.
    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    /// Vectorizer input, one entry per row.
    #[must_use]
    pub fn combined_texts(&self) -> Vec<&str> {
        self.products
            .iter()
            .map(|p| p.combined_text.as_str())
            .collect()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}

/// Missing or non-finite → 0, negative clipped to 0.
fn clean_count(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => v.max(0.0),
        _ => 0.0,
    }
}

fn missing_file(path: &Path) -> Error {
    let filename = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Error::DataNotFound {
        filename,
        searched: vec![parent],
    }
}
