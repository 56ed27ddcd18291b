//! Ranking engine: neighbor retrieval blended with popularity.

use std::path::Path;
use std::time::Instant;

use serde::Serialize;

use crate::catalog::{Catalog, DataLocator, Product};
use crate::config::RecommenderConfig;
use crate::error::Result;
use crate::index::{FlatIndex, Neighbor, NeighborIndex};
use crate::resolve::{NameResolver, Resolution};
use crate::text::{TfidfVectorizer, VectorSpace};

/// Message carried by a result whose query did not resolve.
pub const NOT_FOUND_MESSAGE: &str = "Product not found. Please refine your search query.";

/// One recommended product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendedItem {
    /// Catalog row.
    pub row: usize,
    /// Display name.
    pub name: String,
    /// Brand.
    pub brand: String,
    /// Pipe-delimited image URLs, as in the dataset.
    pub image_url: String,
    /// Rating.
    pub rating: f64,
    /// Review count.
    pub review_count: f64,
    /// Cosine similarity to the query product, in `[0, 1]`.
    pub similarity: f64,
    /// Popularity prior, in `[0, 1]`.
    pub popularity: f64,
    /// Blended ranking score.
    pub score: f64,
}

impl RecommendedItem {
    fn new(row: usize, product: &Product, similarity: f64, score: f64) -> Self {
        Self {
            row,
            name: product.name.clone(),
            brand: product.brand.clone(),
            image_url: product.image_urls.clone(),
            rating: product.rating,
            review_count: product.review_count,
            similarity,
            popularity: product.popularity,
            score,
        }
    }
}

/// Result of [`Recommender::recommend`].
///
/// A query that does not resolve is a normal result: `items` is empty,
/// `resolved_name` is `None` and `message` explains why.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationResult {
    /// Ranked items, best first.
    pub items: Vec<RecommendedItem>,
    /// Display name of the resolved query product.
    pub resolved_name: Option<String>,
    /// Close names when the query did not resolve.
    pub suggestions: Vec<String>,
    /// Human-readable note for unresolved queries.
    pub message: Option<String>,
}

impl RecommendationResult {
    fn not_found(suggestions: Vec<String>) -> Self {
        Self {
            items: Vec::new(),
            resolved_name: None,
            suggestions,
            message: Some(NOT_FOUND_MESSAGE.to_string()),
        }
    }

    /// True if the query resolved to a product.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.resolved_name.is_some()
    }
}

/// Size figures of a built recommender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecommenderStats {
    /// Catalog rows.
    pub products: usize,
    /// Distinct normalized names reachable by exact lookup.
    pub distinct_names: usize,
    /// TF-IDF features.
    pub vocabulary_size: usize,
    /// Stored entries across all product vectors.
    pub non_zero_entries: usize,
}

/// Parses a caller-supplied result count.
///
/// Anything that is not a positive integer falls back to `default`.
#[must_use]
pub fn coerce_top_n(raw: &str, default: usize) -> usize {
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => n,
        _ => default,
    }
}

/// Content-based recommender over an immutable catalog.
///
/// Built once; every query method takes `&self` and never mutates, so an
/// instance can be shared across threads behind an `Arc`.
#[derive(Debug)]
pub struct Recommender {
    config: RecommenderConfig,
    catalog: Catalog,
    space: VectorSpace,
    index: FlatIndex,
    names: NameResolver,
}

impl Recommender {
    /// Locates the configured dataset file and builds a recommender from it.
    ///
    /// # Errors
    ///
    /// Fails on invalid configuration, a missing dataset
    /// ([`Error::DataNotFound`](crate::Error::DataNotFound)), or unusable data.
    pub fn open(config: &RecommenderConfig) -> Result<Self> {
        config.validate()?;
        let path = DataLocator::from_config(config).resolve(&config.data_file)?;
        Self::from_path(path, config.clone())
    }

    /// Builds a recommender from a specific CSV file.
    pub fn from_path<P: AsRef<Path>>(path: P, config: RecommenderConfig) -> Result<Self> {
        config.validate()?;
        let catalog = Catalog::from_path(path)?;
        Self::from_catalog(catalog, config)
    }

    /// Builds a recommender from an already loaded catalog.
    pub fn from_catalog(catalog: Catalog, config: RecommenderConfig) -> Result<Self> {
        config.validate()?;
        let started = Instant::now();

        let space = TfidfVectorizer::from_config(&config).fit(&catalog.combined_texts())?;
        let index = FlatIndex::build(space.shared_vectors());
        let names = NameResolver::new(&catalog);

        let recommender = Self {
            config,
            catalog,
            space,
            index,
            names,
        };
        let stats = recommender.stats();
        tracing::info!(
            products = stats.products,
            distinct_names = stats.distinct_names,
            vocabulary_size = stats.vocabulary_size,
            non_zero_entries = stats.non_zero_entries,
            elapsed_ms = started.elapsed().as_millis(),
            "Recommender built"
        );
        Ok(recommender)
    }

    /// The catalog backing this recommender.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The configuration this recommender was built with.
    #[must_use]
    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// The fitted vector space.
    #[must_use]
    pub fn vector_space(&self) -> &VectorSpace {
        &self.space
    }

    /// Size figures.
    #[must_use]
    pub fn stats(&self) -> RecommenderStats {
        RecommenderStats {
            products: self.catalog.len(),
            distinct_names: self.names.len(),
            vocabulary_size: self.space.vocabulary_size(),
            non_zero_entries: self.space.non_zero_entries(),
        }
    }

    /// Resolves a product name with the configured suggestion settings.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Resolution {
        self.names.resolve(
            name,
            self.config.suggestion_limit,
            self.config.suggestion_cutoff,
        )
    }

    /// Recommends up to `top_n` products similar to `item_name`.
    ///
    /// `top_n == 0` means `default_top_n`. The query product itself is never
    /// part of the result.
    #[must_use]
    pub fn recommend(&self, item_name: &str, top_n: usize) -> RecommendationResult {
        let top_n = if top_n == 0 {
            self.config.default_top_n
        } else {
            top_n
        };

        let row = match self.resolve(item_name) {
            Resolution::Exact { row } => row,
            unresolved => {
                tracing::debug!(query = item_name, outcome = ?unresolved, "Query not resolved");
                return RecommendationResult::not_found(unresolved.into_suggestions());
            }
        };

        // The pool counts the query itself. Ties at distance 1 (zero vectors)
        // can push the query row out of its own top-k, so fetch one extra
        // neighbor and drop the query row explicitly.
        let others = self.config.neighbor_pool_size.saturating_sub(1);
        let pool: Vec<Neighbor> = self
            .index
            .search_row(row, others.saturating_add(2))
            .unwrap_or_default()
            .into_iter()
            .filter(|n| n.row != row)
            .take(others)
            .collect();
        let items = self.rank(&pool, top_n);

        tracing::debug!(
            query = item_name,
            row,
            pool = pool.len(),
            returned = items.len(),
            "Recommendations ranked"
        );

        RecommendationResult {
            items,
            resolved_name: self.catalog.get(row).map(|p| p.name.clone()),
            suggestions: Vec::new(),
            message: None,
        }
    }

    /// Blends similarity with popularity, sorts and truncates.
    fn rank(&self, pool: &[Neighbor], top_n: usize) -> Vec<RecommendedItem> {
        let weight = self.config.similarity_weight;
        let mut items: Vec<RecommendedItem> = pool
            .iter()
            .filter_map(|n| {
                let product = self.catalog.get(n.row)?;
                let similarity = f64::from(n.similarity());
                let score = weight * similarity + (1.0 - weight) * product.popularity;
                Some(RecommendedItem::new(n.row, product, similarity, score))
            })
            .collect();

        items.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.row.cmp(&b.row)));
        items.truncate(top_n);
        items
    }

    /// Autocomplete: display names closest to `query`, best first.
    ///
    /// Uses the looser `search_cutoff`. `limit == 0` yields nothing.
    #[must_use]
    pub fn search(&self, query: &str, limit: usize) -> Vec<String> {
        self.names.search(query, limit, self.config.search_cutoff)
    }
}
