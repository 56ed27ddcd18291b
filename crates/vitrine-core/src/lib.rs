//! # Vitrine Core
//!
//! Content-based product recommendation over a static catalog.
//!
//! Products are described by free text (name, brand, category, tags,
//! description). Vitrine turns that text into TF-IDF vectors, finds the
//! nearest neighbors of a product by cosine distance, and re-ranks them with a
//! popularity prior built from ratings and review counts.
//!
//! ## Features
//!
//! - **TF-IDF vectorizer**: unigrams and bigrams, English stop words, smoothed IDF
//! - **Exact cosine search**: reproducible neighbor order, optional `rayon` scan
//! - **Forgiving lookup**: case-insensitive exact match, then fuzzy suggestions
//! - **Popularity re-ranking**: configurable similarity/popularity blend
//! - **Layered config**: defaults, `vitrine.toml`, `VITRINE_*` environment
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vitrine_core::{Recommender, RecommenderConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RecommenderConfig::load()?;
//!     let recommender = Recommender::open(&config)?;
//!
//!     let result = recommender.recommend("Nike Air Zoom Running Shoe", 5);
//!     if result.is_resolved() {
//!         for item in &result.items {
//!             println!("{:.3}  {}", item.score, item.name);
//!         }
//!     } else {
//!         println!("Did you mean: {:?}", result.suggestions);
//!     }
//!
//!     // Autocomplete
//!     let names = recommender.search("nike air", 10);
//!     # let _ = names;
//!     # Ok(())
//! }
//! ```

#![warn(missing_docs)]
// Clippy lints configured in workspace Cargo.toml [workspace.lints.clippy]
#![cfg_attr(
    test,
    allow(
        clippy::float_cmp,
        clippy::doc_markdown,
        clippy::uninlined_format_args,
        clippy::cast_lossless,
        clippy::manual_assert
    )
)]

pub mod catalog;
pub mod config;
#[cfg(test)]
mod config_tests;
pub mod error;
pub mod index;
pub mod matching;
pub mod recommend;
pub mod resolve;
#[cfg(test)]
mod resolve_tests;
pub mod text;

pub use catalog::{Catalog, DataLocator, Product, ProductRecord};
pub use config::{ConfigError, RecommenderConfig};
pub use error::{Error, Result};
pub use index::{FlatIndex, Neighbor, NeighborIndex};
pub use recommend::{
    coerce_top_n, RecommendationResult, RecommendedItem, Recommender, RecommenderStats,
    NOT_FOUND_MESSAGE,
};
pub use resolve::{NameResolver, Resolution};
pub use text::{SparseVector, TfidfVectorizer, VectorSpace};
