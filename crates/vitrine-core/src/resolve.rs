//! Product name resolution: exact lookup, then fuzzy suggestions.

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::catalog::{normalize_name, Catalog};
use crate::matching::close_matches;

/// Outcome of resolving a free-text product name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Resolution {
    /// The normalized query is a known name; `row` is its first occurrence.
    Exact {
        /// Catalog row.
        row: usize,
    },
    /// No exact match. `suggestions` holds close display names, possibly none.
    Miss {
        /// Display names of the closest products, best first.
        suggestions: Vec<String>,
    },
    /// The query was empty. No lookup was attempted.
    Blank,
}

impl Resolution {
    /// Resolved row, if any.
    #[must_use]
    pub fn row(&self) -> Option<usize> {
        match self {
            Self::Exact { row } => Some(*row),
            Self::Miss { .. } | Self::Blank => None,
        }
    }

    /// Suggestions of a miss; empty otherwise.
    #[must_use]
    pub fn suggestions(&self) -> &[String] {
        match self {
            Self::Miss { suggestions } => suggestions,
            Self::Exact { .. } | Self::Blank => &[],
        }
    }

    /// Consumes the resolution, returning its suggestions.
    #[must_use]
    pub fn into_suggestions(self) -> Vec<String> {
        match self {
            Self::Miss { suggestions } => suggestions,
            Self::Exact { .. } | Self::Blank => Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
struct NameEntry {
    normalized: String,
    display: String,
    row: usize,
}

/// Maps normalized names to the first row carrying them.
///
/// Later rows with a duplicate name are not reachable by name, though they
/// still appear as neighbors of other products.
#[derive(Debug, Clone)]
pub struct NameResolver {
    /// Normalized name -> position in `entries`
    positions: FxHashMap<String, usize>,
    entries: Vec<NameEntry>,
}

impl NameResolver {
    /// Indexes every normalized name of the catalog, first occurrence wins.
    #[must_use]
    pub fn new(catalog: &Catalog) -> Self {
        let mut positions: FxHashMap<String, usize> = FxHashMap::default();
        let mut entries = Vec::new();
        for (row, product) in catalog.iter().enumerate() {
            if positions.contains_key(&product.normalized_name) {
                continue;
            }
            positions.insert(product.normalized_name.clone(), entries.len());
            entries.push(NameEntry {
                normalized: product.normalized_name.clone(),
                display: product.name.clone(),
                row,
            });
        }
        Self { positions, entries }
    }

    /// Number of distinct normalized names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no name is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, normalized: &str) -> Option<&NameEntry> {
        self.positions.get(normalized).map(|&pos| &self.entries[pos])
    }

    /// Exact lookup of an already normalized name.
    #[must_use]
    pub fn row_of(&self, normalized: &str) -> Option<usize> {
        self.entry(normalized).map(|e| e.row)
    }

    /// Resolves `query` to a row, or to suggestions on a miss.
    ///
    /// An empty query is [`Resolution::Blank`] and never produces suggestions.
    #[must_use]
    pub fn resolve(&self, query: &str, limit: usize, cutoff: f64) -> Resolution {
        if query.is_empty() {
            return Resolution::Blank;
        }
        let normalized = normalize_name(query);
        if let Some(row) = self.row_of(&normalized) {
            return Resolution::Exact { row };
        }
        Resolution::Miss {
            suggestions: self.fuzzy(&normalized, limit, cutoff),
        }
    }

    /// Display names of the closest normalized names to `query`.
    #[must_use]
    pub fn search(&self, query: &str, limit: usize, cutoff: f64) -> Vec<String> {
        self.fuzzy(&normalize_name(query), limit, cutoff)
    }

    fn fuzzy(&self, normalized: &str, limit: usize, cutoff: f64) -> Vec<String> {
        close_matches(
            normalized,
            self.entries.iter().map(|e| e.normalized.as_str()),
            limit,
            cutoff,
        )
        .into_iter()
        .filter_map(|hit| self.entry(hit.candidate).map(|e| e.display.clone()))
        .collect()
    }
}
