//! Nearest-neighbor indexes over TF-IDF vectors.
//!
//! Only exact search is provided: at catalog scale a linear scan over sparse
//! vectors is fast enough and gives reproducible results.

mod flat;

#[cfg(test)]
mod flat_tests;

pub use flat::FlatIndex;

use std::cmp::Ordering;

use serde::Serialize;

use crate::text::SparseVector;

/// A neighbor returned by an index query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Neighbor {
    /// Catalog row of the neighbor.
    pub row: usize,
    /// Cosine distance to the query, in `[0, 2]`.
    pub distance: f32,
}

impl Neighbor {
    /// Similarity `1 - distance`, bounded to `[0, 1]`.
    #[must_use]
    pub fn similarity(&self) -> f32 {
        (1.0 - self.distance).clamp(0.0, 1.0)
    }

    /// Closest first, ties broken by the smaller row.
    pub(crate) fn closest_first(a: &Self, b: &Self) -> Ordering {
        a.distance
            .total_cmp(&b.distance)
            .then_with(|| a.row.cmp(&b.row))
    }
}

/// Read-only nearest-neighbor index keyed by catalog row.
pub trait NeighborIndex: Send + Sync {
    /// Returns the `k` rows closest to `query`, closest first.
    ///
    /// `k` is clamped to the number of indexed rows. Equal distances are
    /// ordered by row ascending.
    fn search(&self, query: &SparseVector, k: usize) -> Vec<Neighbor>;

    /// Searches with the stored vector of `row`. `None` if `row` is out of range.
    fn search_row(&self, row: usize, k: usize) -> Option<Vec<Neighbor>>;

    /// Number of indexed rows.
    fn len(&self) -> usize;

    /// Returns true if the index is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
