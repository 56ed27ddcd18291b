//! Exact brute-force cosine index.

use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::{Neighbor, NeighborIndex};
use crate::text::SparseVector;

/// Exact cosine-distance index scanning every row.
#[derive(Debug, Clone)]
pub struct FlatIndex {
    vectors: Arc<[SparseVector]>,
    norms: Vec<f32>,
}

impl FlatIndex {
    /// Builds the index. Norms are computed once here.
    #[must_use]
    pub fn build(vectors: Arc<[SparseVector]>) -> Self {
        let norms = vectors.iter().map(SparseVector::norm).collect();
        Self { vectors, norms }
    }

    /// Cosine distance between `query` (with precomputed norm) and `row`.
    ///
    /// A zero vector on either side has similarity 0, hence distance 1.
    fn distance(&self, query: &SparseVector, query_norm: f32, row: usize) -> f32 {
        let denom = query_norm * self.norms[row];
        let similarity = if denom > 0.0 {
            query.dot(&self.vectors[row]) / denom
        } else {
            0.0
        };
        (1.0 - similarity).clamp(0.0, 2.0)
    }

    #[cfg(not(feature = "parallel"))]
    fn scan(&self, query: &SparseVector) -> Vec<Neighbor> {
        let query_norm = query.norm();
        (0..self.vectors.len())
            .map(|row| Neighbor {
                row,
                distance: self.distance(query, query_norm, row),
            })
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn scan(&self, query: &SparseVector) -> Vec<Neighbor> {
        let query_norm = query.norm();
        (0..self.vectors.len())
            .into_par_iter()
            .map(|row| Neighbor {
                row,
                distance: self.distance(query, query_norm, row),
            })
            .collect()
    }
}

impl NeighborIndex for FlatIndex {
    fn search(&self, query: &SparseVector, k: usize) -> Vec<Neighbor> {
        let k = k.min(self.vectors.len());
        if k == 0 {
            return Vec::new();
        }

        let mut neighbors = self.scan(query);
        if k < neighbors.len() {
            // Total order on (distance, row), so the partition is deterministic
            neighbors.select_nth_unstable_by(k - 1, Neighbor::closest_first);
            neighbors.truncate(k);
        }
        neighbors.sort_unstable_by(Neighbor::closest_first);
        neighbors
    }

    fn search_row(&self, row: usize, k: usize) -> Option<Vec<Neighbor>> {
        self.vectors.get(row).map(|query| self.search(query, k))
    }

    fn len(&self) -> usize {
        self.vectors.len()
    }
}
