use std::sync::Arc;

use proptest::prelude::*;

use super::{FlatIndex, NeighborIndex};
use crate::text::SparseVector;

fn unit(pairs: &[(u32, f32)]) -> SparseVector {
    let mut v = SparseVector::from_pairs(pairs.to_vec());
    v.normalize();
    v
}

fn index(vectors: Vec<SparseVector>) -> FlatIndex {
    FlatIndex::build(Arc::from(vectors))
}

#[test]
fn test_self_is_nearest_at_distance_zero() {
    let idx = index(vec![
        unit(&[(0, 1.0), (1, 1.0)]),
        unit(&[(1, 1.0)]),
        unit(&[(2, 1.0)]),
    ]);
    let hits = idx.search_row(0, 3).unwrap();
    assert_eq!(hits[0].row, 0);
    assert!(hits[0].distance.abs() < 1e-6);
    assert!((hits[0].similarity() - 1.0).abs() < 1e-6);
    assert_eq!(hits[1].row, 1);
    assert_eq!(hits[2].row, 2);
    assert!((hits[2].distance - 1.0).abs() < 1e-6);
}

#[test]
fn test_ties_broken_by_row() {
    let idx = index(vec![
        unit(&[(0, 1.0)]),
        unit(&[(5, 1.0)]),
        unit(&[(6, 1.0)]),
        unit(&[(7, 1.0)]),
    ]);
    let rows: Vec<usize> = idx.search_row(3, 4).unwrap().iter().map(|n| n.row).collect();
    assert_eq!(rows, vec![3, 0, 1, 2]);

    let rows: Vec<usize> = idx.search_row(3, 2).unwrap().iter().map(|n| n.row).collect();
    assert_eq!(rows, vec![3, 0]);
}

#[test]
fn test_k_is_clamped_to_catalog_size() {
    let idx = index(vec![unit(&[(0, 1.0)]), unit(&[(1, 1.0)])]);
    assert_eq!(idx.search_row(0, 30).unwrap().len(), 2);
    assert!(idx.search_row(0, 0).unwrap().is_empty());
    assert_eq!(idx.len(), 2);
    assert!(!idx.is_empty());
}

#[test]
fn test_out_of_range_row() {
    let idx = index(vec![unit(&[(0, 1.0)])]);
    assert!(idx.search_row(1, 1).is_none());
}

#[test]
fn test_zero_vector_is_at_distance_one_from_everything() {
    let idx = index(vec![unit(&[(0, 1.0)]), SparseVector::default()]);
    let hits = idx.search_row(1, 2).unwrap();
    assert_eq!(hits[0].row, 0);
    assert!((hits[0].distance - 1.0).abs() < 1e-6);
    assert!((hits[1].distance - 1.0).abs() < 1e-6);
}

#[test]
fn test_unnormalized_query() {
    let idx = index(vec![unit(&[(0, 1.0)]), unit(&[(1, 1.0)])]);
    let query = SparseVector::from_pairs(vec![(1, 42.0)]);
    let hits = idx.search(&query, 1);
    assert_eq!(hits[0].row, 1);
    assert!(hits[0].distance.abs() < 1e-6);
}

proptest! {
    #[test]
    fn prop_results_sorted_and_bounded(
        rows in prop::collection::vec(
            prop::collection::vec((0_u32..16, 0.0_f32..1.0), 0..6),
            1..24,
        ),
        k in 0_usize..40,
    ) {
        let vectors: Vec<SparseVector> = rows.iter().map(|r| unit(r)).collect();
        let n = vectors.len();
        let idx = index(vectors);
        let hits = idx.search_row(0, k).unwrap();
        prop_assert_eq!(hits.len(), k.min(n));
        for pair in hits.windows(2) {
            prop_assert!(
                pair[0].distance < pair[1].distance
                    || (pair[0].distance == pair[1].distance && pair[0].row < pair[1].row)
            );
        }
        for hit in &hits {
            prop_assert!((0.0..=2.0).contains(&hit.distance));
        }
    }
}
