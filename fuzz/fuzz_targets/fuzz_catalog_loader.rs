//! Fuzz target for CSV catalog loading.
//!
//! Arbitrary bytes must produce either a catalog or an error, never a panic.
//! Loaded catalogs are fed through a full recommender build.
//!
//! # Running
//!
//! ```bash
//! cd fuzz
//! cargo +nightly fuzz run fuzz_catalog_loader
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use vitrine_core::{Catalog, Recommender, RecommenderConfig};

const HEADER: &[u8] = b"Name,Brand,Category,Tags,Description,Rating,ReviewCount,ImageURL\n";

fuzz_target!(|body: &[u8]| {
    if body.len() > 64 * 1024 {
        return;
    }

    // Raw input, usually rejected at the header
    let _ = Catalog::from_reader(body);

    let mut data = HEADER.to_vec();
    data.extend_from_slice(body);
    let Ok(catalog) = Catalog::from_reader(data.as_slice()) else {
        return;
    };
    for product in &catalog {
        assert!((0.0..=1.0).contains(&product.popularity));
        assert!(product.rating >= 0.0 && product.review_count >= 0.0);
    }

    let config = RecommenderConfig {
        min_document_frequency: 1,
        ..RecommenderConfig::default()
    };
    if let Ok(recommender) = Recommender::from_catalog(catalog, config) {
        if let Some(first) = recommender.catalog().get(0) {
            let name = first.name.clone();
            let result = recommender.recommend(&name, 5);
            assert!(result.items.len() <= 5);
        }
    }
});
