//! Fuzz target for the gestalt similarity ratio.
//!
//! Looks for:
//! - Panics on arbitrary Unicode input
//! - Ratios outside `[0, 1]`
//! - Pre-filters that fall below the exact ratio
//!
//! # Running
//!
//! ```bash
//! cd fuzz
//! cargo +nightly fuzz run fuzz_sequence_ratio
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use vitrine_core::matching::{close_matches, SequenceMatcher};

#[derive(Arbitrary, Debug)]
struct RatioInput {
    word: String,
    candidates: Vec<String>,
    cutoff: u8,
}

fuzz_target!(|input: RatioInput| {
    // Long inputs make the quadratic matcher dominate the run
    if input.word.len() > 512 || input.candidates.len() > 64 {
        return;
    }

    let matcher = SequenceMatcher::new(&input.word);
    for candidate in input.candidates.iter().filter(|c| c.len() <= 512) {
        let ratio = matcher.ratio(candidate);
        assert!((0.0..=1.0).contains(&ratio));
        assert!(matcher.quick_ratio(candidate) >= ratio);
        assert!(matcher.real_quick_ratio(candidate) >= matcher.quick_ratio(candidate));
    }

    let cutoff = f64::from(input.cutoff) / 255.0;
    let hits = close_matches(
        &input.word,
        input.candidates.iter().map(String::as_str),
        5,
        cutoff,
    );
    assert!(hits.len() <= 5);
    assert!(hits.iter().all(|hit| hit.score >= cutoff));
});
