//! Fuzz target for tokenization and n-gram analysis.
//!
//! # Running
//!
//! ```bash
//! cd fuzz
//! cargo +nightly fuzz run fuzz_tokenizer
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use vitrine_core::text::tokenizer::{analyze, tokenize};

fuzz_target!(|text: &str| {
    for token in tokenize(text) {
        assert!(token.chars().count() >= 2);
        assert!(token.chars().all(|c| c.is_alphanumeric() || c == '_'));
    }

    let unigrams = analyze(text, (1, 1), false);
    let bigrams = analyze(text, (2, 2), false);
    assert!(bigrams.len() <= unigrams.len());
    assert!(bigrams.iter().all(|gram| gram.split(' ').count() == 2));
    let _ = analyze(text, (1, 3), true);
});
