//! TF-IDF vectorizer.
//!
//! Fitting is deterministic: the vocabulary is ordered alphabetically, and
//! when the vocabulary is capped, terms with equal corpus counts are kept in
//! alphabetical order.
//!
//! Weights follow the smoothed formulation:
//!
//! - `idf(t) = ln((1 + n_docs) / (1 + df(t))) + 1`
//! - `w(t, d) = count(t, d) * idf(t)`, then each row is L2-normalized

use std::collections::BTreeMap;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::sparse::SparseVector;
use super::tokenizer::analyze;
use crate::config::RecommenderConfig;
use crate::error::{Error, Result};

/// Vectorizer settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TfidfVectorizer {
    ngram_range: (usize, usize),
    max_features: usize,
    min_df: usize,
    stop_words: bool,
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self {
            ngram_range: (1, 2),
            max_features: 20_000,
            min_df: 2,
            stop_words: true,
        }
    }
}

impl TfidfVectorizer {
    /// Creates a vectorizer with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes n-gram range, vocabulary cap and `min_df` from the config.
    /// English stop words are always removed.
    #[must_use]
    pub fn from_config(config: &RecommenderConfig) -> Self {
        Self {
            ngram_range: config.ngram_range,
            max_features: config.max_vocabulary_size,
            min_df: config.min_document_frequency,
            stop_words: true,
        }
    }

    /// Sets the inclusive n-gram range.
    #[must_use]
    pub fn with_ngram_range(mut self, min_n: usize, max_n: usize) -> Self {
        self.ngram_range = (min_n.max(1), max_n.max(1));
        self
    }

    /// Caps the vocabulary size.
    #[must_use]
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features;
        self
    }

    /// Sets the minimum document frequency.
    #[must_use]
    pub fn with_min_df(mut self, min_df: usize) -> Self {
        self.min_df = min_df;
        self
    }

    /// Enables or disables English stop word removal.
    #[must_use]
    pub fn with_stop_words(mut self, enabled: bool) -> Self {
        self.stop_words = enabled;
        self
    }

    fn analyze(&self, text: &str) -> Vec<String> {
        analyze(text, self.ngram_range, self.stop_words)
    }

    fn count_terms(&self, text: &str) -> FxHashMap<String, u32> {
        let mut counts = FxHashMap::default();
        for term in self.analyze(text) {
            *counts.entry(term).or_insert(0) += 1;
        }
        counts
    }

    /// Learns the vocabulary and IDF weights, and vectorizes every document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Vectorization`] when the corpus is empty, has fewer
    /// documents than `min_df`, yields no terms at all, or has no term left
    /// after pruning.
    pub fn fit<S: AsRef<str>>(&self, documents: &[S]) -> Result<VectorSpace> {
        if documents.is_empty() {
            return Err(Error::Vectorization(
                "cannot fit on an empty corpus".to_string(),
            ));
        }
        if self.max_features == 0 {
            return Err(Error::Vectorization(
                "max_features must be at least 1".to_string(),
            ));
        }

        let doc_counts: Vec<FxHashMap<String, u32>> = documents
            .iter()
            .map(|doc| self.count_terms(doc.as_ref()))
            .collect();

        let mut stats: FxHashMap<&str, TermStats> = FxHashMap::default();
        for counts in &doc_counts {
            for (term, &count) in counts {
                let entry = stats.entry(term.as_str()).or_default();
                entry.df += 1;
                entry.total += u64::from(count);
            }
        }
        if stats.is_empty() {
            return Err(Error::Vectorization(
                "empty vocabulary; the documents may only contain stop words".to_string(),
            ));
        }

        let n_docs = documents.len();
        if n_docs < self.min_df {
            return Err(Error::Vectorization(format!(
                "min_df = {} exceeds the number of documents ({n_docs})",
                self.min_df
            )));
        }

        let mut kept: BTreeMap<&str, TermStats> = stats
            .into_iter()
            .filter(|(_, s)| s.df >= self.min_df)
            .collect();
        if kept.is_empty() {
            return Err(Error::Vectorization(
                "after pruning, no terms remain; try a lower min_df".to_string(),
            ));
        }

        if kept.len() > self.max_features {
            let mut ranked: Vec<(&str, TermStats)> = kept.into_iter().collect();
            // Stable sort over alphabetical input keeps ties alphabetical
            ranked.sort_by(|a, b| b.1.total.cmp(&a.1.total));
            ranked.truncate(self.max_features);
            kept = ranked.into_iter().collect();
        }

        #[allow(clippy::cast_precision_loss)] // Reason: document counts are far below 2^52
        let n = n_docs as f64;
        let mut features = Vec::with_capacity(kept.len());
        let mut idf = Vec::with_capacity(kept.len());
        for (term, s) in &kept {
            features.push((*term).to_string());
            // Reason: df <= n_docs; idf is in [1, ln(n + 1) + 1]
            #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
            let weight = (((1.0 + n) / (1.0 + s.df as f64)).ln() + 1.0) as f32;
            idf.push(weight);
        }
        let vocabulary: FxHashMap<String, u32> = features
            .iter()
            .enumerate()
            .map(|(col, term)| {
                #[allow(clippy::cast_possible_truncation)] // Reason: vocabulary is capped well below u32::MAX
                let col = col as u32;
                (term.clone(), col)
            })
            .collect();

        let mut space = VectorSpace {
            vectorizer: *self,
            features,
            vocabulary,
            idf,
            vectors: Arc::from(Vec::new()),
        };
        let vectors: Vec<SparseVector> = doc_counts.iter().map(|c| space.weigh(c)).collect();
        space.vectors = vectors.into();
        Ok(space)
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct TermStats {
    df: usize,
    total: u64,
}

/// Fitted vocabulary, IDF weights and the per-document vectors.
///
/// Immutable after [`TfidfVectorizer::fit`].
#[derive(Debug, Clone)]
pub struct VectorSpace {
    vectorizer: TfidfVectorizer,
    features: Vec<String>,
    vocabulary: FxHashMap<String, u32>,
    idf: Vec<f32>,
    vectors: Arc<[SparseVector]>,
}

impl VectorSpace {
    fn weigh(&self, counts: &FxHashMap<String, u32>) -> SparseVector {
        let pairs = counts
            .iter()
            .filter_map(|(term, &count)| {
                self.vocabulary.get(term).map(|&col| {
                    #[allow(clippy::cast_precision_loss)] // Reason: per-document counts are small
                    let tf = count as f32;
                    (col, tf * self.idf[col as usize])
                })
            })
            .collect();
        let mut vector = SparseVector::from_pairs(pairs);
        vector.normalize();
        vector
    }

    /// Vectorizes new text against the fitted vocabulary.
    #[must_use]
    pub fn transform(&self, text: &str) -> SparseVector {
        self.weigh(&self.vectorizer.count_terms(text))
    }

    /// Vector of fitted document `row`.
    #[must_use]
    pub fn vector(&self, row: usize) -> Option<&SparseVector> {
        self.vectors.get(row)
    }

    /// All fitted document vectors in row order.
    #[must_use]
    pub fn vectors(&self) -> &[SparseVector] {
        &self.vectors
    }

    /// Shared handle to the document vectors, for building an index.
    #[must_use]
    pub fn shared_vectors(&self) -> Arc<[SparseVector]> {
        Arc::clone(&self.vectors)
    }

    /// Feature names, in column order (alphabetical).
    #[must_use]
    pub fn features(&self) -> &[String] {
        &self.features
    }

    /// Column of `term`, if it is in the vocabulary.
    #[must_use]
    pub fn column(&self, term: &str) -> Option<u32> {
        self.vocabulary.get(term).copied()
    }

    /// IDF weight of `term`.
    #[must_use]
    pub fn idf(&self, term: &str) -> Option<f32> {
        self.column(term).map(|col| self.idf[col as usize])
    }

    /// Number of features.
    #[must_use]
    pub fn vocabulary_size(&self) -> usize {
        self.features.len()
    }

    /// Total stored entries across all document vectors.
    #[must_use]
    pub fn non_zero_entries(&self) -> usize {
        self.vectors.iter().map(SparseVector::nnz).sum()
    }
}
