//! Fuzzy string matching for product names.

mod sequence;


pub use sequence::{ratio, Match, SequenceMatcher};

/// A candidate that cleared the cutoff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloseMatch<'a> {
    /// The matched candidate.
    pub candidate: &'a str,
    /// Similarity ratio in `[cutoff, 1]`.
    pub score: f64,
}

/// Returns up to `n` candidates whose ratio against `word` is at least `cutoff`.
///
/// Results are ordered by score descending; equal scores order by candidate
/// descending. `n == 0` yields nothing.
#[must_use]
pub fn close_matches<'a, I>(word: &str, candidates: I, n: usize, cutoff: f64) -> Vec<CloseMatch<'a>>
where
    I: IntoIterator<Item = &'a str>,
{
    if n == 0 {
        return Vec::new();
    }

    let matcher = SequenceMatcher::new(word);
    let mut hits: Vec<CloseMatch<'a>> = candidates
        .into_iter()
        .filter(|c| matcher.real_quick_ratio(c) >= cutoff && matcher.quick_ratio(c) >= cutoff)
        .filter_map(|candidate| {
            let score = matcher.ratio(candidate);
            (score >= cutoff).then_some(CloseMatch { candidate, score })
        })
        .collect();

    hits.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| b.candidate.cmp(a.candidate))
    });
    hits.truncate(n);
    hits
}
