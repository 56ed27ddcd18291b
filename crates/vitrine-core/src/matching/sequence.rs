//! Ratcliff/Obershelp sequence similarity.
//!
//! The ratio of two sequences `a` and `b` is `2 * M / (|a| + |b|)`, where `M`
//! is the total size of the matching blocks found by recursively taking the
//! longest common contiguous block and repeating on both sides of it.
//!
//! Sequences are compared per Unicode scalar value. When `b` has at least
//! 200 elements, elements occurring in more than 1% of `b` (plus one) are
//! treated as "popular" and cannot start a match, though matches may still
//! extend across them.

use rustc_hash::FxHashMap;

/// Length from which the popular-element heuristic applies.
const AUTOJUNK_MIN_LEN: usize = 200;

/// Compares sequences against a fixed second sequence `b`.
///
/// Preprocessing of `b` is done once, so matching one query against many
/// candidates stays cheap.
#[derive(Debug, Clone)]
pub struct SequenceMatcher {
    b: Vec<char>,
    b2j: FxHashMap<char, Vec<usize>>,
    b_counts: FxHashMap<char, usize>,
}

/// A matching block: `a[a_start..a_start + size] == b[b_start..b_start + size]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    /// Start in `a`.
    pub a_start: usize,
    /// Start in `b`.
    pub b_start: usize,
    /// Block length.
    pub size: usize,
}

impl SequenceMatcher {
    /// Prepares a matcher for the second sequence `b`.
    #[must_use]
    pub fn new(b: &str) -> Self {
        let b: Vec<char> = b.chars().collect();

        let mut b2j: FxHashMap<char, Vec<usize>> = FxHashMap::default();
        let mut b_counts: FxHashMap<char, usize> = FxHashMap::default();
        for (j, &c) in b.iter().enumerate() {
            b2j.entry(c).or_default().push(j);
            *b_counts.entry(c).or_insert(0) += 1;
        }

        let n = b.len();
        if n >= AUTOJUNK_MIN_LEN {
            let threshold = n / 100 + 1;
            b2j.retain(|_, positions| positions.len() <= threshold);
        }

        Self { b, b2j, b_counts }
    }

    /// Length of `b`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.b.len()
    }

    /// True if `b` is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.b.is_empty()
    }

    /// Longest matching block of `a[alo..ahi]` and `b[blo..bhi]`.
    ///
    /// Among equally long blocks the one starting earliest in `a`, then in
    /// `b`, wins. Size 0 means no match.
    fn find_longest_match(
        &self,
        a: &[char],
        alo: usize,
        ahi: usize,
        blo: usize,
        bhi: usize,
    ) -> Match {
        let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);

        // j2len[j] = length of the match ending at a[i - 1], b[j]
        let mut j2len: FxHashMap<usize, usize> = FxHashMap::default();
        for (i, c) in a.iter().enumerate().take(ahi).skip(alo) {
            let mut next: FxHashMap<usize, usize> = FxHashMap::default();
            if let Some(positions) = self.b2j.get(c) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|p| j2len.get(&p))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next.insert(j, k);
                    if k > best_size {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_size = k;
                    }
                }
            }
            j2len = next;
        }

        // Extend across popular elements, which never start a match
        while best_i > alo && best_j > blo && a[best_i - 1] == self.b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_size += 1;
        }
        while best_i + best_size < ahi
            && best_j + best_size < bhi
            && a[best_i + best_size] == self.b[best_j + best_size]
        {
            best_size += 1;
        }

        Match {
            a_start: best_i,
            b_start: best_j,
            size: best_size,
        }
    }

    /// All matching blocks of `a` against `b`, ordered by position.
    #[must_use]
    pub fn matching_blocks(&self, a: &str) -> Vec<Match> {
        let a: Vec<char> = a.chars().collect();
        let mut blocks = Vec::new();
        let mut queue = vec![(0, a.len(), 0, self.b.len())];
        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let m = self.find_longest_match(&a, alo, ahi, blo, bhi);
            if m.size == 0 {
                continue;
            }
            if alo < m.a_start && blo < m.b_start {
                queue.push((alo, m.a_start, blo, m.b_start));
            }
            if m.a_start + m.size < ahi && m.b_start + m.size < bhi {
                queue.push((m.a_start + m.size, ahi, m.b_start + m.size, bhi));
            }
            blocks.push(m);
        }
        blocks.sort_unstable_by_key(|m| (m.a_start, m.b_start));
        blocks
    }

    /// Similarity in `[0, 1]`. Two empty sequences have ratio 1.
    #[must_use]
    pub fn ratio(&self, a: &str) -> f64 {
        let matches: usize = self.matching_blocks(a).iter().map(|m| m.size).sum();
        ratio_of(matches, a.chars().count() + self.b.len())
    }

    /// Upper bound on [`ratio`](Self::ratio) from shared element counts.
    #[must_use]
    pub fn quick_ratio(&self, a: &str) -> f64 {
        let mut available = self.b_counts.clone();
        let mut matches = 0;
        let mut a_len = 0;
        for c in a.chars() {
            a_len += 1;
            if let Some(left) = available.get_mut(&c) {
                if *left > 0 {
                    *left -= 1;
                    matches += 1;
                }
            }
        }
        ratio_of(matches, a_len + self.b.len())
    }

    /// Upper bound on [`quick_ratio`](Self::quick_ratio) from lengths alone.
    #[must_use]
    pub fn real_quick_ratio(&self, a: &str) -> f64 {
        let la = a.chars().count();
        let lb = self.b.len();
        ratio_of(la.min(lb), la + lb)
    }
}

#[allow(clippy::cast_precision_loss)] // Reason: string lengths are far below 2^52
fn ratio_of(matches: usize, length: usize) -> f64 {
    if length == 0 {
        1.0
    } else {
        2.0 * matches as f64 / length as f64
    }
}

/// Convenience ratio of two strings.
#[must_use]
pub fn ratio(a: &str, b: &str) -> f64 {
    SequenceMatcher::new(b).ratio(a)
}
