//! Word tokenization and n-gram expansion.

use super::stopwords::is_stop_word;

/// Splits lowercase text into word tokens.
///
/// A token is a maximal run of word characters (alphanumeric or `_`) that is
/// at least two characters long. Everything else separates tokens.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !is_word_char(c))
        .filter(|token| token.chars().nth(1).is_some())
}

#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Produces the analyzed terms of a document.
///
/// Text is lowercased and tokenized, stop words are removed when
/// `remove_stop_words` is set, then n-grams for every `n` in
/// `min_n..=max_n` are emitted, joined by a single space. For each `n`,
/// n-grams are emitted in document order.
#[must_use]
pub fn analyze(text: &str, (min_n, max_n): (usize, usize), remove_stop_words: bool) -> Vec<String> {
    let lowered = text.to_lowercase();
    let tokens: Vec<&str> = tokenize(&lowered)
        .filter(|token| !(remove_stop_words && is_stop_word(token)))
        .collect();

    let min_n = min_n.max(1);
    let mut terms = Vec::new();
    for n in min_n..=max_n {
        if n > tokens.len() {
            break;
        }
        terms.extend(tokens.windows(n).map(|window| window.join(" ")));
    }
    terms
}
