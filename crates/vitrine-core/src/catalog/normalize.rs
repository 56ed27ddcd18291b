//! Text normalization and the popularity prior.

/// Lowercased, whitespace-trimmed name used as the lookup key.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase().trim().to_string()
}

/// Lowercases a brand and replaces everything outside `[a-z0-9 ]` with a space.
///
/// Lowercasing runs first on purpose: stripping first would blank every
/// uppercase letter, turning `"NIKE"` into four spaces.
#[must_use]
pub fn normalize_brand(brand: &str) -> String {
    brand
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == ' ' {
                c
            } else {
                ' '
            }
        })
        .collect()
}

/// Builds the vectorizer input for one product.
///
/// Fields are joined with single spaces in a fixed order: name, brand,
/// category, tags, description.
#[must_use]
pub fn combined_text(
    name: &str,
    brand: &str,
    category: &str,
    tags: &str,
    description: &str,
) -> String {
    [
        name.to_lowercase(),
        normalize_brand(brand),
        category.to_lowercase(),
        tags.to_lowercase(),
        description.to_lowercase(),
    ]
    .join(" ")
}

/// Computes per-row popularity from cleaned ratings and review counts.
///
/// `popularity = (rating / max_rating + ln_1p(reviews) / ln_1p(max_reviews)) / 2`.
/// A component whose catalog-wide maximum is 0 contributes 0 to every row, so
/// the result is always finite and within `[0, 1]`.
///
/// Both slices must have the same length and contain finite, non-negative values.
#[must_use]
pub fn popularity_scores(ratings: &[f64], review_counts: &[f64]) -> Vec<f64> {
    debug_assert_eq!(ratings.len(), review_counts.len());

    let max_rating = ratings.iter().copied().fold(0.0_f64, f64::max);
    let max_reviews = review_counts.iter().copied().fold(0.0_f64, f64::max);
    let log_max_reviews = max_reviews.ln_1p();

    ratings
        .iter()
        .zip(review_counts)
        .map(|(&rating, &reviews)| {
            let rating_component = if max_rating > 0.0 {
                rating / max_rating
            } else {
                0.0
            };
            let review_component = if max_reviews > 0.0 {
                reviews.ln_1p() / log_max_reviews
            } else {
                0.0
            };
            ((rating_component + review_component) / 2.0).clamp(0.0, 1.0)
        })
        .collect()
}
