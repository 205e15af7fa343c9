//! Suggestion limits and merging rules.

use std::collections::HashSet;

use crate::domain::catalog::Article;

/// Maximum articles returned by an interest-based suggestion.
pub const SUGGESTION_LIMIT: usize = 5;

/// Maximum articles fetched per interest tag.
pub const PER_TAG_LIMIT: usize = 5;

/// Maximum articles returned by the recent-articles fallback.
pub const RECENT_LIMIT: usize = 10;

/// Which tool produced the articles of a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArticleSource {
    /// Tag search over the user's interests.
    Interests,
    /// Recent-articles fallback.
    Recent,
}

/// Concatenates per-interest batches in order, keeps the first occurrence of
/// each article id and truncates to `cap`.
pub fn merge_unique<I>(batches: I, cap: usize) -> Vec<Article>
where
    I: IntoIterator<Item = Vec<Article>>,
{
    let mut seen = HashSet::new();
    batches
        .into_iter()
        .flatten()
        .filter(|article| seen.insert(article.id().clone()))
        .take(cap)
        .collect()
}
