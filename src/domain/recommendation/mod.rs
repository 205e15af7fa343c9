//! Recommendation module - pure rules of the decision procedure.
//!
//! The orchestrator in the application layer sequences the tool calls;
//! this module owns the limits, the merge rule, the fallback test and the
//! reply template.

mod reply;
mod suggestions;

pub use reply::{compose_reply, ReplyContext};
pub use suggestions::{
    merge_unique, ArticleSource, PER_TAG_LIMIT, RECENT_LIMIT, SUGGESTION_LIMIT,
};

use crate::domain::catalog::UserProfile;

/// Interests to search with, or `None` when the policy goes straight to the
/// recent-articles fallback (absent profile or no string interests).
pub fn interests_to_search(profile: Option<&UserProfile>) -> Option<Vec<String>> {
    profile
        .map(UserProfile::interests)
        .filter(|interests| !interests.is_empty())
}
