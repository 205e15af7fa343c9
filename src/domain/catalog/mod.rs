//! Catalog module - the read-only records served by the document store.
//!
//! - `UserProfile` - preferences keyed by user id (`users` collection)
//! - `Article` - recommendable content (`articles` collection)

mod article;
mod profile;

pub use article::{Article, TAGS_FIELD};
pub use profile::{UserProfile, INTERESTS_FIELD};

/// Collection holding user profiles.
pub const USERS_COLLECTION: &str = "users";

/// Collection holding articles.
pub const ARTICLES_COLLECTION: &str = "articles";
