//! ArticleToolSet - the three lookup tools over the document store.
//!
//! Each tool wraps one gateway call (or one per interest) and applies the
//! deduplication and truncation rules. Store errors propagate untouched.

use std::sync::Arc;

use futures::stream::{self, StreamExt, TryStreamExt};

use crate::domain::catalog::{Article, UserProfile, ARTICLES_COLLECTION, USERS_COLLECTION};
use crate::domain::foundation::UserId;
use crate::domain::recommendation::{merge_unique, PER_TAG_LIMIT, RECENT_LIMIT, SUGGESTION_LIMIT};
use crate::domain::tools::{ToolOutput, ToolRequest};
use crate::ports::{Document, DocumentStore, StoreError};

/// Tag queries allowed in flight at once for one suggestion request.
pub const MAX_CONCURRENT_TAG_QUERIES: usize = 4;

/// Lookup tools backed by a [`DocumentStore`].
#[derive(Clone)]
pub struct ArticleToolSet {
    store: Arc<dyn DocumentStore>,
}

impl ArticleToolSet {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Profile record for `user_id`, unmodified, or `None` if absent.
    pub async fn get_user_profile(
        &self,
        user_id: &UserId,
    ) -> Result<Option<UserProfile>, StoreError> {
        let document = self
            .store
            .fetch_by_id(USERS_COLLECTION, user_id.as_str())
            .await?;

        tracing::debug!(user_id = %user_id, found = document.is_some(), "get_user_profile");
        Ok(document.map(Document::into_profile))
    }

    /// Articles tagged with any of `interests`.
    ///
    /// One tag query per interest, at most [`MAX_CONCURRENT_TAG_QUERIES`] at
    /// a time, merged in interest order; later duplicates are dropped and the
    /// result is capped at [`SUGGESTION_LIMIT`].
    pub async fn suggest_articles(&self, interests: &[String]) -> Result<Vec<Article>, StoreError> {
        if interests.is_empty() {
            return Ok(Vec::new());
        }

        // buffered yields in input order regardless of completion order
        let queries: Vec<_> = interests
            .iter()
            .map(|interest| {
                self.store
                    .search_by_tag(ARTICLES_COLLECTION, interest, PER_TAG_LIMIT)
            })
            .collect();
        let batches: Vec<Vec<Document>> = stream::iter(queries)
            .buffered(MAX_CONCURRENT_TAG_QUERIES)
            .try_collect()
            .await?;

        let articles = merge_unique(
            batches.into_iter().map(into_articles),
            SUGGESTION_LIMIT,
        );

        tracing::debug!(
            interests = interests.len(),
            articles = articles.len(),
            "suggest_articles"
        );
        Ok(articles)
    }

    /// Up to [`RECENT_LIMIT`] articles in store order.
    pub async fn list_recent_articles(&self) -> Result<Vec<Article>, StoreError> {
        let documents = self
            .store
            .fetch_limited(ARTICLES_COLLECTION, RECENT_LIMIT)
            .await?;

        let mut articles = into_articles(documents);
        articles.truncate(RECENT_LIMIT);

        tracing::debug!(articles = articles.len(), "list_recent_articles");
        Ok(articles)
    }

    /// Runs one parsed tool request.
    pub async fn execute(&self, request: ToolRequest) -> Result<ToolOutput, StoreError> {
        match request {
            ToolRequest::GetUserProfile { user_id } => self
                .get_user_profile(&user_id)
                .await
                .map(ToolOutput::Profile),
            ToolRequest::SuggestArticles { interests } => self
                .suggest_articles(&interests)
                .await
                .map(ToolOutput::Articles),
            ToolRequest::ListRecentArticles => self
                .list_recent_articles()
                .await
                .map(ToolOutput::Articles),
        }
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }
}

fn into_articles(documents: Vec<Document>) -> Vec<Article> {
    documents.into_iter().map(Document::into_article).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryDocumentStore, StoreCall, StoreOperation};
    use proptest::prelude::*;
    use serde_json::json;
    use std::collections::HashSet;
    use std::time::Duration;

    fn ids(articles: &[Article]) -> Vec<&str> {
        articles.iter().map(|a| a.id().as_str()).collect()
    }

    fn tool_set(store: InMemoryDocumentStore) -> (Arc<InMemoryDocumentStore>, ArticleToolSet) {
        let store = Arc::new(store);
        let tools = ArticleToolSet::new(store.clone());
        (store, tools)
    }

    #[tokio::test]
    async fn profile_is_returned_unmodified() {
        let (_, tools) = tool_set(InMemoryDocumentStore::new().with_document(
            "users",
            "u1",
            json!({"name": "Ada", "interests": ["space", 7]}),
        ));

        let profile = tools
            .get_user_profile(&UserId::new("u1").unwrap())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(
            serde_json::to_value(&profile).unwrap(),
            json!({"name": "Ada", "interests": ["space", 7]})
        );
    }

    #[tokio::test]
    async fn missing_profile_is_none() {
        let (_, tools) = tool_set(InMemoryDocumentStore::new());
        let profile = tools
            .get_user_profile(&UserId::new("nobody").unwrap())
            .await
            .unwrap();
        assert!(profile.is_none());
    }

    #[tokio::test]
    async fn suggestions_follow_interest_order_without_duplicates() {
        let (store, tools) = tool_set(
            InMemoryDocumentStore::new()
                .with_document("articles", "a1", json!({"tags": ["space", "ai"]}))
                .with_document("articles", "a2", json!({"tags": ["ai"]}))
                .with_document("articles", "a3", json!({"tags": ["space"]})),
        );

        let articles = tools
            .suggest_articles(&["ai".to_string(), "space".to_string()])
            .await
            .unwrap();

        assert_eq!(ids(&articles), vec!["a1", "a2", "a3"]);
        assert_eq!(
            store.calls(),
            vec![
                StoreCall::SearchByTag {
                    collection: "articles".into(),
                    tag: "ai".into(),
                    limit: PER_TAG_LIMIT
                },
                StoreCall::SearchByTag {
                    collection: "articles".into(),
                    tag: "space".into(),
                    limit: PER_TAG_LIMIT
                },
            ]
        );
    }

    #[tokio::test]
    async fn duplicate_interests_are_searched_twice_but_merged_once() {
        let (store, tools) = tool_set(
            InMemoryDocumentStore::new()
                .with_document("articles", "a1", json!({"tags": ["space"]})),
        );

        let articles = tools
            .suggest_articles(&["space".to_string(), "space".to_string()])
            .await
            .unwrap();

        assert_eq!(ids(&articles), vec!["a1"]);
        assert_eq!(store.call_count(StoreOperation::SearchByTag), 2);
    }

    #[tokio::test]
    async fn tag_queries_are_bounded_and_keep_interest_order() {
        let (store, tools) = tool_set(
            InMemoryDocumentStore::new()
                .with_document("articles", "a1", json!({"tags": ["t0"]}))
                .with_document("articles", "a2", json!({"tags": ["t11"]}))
                .with_delay(Duration::from_millis(20)),
        );
        let interests: Vec<String> = (0..12).map(|i| format!("t{}", i)).collect();

        let articles = tools.suggest_articles(&interests).await.unwrap();

        assert_eq!(ids(&articles), vec!["a1", "a2"]);
        assert_eq!(store.call_count(StoreOperation::SearchByTag), 12);
        assert_eq!(store.peak_in_flight(), MAX_CONCURRENT_TAG_QUERIES);
        let tags: Vec<String> = store
            .calls()
            .into_iter()
            .filter_map(|call| match call {
                StoreCall::SearchByTag { tag, .. } => Some(tag),
                _ => None,
            })
            .collect();
        assert_eq!(tags, interests);
    }

    #[tokio::test]
    async fn empty_interests_make_no_store_calls() {
        let (store, tools) = tool_set(InMemoryDocumentStore::new());
        let articles = tools.suggest_articles(&[]).await.unwrap();
        assert!(articles.is_empty());
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn suggestions_are_capped() {
        let mut store = InMemoryDocumentStore::new();
        for i in 0..8 {
            store = store.with_document("articles", &format!("s{}", i), json!({"tags": ["space"]}));
            store = store.with_document("articles", &format!("t{}", i), json!({"tags": ["tech"]}));
        }
        let (_, tools) = tool_set(store);

        let articles = tools
            .suggest_articles(&["space".to_string(), "tech".to_string()])
            .await
            .unwrap();

        assert_eq!(articles.len(), SUGGESTION_LIMIT);
        assert!(articles.iter().all(|a| a.has_tag("space")));
    }

    #[tokio::test]
    async fn recent_articles_are_capped_in_store_order() {
        let mut store = InMemoryDocumentStore::new();
        for i in 0..15 {
            store = store.with_document("articles", &format!("a{:02}", i), json!({}));
        }
        let (store, tools) = tool_set(store);

        let articles = tools.list_recent_articles().await.unwrap();

        assert_eq!(articles.len(), RECENT_LIMIT);
        assert_eq!(articles[0].id().as_str(), "a00");
        assert_eq!(
            store.calls(),
            vec![StoreCall::FetchLimited {
                collection: "articles".into(),
                limit: RECENT_LIMIT
            }]
        );
    }

    #[tokio::test]
    async fn store_errors_propagate_unchanged() {
        let (_, tools) = tool_set(
            InMemoryDocumentStore::new()
                .with_failure(StoreOperation::FetchLimited, StoreError::transport("down")),
        );
        let err = tools.list_recent_articles().await.unwrap_err();
        assert_eq!(err, StoreError::transport("down"));
    }

    #[tokio::test]
    async fn execute_dispatches_by_request() {
        let (_, tools) = tool_set(
            InMemoryDocumentStore::new().with_document("articles", "a1", json!({"tags": ["space"]})),
        );

        let output = tools.execute(ToolRequest::ListRecentArticles).await.unwrap();
        assert!(matches!(output, ToolOutput::Articles(ref a) if a.len() == 1));

        let output = tools
            .execute(ToolRequest::GetUserProfile {
                user_id: UserId::new("u9").unwrap(),
            })
            .await
            .unwrap();
        assert_eq!(output, ToolOutput::Profile(None));
    }

    proptest! {
        #[test]
        fn suggestions_are_unique_and_bounded(
            tag_sets in prop::collection::vec(
                prop::collection::vec(prop::sample::select(vec!["a", "b", "c", "d"]), 0..4),
                0..30,
            ),
            interests in prop::collection::vec(prop::sample::select(vec!["a", "b", "c", "d", "e"]), 0..6),
        ) {
            let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let mut store = InMemoryDocumentStore::new();
            for (i, tags) in tag_sets.iter().enumerate() {
                store = store.with_document("articles", &format!("doc{}", i), json!({"tags": tags}));
            }
            let (_, tools) = tool_set(store);
            let interests: Vec<String> = interests.iter().map(|s| s.to_string()).collect();

            let suggested = runtime.block_on(tools.suggest_articles(&interests)).unwrap();
            let recent = runtime.block_on(tools.list_recent_articles()).unwrap();

            let unique: HashSet<_> = suggested.iter().map(|a| a.id().clone()).collect();
            prop_assert_eq!(unique.len(), suggested.len());
            prop_assert!(suggested.len() <= SUGGESTION_LIMIT);
            prop_assert!(recent.len() <= RECENT_LIMIT);
        }
    }
}
