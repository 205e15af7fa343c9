//! In-memory document store for local development and testing.
//!
//! Provides a configurable implementation of the `DocumentStore` port so the
//! service and its tests can run without a Firestore project.
//!
//! # Features
//!
//! - Seeding from a JSON file (`{"users": ..., "articles": ...}`)
//! - Call tracking for verification
//! - Failure injection per operation
//! - Simulated latency and peak concurrency for timeout and fan-out testing
//!
//! # Example
//!
//! ```ignore
//! let store = InMemoryDocumentStore::new()
//!     .with_document("users", "u1", json!({"interests": ["space"]}))
//!     .with_document("articles", "a1", json!({"tags": ["space"]}));
//!
//! let docs = store.search_by_tag("articles", "space", 5).await?;
//! assert_eq!(store.calls().len(), 1);
//! ```

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use thiserror::Error;
use tokio::time::sleep;

use crate::domain::catalog::TAGS_FIELD;
use crate::ports::{Document, DocumentStore, StoreError};

/// A recorded call against the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    FetchById { collection: String, id: String },
    FetchLimited { collection: String, limit: usize },
    SearchByTag { collection: String, tag: String, limit: usize },
}

impl StoreCall {
    pub fn operation(&self) -> StoreOperation {
        match self {
            StoreCall::FetchById { .. } => StoreOperation::FetchById,
            StoreCall::FetchLimited { .. } => StoreOperation::FetchLimited,
            StoreCall::SearchByTag { .. } => StoreOperation::SearchByTag,
        }
    }
}

/// The three gateway operations, for failure injection and call filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    FetchById,
    FetchLimited,
    SearchByTag,
}

/// Errors loading a seed file.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse seed file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid seed data: {0}")]
    Invalid(String),
}

/// In-memory `DocumentStore`.
///
/// Collections keep insertion order, which stands in for the store's native
/// ordering.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    collections: Mutex<HashMap<String, Vec<Document>>>,
    failures: Mutex<HashMap<StoreOperation, StoreError>>,
    calls: Mutex<Vec<StoreCall>>,
    delay: Duration,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads collections from a JSON seed file.
    ///
    /// Each top-level key is a collection. A collection is either an object
    /// keyed by document id, or an array of objects carrying an `id` field
    /// (arrays preserve order).
    pub async fn from_seed_file(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let raw = tokio::fs::read_to_string(path.as_ref()).await?;
        let seed: Value = serde_json::from_str(&raw)?;
        Self::from_seed(seed)
    }

    /// Builds a store from already-parsed seed JSON.
    pub fn from_seed(seed: Value) -> Result<Self, SeedError> {
        let Value::Object(collections) = seed else {
            return Err(SeedError::Invalid("top level must be an object".into()));
        };

        let store = Self::new();
        for (collection, documents) in collections {
            match documents {
                Value::Object(by_id) => {
                    for (id, fields) in by_id {
                        store.insert(&collection, id, fields_of(fields, &collection)?);
                    }
                }
                Value::Array(list) => {
                    for entry in list {
                        let mut fields = fields_of(entry, &collection)?;
                        let id = match fields.remove("id") {
                            Some(Value::String(id)) if !id.is_empty() => id,
                            _ => {
                                return Err(SeedError::Invalid(format!(
                                    "document in '{}' is missing a string id",
                                    collection
                                )))
                            }
                        };
                        store.insert(&collection, id, fields);
                    }
                }
                _ => {
                    return Err(SeedError::Invalid(format!(
                        "collection '{}' must be an object or array",
                        collection
                    )))
                }
            }
        }
        Ok(store)
    }

    /// Adds (or replaces) a document; builder form.
    pub fn with_document(self, collection: &str, id: &str, fields: Value) -> Self {
        let fields = match fields {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        self.insert(collection, id, fields);
        self
    }

    /// Makes every call of `operation` fail with `error`.
    pub fn with_failure(self, operation: StoreOperation, error: StoreError) -> Self {
        lock(&self.failures).insert(operation, error);
        self
    }

    /// Sets simulated latency per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Adds (or replaces in place) a document.
    pub fn insert(&self, collection: &str, id: impl Into<String>, fields: Map<String, Value>) {
        let document = Document::new(id, fields);
        let mut collections = lock(&self.collections);
        let docs = collections.entry(collection.to_string()).or_default();
        match docs.iter_mut().find(|d| d.id == document.id) {
            Some(existing) => *existing = document,
            None => docs.push(document),
        }
    }

    /// Returns all recorded calls.
    pub fn calls(&self) -> Vec<StoreCall> {
        lock(&self.calls).clone()
    }

    /// Number of recorded calls of one operation.
    pub fn call_count(&self, operation: StoreOperation) -> usize {
        lock(&self.calls)
            .iter()
            .filter(|c| c.operation() == operation)
            .count()
    }

    /// Most calls that were ever in progress at the same time.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    async fn begin(&self, call: StoreCall) -> Result<(), StoreError> {
        let operation = call.operation();
        lock(&self.calls).push(call);

        let _in_flight = InFlight::enter(&self.in_flight, &self.peak_in_flight);
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match lock(&self.failures).get(&operation) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn snapshot(&self, collection: &str) -> Vec<Document> {
        lock(&self.collections)
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }
}

/// Counts a call as in progress until dropped, including on cancellation.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(current: &'a AtomicUsize, peak: &AtomicUsize) -> Self {
        let now = current.fetch_add(1, Ordering::SeqCst) + 1;
        peak.fetch_max(now, Ordering::SeqCst);
        Self(current)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

fn fields_of(value: Value, collection: &str) -> Result<Map<String, Value>, SeedError> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(SeedError::Invalid(format!(
            "documents in '{}' must be objects",
            collection
        ))),
    }
}

fn has_tag(document: &Document, tag: &str) -> bool {
    match document.fields.get(TAGS_FIELD) {
        Some(Value::Array(tags)) => tags.iter().any(|t| t.as_str() == Some(tag)),
        _ => false,
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn fetch_by_id(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, StoreError> {
        self.begin(StoreCall::FetchById {
            collection: collection.to_string(),
            id: id.to_string(),
        })
        .await?;

        Ok(self.snapshot(collection).into_iter().find(|d| d.id == id))
    }

    async fn fetch_limited(
        &self,
        collection: &str,
        limit: usize,
    ) -> Result<Vec<Document>, StoreError> {
        self.begin(StoreCall::FetchLimited {
            collection: collection.to_string(),
            limit,
        })
        .await?;

        Ok(self.snapshot(collection).into_iter().take(limit).collect())
    }

    async fn search_by_tag(
        &self,
        collection: &str,
        tag: &str,
        limit: usize,
    ) -> Result<Vec<Document>, StoreError> {
        self.begin(StoreCall::SearchByTag {
            collection: collection.to_string(),
            tag: tag.to_string(),
            limit,
        })
        .await?;

        Ok(self
            .snapshot(collection)
            .into_iter()
            .filter(|d| has_tag(d, tag))
            .take(limit)
            .collect())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_store() -> InMemoryDocumentStore {
        InMemoryDocumentStore::new()
            .with_document("users", "u1", json!({"interests": ["space"]}))
            .with_document("articles", "a1", json!({"tags": ["space"]}))
            .with_document("articles", "a2", json!({"tags": ["ai", "space"]}))
            .with_document("articles", "a3", json!({"tags": ["ai"]}))
    }

    #[tokio::test]
    async fn fetch_by_id_returns_none_when_missing() {
        let store = sample_store();
        assert!(store.fetch_by_id("users", "u1").await.unwrap().is_some());
        assert!(store.fetch_by_id("users", "nobody").await.unwrap().is_none());
        assert!(store.fetch_by_id("empty", "x").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn fetch_limited_truncates_in_insertion_order() {
        let store = sample_store();
        let docs = store.fetch_limited("articles", 2).await.unwrap();
        let ids: Vec<_> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "a2"]);
    }

    #[tokio::test]
    async fn search_by_tag_filters_on_tags_array() {
        let store = sample_store();
        let docs = store.search_by_tag("articles", "ai", 5).await.unwrap();
        let ids: Vec<_> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["a2", "a3"]);

        let limited = store.search_by_tag("articles", "space", 1).await.unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[tokio::test]
    async fn records_calls() {
        let store = sample_store();
        store.fetch_by_id("users", "u1").await.unwrap();
        store.search_by_tag("articles", "ai", 5).await.unwrap();

        assert_eq!(
            store.calls(),
            vec![
                StoreCall::FetchById {
                    collection: "users".into(),
                    id: "u1".into()
                },
                StoreCall::SearchByTag {
                    collection: "articles".into(),
                    tag: "ai".into(),
                    limit: 5
                },
            ]
        );
        assert_eq!(store.call_count(StoreOperation::FetchLimited), 0);
        assert_eq!(store.peak_in_flight(), 1);
    }

    #[tokio::test]
    async fn injected_failure_is_returned_and_recorded() {
        let store = sample_store()
            .with_failure(StoreOperation::FetchById, StoreError::transport("boom"));

        let err = store.fetch_by_id("users", "u1").await.unwrap_err();
        assert_eq!(err, StoreError::transport("boom"));
        assert_eq!(store.call_count(StoreOperation::FetchById), 1);

        // Other operations are unaffected.
        assert!(store.fetch_limited("articles", 10).await.is_ok());
    }

    #[test]
    fn insert_replaces_existing_document_in_place() {
        let store = sample_store();
        store.insert("articles", "a1", Map::new());
        assert_eq!(store.snapshot("articles").len(), 3);
    }

    #[test]
    fn seed_accepts_object_and_array_collections() {
        let store = InMemoryDocumentStore::from_seed(json!({
            "users": {"u1": {"interests": ["space"]}},
            "articles": [
                {"id": "z", "tags": ["space"]},
                {"id": "a", "tags": ["space"]}
            ]
        }))
        .unwrap();
        assert_eq!(store.snapshot("users").len(), 1);
        assert_eq!(store.snapshot("articles").len(), 2);
    }

    #[tokio::test]
    async fn seed_array_preserves_order() {
        let store = InMemoryDocumentStore::from_seed(json!({
            "articles": [{"id": "z"}, {"id": "a"}]
        }))
        .unwrap();
        let docs = store.fetch_limited("articles", 10).await.unwrap();
        assert_eq!(docs[0].id, "z");
        assert!(docs[0].fields.get("id").is_none());
    }

    #[test]
    fn seed_rejects_malformed_data() {
        assert!(InMemoryDocumentStore::from_seed(json!([])).is_err());
        assert!(InMemoryDocumentStore::from_seed(json!({"articles": 3})).is_err());
        assert!(InMemoryDocumentStore::from_seed(json!({"articles": [{"title": "x"}]})).is_err());
        assert!(InMemoryDocumentStore::from_seed(json!({"users": {"u1": 5}})).is_err());
    }

    #[tokio::test]
    async fn seed_file_loads_from_disk() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"users": {{"u1": {{"interests": ["space"]}}}}, "articles": []}}"#
        )
        .unwrap();

        let store = InMemoryDocumentStore::from_seed_file(file.path()).await.unwrap();
        assert_eq!(store.snapshot("users").len(), 1);
    }

    #[tokio::test]
    async fn seed_file_missing_is_io_error() {
        let err = InMemoryDocumentStore::from_seed_file("/nonexistent/seed.json")
            .await
            .unwrap_err();
        assert!(matches!(err, SeedError::Io(_)));
    }
}
