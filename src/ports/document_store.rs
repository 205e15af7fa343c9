//! Document Store Port - read-only gateway to the collection store.
//!
//! This port abstracts the three queries the tools need, keeping the
//! application layer independent of the store's wire protocol.
//!
//! # Contract
//!
//! - `fetch_by_id` returns `Ok(None)` for a missing document; absence is
//!   never an error
//! - `fetch_limited` returns at most `limit` documents in store order
//! - `search_by_tag` returns at most `limit` documents whose `tags` array
//!   contains the tag
//! - Implementations neither retry nor cache; every failure surfaces as a
//!   [`StoreError`]
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use bixso_orchestrator::adapters::memory::InMemoryDocumentStore;
//! use bixso_orchestrator::ports::DocumentStore;
//!
//! let store: Arc<dyn DocumentStore> = Arc::new(InMemoryDocumentStore::new());
//! let profile = store.fetch_by_id("users", "u1").await?;
//! ```

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::catalog::{Article, UserProfile};
use crate::domain::foundation::{DomainError, ErrorCode};

/// A stored document: its id plus decoded fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Map<String, Value>,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    pub fn into_article(self) -> Article {
        Article::new(self.id, self.fields)
    }

    pub fn into_profile(self) -> UserProfile {
        UserProfile::new(self.fields)
    }
}

/// Port for read-only document store access.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch one document by id.
    async fn fetch_by_id(&self, collection: &str, id: &str)
        -> Result<Option<Document>, StoreError>;

    /// Fetch up to `limit` documents in the store's default order.
    async fn fetch_limited(&self, collection: &str, limit: usize)
        -> Result<Vec<Document>, StoreError>;

    /// Fetch up to `limit` documents whose `tags` array contains `tag`.
    async fn search_by_tag(
        &self,
        collection: &str,
        tag: &str,
        limit: usize,
    ) -> Result<Vec<Document>, StoreError>;

    /// Short backend name for logs.
    fn backend_name(&self) -> &'static str;
}

/// Failures reaching or talking to the document store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Network-level failure or unexpected status
    #[error("Document store unreachable: {0}")]
    Transport(String),

    /// Credentials missing, rejected or token exchange failed
    #[error("Document store authentication failed: {0}")]
    Authentication(String),

    /// The call exceeded its time budget
    #[error("Document store request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Response could not be decoded
    #[error("Invalid document store response: {0}")]
    Decode(String),
}

impl StoreError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication(message.into())
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        let code = match &err {
            StoreError::Transport(_) => ErrorCode::StoreUnavailable,
            StoreError::Authentication(_) => ErrorCode::StoreAuthenticationFailed,
            StoreError::Timeout { .. } => ErrorCode::Timeout,
            StoreError::Decode(_) => ErrorCode::StoreResponseInvalid,
        };
        DomainError::new(code, err.to_string())
    }
}
