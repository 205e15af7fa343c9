//! Firestore REST implementation of the `DocumentStore` port.
//!
//! Uses the v1 REST API directly through `reqwest`:
//!
//! - get: `GET {root}/{collection}/{id}` (404 means absent)
//! - list: `GET {root}/{collection}?pageSize={limit}`
//! - search: `POST {root}:runQuery` with an `ARRAY_CONTAINS` filter on `tags`
//!
//! where `{root}` is `{base}/projects/{project}/databases/{database}/documents`.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::{json, Value};

use super::credentials::{CredentialSource, TokenProvider};
use super::value::{string_value, RestDocument};
use crate::domain::catalog::TAGS_FIELD;
use crate::ports::{Document, DocumentStore, StoreError};

/// Connection settings for [`FirestoreStore`].
#[derive(Debug, Clone)]
pub struct FirestoreConfig {
    /// REST base, e.g. `https://firestore.googleapis.com/v1`
    pub base_url: String,

    /// Overrides the project carried by the credentials.
    pub project_id: Option<String>,

    pub database_id: String,

    /// Bound on every outbound call.
    pub timeout: Duration,
}

impl FirestoreConfig {
    pub fn new(base_url: impl Into<String>, database_id: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            project_id: None,
            database_id: database_id.into(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    documents: Vec<RestDocument>,
}

#[derive(Debug, Deserialize)]
struct RunQueryItem {
    #[serde(default)]
    document: Option<RestDocument>,
}

/// Firestore-backed document store.
pub struct FirestoreStore {
    http_client: reqwest::Client,
    tokens: TokenProvider,
    documents_root: Url,
    timeout_secs: u64,
}

impl FirestoreStore {
    /// Resolves credentials and the project, then builds the store.
    ///
    /// Project precedence: explicit config, then the key file or the
    /// metadata server. Against the emulator an unset project falls back to
    /// `EMULATOR_PROJECT_ID`.
    pub async fn connect(
        config: FirestoreConfig,
        credentials_path: &Path,
        emulator_host: Option<&str>,
    ) -> Result<Self, StoreError> {
        let source = CredentialSource::resolve(credentials_path, emulator_host).await?;
        let config = match &source {
            CredentialSource::Emulator { host } => FirestoreConfig {
                base_url: format!("http://{}/v1", host),
                ..config
            },
            _ => config,
        };

        let tokens = TokenProvider::new(source, config.timeout)?;
        let project_id = match config.project_id.clone() {
            Some(project) => project,
            None => tokens.project_id().await?.ok_or_else(|| {
                StoreError::authentication("Firestore project id could not be determined")
            })?,
        };

        tracing::info!(
            project_id = %project_id,
            database_id = %config.database_id,
            base_url = %config.base_url,
            "Connecting to Firestore"
        );

        Self::new(config.with_project_id(project_id), tokens)
    }

    /// Builds the store from a fully resolved config.
    pub fn new(config: FirestoreConfig, tokens: TokenProvider) -> Result<Self, StoreError> {
        let project_id = config
            .project_id
            .as_deref()
            .ok_or_else(|| StoreError::authentication("Firestore project id is required"))?;

        let mut documents_root = Url::parse(config.base_url.trim_end_matches('/'))
            .map_err(|e| StoreError::transport(format!("invalid base URL: {}", e)))?;
        documents_root
            .path_segments_mut()
            .map_err(|_| StoreError::transport("base URL cannot carry a path"))?
            .pop_if_empty()
            .extend([
                "projects",
                project_id,
                "databases",
                config.database_id.as_str(),
                "documents",
            ]);

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| StoreError::transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            tokens,
            documents_root,
            timeout_secs: config.timeout.as_secs(),
        })
    }

    fn collection_url(&self, segments: &[&str]) -> Result<Url, StoreError> {
        let mut url = self.documents_root.clone();
        url.path_segments_mut()
            .map_err(|_| StoreError::transport("documents root cannot carry a path"))?
            .extend(segments);
        Ok(url)
    }

    fn run_query_url(&self) -> Url {
        let mut url = self.documents_root.clone();
        let path = format!("{}:runQuery", url.path());
        url.set_path(&path);
        url
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, StoreError> {
        let request = match self.tokens.access_token().await? {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        };

        request.send().await.map_err(|e| self.request_error(e))
    }

    async fn check_status(&self, response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(status_error(status, &body))
    }

    async fn read_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, StoreError> {
        response.json::<T>().await.map_err(|e| {
            if e.is_timeout() {
                self.request_error(e)
            } else {
                StoreError::decode(e.to_string())
            }
        })
    }

    fn request_error(&self, err: reqwest::Error) -> StoreError {
        if err.is_timeout() {
            StoreError::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else {
            StoreError::transport(err.to_string())
        }
    }
}

#[async_trait]
impl DocumentStore for FirestoreStore {
    async fn fetch_by_id(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, StoreError> {
        let url = self.collection_url(&[collection, id])?;
        tracing::debug!(collection, id, "Firestore get");

        let response = self.send(self.http_client.get(url)).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = self.check_status(response).await?;
        let document: RestDocument = self.read_json(response).await?;
        document.into_document().map(Some)
    }

    async fn fetch_limited(
        &self,
        collection: &str,
        limit: usize,
    ) -> Result<Vec<Document>, StoreError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let mut url = self.collection_url(&[collection])?;
        url.query_pairs_mut()
            .append_pair("pageSize", &limit.to_string());
        tracing::debug!(collection, limit, "Firestore list");

        let response = self.send(self.http_client.get(url)).await?;
        let response = self.check_status(response).await?;
        let list: ListResponse = self.read_json(response).await?;

        list.documents
            .into_iter()
            .take(limit)
            .map(RestDocument::into_document)
            .collect()
    }

    async fn search_by_tag(
        &self,
        collection: &str,
        tag: &str,
        limit: usize,
    ) -> Result<Vec<Document>, StoreError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let url = self.run_query_url();
        tracing::debug!(collection, tag, limit, "Firestore tag query");

        let response = self
            .send(
                self.http_client
                    .post(url)
                    .json(&tag_query(collection, tag, limit)),
            )
            .await?;
        let response = self.check_status(response).await?;
        let items: Vec<RunQueryItem> = self.read_json(response).await?;

        // runQuery emits progress entries without a document
        items
            .into_iter()
            .filter_map(|item| item.document)
            .take(limit)
            .map(RestDocument::into_document)
            .collect()
    }

    fn backend_name(&self) -> &'static str {
        "firestore"
    }
}

/// Structured query selecting documents whose `tags` array contains `tag`.
fn tag_query(collection: &str, tag: &str, limit: usize) -> Value {
    json!({
        "structuredQuery": {
            "from": [{ "collectionId": collection }],
            "where": {
                "fieldFilter": {
                    "field": { "fieldPath": TAGS_FIELD },
                    "op": "ARRAY_CONTAINS",
                    "value": string_value(tag)
                }
            },
            "limit": limit
        }
    })
}

fn status_error(status: StatusCode, body: &str) -> StoreError {
    let detail = error_message(body).unwrap_or_else(|| body.trim().to_string());
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            StoreError::authentication(format!("{}: {}", status, detail))
        }
        _ => StoreError::transport(format!("{}: {}", status, detail)),
    }
}

/// Extracts `error.message` from a Google API error body.
fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("error")?
        .get("message")?
        .as_str()
        .map(str::to_string)
}
