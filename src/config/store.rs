//! Document store configuration

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::error::ValidationError;

/// Which `DocumentStore` implementation to run against.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Firestore,
    Memory,
}

/// Document store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,

    /// GCP project; falls back to the credentials when unset
    pub project_id: Option<String>,

    #[serde(default = "default_database_id")]
    pub database_id: String,

    /// Firestore REST base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-call timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Service-account key file
    #[serde(default = "default_credentials_path")]
    pub credentials_path: PathBuf,

    /// Emulator `host:port`; disables authentication
    pub emulator_host: Option<String>,

    /// JSON seed for the memory backend
    pub seed_path: Option<PathBuf>,
}

impl StoreConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate store configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 120 {
            return Err(ValidationError::InvalidStoreTimeout);
        }
        if self.backend == StoreBackend::Firestore {
            if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
                return Err(ValidationError::InvalidStoreUrl(self.base_url.clone()));
            }
            if self.database_id.trim().is_empty() {
                return Err(ValidationError::MissingRequired("store.database_id"));
            }
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            project_id: None,
            database_id: default_database_id(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            credentials_path: default_credentials_path(),
            emulator_host: None,
            seed_path: None,
        }
    }
}

fn default_database_id() -> String {
    "(default)".to_string()
}

fn default_base_url() -> String {
    "https://firestore.googleapis.com/v1".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_credentials_path() -> PathBuf {
    PathBuf::from("service-account.json")
}
