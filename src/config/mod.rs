//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `BIXSO` prefix and nested values use double underscores as separators.
//!
//! The conventional Google variables are honoured as defaults:
//!
//! - `PORT` -> `server.port`
//! - `GOOGLE_APPLICATION_CREDENTIALS` -> `store.credentials_path`
//! - `FIRESTORE_EMULATOR_HOST` -> `store.emulator_host`
//! - `GOOGLE_CLOUD_PROJECT` (or `GCLOUD_PROJECT`) -> `store.project_id`
//!
//! # Example
//!
//! ```no_run
//! use bixso_orchestrator::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod error;
mod server;
mod store;

pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use store::{StoreBackend, StoreConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (bind address, environment, timeouts, CORS)
    #[serde(default)]
    pub server: ServerConfig,

    /// Document store configuration (backend, Firestore, credentials)
    #[serde(default)]
    pub store: StoreConfig,
}

/// Plain environment variables mapped onto configuration keys. A later
/// entry for the same key takes precedence.
const CONVENTIONAL_VARS: [(&str, &str); 5] = [
    ("PORT", "server.port"),
    ("GOOGLE_APPLICATION_CREDENTIALS", "store.credentials_path"),
    ("FIRESTORE_EMULATOR_HOST", "store.emulator_host"),
    ("GCLOUD_PROJECT", "store.project_id"),
    ("GOOGLE_CLOUD_PROJECT", "store.project_id"),
];

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Seeds defaults from the conventional variables (`PORT`, ...)
    /// 3. Reads environment variables with `BIXSO` prefix
    /// 4. Uses `__` (double underscore) to separate nested values
    /// 5. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `BIXSO__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `BIXSO__STORE__BACKEND=memory` -> `store.backend = memory`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder();
        for (var, key) in CONVENTIONAL_VARS {
            if let Some(value) = std::env::var(var).ok().filter(|v| !v.trim().is_empty()) {
                builder = builder.set_default(key, value)?;
            }
        }

        let config = builder
            .add_source(
                config::Environment::default()
                    .prefix("BIXSO")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.store.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
