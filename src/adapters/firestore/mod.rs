//! Firestore REST adapter.
//!
//! Implements `DocumentStore` against the Firestore v1 REST API with
//! service-account, metadata-server or emulator credentials.

mod client;
mod credentials;
mod value;

pub use client::{FirestoreConfig, FirestoreStore};
pub use credentials::{
    CredentialSource, ServiceAccountKey, TokenProvider, DATASTORE_SCOPE, EMULATOR_PROJECT_ID,
};
