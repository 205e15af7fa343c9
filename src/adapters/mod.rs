//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `firestore` - Firestore REST document store
//! - `memory` - In-memory document store (seeded runs and tests)
//! - `http` - Axum REST API

pub mod firestore;
pub mod http;
pub mod memory;

pub use firestore::{FirestoreConfig, FirestoreStore};
pub use memory::InMemoryDocumentStore;
