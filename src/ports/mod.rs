//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `DocumentStore` - read-only access to the `users` and `articles`
//!   collections

mod document_store;

pub use document_store::{Document, DocumentStore, StoreError};
