//! HTTP adapters - REST API implementations.
//!
//! Each module has its own HTTP adapter for endpoint exposure; `router`
//! assembles them behind the tracing and CORS layers.

pub mod chat;
pub mod error;
pub mod router;
pub mod tools;

// Re-export key types for convenience
pub use chat::{chat_router, ChatAppState};
pub use error::{ApiError, ErrorResponse};
pub use router::{app_router, cors_layer, STATUS_MESSAGE};
pub use tools::{tools_router, ToolsAppState};
