//! HTTP adapter for chat.
//!
//! - `POST /chat` - Natural-language recommendation reply
//! - `POST /recommendation` - Recommended articles as JSON

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::ChatAppState;
pub use routes::chat_router;
