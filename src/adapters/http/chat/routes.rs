//! Axum router configuration for chat endpoints.

use axum::routing::post;
use axum::Router;

use super::handlers::{recommend, send_chat, ChatAppState};

/// Create the chat router.
///
/// # Routes
///
/// - `POST /chat` - Answer a message with a natural-language reply
/// - `POST /recommendation` - Return the selected articles as JSON
pub fn chat_router() -> Router<ChatAppState> {
    Router::new()
        .route("/chat", post(send_chat))
        .route("/recommendation", post(recommend))
}
