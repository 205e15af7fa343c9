//! Data transfer objects for chat HTTP endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::Article;
use crate::domain::conversation::ConversationTurn;

// ═══════════════════════════════════════════════════════════════════════════
// Request DTOs
// ═══════════════════════════════════════════════════════════════════════════

/// Body of `POST /chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub user_id: String,
    pub message: String,
    /// Prior turns; `null` and absent both mean none.
    #[serde(default)]
    pub chat_history: Option<Vec<ConversationTurn>>,
}

/// Body of `POST /recommendation`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub user_id: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub chat_history: Option<Vec<ConversationTurn>>,
}

// ═══════════════════════════════════════════════════════════════════════════
// Response DTOs
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub response: Vec<Article>,
}

/// Body of `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub message: String,
}
