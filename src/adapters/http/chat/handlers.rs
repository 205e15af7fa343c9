//! HTTP handlers for chat endpoints.
//!
//! These handlers connect Axum routes to the chat command and query handlers.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::chat::{
    Orchestrator, RecommendHandler, RecommendQuery, SendChatCommand, SendChatHandler,
};
use crate::application::handlers::tools::ArticleToolSet;
use crate::ports::DocumentStore;

use super::super::error::ApiError;
use super::dto::{ChatRequest, ChatResponse, RecommendationRequest, RecommendationResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for chat endpoints.
#[derive(Clone)]
pub struct ChatAppState {
    pub orchestrator: Arc<Orchestrator>,
    pub request_timeout: Duration,
}

impl ChatAppState {
    pub fn new(store: Arc<dyn DocumentStore>, request_timeout: Duration) -> Self {
        Self {
            orchestrator: Arc::new(Orchestrator::new(ArticleToolSet::new(store))),
            request_timeout,
        }
    }

    pub fn send_chat_handler(&self) -> SendChatHandler {
        SendChatHandler::new(self.orchestrator.clone(), self.request_timeout)
    }

    pub fn recommend_handler(&self) -> RecommendHandler {
        RecommendHandler::new(self.orchestrator.clone(), self.request_timeout)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /chat - Answer a chat message
pub async fn send_chat(
    State(state): State<ChatAppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    let cmd = SendChatCommand::new(
        request.user_id,
        request.message,
        request.chat_history.unwrap_or_default(),
    )?;

    let decision = state.send_chat_handler().handle(cmd).await?;

    Ok((
        StatusCode::OK,
        Json(ChatResponse {
            response: decision.reply,
        }),
    ))
}

/// POST /recommendation - Return the selected articles as data
pub async fn recommend(
    State(state): State<ChatAppState>,
    payload: Result<Json<RecommendationRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    let query = RecommendQuery::new(
        request.user_id,
        request.message,
        request.chat_history.unwrap_or_default(),
    )?;

    let selection = state.recommend_handler().handle(query).await?;

    Ok((
        StatusCode::OK,
        Json(RecommendationResponse {
            response: selection.articles,
        }),
    ))
}
