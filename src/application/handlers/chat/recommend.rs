//! Recommend query handler.
//!
//! Runs only the lookup steps of the policy and returns the selected
//! articles as data.

use std::sync::Arc;
use std::time::Duration;

use super::orchestrator::{ArticleSelection, Orchestrator};
use crate::domain::conversation::ConversationTurn;
use crate::domain::foundation::{DomainError, UserId, ValidationError};

/// Prompt used when the caller sends no message.
pub const DEFAULT_RECOMMENDATION_MESSAGE: &str = "Recommend some articles for me";

#[derive(Debug, Clone)]
pub struct RecommendQuery {
    pub user_id: UserId,
    pub message: String,
    pub chat_history: Vec<ConversationTurn>,
}

impl RecommendQuery {
    pub fn new(
        user_id: impl Into<String>,
        message: Option<String>,
        chat_history: Vec<ConversationTurn>,
    ) -> Result<Self, ValidationError> {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_RECOMMENDATION_MESSAGE.to_string());

        Ok(Self {
            user_id: UserId::new(user_id)?,
            message,
            chat_history,
        })
    }
}

pub struct RecommendHandler {
    orchestrator: Arc<Orchestrator>,
    timeout: Duration,
}

impl RecommendHandler {
    pub fn new(orchestrator: Arc<Orchestrator>, timeout: Duration) -> Self {
        Self {
            orchestrator,
            timeout,
        }
    }

    pub async fn handle(&self, query: RecommendQuery) -> Result<ArticleSelection, DomainError> {
        tracing::debug!(user_id = %query.user_id, message = %query.message, "Recommendation requested");

        match tokio::time::timeout(self.timeout, self.orchestrator.select_articles(&query.user_id))
            .await
        {
            Ok(result) => result.map_err(DomainError::from),
            Err(_) => Err(DomainError::timeout(
                "Recommendation",
                self.timeout.as_secs(),
            )),
        }
    }
}
