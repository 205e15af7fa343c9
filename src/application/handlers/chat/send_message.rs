//! SendChat command handler.
//!
//! Validates a chat message, runs the orchestrator under the request
//! timeout and maps store failures into domain errors.

use std::sync::Arc;
use std::time::Duration;

use tracing::Instrument;
use uuid::Uuid;

use super::orchestrator::{Decision, Orchestrator};
use crate::domain::conversation::ConversationTurn;
use crate::domain::foundation::{DomainError, UserId, ValidationError};

/// Command to answer one chat message.
#[derive(Debug, Clone)]
pub struct SendChatCommand {
    pub user_id: UserId,
    pub message: String,
    pub chat_history: Vec<ConversationTurn>,
}

impl SendChatCommand {
    /// Validates the raw request fields.
    pub fn new(
        user_id: impl Into<String>,
        message: impl Into<String>,
        chat_history: Vec<ConversationTurn>,
    ) -> Result<Self, ValidationError> {
        let user_id = UserId::new(user_id)?;
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ValidationError::empty_field("message"));
        }

        Ok(Self {
            user_id,
            message,
            chat_history,
        })
    }
}

pub struct SendChatHandler {
    orchestrator: Arc<Orchestrator>,
    timeout: Duration,
}

impl SendChatHandler {
    pub fn new(orchestrator: Arc<Orchestrator>, timeout: Duration) -> Self {
        Self {
            orchestrator,
            timeout,
        }
    }

    pub async fn handle(&self, cmd: SendChatCommand) -> Result<Decision, DomainError> {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("chat", %request_id, user_id = %cmd.user_id);

        async {
            let decision = tokio::time::timeout(
                self.timeout,
                self.orchestrator
                    .decide(&cmd.user_id, &cmd.message, &cmd.chat_history),
            )
            .await;

            match decision {
                Ok(Ok(decision)) => {
                    tracing::info!(
                        tools = ?decision.selection.tools_invoked,
                        articles = decision.selection.articles.len(),
                        "Chat answered"
                    );
                    Ok(decision)
                }
                Ok(Err(e)) => {
                    tracing::error!(error = %e, "Chat decision failed");
                    Err(DomainError::from(e))
                }
                Err(_) => {
                    tracing::error!(timeout_secs = self.timeout.as_secs(), "Chat decision timed out");
                    Err(DomainError::timeout("Chat decision", self.timeout.as_secs()))
                }
            }
        }
        .instrument(span)
        .await
    }
}
