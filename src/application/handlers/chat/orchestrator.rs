//! Orchestrator - the fixed recommendation policy.
//!
//! 1. Always look up the user's profile.
//! 2. With any interests, search articles by those interests as stored.
//! 3. With no profile, no interests or no matches, list recent articles.
//! 4. Compose the reply.
//!
//! Tools run one at a time in that order. There are no retries and any
//! tool failure fails the decision.

use crate::domain::catalog::{Article, UserProfile};
use crate::domain::conversation::ConversationTurn;
use crate::domain::foundation::UserId;
use crate::domain::recommendation::{compose_reply, interests_to_search, ArticleSource, ReplyContext};
use crate::domain::tools::ToolName;
use crate::ports::StoreError;

use super::super::tools::ArticleToolSet;

/// Outcome of steps 1-3 of the policy.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleSelection {
    pub profile: Option<UserProfile>,
    /// Interests the tag search ran with; empty when it was skipped.
    pub interests: Vec<String>,
    pub source: ArticleSource,
    pub articles: Vec<Article>,
    /// Tools in invocation order.
    pub tools_invoked: Vec<ToolName>,
}

impl ArticleSelection {
    /// Which path produced the articles, `None` when both came back empty.
    pub fn effective_source(&self) -> Option<ArticleSource> {
        (!self.articles.is_empty()).then_some(self.source)
    }
}

/// A full decision: the selection plus the composed reply.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub reply: String,
    pub selection: ArticleSelection,
}

pub struct Orchestrator {
    tools: ArticleToolSet,
}

impl Orchestrator {
    pub fn new(tools: ArticleToolSet) -> Self {
        Self { tools }
    }

    /// Runs the lookup steps of the policy without composing a reply.
    pub async fn select_articles(&self, user_id: &UserId) -> Result<ArticleSelection, StoreError> {
        let mut tools_invoked = vec![ToolName::GetUserProfile];
        let profile = self.tools.get_user_profile(user_id).await?;

        let interests = interests_to_search(profile.as_ref()).unwrap_or_default();
        let mut articles = Vec::new();
        if !interests.is_empty() {
            tools_invoked.push(ToolName::SuggestArticles);
            articles = self.tools.suggest_articles(&interests).await?;
        }

        let source = if articles.is_empty() {
            if !interests.is_empty() {
                tracing::debug!(user_id = %user_id, "No articles matched interests, falling back to recent");
            }
            tools_invoked.push(ToolName::ListRecentArticles);
            articles = self.tools.list_recent_articles().await?;
            ArticleSource::Recent
        } else {
            ArticleSource::Interests
        };

        tracing::info!(
            user_id = %user_id,
            profile_found = profile.is_some(),
            source = ?source,
            articles = articles.len(),
            tools = ?tools_invoked,
            "Selected articles"
        );

        Ok(ArticleSelection {
            profile,
            interests,
            source,
            articles,
            tools_invoked,
        })
    }

    /// Runs the whole policy for one chat message.
    ///
    /// The message text does not steer the policy; history only affects
    /// the greeting.
    pub async fn decide(
        &self,
        user_id: &UserId,
        message: &str,
        history: &[ConversationTurn],
    ) -> Result<Decision, StoreError> {
        tracing::debug!(
            user_id = %user_id,
            message_len = message.len(),
            history_len = history.len(),
            "Deciding reply"
        );

        let selection = self.select_articles(user_id).await?;
        let reply = compose_reply(&ReplyContext {
            profile: selection.profile.as_ref(),
            interests: &selection.interests,
            source: selection.source,
            articles: &selection.articles,
            history,
        });

        Ok(Decision { reply, selection })
    }
}
