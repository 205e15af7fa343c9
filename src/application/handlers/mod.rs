//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod chat;
pub mod tools;

pub use chat::{
    ArticleSelection, Decision, Orchestrator, RecommendHandler, RecommendQuery, SendChatCommand,
    SendChatHandler, DEFAULT_RECOMMENDATION_MESSAGE,
};
pub use tools::{ArticleToolSet, InvokeToolHandler, InvokeToolResult};
