//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer sequences the tools over the document store port and wraps
//! the policy with validation, timeouts and tracing.

pub mod handlers;

pub use handlers::{
    // Chat handlers
    ArticleSelection, Decision, Orchestrator, RecommendHandler, RecommendQuery, SendChatCommand,
    SendChatHandler, DEFAULT_RECOMMENDATION_MESSAGE,
    // Tool handlers
    ArticleToolSet, InvokeToolHandler, InvokeToolResult,
};
