//! Chat command and query handlers.
//!
//! The orchestrator owns the policy; the handlers add validation, the
//! request timeout and tracing.

mod orchestrator;
mod recommend;
mod send_message;

pub use orchestrator::{ArticleSelection, Decision, Orchestrator};
pub use recommend::{RecommendHandler, RecommendQuery, DEFAULT_RECOMMENDATION_MESSAGE};
pub use send_message::{SendChatCommand, SendChatHandler};
