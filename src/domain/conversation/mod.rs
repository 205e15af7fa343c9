//! Conversation module - caller-supplied chat history.

mod turn;

pub use turn::{has_prior_exchange, ConversationTurn};
