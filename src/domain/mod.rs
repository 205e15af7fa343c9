//! Domain layer - records, rules and vocabulary of the orchestrator.
//!
//! Nothing here performs I/O; the application layer drives these types
//! through the ports.

pub mod catalog;
pub mod conversation;
pub mod foundation;
pub mod recommendation;
pub mod tools;
