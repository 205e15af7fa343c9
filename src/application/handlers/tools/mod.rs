//! Tool handlers.
//!
//! The lookup tool set and single-tool invocation by name.

mod invoke_tool;
mod tool_set;

pub use invoke_tool::{InvokeToolHandler, InvokeToolResult};
pub use tool_set::{ArticleToolSet, MAX_CONCURRENT_TAG_QUERIES};
