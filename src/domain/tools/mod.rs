//! Tools module - the lookups exposed to the decision procedure.
//!
//! - `ToolName` / `ToolDefinition` - the closed catalogue with schemas
//! - `ToolCall` - a by-name invocation with JSON arguments
//! - `ToolRequest` - a validated, typed call
//! - `ToolOutput` - what a tool returns

mod call;
mod definition;

pub use call::{ToolCall, ToolCallError, ToolOutput, ToolRequest};
pub use definition::{all_definitions, ToolDefinition, ToolName};
