//! Data transfer objects for tools HTTP endpoints.

use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════════
// Request DTOs
// ═══════════════════════════════════════════════════════════════════════════

/// Request to invoke a tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvokeToolRequest {
    /// Name of the tool to invoke
    pub tool_name: String,
    /// Tool arguments as JSON; absent means `{}`
    #[serde(default)]
    pub arguments: serde_json::Value,
}

/// Query parameters for listing tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListToolsQuery {
    /// Output format: "native" or "function"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "native".to_string()
}

// ═══════════════════════════════════════════════════════════════════════════
// Response DTOs
// ═══════════════════════════════════════════════════════════════════════════

/// Response for the tool listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListToolsResponse {
    pub format: String,
    pub count: usize,
    pub tools: serde_json::Value,
}

/// Response for a tool invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvokeToolResponse {
    pub tool_name: String,
    pub result: serde_json::Value,
}
