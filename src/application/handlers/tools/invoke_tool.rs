//! InvokeToolHandler - runs a single tool by name.
//!
//! Parses a [`ToolCall`] against the closed tool catalogue and dispatches it
//! to the [`ArticleToolSet`] under the request timeout.

use std::time::Duration;

use serde_json::Value;

use super::ArticleToolSet;
use crate::domain::foundation::DomainError;
use crate::domain::tools::{ToolCall, ToolName, ToolRequest};

/// Result of a successful tool invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct InvokeToolResult {
    pub tool: ToolName,
    pub result: Value,
}

pub struct InvokeToolHandler {
    tools: ArticleToolSet,
    timeout: Duration,
}

impl InvokeToolHandler {
    pub fn new(tools: ArticleToolSet, timeout: Duration) -> Self {
        Self { tools, timeout }
    }

    pub async fn handle(&self, call: ToolCall) -> Result<InvokeToolResult, DomainError> {
        let request = ToolRequest::try_from(&call)?;
        let tool = request.tool();

        tracing::info!(tool = %tool, backend = self.tools.backend_name(), "Invoking tool");

        let output = match tokio::time::timeout(self.timeout, self.tools.execute(request)).await {
            Ok(result) => result.map_err(|e| {
                tracing::error!(tool = %tool, error = %e, "Tool invocation failed");
                DomainError::from(e).with_detail("tool", tool.as_str())
            })?,
            Err(_) => {
                tracing::warn!(tool = %tool, timeout_secs = self.timeout.as_secs(), "Tool invocation timed out");
                return Err(DomainError::timeout(tool.as_str(), self.timeout.as_secs())
                    .with_detail("tool", tool.as_str()));
            }
        };

        Ok(InvokeToolResult {
            tool,
            result: output.to_json(),
        })
    }
}
