//! Tool call, parsed request and output types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::catalog::{Article, UserProfile};
use crate::domain::foundation::{DomainError, ErrorCode, UserId, ValidationError};

use super::ToolName;

/// A request to invoke a tool by name with JSON arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Name of the tool to invoke
    name: String,

    /// Arguments for the tool (JSON object)
    arguments: serde_json::Value,
}

impl ToolCall {
    pub fn new(name: impl Into<String>, arguments: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arguments(&self) -> &serde_json::Value {
        &self.arguments
    }
}

/// Errors turning a [`ToolCall`] into a [`ToolRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolCallError {
    #[error("Tool not found: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for {tool}: {reason}")]
    InvalidArguments { tool: ToolName, reason: String },
}

impl From<ToolCallError> for DomainError {
    fn from(err: ToolCallError) -> Self {
        match &err {
            ToolCallError::UnknownTool(name) => {
                DomainError::new(ErrorCode::UnknownTool, err.to_string())
                    .with_detail("tool", name.clone())
            }
            ToolCallError::InvalidArguments { tool, .. } => {
                DomainError::validation("arguments", err.to_string())
                    .with_detail("tool", tool.as_str())
            }
        }
    }
}

#[derive(Deserialize)]
struct ProfileArgs {
    #[serde(alias = "userId")]
    user_id: String,
}

#[derive(Deserialize)]
struct SuggestArgs {
    interests: Vec<String>,
}

/// A validated, typed tool request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolRequest {
    GetUserProfile { user_id: UserId },
    SuggestArticles { interests: Vec<String> },
    ListRecentArticles,
}

impl ToolRequest {
    pub fn tool(&self) -> ToolName {
        match self {
            ToolRequest::GetUserProfile { .. } => ToolName::GetUserProfile,
            ToolRequest::SuggestArticles { .. } => ToolName::SuggestArticles,
            ToolRequest::ListRecentArticles => ToolName::ListRecentArticles,
        }
    }
}

impl TryFrom<&ToolCall> for ToolRequest {
    type Error = ToolCallError;

    fn try_from(call: &ToolCall) -> Result<Self, Self::Error> {
        let tool: ToolName = call
            .name()
            .parse()
            .map_err(ToolCallError::UnknownTool)?;

        let invalid = |reason: String| ToolCallError::InvalidArguments { tool, reason };

        // A missing argument object is treated as `{}`.
        let arguments = match call.arguments() {
            serde_json::Value::Null => serde_json::json!({}),
            other => other.clone(),
        };

        match tool {
            ToolName::GetUserProfile => {
                let args: ProfileArgs =
                    serde_json::from_value(arguments).map_err(|e| invalid(e.to_string()))?;
                let user_id = UserId::new(args.user_id)
                    .map_err(|e: ValidationError| invalid(e.to_string()))?;
                Ok(ToolRequest::GetUserProfile { user_id })
            }
            ToolName::SuggestArticles => {
                let args: SuggestArgs =
                    serde_json::from_value(arguments).map_err(|e| invalid(e.to_string()))?;
                Ok(ToolRequest::SuggestArticles {
                    interests: args.interests,
                })
            }
            ToolName::ListRecentArticles => {
                if !arguments.is_object() {
                    return Err(invalid("expected an object".to_string()));
                }
                Ok(ToolRequest::ListRecentArticles)
            }
        }
    }
}

/// Result of running a single tool.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    Profile(Option<UserProfile>),
    Articles(Vec<Article>),
}

impl ToolOutput {
    /// JSON form handed back to callers: the raw profile record (or `null`)
    /// or the article list.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            ToolOutput::Profile(profile) => {
                serde_json::to_value(profile).unwrap_or(serde_json::Value::Null)
            }
            ToolOutput::Articles(articles) => serde_json::to_value(articles)
                .unwrap_or_else(|_| serde_json::Value::Array(Vec::new())),
        }
    }
}
