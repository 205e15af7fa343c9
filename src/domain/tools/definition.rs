//! Tool definition - name, description and parameter schema of each lookup.
//!
//! The set of tools is closed, so dispatch is a match over [`ToolName`]
//! rather than a registry lookup.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three lookups available to the decision procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolName {
    GetUserProfile,
    SuggestArticles,
    ListRecentArticles,
}

impl ToolName {
    pub const ALL: [ToolName; 3] = [
        ToolName::GetUserProfile,
        ToolName::SuggestArticles,
        ToolName::ListRecentArticles,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::GetUserProfile => "get_user_profile",
            ToolName::SuggestArticles => "suggest_articles",
            ToolName::ListRecentArticles => "list_recent_articles",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ToolName::GetUserProfile => {
                "Fetch the user's profile and personalization preferences."
            }
            ToolName::SuggestArticles => {
                "Search for articles based on a list of user interests or keywords."
            }
            ToolName::ListRecentArticles => "Get a list of the most recent articles available.",
        }
    }

    pub fn definition(&self) -> ToolDefinition {
        let parameters = match self {
            ToolName::GetUserProfile => serde_json::json!({
                "type": "object",
                "required": ["user_id"],
                "properties": {
                    "user_id": { "type": "string", "description": "The unique ID of the user" }
                }
            }),
            ToolName::SuggestArticles => serde_json::json!({
                "type": "object",
                "required": ["interests"],
                "properties": {
                    "interests": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "List of interests to search for"
                    }
                }
            }),
            ToolName::ListRecentArticles => serde_json::json!({
                "type": "object",
                "properties": {}
            }),
        };
        ToolDefinition::new(self.as_str(), self.description(), parameters)
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolName::ALL
            .into_iter()
            .find(|tool| tool.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Definition of a tool, as published to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique name of the tool (e.g., "suggest_articles")
    name: String,

    /// Human-readable description
    description: String,

    /// JSON Schema for the arguments
    parameters_schema: serde_json::Value,
}

impl ToolDefinition {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters_schema: serde_json::Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters_schema,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn parameters_schema(&self) -> &serde_json::Value {
        &self.parameters_schema
    }

    /// Converts to the function-calling format used by hosted models.
    pub fn to_function_format(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "function",
            "function": {
                "name": self.name,
                "description": self.description,
                "parameters": self.parameters_schema
            }
        })
    }
}

/// Definitions of every tool, in policy order.
pub fn all_definitions() -> Vec<ToolDefinition> {
    ToolName::ALL.iter().map(ToolName::definition).collect()
}
