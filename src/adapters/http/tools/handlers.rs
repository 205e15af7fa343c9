//! HTTP handlers for tools endpoints.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::tools::{ArticleToolSet, InvokeToolHandler};
use crate::domain::tools::{all_definitions, ToolCall};
use crate::ports::DocumentStore;

use super::super::error::ApiError;
use super::dto::{InvokeToolRequest, InvokeToolResponse, ListToolsQuery, ListToolsResponse};

/// Application state for tools endpoints.
#[derive(Clone)]
pub struct ToolsAppState {
    pub tools: ArticleToolSet,
    pub request_timeout: Duration,
}

impl ToolsAppState {
    pub fn new(store: Arc<dyn DocumentStore>, request_timeout: Duration) -> Self {
        Self {
            tools: ArticleToolSet::new(store),
            request_timeout,
        }
    }

    pub fn invoke_tool_handler(&self) -> InvokeToolHandler {
        InvokeToolHandler::new(self.tools.clone(), self.request_timeout)
    }
}

/// List the tool catalogue.
///
/// GET /tools?format=function
pub async fn list_tools(Query(query): Query<ListToolsQuery>) -> impl IntoResponse {
    let definitions = all_definitions();
    let count = definitions.len();

    let tools = match query.format.as_str() {
        "function" => serde_json::Value::Array(
            definitions.iter().map(|d| d.to_function_format()).collect(),
        ),
        _ => serde_json::to_value(&definitions).unwrap_or(serde_json::Value::Array(vec![])),
    };

    Json(ListToolsResponse {
        format: query.format,
        count,
        tools,
    })
}

/// Invoke a tool.
///
/// POST /tools/invoke
pub async fn invoke_tool(
    State(state): State<ToolsAppState>,
    payload: Result<Json<InvokeToolRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    let call = ToolCall::new(request.tool_name, request.arguments);

    let result = state.invoke_tool_handler().handle(call).await?;

    Ok((
        StatusCode::OK,
        Json(InvokeToolResponse {
            tool_name: result.tool.to_string(),
            result: result.result,
        }),
    ))
}
