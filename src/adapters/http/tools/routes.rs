//! Axum router configuration for tools endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{invoke_tool, list_tools, ToolsAppState};

/// Create the tools API router.
///
/// # Routes
///
/// - `GET /` - List the tool catalogue (query: format)
/// - `POST /invoke` - Invoke a tool by name
///
/// Suitable for mounting at `/tools`.
pub fn tools_router() -> Router<ToolsAppState> {
    Router::new()
        .route("/", get(list_tools))
        .route("/invoke", post(invoke_tool))
}
