//! Top-level router: liveness route, chat and tools modules, and layers.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use axum::{Json, Router};
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::ports::DocumentStore;

use super::chat::{chat_router, ChatAppState, StatusResponse};
use super::tools::{tools_router, ToolsAppState};

pub const STATUS_MESSAGE: &str = "Bixso Orchestrator is running";

/// GET / - Liveness
async fn root() -> Json<StatusResponse> {
    Json(StatusResponse {
        message: STATUS_MESSAGE.to_string(),
    })
}

/// Build the full application router over one shared store.
///
/// An empty `cors_origins` allows any origin.
pub fn app_router(
    store: Arc<dyn DocumentStore>,
    request_timeout: Duration,
    cors_origins: &[String],
) -> Router {
    Router::new()
        .route("/", get(root))
        .merge(chat_router().with_state(ChatAppState::new(store.clone(), request_timeout)))
        .nest(
            "/tools",
            tools_router().with_state(ToolsAppState::new(store, request_timeout)),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origins))
}

/// CORS policy: permissive unless origins are configured.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if allowed.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(allowed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::adapters::memory::InMemoryDocumentStore;

    fn app(origins: &[String]) -> Router {
        app_router(
            Arc::new(InMemoryDocumentStore::new()),
            Duration::from_secs(5),
            origins,
        )
    }

    #[tokio::test]
    async fn root_reports_running() {
        let response = app(&[])
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], STATUS_MESSAGE);
    }

    #[tokio::test]
    async fn tools_are_mounted() {
        let response = app(&[])
            .oneshot(Request::builder().uri("/tools").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn cors_allows_any_origin_by_default() {
        let response = app(&[])
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(header::ORIGIN, "https://bixso.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&HeaderValue::from_static("*"))
        );
    }

    #[tokio::test]
    async fn cors_restricts_to_configured_origins() {
        let origins = vec!["https://app.bixso.example".to_string()];

        let allowed = app(&origins)
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(header::ORIGIN, "https://app.bixso.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            allowed.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&HeaderValue::from_static("https://app.bixso.example"))
        );

        let denied = app(&origins)
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(header::ORIGIN, "https://evil.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(denied
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }
}
