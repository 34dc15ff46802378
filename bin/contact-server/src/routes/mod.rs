//! Axum router construction.
//!
//! [`build`] assembles the complete application router, including:
//! - Middleware layers (CORS, per-request trace-ID injection)
//! - Optional OpenAPI document endpoint (disable with `CONTACT_ENABLE_DOCS=false`)
//! - Health / heartbeat route
//! - Contact-message routes under `/api`

mod api;
pub mod doc;
mod health;

use axum::routing::get;
use axum::{Json, Router, middleware};
use crate::middleware::{cors, trace};
use crate::state::AppState;
use std::sync::Arc;
use tower::ServiceBuilder;

// ── Router builder ────────────────────────────────────────────────────────────

/// Build the complete Axum [`Router`] for the application.
pub fn build(state: Arc<AppState>) -> Router {
    let mut app = Router::new()
        .merge(health::router())
        .nest("/api", api::router());

    if state.config.enable_docs {
        let api_doc = doc::get_docs();
        app = app.route(
            "/api-docs/openapi.json",
            get(move || {
                let doc = api_doc.clone();
                async move { Json(doc) }
            }),
        );
    }

    app
        // Outermost layers execute first on the way in.
        .layer(ServiceBuilder::new().layer(cors::cors_layer(&state)))
        .layer(middleware::from_fn(trace::trace_middleware))
        .with_state(state)
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::Config;
    use crate::entities::test_support::memory_store;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn app_with(config: Config) -> Router {
        build(Arc::new(AppState::new(config, memory_store().await)))
    }

    #[tokio::test]
    async fn echoes_supplied_trace_id() {
        let app = app_with(Config::default()).await;
        let id = "6f1c5a0e-8d4b-4a36-9f43-0c2d7f6a9b11";
        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header(trace::X_TRACE_ID, id)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.headers()[trace::X_TRACE_ID], id);
    }

    #[tokio::test]
    async fn generates_trace_id_when_absent() {
        let app = app_with(Config::default()).await;
        let resp = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let header = resp.headers()[trace::X_TRACE_ID].to_str().unwrap();
        assert!(uuid::Uuid::parse_str(header).is_ok());
    }

    #[tokio::test]
    async fn serves_openapi_document() {
        let app = app_with(Config::default()).await;
        let resp = app
            .oneshot(Request::builder().uri("/api-docs/openapi.json").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let doc: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(doc["paths"].get("/api/messages").is_some());
    }

    #[tokio::test]
    async fn docs_can_be_disabled() {
        let config = Config { enable_docs: false, ..Config::default() };
        let app = app_with(config).await;
        let resp = app
            .oneshot(Request::builder().uri("/api-docs/openapi.json").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unsupported_method_is_rejected() {
        let app = app_with(Config::default()).await;
        let resp = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/messages")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
