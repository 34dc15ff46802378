//! Contact-message routes.
//!
//! `POST /api/messages` validates and stores a submission;
//! `GET /api/messages` pages through stored submissions, newest first.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Map, Value};
use tracing::{debug, info};
use utoipa::OpenApi;

use crate::entities::{ContactMessageStore, NewContactMessage};
use crate::error::ServerError;
use crate::schemas::messages::{
    CreateMessageRequest, ListMessagesQuery, MessageResponse, ValidationErrorResponse,
};
use crate::state::AppState;
use crate::validation::{validate_create, validate_list};

#[derive(OpenApi)]
#[openapi(
    paths(create_message, list_messages),
    components(schemas(CreateMessageRequest, MessageResponse, ValidationErrorResponse))
)]
pub struct MessagesApi;

/// Register contact-message routes.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/messages", post(create_message).get(list_messages))
}

/// Error wrapper for the list endpoint, whose 500 body reports the generic
/// text under `message` instead of `error`.
#[derive(Debug)]
pub struct ListError(ServerError);

impl<E> From<E> for ListError
where
    E: Into<ServerError>,
{
    fn from(e: E) -> Self {
        ListError(e.into())
    }
}

impl IntoResponse for ListError {
    fn into_response(self) -> Response {
        self.0.into_response_with_key("message")
    }
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// Create a contact message (`POST /api/messages`).
#[utoipa::path(
    post,
    path = "/api/messages",
    tag = "messages",
    request_body = CreateMessageRequest,
    responses(
        (status = 201, description = "Created", body = MessageResponse),
        (status = 400, description = "Validation errors", body = ValidationErrorResponse),
        (status = 500, description = "Server error", body = serde_json::Value,
            example = json!({ "error": "Something went wrong" })),
    )
)]
pub async fn create_message(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ServerError> {
    // Only a JSON object is a payload; arrays and scalars are rejected here.
    let Json(object) = payload.map_err(|e| ServerError::Malformed(e.body_text()))?;
    let valid = validate_create(&CreateMessageRequest::from_object(object))?;

    let created = state
        .store
        .create(NewContactMessage::new(
            valid.full_name,
            valid.email,
            valid.message,
            valid.consent,
        ))
        .await?;

    info!(id = created.id, "contact message stored");
    Ok((StatusCode::CREATED, Json(created.to_response())))
}

/// List contact messages, newest first (`GET /api/messages`).
#[utoipa::path(
    get,
    path = "/api/messages",
    tag = "messages",
    params(ListMessagesQuery),
    responses(
        (status = 200, description = "OK", body = Vec<MessageResponse>),
        (status = 400, description = "Validation error (query params)", body = ValidationErrorResponse),
        (status = 500, description = "Server error", body = serde_json::Value,
            example = json!({ "message": "Something went wrong" })),
    )
)]
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<MessageResponse>>, ListError> {
    let Query(pairs) = query.map_err(|e| ServerError::Malformed(e.body_text()))?;
    let page = validate_list(&ListMessagesQuery::from_pairs(pairs))?;

    debug!(limit = page.limit, offset = page.offset, "listing contact messages");
    let messages = state.store.list_latest(page.limit, page.offset).await?;
    Ok(Json(messages.iter().map(|m| m.to_response()).collect()))
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use axum::body::Body;
    use axum::http::{Request, header};
    use http_body_util::BodyExt;
    use serde_json::json;
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::entities::test_support::memory_store;
    use crate::entities::{ContactMessageStore, NewContactMessage, SqliteStore};
    use crate::routes;
    use crate::state::AppState;

    use super::*;

    async fn app() -> (Router, Arc<SqliteStore>) {
        let state = Arc::new(AppState::new(Config::default(), memory_store().await));
        let store = Arc::clone(&state.store);
        (routes::build(state), store)
    }

    fn post_json(body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/messages")
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.into())
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Option<String>, Value) {
        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let content_type = resp
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, content_type, body)
    }

    #[tokio::test]
    async fn create_returns_201_and_persists() {
        let (app, store) = app().await;
        let payload = json!({
            "fullName": "Jan Kowalski",
            "email": "jan@example.com",
            "message": "Hello",
            "consent": true,
        });

        let (status, content_type, body) = send(&app, post_json(payload.to_string())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert!(body["id"].as_i64().unwrap() > 0);
        assert_eq!(body["fullName"], "Jan Kowalski");
        assert_eq!(body["consent"], true);
        assert!(body["createdAt"].as_str().unwrap().ends_with("+00:00"));

        let saved = store.list_latest(20, 0).await.unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].id, body["id"].as_i64().unwrap());
        assert_eq!(saved[0].full_name, "Jan Kowalski");
        assert_eq!(saved[0].email, "jan@example.com");
        assert_eq!(saved[0].message, "Hello");
        assert!(saved[0].consent);
    }

    #[tokio::test]
    async fn create_reports_every_invalid_field() {
        let (app, store) = app().await;
        let payload = json!({ "email": "not-an-email", "message": "", "consent": false });

        let (status, content_type, body) = send(&app, post_json(payload.to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        for field in ["fullName", "email", "message", "consent"] {
            assert!(body["errors"][field].is_array(), "missing errors for {field}");
        }
        assert!(store.list_latest(20, 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_reports_type_mismatch_as_400() {
        let (app, _) = app().await;
        let payload = json!({ "fullName": 1, "email": "a@b.co", "message": "x", "consent": true });

        let (status, _, body) = send(&app, post_json(payload.to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"]["fullName"][0], "This value should be of type string.");
    }

    #[tokio::test]
    async fn malformed_json_is_a_server_error() {
        let (app, _) = app().await;
        let (status, content_type, body) = send(&app, post_json("{")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert_eq!(body, json!({ "error": "Something went wrong" }));
    }

    #[tokio::test]
    async fn non_object_json_is_a_server_error() {
        let (app, store) = app().await;
        for body in [r#"["Ala","ala@example.com","hi",true]"#, "[]", "42", r#""text""#, "null"] {
            let (status, _, resp) = send(&app, post_json(body)).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "body {body}");
            assert_eq!(resp, json!({ "error": "Something went wrong" }), "body {body}");
        }
        assert!(store.list_latest(20, 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_content_type_is_a_server_error() {
        let (app, _) = app().await;
        let req = Request::builder()
            .method("POST")
            .uri("/api/messages")
            .body(Body::from("{}"))
            .unwrap();
        let (status, _, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Something went wrong");
    }

    #[tokio::test]
    async fn create_storage_failure_is_500_with_error_key() {
        let (app, store) = app().await;
        store.close().await;
        let payload = json!({
            "fullName": "Ala", "email": "ala@example.com", "message": "Msg", "consent": true,
        });
        let (status, _, body) = send(&app, post_json(payload.to_string())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Something went wrong" }));
    }

    #[tokio::test]
    async fn list_returns_newest_first_with_full_shape() {
        let (app, store) = app().await;
        let mut older = NewContactMessage::new("Ala", "ala@example.com", "Msg 1", true);
        older.created_at -= chrono::Duration::seconds(5);
        store.create(older).await.unwrap();
        store
            .create(NewContactMessage::new("Ola", "ola@example.com", "Msg 2", true))
            .await
            .unwrap();

        let (status, content_type, body) = send(&app, get("/api/messages?limit=20&offset=0")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("application/json"));

        let items = body.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["fullName"], "Ola");
        assert_eq!(items[1]["fullName"], "Ala");
        for key in ["id", "fullName", "email", "message", "consent", "createdAt"] {
            assert!(items[0].get(key).is_some(), "missing key {key}");
        }
    }

    #[tokio::test]
    async fn list_defaults_and_pagination() {
        let (app, store) = app().await;
        for i in 0..3 {
            store
                .create(NewContactMessage::new(format!("User{i}"), "u@example.com", "m", true))
                .await
                .unwrap();
        }

        let (_, _, all) = send(&app, get("/api/messages")).await;
        assert_eq!(all.as_array().unwrap().len(), 3);

        let (_, _, page) = send(&app, get("/api/messages?limit=1&offset=1")).await;
        assert_eq!(page.as_array().unwrap().len(), 1);
        assert_eq!(page[0], all[1]);
    }

    #[tokio::test]
    async fn repeated_list_calls_are_identical() {
        let (app, store) = app().await;
        for i in 0..4 {
            store
                .create(NewContactMessage::new(format!("User{i}"), "u@example.com", "m", true))
                .await
                .unwrap();
        }
        let (_, _, first) = send(&app, get("/api/messages?limit=3&offset=0")).await;
        let (_, _, second) = send(&app, get("/api/messages?limit=3&offset=0")).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn list_rejects_out_of_range_params() {
        let (app, _) = app().await;
        let (status, content_type, body) = send(&app, get("/api/messages?limit=101&offset=-1")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert!(body["errors"].get("limit").is_some());
        assert!(body["errors"].get("offset").is_some());
    }

    #[tokio::test]
    async fn list_rejects_non_numeric_limit() {
        let (app, _) = app().await;
        let (status, _, body) = send(&app, get("/api/messages?limit=abc")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"]["limit"][0], "This value should be of type int.");
    }

    #[tokio::test]
    async fn list_storage_failure_is_500_with_message_key() {
        let (app, store) = app().await;
        store.close().await;
        let (status, _, body) = send(&app, get("/api/messages")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "message": "Something went wrong" }));
    }
}
