//! Contact-message request / response types.
//!
//! Incoming fields are kept as raw JSON values so that a field of the wrong
//! type becomes a field-level validation error rather than a body rejection.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::{IntoParams, ToSchema};

use crate::entities::ContactMessage;
use crate::validation::FieldErrors;

/// Request body for `POST /api/messages`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessageRequest {
    #[serde(default)]
    #[schema(value_type = String, max_length = 255, example = "John Smith")]
    pub full_name: Option<Value>,
    #[serde(default)]
    #[schema(value_type = String, max_length = 255, example = "john@example.com")]
    pub email: Option<Value>,
    #[serde(default)]
    #[schema(value_type = String, max_length = 5000, example = "Lorem ipsum")]
    pub message: Option<Value>,
    #[serde(default)]
    #[schema(value_type = bool, example = true)]
    pub consent: Option<Value>,
}

impl CreateMessageRequest {
    /// Read the four known keys out of a decoded JSON object. `null` reads as
    /// absent; unknown keys are ignored.
    pub fn from_object(mut object: Map<String, Value>) -> Self {
        let mut take = |key: &str| object.remove(key).filter(|v| !v.is_null());
        Self {
            full_name: take("fullName"),
            email: take("email"),
            message: take("message"),
            consent: take("consent"),
        }
    }
}

/// Query string for `GET /api/messages`.
///
/// Values stay as strings until validation so that a non-numeric value can be
/// reported against its field.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListMessagesQuery {
    /// Max number of items to return (1-100, default 20).
    #[param(value_type = Option<i64>, minimum = 1, maximum = 100, example = 20)]
    pub limit: Option<String>,
    /// Number of items to skip (default 0).
    #[param(value_type = Option<i64>, minimum = 0, example = 0)]
    pub offset: Option<String>,
}

impl ListMessagesQuery {
    /// Build from decoded query pairs; a repeated key keeps its last value.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "limit" => query.limit = Some(value),
                "offset" => query.offset = Some(value),
                _ => {}
            }
        }
        query
    }
}

/// A persisted contact message as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    #[schema(example = 123)]
    pub id: i64,
    #[schema(example = "John Smith")]
    pub full_name: String,
    #[schema(example = "john@example.com")]
    pub email: String,
    #[schema(example = "Lorem ipsum")]
    pub message: String,
    #[schema(example = true)]
    pub consent: bool,
    /// RFC 3339 timestamp, e.g. `2026-01-19T12:00:00+00:00`.
    #[schema(example = "2026-01-19T12:00:00+00:00")]
    pub created_at: String,
}

/// Body of a 400 response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ValidationErrorResponse {
    #[schema(value_type = Object, example = json!({
        "email": ["Email is not valid"],
        "consent": ["Consent must be accepted"],
    }))]
    pub errors: FieldErrors,
}

impl ContactMessage {
    pub fn to_response(&self) -> MessageResponse {
        MessageResponse {
            id: self.id,
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            message: self.message.clone(),
            consent: self.consent,
            created_at: self.created_at.to_rfc3339_opts(chrono::SecondsFormat::Secs, false),
        }
    }
}
