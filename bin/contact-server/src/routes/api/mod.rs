pub mod messages;

use crate::state::AppState;
use utoipa::OpenApi;

use axum::Router;
use std::sync::Arc;

/// Routes nested under `/api`.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().merge(messages::router())
}

#[derive(OpenApi)]
#[openapi()]
pub struct PublicApi;

pub fn api_docs() -> utoipa::openapi::OpenApi {
    let mut spec = PublicApi::openapi();
    spec.merge(messages::MessagesApi::openapi());
    spec
}
