use crate::routes::{api, health};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "contact-server",
        description = "Contact-form submission API",
    ),
    tags(
        (name = "messages", description = "Contact-form submissions"),
        (name = "health", description = "Liveness"),
    )
)]
pub struct ApiDoc;

pub fn get_docs() -> utoipa::openapi::OpenApi {
    let mut root = ApiDoc::openapi();
    root.merge(api::api_docs());
    root.merge(health::HealthApi::openapi());
    root
}
