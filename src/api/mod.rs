pub mod handlers;
pub mod models;
pub mod openapi;

use axum::{Router, extract::DefaultBodyLimit};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use self::handlers::{SharedService, api_routes, not_found};
use self::openapi::ApiDoc;
use crate::constants::MAX_BODY_BYTES;

/// Full application router: JSON API under `/api`, Swagger UI at `/api/docs`.
///
/// Request bodies above `MAX_BODY_BYTES` are rejected with 413.
pub fn router(service: SharedService) -> Router {
    Router::new()
        .nest("/api", api_routes(service))
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
}
