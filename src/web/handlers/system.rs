//! Root, health and API document endpoints.

use axum::Json;
use utoipa::OpenApi;

use crate::web::openapi::ApiDoc;

/// GET /
pub async fn index() -> &'static str {
    "hello"
}

/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}

/// GET /api-docs/openapi.json
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
