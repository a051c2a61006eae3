//! Router configuration for the Web API.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{
    access_token, create_storage, delete_file, delete_storage, get_file, get_storage,
    health_check, index, list_files, list_storages, modify_storage, openapi_json, register,
    upload_file, SharedState,
};
use super::middleware::create_cors_layer;

/// Create the main API router.
pub fn create_router(app_state: SharedState, cors_origins: &[String]) -> Router {
    let body_limit = usize::try_from(app_state.max_upload_size).unwrap_or(usize::MAX);

    let auth_routes = Router::new()
        .route("/register", post(register))
        .route("/tokens/access", post(access_token));

    let storage_routes = Router::new()
        .route("/storage", post(create_storage).get(list_storages))
        .route(
            "/storage/:id",
            get(get_storage).put(modify_storage).delete(delete_storage),
        );

    let file_routes = Router::new()
        .route("/files", post(upload_file).get(list_files))
        .route("/files/:id", get(get_file).delete(delete_file))
        .layer(DefaultBodyLimit::max(body_limit));

    Router::new()
        .route("/", get(index))
        .nest("/auth", auth_routes)
        .merge(storage_routes)
        .merge(file_routes)
        .merge(create_health_router())
        .merge(create_docs_router())
        .layer(
            ServiceBuilder::new()
                .layer(CatchPanicLayer::new())
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins)),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router<S: Clone + Send + Sync + 'static>() -> Router<S> {
    Router::new().route("/health", get(health_check))
}

/// Create the router serving the OpenAPI document.
pub fn create_docs_router<S: Clone + Send + Sync + 'static>() -> Router<S> {
    Router::new().route("/api-docs/openapi.json", get(openapi_json))
}
