//! Storage handlers.

use axum::{extract::State, http::StatusCode, Json};

use super::SharedState;
use crate::storage::{NewStorage, StorageUpdate};
use crate::web::dto::{
    ApiPath, CreateStorageRequest, StorageResponse, UpdateStorageRequest, ValidatedJson,
};
use crate::web::error::ApiError;
// Referenced only inside `#[utoipa::path]` so the schema ref resolves to `ErrorBody`.
#[allow(unused_imports)]
use crate::web::error::ErrorBody;

/// POST /storage - Register a storage location.
#[utoipa::path(
    post,
    path = "/storage",
    tag = "storage",
    request_body = CreateStorageRequest,
    responses(
        (status = 200, description = "Storage created", body = StorageResponse),
        (status = 400, description = "Invalid path", body = ErrorBody),
        (status = 422, description = "Validation error", body = ErrorBody)
    )
)]
pub async fn create_storage(
    State(state): State<SharedState>,
    ValidatedJson(req): ValidatedJson<CreateStorageRequest>,
) -> Result<Json<StorageResponse>, ApiError> {
    let storage = state
        .storage_registry()
        .create_storage(&NewStorage::from(req))
        .await?;

    Ok(Json(storage.into()))
}

/// GET /storage - List storages.
#[utoipa::path(
    get,
    path = "/storage",
    tag = "storage",
    responses(
        (status = 200, description = "All storages ordered by ID", body = Vec<StorageResponse>)
    )
)]
pub async fn list_storages(
    State(state): State<SharedState>,
) -> Result<Json<Vec<StorageResponse>>, ApiError> {
    let storages = state.storage_registry().list_storages().await?;

    Ok(Json(storages.into_iter().map(Into::into).collect()))
}

/// GET /storage/:id - Get a storage.
#[utoipa::path(
    get,
    path = "/storage/{id}",
    tag = "storage",
    params(
        ("id" = i64, Path, description = "Storage ID")
    ),
    responses(
        (status = 200, description = "Storage details", body = StorageResponse),
        (status = 404, description = "Storage not found", body = ErrorBody)
    )
)]
pub async fn get_storage(
    State(state): State<SharedState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<StorageResponse>, ApiError> {
    let storage = state.storage_registry().get_storage(id).await?;

    Ok(Json(storage.into()))
}

/// PUT /storage/:id - Modify a storage.
#[utoipa::path(
    put,
    path = "/storage/{id}",
    tag = "storage",
    params(
        ("id" = i64, Path, description = "Storage ID")
    ),
    request_body = UpdateStorageRequest,
    responses(
        (status = 200, description = "Storage modified", body = StorageResponse),
        (status = 404, description = "Storage not found", body = ErrorBody),
        (status = 409, description = "Path change on a storage holding files", body = ErrorBody),
        (status = 422, description = "Validation error", body = ErrorBody)
    )
)]
pub async fn modify_storage(
    State(state): State<SharedState>,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(req): ValidatedJson<UpdateStorageRequest>,
) -> Result<Json<StorageResponse>, ApiError> {
    let storage = state
        .storage_registry()
        .modify_storage(id, &StorageUpdate::from(req))
        .await?;

    Ok(Json(storage.into()))
}

/// DELETE /storage/:id - Delete a storage that holds no files.
#[utoipa::path(
    delete,
    path = "/storage/{id}",
    tag = "storage",
    params(
        ("id" = i64, Path, description = "Storage ID")
    ),
    responses(
        (status = 200, description = "Storage deleted"),
        (status = 404, description = "Storage not found", body = ErrorBody),
        (status = 409, description = "Storage still holds files", body = ErrorBody)
    )
)]
pub async fn delete_storage(
    State(state): State<SharedState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    state.storage_registry().delete_storage(id).await?;

    Ok(StatusCode::OK)
}
