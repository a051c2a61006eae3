//! File handlers.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};

use super::SharedState;
use crate::web::dto::{ApiPath, FileResponse, FileWithContentResponse};
use crate::web::error::ApiError;
// Referenced only inside `#[utoipa::path]` so the schema ref resolves to `ErrorBody`.
#[allow(unused_imports)]
use crate::web::error::ErrorBody;

/// Name of the multipart field carrying the upload.
pub const UPLOAD_FIELD: &str = "file";

/// POST /files - Upload a file into the default storage.
///
/// Request body: multipart/form-data with a `file` field. The field's
/// filename becomes the stored name; the content is streamed to disk.
#[utoipa::path(
    post,
    path = "/files",
    tag = "files",
    responses(
        (status = 200, description = "File stored", body = FileResponse),
        (status = 400, description = "Missing file field or unusable filename", body = ErrorBody),
        (status = 404, description = "No default storage", body = ErrorBody),
        (status = 409, description = "A file with this name already exists", body = ErrorBody)
    )
)]
pub async fn upload_file(
    State(state): State<SharedState>,
    mut multipart: Multipart,
) -> Result<Json<FileResponse>, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::warn!("Failed to read multipart field: {}", e);
        ApiError::bad_request(format!("Invalid multipart data: {}", e.body_text()))
    })? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| ApiError::bad_request("The file field has no filename"))?;

        let file = state.file_service().create_file(&filename, field).await?;
        return Ok(Json(file.into()));
    }

    Err(ApiError::bad_request(format!(
        "Missing multipart field '{UPLOAD_FIELD}'"
    )))
}

/// GET /files - List files of the default storage.
#[utoipa::path(
    get,
    path = "/files",
    tag = "files",
    responses(
        (status = 200, description = "Files of the default storage", body = Vec<FileResponse>)
    )
)]
pub async fn list_files(
    State(state): State<SharedState>,
) -> Result<Json<Vec<FileResponse>>, ApiError> {
    let files = state.file_service().list_files().await?;

    Ok(Json(files.into_iter().map(Into::into).collect()))
}

/// GET /files/:id - Get file metadata and base64 content.
#[utoipa::path(
    get,
    path = "/files/{id}",
    tag = "files",
    params(
        ("id" = i64, Path, description = "File ID")
    ),
    responses(
        (status = 200, description = "File with content", body = FileWithContentResponse),
        (status = 404, description = "File not found", body = ErrorBody),
        (status = 500, description = "Blob missing on disk", body = ErrorBody)
    )
)]
pub async fn get_file(
    State(state): State<SharedState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<FileWithContentResponse>, ApiError> {
    let file = state.file_service().get_file(id).await?;

    Ok(Json(file.into()))
}

/// DELETE /files/:id - Delete a file and its blob.
#[utoipa::path(
    delete,
    path = "/files/{id}",
    tag = "files",
    params(
        ("id" = i64, Path, description = "File ID")
    ),
    responses(
        (status = 200, description = "File deleted"),
        (status = 404, description = "File not found", body = ErrorBody)
    )
)]
pub async fn delete_file(
    State(state): State<SharedState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    state.file_service().delete_file(id).await?;

    Ok(StatusCode::OK)
}
