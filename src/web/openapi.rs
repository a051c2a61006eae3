//! OpenAPI document for the Web API.

use utoipa::OpenApi;

use super::dto::{
    CreateStorageRequest, FileResponse, FileWithContentResponse, StorageResponse,
    UpdateStorageRequest,
};
use super::error::{ErrorBody, ErrorCode};
use super::handlers;

#[derive(OpenApi)]
#[openapi(
    info(title = "fmngr", description = "File manager API"),
    paths(
        handlers::storage::create_storage,
        handlers::storage::list_storages,
        handlers::storage::get_storage,
        handlers::storage::modify_storage,
        handlers::storage::delete_storage,
        handlers::file::upload_file,
        handlers::file::list_files,
        handlers::file::get_file,
        handlers::file::delete_file,
        handlers::auth::register,
        handlers::auth::access_token,
    ),
    components(schemas(
        CreateStorageRequest,
        UpdateStorageRequest,
        StorageResponse,
        FileResponse,
        FileWithContentResponse,
        ErrorBody,
        ErrorCode,
    )),
    tags(
        (name = "storage", description = "Storage locations"),
        (name = "files", description = "Stored files"),
        (name = "auth", description = "Authentication placeholders")
    )
)]
pub struct ApiDoc;
