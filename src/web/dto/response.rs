//! Response DTOs for the Web API.
//!
//! Bodies are bare JSON objects; field names match the catalog columns.

use serde::Serialize;
use utoipa::ToSchema;

use crate::file::{FileMetadata, FileWithContent};
use crate::storage::Storage;

/// Storage response.
#[derive(Debug, Serialize, ToSchema)]
pub struct StorageResponse {
    pub id: i64,
    pub path: String,
    pub is_default: bool,
}

impl From<Storage> for StorageResponse {
    fn from(storage: Storage) -> Self {
        Self {
            id: storage.id,
            path: storage.path,
            is_default: storage.is_default,
        }
    }
}

/// File metadata response.
#[derive(Debug, Serialize, ToSchema)]
pub struct FileResponse {
    pub id: i64,
    /// Filename without extension.
    pub title: String,
    /// Size in bytes.
    pub size: i64,
    /// Extension including the leading dot.
    pub ext: String,
    pub storage_id: i64,
}

impl From<FileMetadata> for FileResponse {
    fn from(file: FileMetadata) -> Self {
        Self {
            id: file.id,
            title: file.title,
            size: file.size,
            ext: file.ext,
            storage_id: file.storage_id,
        }
    }
}

/// File metadata with base64 content.
#[derive(Debug, Serialize, ToSchema)]
pub struct FileWithContentResponse {
    pub id: i64,
    pub title: String,
    pub size: i64,
    pub ext: String,
    pub storage_id: i64,
    /// File content, base64 encoded.
    pub base64_value: String,
}

impl From<FileWithContent> for FileWithContentResponse {
    fn from(value: FileWithContent) -> Self {
        let FileWithContent { file, base64_value } = value;
        Self {
            id: file.id,
            title: file.title,
            size: file.size,
            ext: file.ext,
            storage_id: file.storage_id,
            base64_value,
        }
    }
}
