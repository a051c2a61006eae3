//! Request DTOs for the Web API.

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use super::validation::{no_control_chars, not_empty_trimmed};
use crate::storage::{NewStorage, StorageUpdate};

/// Storage creation request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateStorageRequest {
    /// Directory holding the blobs.
    #[validate(
        length(max = 4096, message = "Must be at most 4096 bytes"),
        custom(function = "not_empty_trimmed"),
        custom(function = "no_control_chars")
    )]
    pub path: String,
    /// Whether new uploads go to this storage.
    #[serde(default)]
    pub is_default: bool,
}

impl From<CreateStorageRequest> for NewStorage {
    fn from(req: CreateStorageRequest) -> Self {
        Self {
            path: req.path,
            is_default: req.is_default,
        }
    }
}

/// Storage modification request. Absent fields are left unchanged.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStorageRequest {
    #[validate(
        length(max = 4096, message = "Must be at most 4096 bytes"),
        custom(function = "not_empty_trimmed"),
        custom(function = "no_control_chars")
    )]
    pub path: Option<String>,
    pub is_default: Option<bool>,
}

impl From<UpdateStorageRequest> for StorageUpdate {
    fn from(req: UpdateStorageRequest) -> Self {
        Self {
            path: req.path,
            is_default: req.is_default,
        }
    }
}
