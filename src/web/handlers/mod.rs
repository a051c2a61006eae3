//! API handlers and shared application state.

pub mod auth;
pub mod file;
pub mod storage;
pub mod system;

pub use auth::*;
pub use file::*;
pub use storage::*;
pub use system::*;

use std::sync::Arc;

use crate::config::FilesConfig;
use crate::file::{FileService, PathLocks};
use crate::storage::StorageRegistry;
use crate::Database;

/// Application state shared across handlers.
///
/// Built once at startup and handed to the router; handlers borrow the
/// services they need from it per request.
#[derive(Debug)]
pub struct AppState {
    /// Catalog connection pool.
    pub db: Database,
    /// Per-path locks for blob mutation.
    pub locks: PathLocks,
    /// Upload body limit in bytes.
    pub max_upload_size: u64,
}

/// Shared handle to the application state.
pub type SharedState = Arc<AppState>;

impl AppState {
    /// Create a new application state with the default upload limit.
    pub fn new(db: Database) -> Self {
        Self {
            db,
            locks: PathLocks::new(),
            max_upload_size: FilesConfig::default().max_upload_size_bytes(),
        }
    }

    /// Set the upload body limit.
    pub fn with_max_upload_size(mut self, bytes: u64) -> Self {
        self.max_upload_size = bytes;
        self
    }

    /// Storage registry over this state's catalog.
    pub fn storage_registry(&self) -> StorageRegistry<'_> {
        StorageRegistry::new(&self.db)
    }

    /// File service over this state's catalog and locks.
    pub fn file_service(&self) -> FileService<'_> {
        FileService::new(&self.db, &self.locks)
    }
}
