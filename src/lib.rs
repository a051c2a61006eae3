//! fmngr - file manager backend
//!
//! Uploaded files are written as blobs into named storage directories and
//! recorded in a SQLite catalog. The crate keeps every catalog row and its
//! blob in agreement: uploads are rolled back if the row cannot be written,
//! deletes never leave a row behind a removed blob, and only one storage is
//! ever the default target for new uploads.

pub mod config;
pub mod db;
pub mod error;
pub mod file;
pub mod logging;
pub mod storage;
pub mod web;

pub use config::Config;
pub use db::Database;
pub use error::{FmngrError, Result};
pub use file::{FileMetadata, FileService, FileWithContent, PathLocks};
pub use storage::{DefaultStorageResolver, NewStorage, Storage, StorageRegistry, StorageUpdate};
pub use web::{create_router, AppState, WebServer};
