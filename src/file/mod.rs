//! File object store for fmngr.
//!
//! A file is a catalog row plus a blob at `storage.path/title+ext`. This
//! module keeps the two in agreement:
//! - Filename sanitization and title/extension splitting
//! - Create-new blob writes rolled back unless the catalog insert commits
//! - Per-path locking so concurrent uploads never share a destination
//! - Fetch with base64 content, listing and deletion

mod blob;
mod lock;
mod repository;
mod service;
mod types;

pub use blob::{BlobStore, PendingBlob};
pub use lock::{PathGuard, PathLocks};
pub use repository::FileRepository;
pub use service::FileService;
pub use types::{sanitize_filename, split_filename, FileMetadata, FileWithContent, NewFile};

/// Maximum length for an uploaded filename (in bytes).
pub const MAX_FILENAME_LENGTH: usize = 255;
