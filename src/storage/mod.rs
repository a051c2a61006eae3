//! Storage locations for fmngr.
//!
//! A storage is a filesystem directory that holds uploaded blobs. Exactly
//! one storage may be flagged default; every new upload lands there.
//!
//! - [`StorageRegistry`]: create, list, fetch, modify and delete storages
//! - [`DefaultStorageResolver`]: read-only lookup of the default storage

mod registry;
mod repository;
mod resolver;
mod types;

pub use registry::StorageRegistry;
pub use repository::StorageRepository;
pub use resolver::DefaultStorageResolver;
pub use types::{NewStorage, Storage, StorageUpdate};

/// Maximum length for a storage path (in bytes).
pub const MAX_PATH_LENGTH: usize = 4096;
