//! Storage types.

use std::path::{Path, PathBuf};

/// A named filesystem root holding blobs.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Storage {
    /// Unique storage ID.
    pub id: i64,
    /// Directory the blobs live in. Not checked for existence.
    pub path: String,
    /// Whether new uploads go here.
    pub is_default: bool,
}

impl Storage {
    /// Physical location of a blob named `name` inside this storage.
    pub fn blob_path(&self, name: &str) -> PathBuf {
        Path::new(&self.path).join(name)
    }
}

/// Data for creating a new storage.
#[derive(Debug, Clone)]
pub struct NewStorage {
    /// Directory path.
    pub path: String,
    /// Whether the new storage becomes the default.
    pub is_default: bool,
}

impl NewStorage {
    /// Create a new non-default storage.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_default: false,
        }
    }

    /// Mark the new storage as the default.
    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }
}

/// Builder for updating a storage.
#[derive(Debug, Clone, Default)]
pub struct StorageUpdate {
    /// New directory path.
    pub path: Option<String>,
    /// New default flag.
    pub is_default: Option<bool>,
}

impl StorageUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the path.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the default flag.
    pub fn is_default(mut self, is_default: bool) -> Self {
        self.is_default = Some(is_default);
        self
    }

    /// Check if any fields are set.
    pub fn is_empty(&self) -> bool {
        self.path.is_none() && self.is_default.is_none()
    }
}
