//! Default storage resolution.

use super::repository::StorageRepository;
use super::types::Storage;
use crate::db::Database;
use crate::{FmngrError, Result};

/// Read-only lookup of the storage that receives new uploads.
pub struct DefaultStorageResolver<'a> {
    db: &'a Database,
}

impl<'a> DefaultStorageResolver<'a> {
    /// Create a new DefaultStorageResolver.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Get the default storage.
    ///
    /// Fails with `NotFound` when no storage is flagged default and with
    /// `Conflict` when several are, rather than picking one arbitrarily.
    pub async fn get_default_storage(&self) -> Result<Storage> {
        let mut defaults = StorageRepository::new(self.db.pool())
            .list_default()
            .await?;

        match defaults.len() {
            0 => Err(FmngrError::NotFound("default storage".to_string())),
            1 => Ok(defaults.remove(0)),
            _ => Err(FmngrError::Conflict(
                "more than one storage is flagged default".to_string(),
            )),
        }
    }

    /// Get the default storage if one is configured.
    pub async fn find_default_storage(&self) -> Result<Option<Storage>> {
        match self.get_default_storage().await {
            Ok(storage) => Ok(Some(storage)),
            Err(FmngrError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
