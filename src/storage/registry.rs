//! Storage registry.
//!
//! High-level operations over storage records. The registry is the only
//! writer of storage rows.

use tracing::{debug, info};

use super::repository::StorageRepository;
use super::types::{NewStorage, Storage, StorageUpdate};
use super::MAX_PATH_LENGTH;
use crate::db::Database;
use crate::{FmngrError, Result};

/// Check that a storage path is usable as a directory name.
///
/// Existence and writability are not checked.
fn validate_path(path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(FmngrError::Validation("storage path is empty".to_string()));
    }
    if path.len() > MAX_PATH_LENGTH {
        return Err(FmngrError::Validation(format!(
            "storage path must be at most {MAX_PATH_LENGTH} bytes"
        )));
    }
    if path.chars().any(char::is_control) {
        return Err(FmngrError::Validation(
            "storage path contains control characters".to_string(),
        ));
    }
    Ok(())
}

/// Registry of storage locations.
pub struct StorageRegistry<'a> {
    db: &'a Database,
}

impl<'a> StorageRegistry<'a> {
    /// Create a new StorageRegistry.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    fn repo(&self) -> StorageRepository<'_> {
        StorageRepository::new(self.db.pool())
    }

    /// Register a storage location.
    ///
    /// A new default storage replaces the previous one atomically.
    pub async fn create_storage(&self, new_storage: &NewStorage) -> Result<Storage> {
        validate_path(&new_storage.path)?;

        let storage = self.repo().create(new_storage).await?;
        info!(
            "Created storage {} at {} (default: {})",
            storage.id, storage.path, storage.is_default
        );
        Ok(storage)
    }

    /// List all storages ordered by ID.
    pub async fn list_storages(&self) -> Result<Vec<Storage>> {
        self.repo().list().await
    }

    /// Get a storage by ID.
    pub async fn get_storage(&self, id: i64) -> Result<Storage> {
        self.repo()
            .get_by_id(id)
            .await?
            .ok_or_else(|| FmngrError::NotFound(format!("storage {id}")))
    }

    /// Modify a storage.
    ///
    /// Changing the path of a storage that still holds files is refused,
    /// since the blobs would no longer be reachable.
    pub async fn modify_storage(&self, id: i64, update: &StorageUpdate) -> Result<Storage> {
        if let Some(ref path) = update.path {
            validate_path(path)?;
        }

        let Some(storage) = self.repo().update(id, update).await? else {
            return Err(self.refusal(id, "its path cannot change").await?);
        };

        debug!("Modified storage {}: {:?}", id, update);
        Ok(storage)
    }

    /// Delete a storage.
    ///
    /// Refused while any file row references it.
    pub async fn delete_storage(&self, id: i64) -> Result<()> {
        if !self.repo().delete(id).await? {
            return Err(self.refusal(id, "it cannot be deleted").await?);
        }

        info!("Deleted storage {}", id);
        Ok(())
    }

    /// Explain why a guarded write on storage `id` matched no row.
    async fn refusal(&self, id: i64, what: &str) -> Result<FmngrError> {
        if self.repo().get_by_id(id).await?.is_none() {
            return Ok(FmngrError::NotFound(format!("storage {id}")));
        }
        let files = self.repo().count_files(id).await?;
        Ok(FmngrError::Conflict(format!(
            "storage {id} holds {files} file(s); {what}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_db() -> Database {
        Database::open_in_memory().await.unwrap()
    }

    async fn insert_file(db: &Database, storage_id: i64) {
        sqlx::query("INSERT INTO file (title, size, ext, storage_id) VALUES ('a', 1, '.txt', ?)")
            .bind(storage_id)
            .execute(db.pool())
            .await
            .unwrap();
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("/data").is_ok());
        assert!(validate_path("relative/dir").is_ok());
        assert!(validate_path("").is_err());
        assert!(validate_path("   ").is_err());
        assert!(validate_path("/data\n").is_err());
        assert!(validate_path("/da\0ta").is_err());
        assert!(validate_path(&"a".repeat(MAX_PATH_LENGTH + 1)).is_err());
    }

    #[tokio::test]
    async fn test_create_and_get_storage() {
        let db = setup_db().await;
        let registry = StorageRegistry::new(&db);

        let created = registry
            .create_storage(&NewStorage::new("/data").as_default())
            .await
            .unwrap();
        let fetched = registry.get_storage(created.id).await.unwrap();

        assert_eq!(created, fetched);
        assert!(fetched.is_default);
    }

    #[tokio::test]
    async fn test_create_storage_rejects_empty_path() {
        let db = setup_db().await;
        let registry = StorageRegistry::new(&db);

        let result = registry.create_storage(&NewStorage::new("")).await;
        assert!(matches!(result, Err(FmngrError::Validation(_))));
        assert!(registry.list_storages().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_single_default_after_many_creates() {
        let db = setup_db().await;
        let registry = StorageRegistry::new(&db);

        for path in ["/a", "/b", "/c"] {
            registry
                .create_storage(&NewStorage::new(path).as_default())
                .await
                .unwrap();
        }

        let storages = registry.list_storages().await.unwrap();
        let defaults: Vec<_> = storages.iter().filter(|s| s.is_default).collect();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults[0].path, "/c");
    }

    #[tokio::test]
    async fn test_get_storage_not_found() {
        let db = setup_db().await;
        let registry = StorageRegistry::new(&db);

        let result = registry.get_storage(42).await;
        assert!(matches!(result, Err(FmngrError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_modify_storage_default() {
        let db = setup_db().await;
        let registry = StorageRegistry::new(&db);
        let a = registry
            .create_storage(&NewStorage::new("/a").as_default())
            .await
            .unwrap();
        let b = registry.create_storage(&NewStorage::new("/b")).await.unwrap();

        let b = registry
            .modify_storage(b.id, &StorageUpdate::new().is_default(true))
            .await
            .unwrap();

        assert!(b.is_default);
        assert!(!registry.get_storage(a.id).await.unwrap().is_default);
    }

    #[tokio::test]
    async fn test_modify_storage_path_with_files_conflicts() {
        let db = setup_db().await;
        let registry = StorageRegistry::new(&db);
        let storage = registry.create_storage(&NewStorage::new("/a")).await.unwrap();
        insert_file(&db, storage.id).await;

        let result = registry
            .modify_storage(storage.id, &StorageUpdate::new().path("/elsewhere"))
            .await;
        assert!(matches!(result, Err(FmngrError::Conflict(_))));

        // Same path is not a change
        let same = registry
            .modify_storage(storage.id, &StorageUpdate::new().path("/a").is_default(true))
            .await
            .unwrap();
        assert!(same.is_default);
    }

    #[tokio::test]
    async fn test_modify_storage_path_when_empty() {
        let db = setup_db().await;
        let registry = StorageRegistry::new(&db);
        let storage = registry.create_storage(&NewStorage::new("/a")).await.unwrap();

        let storage = registry
            .modify_storage(storage.id, &StorageUpdate::new().path("/b"))
            .await
            .unwrap();
        assert_eq!(storage.path, "/b");
    }

    #[tokio::test]
    async fn test_modify_storage_not_found() {
        let db = setup_db().await;
        let registry = StorageRegistry::new(&db);

        let result = registry
            .modify_storage(7, &StorageUpdate::new().is_default(true))
            .await;
        assert!(matches!(result, Err(FmngrError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_storage() {
        let db = setup_db().await;
        let registry = StorageRegistry::new(&db);
        let storage = registry.create_storage(&NewStorage::new("/a")).await.unwrap();

        registry.delete_storage(storage.id).await.unwrap();

        let result = registry.get_storage(storage.id).await;
        assert!(matches!(result, Err(FmngrError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_storage_with_files_conflicts() {
        let db = setup_db().await;
        let registry = StorageRegistry::new(&db);
        let storage = registry.create_storage(&NewStorage::new("/a")).await.unwrap();
        insert_file(&db, storage.id).await;

        let result = registry.delete_storage(storage.id).await;
        assert!(matches!(result, Err(FmngrError::Conflict(_))));
        assert!(registry.get_storage(storage.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_storage_not_found() {
        let db = setup_db().await;
        let registry = StorageRegistry::new(&db);

        let result = registry.delete_storage(99).await;
        assert!(matches!(result, Err(FmngrError::NotFound(_))));
    }
}
