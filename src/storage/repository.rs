//! Storage repository for fmngr.
//!
//! This module provides CRUD operations on the `storage` table.

use sqlx::{QueryBuilder, SqlitePool};
use tracing::debug;

use super::types::{NewStorage, Storage, StorageUpdate};
use crate::Result;

/// Repository for storage CRUD operations.
pub struct StorageRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> StorageRepository<'a> {
    /// Create a new StorageRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new storage.
    ///
    /// When the new storage is the default, the previous default is cleared
    /// in the same transaction, so two defaults never coexist.
    pub async fn create(&self, new_storage: &NewStorage) -> Result<Storage> {
        let mut tx = self.pool.begin().await?;

        if new_storage.is_default {
            let cleared = sqlx::query("UPDATE storage SET is_default = 0 WHERE is_default = 1")
                .execute(&mut *tx)
                .await?;
            if cleared.rows_affected() > 0 {
                debug!("Cleared previous default storage");
            }
        }

        let storage = sqlx::query_as::<_, Storage>(
            "INSERT INTO storage (path, is_default) VALUES (?, ?)
             RETURNING id, path, is_default",
        )
        .bind(&new_storage.path)
        .bind(new_storage.is_default)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(storage)
    }

    /// Get a storage by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Storage>> {
        let storage = sqlx::query_as::<_, Storage>(
            "SELECT id, path, is_default FROM storage WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(storage)
    }

    /// List all storages ordered by ID.
    pub async fn list(&self) -> Result<Vec<Storage>> {
        let storages =
            sqlx::query_as::<_, Storage>("SELECT id, path, is_default FROM storage ORDER BY id")
                .fetch_all(self.pool)
                .await?;

        Ok(storages)
    }

    /// List storages flagged default.
    ///
    /// At most two rows are returned, which is enough to tell "one" from "several".
    pub async fn list_default(&self) -> Result<Vec<Storage>> {
        let storages = sqlx::query_as::<_, Storage>(
            "SELECT id, path, is_default FROM storage WHERE is_default = 1 ORDER BY id LIMIT 2",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(storages)
    }

    /// Update a storage by ID.
    ///
    /// Only fields set in the update are modified. Setting `is_default` clears
    /// the previous default in the same transaction. The path only changes
    /// while no file references the storage; the check is part of the
    /// UPDATE itself. Returns `None` if no storage has this ID or the path
    /// change is refused.
    pub async fn update(&self, id: i64, update: &StorageUpdate) -> Result<Option<Storage>> {
        if update.is_empty() {
            return self.get_by_id(id).await;
        }

        let mut tx = self.pool.begin().await?;

        if update.is_default == Some(true) {
            sqlx::query("UPDATE storage SET is_default = 0 WHERE is_default = 1 AND id != ?")
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }

        let mut query: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new("UPDATE storage SET ");
        let mut separated = query.separated(", ");

        if let Some(ref path) = update.path {
            separated.push("path = ");
            separated.push_bind_unseparated(path);
        }
        if let Some(is_default) = update.is_default {
            separated.push("is_default = ");
            separated.push_bind_unseparated(is_default);
        }

        query.push(" WHERE id = ");
        query.push_bind(id);
        if let Some(ref path) = update.path {
            query.push(" AND (path = ");
            query.push_bind(path);
            query.push(" OR NOT EXISTS (SELECT 1 FROM file WHERE storage_id = ");
            query.push_bind(id);
            query.push("))");
        }

        let result = query.build().execute(&mut *tx).await?;
        if result.rows_affected() == 0 {
            // Dropping the transaction rolls back the cleared default
            return Ok(None);
        }

        let storage = sqlx::query_as::<_, Storage>(
            "SELECT id, path, is_default FROM storage WHERE id = ?",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(storage))
    }

    /// Delete a storage by ID, unless a file row still references it.
    ///
    /// Returns true if a storage was deleted, false if it was not found or
    /// is still in use.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query(
            "DELETE FROM storage WHERE id = ?
             AND NOT EXISTS (SELECT 1 FROM file WHERE storage_id = ?)",
        )
        .bind(id)
        .bind(id)
        .execute(self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count file rows that reference a storage.
    pub async fn count_files(&self, id: i64) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM file WHERE storage_id = ?")
            .bind(id)
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}
