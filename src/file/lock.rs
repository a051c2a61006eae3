//! Per-path mutual exclusion for blob writes and removals.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type LockKey = (i64, String);

/// Async locks keyed by (storage id, filename).
///
/// Entries are dropped from the table once no task holds or waits on them.
#[derive(Debug, Default)]
pub struct PathLocks {
    locks: Mutex<HashMap<LockKey, Arc<AsyncMutex<()>>>>,
}

/// Held while a path is being mutated.
#[derive(Debug)]
pub struct PathGuard {
    _guard: OwnedMutexGuard<()>,
}

impl PathLocks {
    /// Create an empty lock table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `name` inside storage `storage_id`.
    pub async fn lock(&self, storage_id: i64, name: &str) -> PathGuard {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks
                .entry((storage_id, name.to_string()))
                .or_default()
                .clone()
        };

        PathGuard {
            _guard: lock.lock_owned().await,
        }
    }

    /// Number of paths currently tracked.
    pub fn len(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if no path is tracked.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
