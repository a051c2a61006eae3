//! Concurrency tests for the file store.
//!
//! Many tasks upload and delete through one shared application state, the
//! way concurrent HTTP requests do.

use std::io;
use std::sync::Arc;

use futures::stream;
use tempfile::TempDir;

use fmngr::{AppState, Database, FmngrError, NewStorage};

async fn setup() -> (Arc<AppState>, TempDir) {
    let dir = TempDir::new().unwrap();
    let db = Database::open_in_memory().await.unwrap();
    let state = Arc::new(AppState::new(db));

    state
        .storage_registry()
        .create_storage(&NewStorage::new(dir.path().to_string_lossy()).as_default())
        .await
        .unwrap();

    (state, dir)
}

fn body(content: Vec<u8>) -> impl futures::Stream<Item = io::Result<Vec<u8>>> {
    stream::iter([Ok(content)])
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_distinct_uploads() {
    let (state, dir) = setup().await;
    const TASKS: usize = 32;

    let handles: Vec<_> = (0..TASKS)
        .map(|i| {
            let state = Arc::clone(&state);
            tokio::spawn(async move {
                let name = format!("doc-{i}.txt");
                let content = format!("payload number {i}").into_bytes();
                state.file_service().create_file(&name, body(content)).await
            })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap().unwrap().id);
    }
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), TASKS);

    for i in 0..TASKS {
        let content = std::fs::read(dir.path().join(format!("doc-{i}.txt"))).unwrap();
        assert_eq!(content, format!("payload number {i}").into_bytes());
    }

    let files = state.file_service().list_files().await.unwrap();
    assert_eq!(files.len(), TASKS);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_same_name_uploads() {
    let (state, dir) = setup().await;
    const TASKS: usize = 8;

    let handles: Vec<_> = (0..TASKS)
        .map(|i| {
            let state = Arc::clone(&state);
            tokio::spawn(async move {
                let content = vec![i as u8; 64];
                state
                    .file_service()
                    .create_file("shared.bin", body(content))
                    .await
            })
        })
        .collect();

    let mut winners = Vec::new();
    for handle in handles {
        match handle.await.unwrap() {
            Ok(file) => winners.push(file),
            Err(FmngrError::Conflict(_)) => {}
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    assert_eq!(winners.len(), 1);
    let files = state.file_service().list_files().await.unwrap();
    assert_eq!(files, winners);

    // The blob on disk belongs to the single recorded upload
    let fetched = state.file_service().get_file(winners[0].id).await.unwrap();
    assert_eq!(fetched.file.size, 64);
    let on_disk = std::fs::read(dir.path().join("shared.bin")).unwrap();
    assert_eq!(on_disk.len(), 64);
    assert!(on_disk.iter().all(|b| *b == on_disk[0]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_deletes_of_one_file() {
    let (state, dir) = setup().await;
    let file = state
        .file_service()
        .create_file("once.txt", body(b"once".to_vec()))
        .await
        .unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let state = Arc::clone(&state);
            tokio::spawn(async move { state.file_service().delete_file(file.id).await })
        })
        .collect();

    let mut deleted = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(()) => deleted += 1,
            Err(FmngrError::NotFound(_)) => {}
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    assert_eq!(deleted, 1);
    assert!(!dir.path().join("once.txt").exists());
    assert!(state.file_service().list_files().await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_uploads_racing_default_switch() {
    let (state, _dir) = setup().await;
    let other_dir = TempDir::new().unwrap();
    let other = state
        .storage_registry()
        .create_storage(&NewStorage::new(other_dir.path().to_string_lossy()))
        .await
        .unwrap();

    let uploads: Vec<_> = (0..8)
        .map(|i| {
            let state = Arc::clone(&state);
            tokio::spawn(async move {
                state
                    .file_service()
                    .create_file(&format!("r-{i}.txt"), body(vec![b'r']))
                    .await
            })
        })
        .collect();

    state
        .storage_registry()
        .modify_storage(other.id, &fmngr::StorageUpdate::new().is_default(true))
        .await
        .unwrap();

    for handle in uploads {
        handle.await.unwrap().unwrap();
    }

    // Exactly one default at rest, whatever the interleaving
    let storages = state.storage_registry().list_storages().await.unwrap();
    assert_eq!(storages.iter().filter(|s| s.is_default).count(), 1);
}
