//! Shared helpers for Web API integration tests.
//!
//! Each test gets its own in-memory catalog and temporary storage root.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::{TestResponse, TestServer};
use serde_json::{json, Value};
use tempfile::TempDir;

use fmngr::web::create_router;
use fmngr::{AppState, Database};

/// A router under test plus the state and directories behind it.
pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
    root: TempDir,
}

/// Create a test app with an in-memory database and no storages.
pub async fn create_test_app() -> TestApp {
    create_test_app_with_limit(None).await
}

/// Create a test app with a custom upload body limit.
pub async fn create_test_app_with_limit(max_upload_size: Option<u64>) -> TestApp {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");

    let mut app_state = AppState::new(db);
    if let Some(limit) = max_upload_size {
        app_state = app_state.with_max_upload_size(limit);
    }
    let state = Arc::new(app_state);

    let router = create_router(state.clone(), &[]);
    let server = TestServer::new(router).expect("Failed to create test server");
    let root = TempDir::new().expect("Failed to create temp dir");

    TestApp {
        server,
        state,
        root,
    }
}

impl TestApp {
    /// Temporary directory all storages of this app live under.
    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Create a directory under the temporary root and return its path.
    pub fn storage_dir(&self, name: &str) -> PathBuf {
        let dir = self.root.path().join(name);
        std::fs::create_dir_all(&dir).expect("Failed to create storage dir");
        dir
    }

    /// Register a storage backed by a fresh directory; returns the response JSON.
    pub async fn create_storage(&self, name: &str, is_default: bool) -> Value {
        let path = self.storage_dir(name);
        let response = self
            .server
            .post("/storage")
            .json(&json!({
                "path": path.to_string_lossy(),
                "is_default": is_default
            }))
            .await;
        response.assert_status_ok();
        response.json::<Value>()
    }

    /// Upload `content` as multipart field `file` named `filename`.
    pub async fn upload(&self, filename: &str, content: Vec<u8>) -> TestResponse {
        let part = Part::bytes(content)
            .file_name(filename.to_string())
            .mime_type("application/octet-stream");
        let form = MultipartForm::new().add_part("file", part);

        self.server.post("/files").multipart(form).await
    }
}

/// Deterministic test content of `len` bytes.
pub fn sample_bytes(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 31 % 251) as u8).collect()
}
