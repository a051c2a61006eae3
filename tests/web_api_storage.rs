//! Web API Storage Tests
//!
//! Integration tests for the storage endpoints.

mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

use common::create_test_app;

#[tokio::test]
async fn test_create_and_list_storages() {
    let app = create_test_app().await;

    let first = app.create_storage("first", true).await;
    let second = app.create_storage("second", false).await;

    assert!(first["id"].as_i64().unwrap() > 0);
    assert_eq!(first["is_default"], true);
    assert_eq!(second["is_default"], false);

    let response = app.server.get("/storage").await;
    response.assert_status_ok();

    let storages = response.json::<Value>();
    let storages = storages.as_array().unwrap();
    assert_eq!(storages.len(), 2);
    assert_eq!(storages[0]["id"], first["id"]);
    assert_eq!(storages[1]["id"], second["id"]);
}

#[tokio::test]
async fn test_new_default_replaces_previous() {
    let app = create_test_app().await;

    let first = app.create_storage("first", true).await;
    let second = app.create_storage("second", true).await;

    let storages = app.server.get("/storage").await.json::<Value>();
    let defaults: Vec<_> = storages
        .as_array()
        .unwrap()
        .iter()
        .filter(|s| s["is_default"] == true)
        .collect();

    assert_eq!(defaults.len(), 1);
    assert_eq!(defaults[0]["id"], second["id"]);

    let first = app
        .server
        .get(&format!("/storage/{}", first["id"]))
        .await
        .json::<Value>();
    assert_eq!(first["is_default"], false);
}

#[tokio::test]
async fn test_get_storage() {
    let app = create_test_app().await;
    let created = app.create_storage("data", true).await;

    let response = app.server.get(&format!("/storage/{}", created["id"])).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), created);
}

#[tokio::test]
async fn test_get_storage_not_found() {
    let app = create_test_app().await;

    let response = app.server.get("/storage/9999").await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body = response.json::<Value>();
    assert_eq!(body["error"], "NOT_FOUND");
    assert_eq!(body["message"], "storage 9999 not found");
}

#[tokio::test]
async fn test_create_storage_validation() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/storage")
        .json(&json!({"path": "   ", "is_default": true}))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let body = response.json::<Value>();
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"]["path"].is_array());

    let storages = app.server.get("/storage").await.json::<Value>();
    assert!(storages.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_storage_invalid_json() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/storage")
        .json(&json!({"is_default": true}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_modify_storage_default() {
    let app = create_test_app().await;
    let first = app.create_storage("first", true).await;
    let second = app.create_storage("second", false).await;

    let response = app
        .server
        .put(&format!("/storage/{}", second["id"]))
        .json(&json!({"is_default": true}))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["is_default"], true);

    let first = app
        .server
        .get(&format!("/storage/{}", first["id"]))
        .await
        .json::<Value>();
    assert_eq!(first["is_default"], false);
}

#[tokio::test]
async fn test_modify_storage_path() {
    let app = create_test_app().await;
    let storage = app.create_storage("old", false).await;
    let new_path = app.storage_dir("new");

    let response = app
        .server
        .put(&format!("/storage/{}", storage["id"]))
        .json(&json!({"path": new_path.to_string_lossy()}))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["path"], &*new_path.to_string_lossy());
}

#[tokio::test]
async fn test_modify_storage_path_with_files_conflicts() {
    let app = create_test_app().await;
    let storage = app.create_storage("busy", true).await;
    app.upload("a.txt", b"a".to_vec()).await.assert_status_ok();

    let response = app
        .server
        .put(&format!("/storage/{}", storage["id"]))
        .json(&json!({"path": "/somewhere/else"}))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["error"], "CONFLICT");
}

#[tokio::test]
async fn test_modify_storage_not_found() {
    let app = create_test_app().await;

    let response = app
        .server
        .put("/storage/42")
        .json(&json!({"is_default": true}))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_storage() {
    let app = create_test_app().await;
    let storage = app.create_storage("temp", false).await;

    let response = app
        .server
        .delete(&format!("/storage/{}", storage["id"]))
        .await;
    response.assert_status_ok();

    app.server
        .get(&format!("/storage/{}", storage["id"]))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_storage_with_files_conflicts() {
    let app = create_test_app().await;
    let storage = app.create_storage("busy", true).await;
    let file = app.upload("keep.txt", b"keep".to_vec()).await.json::<Value>();

    let response = app
        .server
        .delete(&format!("/storage/{}", storage["id"]))
        .await;
    response.assert_status(StatusCode::CONFLICT);

    // Once the file is gone the storage can be deleted
    app.server
        .delete(&format!("/files/{}", file["id"]))
        .await
        .assert_status_ok();
    app.server
        .delete(&format!("/storage/{}", storage["id"]))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_delete_storage_not_found() {
    let app = create_test_app().await;

    let response = app.server.delete("/storage/5").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_auth_placeholders() {
    let app = create_test_app().await;

    let response = app.server.post("/auth/register").await;
    response.assert_status_ok();
    assert_eq!(response.text(), "register");

    let response = app.server.post("/auth/tokens/access").await;
    response.assert_status_ok();
    assert_eq!(response.text(), "token");
}
