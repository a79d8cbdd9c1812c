mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{Factory, TestApp};
use vidshelf::config::DEFAULT_NAME;

#[tokio::test]
async fn test_default_collection_exists() {
    let app = TestApp::new().await;

    let response = app.server.get("/api/collections").await;

    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["total"].as_u64().unwrap(), 1);
    assert_eq!(body["data"][0]["name"].as_str().unwrap(), DEFAULT_NAME);
    assert!(body["data"][0]["is_default"].as_bool().unwrap());
}

#[tokio::test]
async fn test_create_collection() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/collections")
        .json(&json!({
            "name": "Rust 教程"
        }))
        .await;

    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["name"].as_str().unwrap(), "Rust 教程");
    assert!(!body["is_default"].as_bool().unwrap());
    assert_eq!(body["video_count"].as_u64().unwrap(), 0);

    // Default stays first
    let body: serde_json::Value = app.server.get("/api/collections").await.json();
    assert_eq!(body["total"].as_u64().unwrap(), 2);
    assert!(body["data"][0]["is_default"].as_bool().unwrap());
}

#[tokio::test]
async fn test_create_collection_blank_name() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/collections")
        .json(&json!({ "name": "   " }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_default_collection_forbidden() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let default = factory.default_collection().await;

    let response = app
        .server
        .delete(&format!("/api/collections/{}", default.id))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_delete_collection_uncollects_orphans() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let collection = factory.create_collection("Temporary").await;
    let video = factory.create_video("Only here").await;

    app.server
        .put(&format!("/api/collections/{}/videos/{}", collection.id, video.id))
        .await
        .assert_status(StatusCode::OK);

    let response = app
        .server
        .delete(&format!("/api/collections/{}", collection.id))
        .await;
    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = app
        .server
        .get(&format!("/api/videos/{}", video.id))
        .await
        .json();
    assert!(!body["isCollect"].as_bool().unwrap());
    assert_eq!(body["isCollectCount"].as_i64().unwrap(), 0);

    app.server
        .get(&format!("/api/collections/{}", collection.id))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_add_video_is_idempotent() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let collection = factory.create_collection("Favourites").await;
    let video = factory.create_video("Twice").await;
    let path = format!("/api/collections/{}/videos/{}", collection.id, video.id);

    let body: serde_json::Value = app.server.put(&path).await.json();
    assert!(body["changed"].as_bool().unwrap());

    let response = app.server.put(&path).await;
    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert!(!body["changed"].as_bool().unwrap());
    assert!(body["member"].as_bool().unwrap());

    let body: serde_json::Value = app
        .server
        .get(&format!("/api/collections/{}", collection.id))
        .await
        .json();
    assert_eq!(body["video_count"].as_u64().unwrap(), 1);

    let body: serde_json::Value = app
        .server
        .get(&format!("/api/videos/{}", video.id))
        .await
        .json();
    assert!(body["isCollect"].as_bool().unwrap());
    assert_eq!(body["isCollectCount"].as_i64().unwrap(), 1);
}

#[tokio::test]
async fn test_add_missing_video_not_found() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let collection = factory.create_collection("Empty").await;

    let response = app
        .server
        .put(&format!("/api/collections/{}/videos/BV-missing", collection.id))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_remove_non_member_reports_unchanged() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let collection = factory.create_collection("Elsewhere").await;
    let video = factory.create_video("Not here").await;

    let response = app
        .server
        .delete(&format!("/api/collections/{}/videos/{}", collection.id, video.id))
        .await;

    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert!(!body["changed"].as_bool().unwrap());
}

#[tokio::test]
async fn test_collection_videos_in_added_order() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let collection = factory.create_collection("Ordered").await;
    let first = factory.create_video("First").await;
    let second = factory.create_video("Second").await;

    for id in [&second.id, &first.id] {
        app.server
            .put(&format!("/api/collections/{}/videos/{}", collection.id, id))
            .await
            .assert_status(StatusCode::OK);
    }

    let body: Vec<serde_json::Value> = app
        .server
        .get(&format!("/api/collections/{}/videos", collection.id))
        .await
        .json();
    assert_eq!(body.len(), 2);
    assert_eq!(body[0]["id"].as_str().unwrap(), second.id);
}

#[tokio::test]
async fn test_toggle_membership_defaults_to_default_collection() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let video = factory.create_video("Toggle me").await;
    let default = factory.default_collection().await;
    let path = format!("/api/videos/{}/collections/toggle", video.id);

    let body: serde_json::Value = app.server.post(&path).json(&json!({})).await.json();
    assert!(body["member"].as_bool().unwrap());

    let body: Vec<serde_json::Value> = app
        .server
        .get(&format!("/api/videos/{}/collections", video.id))
        .await
        .json();
    assert_eq!(body.len(), 1);
    assert_eq!(body[0]["id"].as_str().unwrap(), default.id);

    let body: serde_json::Value = app.server.post(&path).json(&json!({})).await.json();
    assert!(!body["member"].as_bool().unwrap());

    let body: serde_json::Value = app
        .server
        .get(&format!("/api/videos/{}", video.id))
        .await
        .json();
    assert!(!body["isCollect"].as_bool().unwrap());
}

#[tokio::test]
async fn test_available_and_batch_add() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let video = factory.create_video("Popular").await;
    let music = factory.create_collection("Music").await;
    let games = factory.create_collection("Games").await;

    let body: Vec<serde_json::Value> = app
        .server
        .get(&format!("/api/videos/{}/collections/available", video.id))
        .await
        .json();
    assert_eq!(body.len(), 3);

    let response = app
        .server
        .post(&format!("/api/videos/{}/collections", video.id))
        .json(&json!({
            "collection_ids": [music.id, games.id]
        }))
        .await;
    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert!(body["success"].as_bool().unwrap());

    let body: Vec<serde_json::Value> = app
        .server
        .get(&format!("/api/videos/{}/collections/available", video.id))
        .await
        .json();
    assert_eq!(body.len(), 1);
    assert!(body[0]["is_default"].as_bool().unwrap());

    let body: serde_json::Value = app
        .server
        .get(&format!("/api/videos/{}", video.id))
        .await
        .json();
    assert_eq!(body["isCollectCount"].as_i64().unwrap(), 1);
}

#[tokio::test]
async fn test_batch_add_reports_partial_failure() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let video = factory.create_video("Partial").await;
    let music = factory.create_collection("Music").await;

    let body: serde_json::Value = app
        .server
        .post(&format!("/api/videos/{}/collections", video.id))
        .json(&json!({
            "collection_ids": ["missing-collection", music.id]
        }))
        .await
        .json();
    assert!(!body["success"].as_bool().unwrap());

    let body: Vec<serde_json::Value> = app
        .server
        .get(&format!("/api/videos/{}/collections", video.id))
        .await
        .json();
    assert_eq!(body.len(), 1);
}

#[tokio::test]
async fn test_remove_from_all_collections() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let video = factory.create_video("Everywhere").await;
    let music = factory.create_collection("Music").await;
    let default = factory.default_collection().await;

    app.server
        .post(&format!("/api/videos/{}/collections", video.id))
        .json(&json!({
            "collection_ids": [music.id, default.id]
        }))
        .await
        .assert_status(StatusCode::OK);

    let response = app
        .server
        .delete(&format!("/api/videos/{}/collections", video.id))
        .await;
    response.assert_status(StatusCode::OK);

    let body: Vec<serde_json::Value> = app
        .server
        .get(&format!("/api/videos/{}/collections", video.id))
        .await
        .json();
    assert!(body.is_empty());

    let body: serde_json::Value = app
        .server
        .get(&format!("/api/videos/{}", video.id))
        .await
        .json();
    assert!(!body["isCollect"].as_bool().unwrap());
}

#[tokio::test]
async fn test_video_membership_in_one_collection() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let video = factory.create_video("Member check").await;
    let collection = factory.create_collection("Watch later").await;
    let path = format!("/api/videos/{}/collections/{}", video.id, collection.id);

    let response = app.server.get(&path).await;
    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert!(!body["member"].as_bool().unwrap());

    app.server
        .put(&format!("/api/collections/{}/videos/{}", collection.id, video.id))
        .await
        .assert_status(StatusCode::OK);

    let body: serde_json::Value = app.server.get(&path).await.json();
    assert!(body["member"].as_bool().unwrap());

    let response = app
        .server
        .get(&format!("/api/videos/{}/collections/missing", video.id))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}
