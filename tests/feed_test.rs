mod common;

use std::sync::Arc;

use axum::http::StatusCode;

use common::{test_config, video, FailingSource, Factory, TestApp};

fn catalogue(n: usize) -> Vec<vidshelf::models::Video> {
    (0..n).map(|i| video(&format!("Recommended {}", i))).collect()
}

#[tokio::test]
async fn test_feed_starts_uninitialised() {
    let app = TestApp::new().await;

    let response = app.server.get("/api/feed").await;

    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert!(!body["initialized"].as_bool().unwrap());
    assert!(!body["is_loading"].as_bool().unwrap());
    assert!(body["videos"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_initial_load_fetches_one_batch_once() {
    let app = TestApp::with_feed(catalogue(10)).await;

    let response = app.server.post("/api/feed/load").await;

    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"].as_str().unwrap(), "loaded");
    assert_eq!(body["appended"].as_u64().unwrap(), 8);

    let body: serde_json::Value = app.server.post("/api/feed/load").await.json();
    assert_eq!(body["status"].as_str().unwrap(), "already_initialized");

    let body: serde_json::Value = app.server.get("/api/feed").await.json();
    assert!(body["initialized"].as_bool().unwrap());
    assert_eq!(body["videos"].as_array().unwrap().len(), 8);

    // Fetched videos are persisted
    let body: serde_json::Value = app.server.get("/api/videos").await.json();
    assert_eq!(body["total"].as_u64().unwrap(), 8);
}

#[tokio::test]
async fn test_failed_initial_load_leaves_feed_untouched() {
    let app = TestApp::with_config(test_config(), Arc::new(FailingSource)).await;

    let response = app.server.post("/api/feed/load").await;

    response.assert_status(StatusCode::BAD_GATEWAY);

    let body: serde_json::Value = app.server.get("/api/feed").await.json();
    assert!(!body["initialized"].as_bool().unwrap());
    assert!(!body["is_loading"].as_bool().unwrap());
}

#[tokio::test]
async fn test_load_more_duplicates_first_batch() {
    let app = TestApp::with_feed(catalogue(3)).await;
    app.server.post("/api/feed/load").await.assert_status(StatusCode::OK);

    let response = app.server.post("/api/feed/more").await;

    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["appended"].as_u64().unwrap(), 3);

    let body: serde_json::Value = app.server.get("/api/feed").await.json();
    let videos = body["videos"].as_array().unwrap();
    assert_eq!(videos.len(), 6);
    assert_eq!(videos[3]["title"], videos[0]["title"]);
    assert_ne!(videos[3]["id"], videos[0]["id"]);

    // Copies can be interacted with
    let copy_id = videos[3]["id"].as_str().unwrap();
    app.server
        .post(&format!("/api/videos/{}/toggle/like", copy_id))
        .await
        .assert_status(StatusCode::OK);
}

#[tokio::test]
async fn test_load_more_on_empty_feed() {
    let app = TestApp::new().await;

    let body: serde_json::Value = app.server.post("/api/feed/more").await.json();

    assert_eq!(body["status"].as_str().unwrap(), "loaded");
    assert_eq!(body["appended"].as_u64().unwrap(), 0);
}

#[tokio::test]
async fn test_search_feed() {
    let videos = vec![video("Rust 宏编程"), video("rust async"), video("Go channels")];
    let app = TestApp::with_feed(videos).await;
    app.server.post("/api/feed/load").await.assert_status(StatusCode::OK);

    let body: Vec<serde_json::Value> = app
        .server
        .get("/api/feed/search")
        .add_query_param("title", "RUST")
        .await
        .json();
    assert_eq!(body.len(), 2);

    let body: Vec<serde_json::Value> = app.server.get("/api/feed/search").await.json();
    assert_eq!(body.len(), 3);
}

#[tokio::test]
async fn test_interactions_show_in_feed() {
    let app = TestApp::with_feed(catalogue(2)).await;
    app.server.post("/api/feed/load").await.assert_status(StatusCode::OK);

    let body: serde_json::Value = app.server.get("/api/feed").await.json();
    let id = body["videos"][0]["id"].as_str().unwrap().to_string();

    app.server
        .post(&format!("/api/videos/{}/toggle/collect", id))
        .await
        .assert_status(StatusCode::OK);

    let body: serde_json::Value = app.server.get("/api/feed").await.json();
    assert!(body["videos"][0]["isCollect"].as_bool().unwrap());
    assert_eq!(body["videos"][0]["isCollectCount"].as_i64().unwrap(), 1);
}

#[tokio::test]
async fn test_initial_load_keeps_stored_engagement() {
    let stored = video("Already liked");
    let app = TestApp::with_feed(vec![stored.clone()]).await;
    app.server
        .post("/api/videos")
        .json(&vec![stored.clone()])
        .await
        .assert_status(StatusCode::OK);
    app.server
        .post(&format!("/api/videos/{}/toggle/like", stored.id))
        .await
        .assert_status(StatusCode::OK);

    let body: serde_json::Value = app.server.post("/api/feed/load").await.json();
    assert_eq!(body["status"].as_str().unwrap(), "loaded");

    let body: serde_json::Value = app.server.get("/api/feed").await.json();
    let videos = body["videos"].as_array().unwrap();
    assert_eq!(videos.len(), 1);
    assert_eq!(videos[0]["id"].as_str().unwrap(), stored.id);
    assert!(videos[0]["isLike"].as_bool().unwrap());
    assert_eq!(videos[0]["isLikeCount"].as_i64().unwrap(), 6);
}

#[tokio::test]
async fn test_refresh_reloads_feed_from_store() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let first = factory.create_video("Stored first").await;
    factory.create_video("Stored second").await;

    let body: serde_json::Value = app.server.get("/api/feed").await.json();
    assert!(body["videos"].as_array().unwrap().is_empty());

    let response = app.server.post("/api/feed/refresh").await;

    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    let videos = body["videos"].as_array().unwrap();
    assert_eq!(videos.len(), 2);
    assert_eq!(videos[0]["id"].as_str().unwrap(), first.id);
    assert_eq!(videos[1]["title"].as_str().unwrap(), "Stored second");
}
