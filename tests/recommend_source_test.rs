mod common;

use std::collections::HashMap;

use axum::{
    extract::Query,
    http::{header::AUTHORIZATION, HeaderMap},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use common::video;
use vidshelf::error::AppError;
use vidshelf::models::FeedEnvelope;
use vidshelf::services::{HttpRecommendSource, RecommendSource};

/// Echoes the Authorization header as the title and the paging query as the id
async fn echo_feed(
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Json<FeedEnvelope> {
    let mut echoed = video("untitled");
    echoed.title = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    echoed.id = format!(
        "{}-{}",
        query.get("page").cloned().unwrap_or_default(),
        query.get("pagesize").cloned().unwrap_or_default()
    );
    Json(FeedEnvelope::ok(vec![echoed]))
}

async fn failing_feed() -> Json<Value> {
    Json(json!({ "code": 1, "data": null, "msg": "token expired" }))
}

async fn empty_feed() -> Json<Value> {
    Json(json!({ "code": 0, "data": null, "msg": "success" }))
}

/// Serve a fake upstream on an ephemeral port and return its base URL
async fn spawn_upstream() -> String {
    let router = Router::new()
        .route("/ok", get(echo_feed))
        .route("/error", get(failing_feed))
        .route("/empty", get(empty_feed));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind upstream");
    let addr = listener.local_addr().expect("Failed to read upstream address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Upstream stopped");
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_fetch_forwards_token_and_paging() {
    let base = spawn_upstream().await;
    let source =
        HttpRecommendSource::new(format!("{}/ok", base), Some("secret-token".to_string()));

    let videos = source.fetch(3, 8).await.unwrap();

    assert_eq!(videos.len(), 1);
    assert_eq!(videos[0].title, "secret-token");
    assert_eq!(videos[0].id, "3-8");
}

#[tokio::test]
async fn test_fetch_without_token_sends_no_header() {
    let base = spawn_upstream().await;
    let source = HttpRecommendSource::new(format!("{}/ok", base), None);

    let videos = source.fetch(0, 2).await.unwrap();

    assert_eq!(videos[0].title, "");
    assert_eq!(videos[0].id, "0-2");
}

#[tokio::test]
async fn test_fetch_non_zero_code_is_upstream_error() {
    let base = spawn_upstream().await;
    let source =
        HttpRecommendSource::new(format!("{}/error", base), Some("secret-token".to_string()));

    let result = source.fetch(0, 8).await;

    match result {
        Err(AppError::Upstream(msg)) => assert!(msg.contains("token expired")),
        other => panic!("expected upstream error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_missing_data_is_upstream_error() {
    let base = spawn_upstream().await;
    let source = HttpRecommendSource::new(format!("{}/empty", base), None);

    let result = source.fetch(0, 8).await;

    assert!(matches!(result, Err(AppError::Upstream(_))));
}

#[tokio::test]
async fn test_fetch_unreachable_upstream_is_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let source = HttpRecommendSource::new(format!("http://{}/ok", addr), None);

    let result = source.fetch(0, 8).await;

    assert!(result.is_err());
}
