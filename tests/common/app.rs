use std::sync::Arc;

use async_trait::async_trait;
use axum_test::TestServer;
use vidshelf::build_router;
use vidshelf::config::{Config, DEFAULT_NAME};
use vidshelf::error::{AppError, AppResult};
use vidshelf::models::Video;
use vidshelf::services::RecommendSource;
use vidshelf::state::AppState;

/// Test configuration
pub fn test_config() -> Config {
    Config {
        // One connection so every query sees the same in-memory database
        database_url: "sqlite::memory:".to_string(),
        database_max_connections: 1,
        host: "127.0.0.1".to_string(),
        port: 0,
        default_collection_name: DEFAULT_NAME.to_string(),
        default_favorite_name: DEFAULT_NAME.to_string(),
        feed_batch_size: 8,
        feed_load_delay_ms: 0,
        home_page_size: 10,
        recommend_url: None,
        recommend_token: None,
        seed_samples: false,
    }
}

/// Recommend source returning a fixed list
pub struct StaticSource {
    pub videos: Vec<Video>,
}

#[async_trait]
impl RecommendSource for StaticSource {
    async fn fetch(&self, page: u64, page_size: u64) -> AppResult<Vec<Video>> {
        Ok(self
            .videos
            .iter()
            .skip((page * page_size) as usize)
            .take(page_size as usize)
            .cloned()
            .collect())
    }
}

/// Recommend source that always fails
pub struct FailingSource;

#[async_trait]
impl RecommendSource for FailingSource {
    async fn fetch(&self, _page: u64, _page_size: u64) -> AppResult<Vec<Video>> {
        Err(AppError::Upstream("connection refused".to_string()))
    }
}

/// Test application wrapper
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
}

#[allow(dead_code)]
impl TestApp {
    /// Create a new test application with an empty recommend source
    pub async fn new() -> Self {
        Self::with_config(test_config(), Arc::new(StaticSource { videos: Vec::new() })).await
    }

    /// Create a test application whose feed is served from `videos`
    pub async fn with_feed(videos: Vec<Video>) -> Self {
        Self::with_config(test_config(), Arc::new(StaticSource { videos })).await
    }

    pub async fn with_config(config: Config, source: Arc<dyn RecommendSource>) -> Self {
        let state = AppState::with_source(config, source)
            .await
            .expect("Failed to create test app state");

        let router = build_router(state.clone());
        let server = TestServer::new(router).expect("Failed to create test server");

        Self { server, state }
    }
}
