use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tokio::sync::Mutex;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{FeedEnvelope, Video};
use crate::repositories::VideoRepository;

// ============ Page slicing ============

/// Page-by-page view over a list that is already fully loaded.
#[derive(Debug, Clone)]
pub struct Pager<T> {
    page_size: usize,
    items: Vec<T>,
    displayed: usize,
    current_page: usize,
    has_more: bool,
}

impl<T> Pager<T> {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            items: Vec::new(),
            displayed: 0,
            current_page: 0,
            has_more: false,
        }
    }

    /// Replace the backing list and show its first page
    pub fn refresh(&mut self, items: Vec<T>) {
        self.displayed = items.len().min(self.page_size);
        self.has_more = items.len() > self.page_size;
        self.current_page = 0;
        self.items = items;
    }

    /// Append the next page; returns it, or `None` once everything is shown
    pub fn next_page(&mut self) -> Option<&[T]> {
        let start = (self.current_page + 1) * self.page_size;
        if start >= self.items.len() {
            self.has_more = false;
            return None;
        }

        let end = (start + self.page_size).min(self.items.len());
        self.current_page += 1;
        self.displayed = end;
        self.has_more = end < self.items.len();
        Some(&self.items[start..end])
    }

    /// Slice of page `index` without moving the cursor
    pub fn page(&self, index: usize) -> &[T] {
        let start = index.saturating_mul(self.page_size).min(self.items.len());
        let end = (start + self.page_size).min(self.items.len());
        &self.items[start..end]
    }

    /// Whether anything exists after page `index`
    pub fn has_more_after(&self, index: usize) -> bool {
        index
            .checked_add(1)
            .and_then(|next| next.checked_mul(self.page_size))
            .is_some_and(|start| start < self.items.len())
    }

    pub fn displayed(&self) -> &[T] {
        &self.items[..self.displayed]
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }
}

// ============ Recommend feed source ============

/// Where the recommend feed comes from
#[async_trait]
pub trait RecommendSource: Send + Sync {
    async fn fetch(&self, page: u64, page_size: u64) -> AppResult<Vec<Video>>;
}

/// Fetches `GET {url}?page=..&pagesize=..` and decodes the feed envelope
pub struct HttpRecommendSource {
    client: reqwest::Client,
    url: String,
    token: Option<String>,
}

impl HttpRecommendSource {
    pub fn new(url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            token,
        }
    }
}

#[async_trait]
impl RecommendSource for HttpRecommendSource {
    async fn fetch(&self, page: u64, page_size: u64) -> AppResult<Vec<Video>> {
        let separator = if self.url.contains('?') { '&' } else { '?' };
        let url = format!("{}{}page={}&pagesize={}", self.url, separator, page, page_size);

        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.header(reqwest::header::AUTHORIZATION, token);
        }

        tracing::debug!(%url, "Requesting recommend feed");
        let envelope: FeedEnvelope = request.send().await?.error_for_status()?.json().await?;

        if envelope.code != 0 {
            return Err(AppError::Upstream(format!(
                "feed returned code {}: {}",
                envelope.code, envelope.msg
            )));
        }

        envelope
            .data
            .ok_or_else(|| AppError::Upstream("feed returned no data".to_string()))
    }
}

/// Serves the feed straight from the local store
pub struct StoreRecommendSource {
    db: DatabaseConnection,
}

impl StoreRecommendSource {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RecommendSource for StoreRecommendSource {
    async fn fetch(&self, page: u64, page_size: u64) -> AppResult<Vec<Video>> {
        VideoRepository::page(&self.db, page, page_size).await
    }
}

// ============ Recommend feed state ============

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FeedSnapshot {
    pub videos: Vec<Video>,
    pub is_loading: bool,
    pub initialized: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoadOutcome {
    Loaded { appended: usize },
    /// Another load is still running
    Busy,
    AlreadyInitialized,
}

struct FeedState {
    videos: Vec<Video>,
    initialized: bool,
}

/// In-memory recommend feed.
///
/// One load runs at a time; overlapping requests report [`LoadOutcome::Busy`]
/// instead of queueing.
pub struct RecommendFeed {
    state: Mutex<FeedState>,
    loading: AtomicBool,
    batch_size: usize,
    delay: Duration,
}

/// Clears the loading flag when a load finishes, however it finishes
struct LoadingGuard<'a>(&'a AtomicBool);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl RecommendFeed {
    pub fn new(videos: Vec<Video>, batch_size: usize, delay: Duration) -> Self {
        Self {
            state: Mutex::new(FeedState {
                videos,
                initialized: false,
            }),
            loading: AtomicBool::new(false),
            batch_size: batch_size.max(1),
            delay,
        }
    }

    fn begin_load(&self) -> Option<LoadingGuard<'_>> {
        self.loading
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| LoadingGuard(&self.loading))
    }

    /// First page from `source`, persisted once.
    ///
    /// Only the first successful call has any effect. On failure the feed is
    /// left untouched and the error is returned.
    pub async fn load_initial(
        &self,
        db: &DatabaseConnection,
        source: &dyn RecommendSource,
    ) -> AppResult<LoadOutcome> {
        let Some(_guard) = self.begin_load() else {
            return Ok(LoadOutcome::Busy);
        };
        // Checked under the load guard
        if self.state.lock().await.initialized {
            return Ok(LoadOutcome::AlreadyInitialized);
        }

        let fetched = match source.fetch(0, self.batch_size as u64).await {
            Ok(videos) => videos,
            Err(e) => {
                tracing::warn!(error = %e, "Initial feed load failed");
                return Err(e);
            }
        };

        VideoRepository::insert_many(db, &fetched).await?;

        // Already-stored videos keep their local engagement state
        let ids: Vec<String> = fetched.into_iter().map(|v| v.id).collect();
        let videos = VideoRepository::find_many(db, &ids).await?;

        let mut state = self.state.lock().await;
        let appended = videos.len();
        state.videos = videos;
        state.initialized = true;
        tracing::info!(count = appended, "Recommend feed initialised");

        Ok(LoadOutcome::Loaded { appended })
    }

    /// Simulated next page: after the configured delay, the first
    /// `batch_size` videos are duplicated under fresh ids and appended.
    ///
    /// The copies are stored so they can be liked or collected like any
    /// other video.
    pub async fn load_more(&self, db: &DatabaseConnection) -> AppResult<LoadOutcome> {
        let Some(_guard) = self.begin_load() else {
            return Ok(LoadOutcome::Busy);
        };

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let copies: Vec<Video> = {
            let state = self.state.lock().await;
            state
                .videos
                .iter()
                .take(self.batch_size)
                .map(|v| v.duplicate_with_id(Uuid::new_v4().to_string()))
                .collect()
        };

        if copies.is_empty() {
            return Ok(LoadOutcome::Loaded { appended: 0 });
        }

        VideoRepository::insert_many(db, &copies).await?;

        let appended = copies.len();
        self.state.lock().await.videos.extend(copies);
        tracing::debug!(appended, "Appended feed page");

        Ok(LoadOutcome::Loaded { appended })
    }

    /// Reload the in-memory list from the store (picks up engagement changes)
    pub async fn refresh(&self, db: &DatabaseConnection) -> AppResult<usize> {
        let videos = VideoRepository::all(db).await?;
        let count = videos.len();
        self.state.lock().await.videos = videos;
        Ok(count)
    }

    /// Replace the in-memory copy of `video`, if the feed holds it
    pub async fn sync(&self, video: &Video) {
        let mut state = self.state.lock().await;
        if let Some(slot) = state.videos.iter_mut().find(|v| v.id == video.id) {
            *slot = video.clone();
        }
    }

    pub async fn forget(&self, video_id: &str) {
        self.state.lock().await.videos.retain(|v| v.id != video_id);
    }

    /// Drop every video; the next `load_initial` fetches again
    pub async fn forget_all(&self) {
        let mut state = self.state.lock().await;
        state.videos.clear();
        state.initialized = false;
    }

    /// Case-insensitive title filter over the current feed
    pub async fn search(&self, title: &str) -> Vec<Video> {
        let title = title.trim();
        let state = self.state.lock().await;
        state
            .videos
            .iter()
            .filter(|v| v.title_matches(title))
            .cloned()
            .collect()
    }

    pub async fn snapshot(&self) -> FeedSnapshot {
        let state = self.state.lock().await;
        FeedSnapshot {
            videos: state.videos.clone(),
            is_loading: self.loading.load(Ordering::Acquire),
            initialized: state.initialized,
        }
    }
}
