use axum::{
    extract::{Query, State},
    Json,
};

use crate::error::AppResult;
use crate::handlers::TitleQuery;
use crate::models::Video;
use crate::services::{FeedSnapshot, LoadOutcome};
use crate::state::AppState;

/// Current recommend feed
#[utoipa::path(
    get,
    path = "/api/feed",
    responses(
        (status = 200, description = "Feed snapshot", body = FeedSnapshot)
    ),
    tag = "Feed"
)]
pub async fn get_feed(State(state): State<AppState>) -> Json<FeedSnapshot> {
    Json(state.feed.snapshot().await)
}

/// Fetch the first page from the recommend source (once)
#[utoipa::path(
    post,
    path = "/api/feed/load",
    responses(
        (status = 200, description = "Load outcome", body = LoadOutcome),
        (status = 502, description = "Recommend source failed")
    ),
    tag = "Feed"
)]
pub async fn load_feed(State(state): State<AppState>) -> AppResult<Json<LoadOutcome>> {
    let outcome = state
        .feed
        .load_initial(&state.db, state.recommend_source.as_ref())
        .await?;
    Ok(Json(outcome))
}

/// Append the next page
#[utoipa::path(
    post,
    path = "/api/feed/more",
    responses(
        (status = 200, description = "Load outcome", body = LoadOutcome)
    ),
    tag = "Feed"
)]
pub async fn load_more_feed(State(state): State<AppState>) -> AppResult<Json<LoadOutcome>> {
    let outcome = state.feed.load_more(&state.db).await?;
    Ok(Json(outcome))
}

/// Search the feed by title
#[utoipa::path(
    get,
    path = "/api/feed/search",
    params(TitleQuery),
    responses(
        (status = 200, description = "Matching videos", body = Vec<Video>)
    ),
    tag = "Feed"
)]
pub async fn search_feed(
    State(state): State<AppState>,
    Query(query): Query<TitleQuery>,
) -> Json<Vec<Video>> {
    Json(state.feed.search(&query.title).await)
}

/// Reload the feed from every stored video
#[utoipa::path(
    post,
    path = "/api/feed/refresh",
    responses(
        (status = 200, description = "Feed snapshot after the reload", body = FeedSnapshot)
    ),
    tag = "Feed"
)]
pub async fn refresh_feed(State(state): State<AppState>) -> AppResult<Json<FeedSnapshot>> {
    let count = state.feed.refresh(&state.db).await?;
    tracing::debug!(count, "Feed reloaded from store");
    Ok(Json(state.feed.snapshot().await))
}
