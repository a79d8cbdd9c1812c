use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::AppResult;
use crate::models::FeedEnvelope;
use crate::repositories::VideoRepository;
use crate::state::AppState;

#[derive(Debug, Deserialize, IntoParams)]
pub struct RecommendParams {
    /// Zero-based page index
    #[param(default = 0, minimum = 0)]
    pub page: Option<u64>,
    #[param(default = 8, minimum = 1)]
    pub pagesize: Option<u64>,
}

/// Recommend feed served from the local store
#[utoipa::path(
    get,
    path = "/user/video/recommend",
    params(RecommendParams),
    responses(
        (status = 200, description = "Feed envelope", body = FeedEnvelope)
    ),
    tag = "Recommend"
)]
pub async fn recommend(
    State(state): State<AppState>,
    Query(params): Query<RecommendParams>,
) -> AppResult<Json<FeedEnvelope>> {
    let page = params.page.unwrap_or(0);
    let page_size = params
        .pagesize
        .unwrap_or(state.config.feed_batch_size as u64)
        .max(1);

    let videos = VideoRepository::page(&state.db, page, page_size).await?;
    Ok(Json(FeedEnvelope::ok(videos)))
}
