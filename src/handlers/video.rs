use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppResult;
use crate::handlers::{PaginationParams, TitleQuery};
use crate::models::{StatusUpdate, Video};
use crate::repositories::{Repository, VideoRepository};
use crate::services::{interaction, Action, CollectionService};
use crate::state::AppState;

// ============ Request/Response DTOs ============

#[derive(Debug, Serialize, ToSchema)]
pub struct VideoListResponse {
    pub data: Vec<Video>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct InsertVideosResponse {
    /// Rows written; videos whose id was already stored are skipped
    pub inserted: u64,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ClearVideosResponse {
    pub deleted: u64,
}

// ============ Handlers ============

/// List stored videos in insertion order
#[utoipa::path(
    get,
    path = "/api/videos",
    params(PaginationParams),
    responses(
        (status = 200, description = "List of videos", body = VideoListResponse)
    ),
    tag = "Videos"
)]
pub async fn list_videos(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<VideoListResponse>> {
    let (limit, offset) = params.resolve();

    let videos = VideoRepository::list(&state.db, limit, offset).await?;
    let total = VideoRepository::count(&state.db).await?;

    Ok(Json(VideoListResponse {
        data: videos,
        total,
        limit,
        offset,
    }))
}

/// Store a batch of videos
#[utoipa::path(
    post,
    path = "/api/videos",
    request_body = Vec<Video>,
    responses(
        (status = 200, description = "Videos stored", body = InsertVideosResponse),
        (status = 400, description = "Validation error")
    ),
    tag = "Videos"
)]
pub async fn insert_videos(
    State(state): State<AppState>,
    Json(payload): Json<Vec<Video>>,
) -> AppResult<Json<InsertVideosResponse>> {
    let inserted = VideoRepository::insert_many(&state.db, &payload).await?;
    Ok(Json(InsertVideosResponse { inserted }))
}

/// Delete every stored video
#[utoipa::path(
    delete,
    path = "/api/videos",
    responses(
        (status = 200, description = "Videos deleted", body = ClearVideosResponse)
    ),
    tag = "Videos"
)]
pub async fn clear_videos(State(state): State<AppState>) -> AppResult<Json<ClearVideosResponse>> {
    let deleted = VideoRepository::clear(&state.db).await?;
    state.feed.forget_all().await;
    Ok(Json(ClearVideosResponse { deleted }))
}

/// Search stored videos by title
#[utoipa::path(
    get,
    path = "/api/videos/search",
    params(TitleQuery),
    responses(
        (status = 200, description = "Matching videos", body = Vec<Video>)
    ),
    tag = "Videos"
)]
pub async fn search_videos(
    State(state): State<AppState>,
    Query(query): Query<TitleQuery>,
) -> AppResult<Json<Vec<Video>>> {
    let videos = VideoRepository::search_by_title(&state.db, query.title.trim()).await?;
    Ok(Json(videos))
}

/// Get a video by ID
#[utoipa::path(
    get,
    path = "/api/videos/{id}",
    params(
        ("id" = String, Path, description = "Video ID")
    ),
    responses(
        (status = 200, description = "Video details", body = Video),
        (status = 404, description = "Video not found")
    ),
    tag = "Videos"
)]
pub async fn get_video(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Video>> {
    let video = VideoRepository::find_by_id(&state.db, &id).await?;
    Ok(Json(video))
}

/// Delete a video and its collection memberships
#[utoipa::path(
    delete,
    path = "/api/videos/{id}",
    params(
        ("id" = String, Path, description = "Video ID")
    ),
    responses(
        (status = 200, description = "Video deleted"),
        (status = 404, description = "Video not found")
    ),
    tag = "Videos"
)]
pub async fn delete_video(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<()> {
    VideoRepository::delete(&state.db, &id).await?;
    state.feed.forget(&id).await;
    Ok(())
}

/// Apply a partial engagement update
#[utoipa::path(
    patch,
    path = "/api/videos/{id}/status",
    params(
        ("id" = String, Path, description = "Video ID")
    ),
    request_body = StatusUpdate,
    responses(
        (status = 200, description = "Updated video", body = Video),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Video not found")
    ),
    tag = "Videos"
)]
pub async fn update_video_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<StatusUpdate>,
) -> AppResult<Json<Video>> {
    let video = CollectionService::update_status(&state.db, &id, &payload).await?;
    state.feed.sync(&video).await;
    Ok(Json(video))
}

/// Flip one engagement flag (like, dislike, coin, collect, follow)
#[utoipa::path(
    post,
    path = "/api/videos/{id}/toggle/{action}",
    params(
        ("id" = String, Path, description = "Video ID"),
        ("action" = String, Path, description = "like | dislike | coin | collect | follow")
    ),
    responses(
        (status = 200, description = "Updated video", body = Video),
        (status = 400, description = "Unknown action"),
        (status = 404, description = "Video not found")
    ),
    tag = "Videos"
)]
pub async fn toggle_video(
    State(state): State<AppState>,
    Path((id, action)): Path<(String, String)>,
) -> AppResult<Json<Video>> {
    let action: Action = action.parse()?;
    let current = VideoRepository::find_by_id(&state.db, &id).await?;
    let update = interaction::toggle_update(&current, action);

    let video = CollectionService::update_status(&state.db, &id, &update).await?;
    state.feed.sync(&video).await;
    Ok(Json(video))
}
