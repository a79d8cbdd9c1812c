use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::{AppError, AppResult};
use crate::handlers::validate_required;
use crate::models::{FavoriteList, SavedVideo};
use crate::repositories::{FavoriteRepository, SavedVideoRepository};
use crate::services::Pager;
use crate::state::AppState;

// ============ Request/Response DTOs ============

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSavedVideoRequest {
    pub name: String,
    pub cover_image: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateFavoriteListRequest {
    pub name: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct PageParams {
    /// Zero-based page index
    #[param(default = 0, minimum = 0)]
    pub page: Option<usize>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct SavedVideoPageResponse {
    pub data: Vec<SavedVideo>,
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
    pub has_more: bool,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct FavoriteLinkResponse {
    /// Whether the request changed the list
    pub changed: bool,
}

// ============ Saved video handlers ============

/// All saved videos
#[utoipa::path(
    get,
    path = "/api/saved-videos",
    responses(
        (status = 200, description = "Saved videos", body = Vec<SavedVideo>)
    ),
    tag = "Favorites"
)]
pub async fn list_saved_videos(State(state): State<AppState>) -> AppResult<Json<Vec<SavedVideo>>> {
    let videos = SavedVideoRepository::all(&state.db).await?;
    Ok(Json(videos))
}

/// Save a video
#[utoipa::path(
    post,
    path = "/api/saved-videos",
    request_body = CreateSavedVideoRequest,
    responses(
        (status = 200, description = "Saved video", body = SavedVideo),
        (status = 400, description = "Validation error")
    ),
    tag = "Favorites"
)]
pub async fn create_saved_video(
    State(state): State<AppState>,
    Json(payload): Json<CreateSavedVideoRequest>,
) -> AppResult<Json<SavedVideo>> {
    validate_required(&payload.name, "Name", 200)?;

    let video = SavedVideoRepository::add(&state.db, &payload.name, &payload.cover_image).await?;
    Ok(Json(video))
}

/// One page of saved videos, sized by `HOME_PAGE_SIZE`
#[utoipa::path(
    get,
    path = "/api/saved-videos/page",
    params(PageParams),
    responses(
        (status = 200, description = "Page of saved videos", body = SavedVideoPageResponse)
    ),
    tag = "Favorites"
)]
pub async fn saved_videos_page(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<SavedVideoPageResponse>> {
    let page = params.page.unwrap_or(0);

    let videos = SavedVideoRepository::all(&state.db).await?;
    let total = videos.len();

    let mut pager = Pager::new(state.config.home_page_size);
    pager.refresh(videos);

    Ok(Json(SavedVideoPageResponse {
        data: pager.page(page).to_vec(),
        page,
        page_size: state.config.home_page_size.max(1),
        total,
        has_more: pager.has_more_after(page),
    }))
}

// ============ Favorite list handlers ============

/// All favorite lists, default first
#[utoipa::path(
    get,
    path = "/api/favorites",
    responses(
        (status = 200, description = "Favorite lists", body = Vec<FavoriteList>)
    ),
    tag = "Favorites"
)]
pub async fn list_favorites(State(state): State<AppState>) -> AppResult<Json<Vec<FavoriteList>>> {
    let lists = FavoriteRepository::lists(&state.db).await?;
    Ok(Json(lists))
}

/// Create a favorite list
#[utoipa::path(
    post,
    path = "/api/favorites",
    request_body = CreateFavoriteListRequest,
    responses(
        (status = 200, description = "Favorite list created", body = FavoriteList),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Name already taken")
    ),
    tag = "Favorites"
)]
pub async fn create_favorite(
    State(state): State<AppState>,
    Json(payload): Json<CreateFavoriteListRequest>,
) -> AppResult<Json<FavoriteList>> {
    validate_required(&payload.name, "Name", 100)?;

    let list = FavoriteRepository::create_list(&state.db, payload.name.trim()).await?;
    Ok(Json(list))
}

/// Delete a favorite list; the default list is protected
#[utoipa::path(
    delete,
    path = "/api/favorites/{id}",
    params(
        ("id" = i64, Path, description = "Favorite list ID")
    ),
    responses(
        (status = 200, description = "Favorite list deleted"),
        (status = 403, description = "Default list cannot be deleted"),
        (status = 404, description = "Favorite list not found")
    ),
    tag = "Favorites"
)]
pub async fn delete_favorite(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<()> {
    if !FavoriteRepository::delete_list(&state.db, id).await? {
        return Err(AppError::NotFound("Favorite list".to_string()));
    }
    Ok(())
}

/// Saved videos linked to a favorite list
#[utoipa::path(
    get,
    path = "/api/favorites/{id}/videos",
    params(
        ("id" = i64, Path, description = "Favorite list ID")
    ),
    responses(
        (status = 200, description = "Videos in the list", body = Vec<SavedVideo>),
        (status = 404, description = "Favorite list not found")
    ),
    tag = "Favorites"
)]
pub async fn list_favorite_videos(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<SavedVideo>>> {
    let videos = FavoriteRepository::videos_in(&state.db, id).await?;
    Ok(Json(videos))
}

/// Link a saved video to a favorite list (idempotent)
#[utoipa::path(
    put,
    path = "/api/favorites/{id}/videos/{video_id}",
    params(
        ("id" = i64, Path, description = "Favorite list ID"),
        ("video_id" = i64, Path, description = "Saved video ID")
    ),
    responses(
        (status = 200, description = "Link result", body = FavoriteLinkResponse),
        (status = 404, description = "Favorite list or video not found")
    ),
    tag = "Favorites"
)]
pub async fn add_favorite_video(
    State(state): State<AppState>,
    Path((id, video_id)): Path<(i64, i64)>,
) -> AppResult<Json<FavoriteLinkResponse>> {
    let changed = FavoriteRepository::add_video(&state.db, video_id, id).await?;
    Ok(Json(FavoriteLinkResponse { changed }))
}

/// Unlink a saved video from a favorite list
#[utoipa::path(
    delete,
    path = "/api/favorites/{id}/videos/{video_id}",
    params(
        ("id" = i64, Path, description = "Favorite list ID"),
        ("video_id" = i64, Path, description = "Saved video ID")
    ),
    responses(
        (status = 200, description = "Link result", body = FavoriteLinkResponse)
    ),
    tag = "Favorites"
)]
pub async fn remove_favorite_video(
    State(state): State<AppState>,
    Path((id, video_id)): Path<(i64, i64)>,
) -> AppResult<Json<FavoriteLinkResponse>> {
    let changed = FavoriteRepository::remove_video(&state.db, video_id, id).await?;
    Ok(Json(FavoriteLinkResponse { changed }))
}
