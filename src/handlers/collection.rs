use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppResult;
use crate::handlers::{validate_required, PaginationParams};
use crate::models::{Collection, CreateCollection, Video};
use crate::repositories::{CollectionRepository, Repository, VideoRepository};
use crate::services::CollectionService;
use crate::state::AppState;

// ============ Request/Response DTOs ============

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCollectionRequest {
    pub name: String,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CollectionResponse {
    pub id: String,
    pub name: String,
    pub is_default: bool,
    #[schema(value_type = String)]
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: time::OffsetDateTime,
    pub video_count: u64,
}

impl From<Collection> for CollectionResponse {
    fn from(c: Collection) -> Self {
        Self {
            id: c.id,
            name: c.name,
            is_default: c.is_default,
            created_at: c.created_at,
            video_count: c.video_count,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CollectionListResponse {
    pub data: Vec<CollectionResponse>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddToCollectionsRequest {
    pub collection_ids: Vec<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ToggleMembershipRequest {
    /// Target collection; the default collection when absent
    #[serde(default)]
    pub collection_id: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct MembershipResponse {
    /// Whether the video belongs to the target collection afterwards
    pub member: bool,
    /// Whether the request changed membership
    pub changed: bool,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct MembershipStatusResponse {
    pub member: bool,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct BatchMembershipResponse {
    /// `false` when at least one collection could not be updated
    pub success: bool,
}

fn into_responses(collections: Vec<Collection>) -> Vec<CollectionResponse> {
    collections.into_iter().map(|c| c.into()).collect()
}

/// Push the stored engagement state of `video_id` into the feed
async fn sync_feed(state: &AppState, video_id: &str) -> AppResult<()> {
    let video = VideoRepository::find_by_id(&state.db, video_id).await?;
    state.feed.sync(&video).await;
    Ok(())
}

// ============ Collection handlers ============

/// Create a new collection
#[utoipa::path(
    post,
    path = "/api/collections",
    request_body = CreateCollectionRequest,
    responses(
        (status = 200, description = "Collection created successfully", body = CollectionResponse),
        (status = 400, description = "Validation error")
    ),
    tag = "Collections"
)]
pub async fn create_collection(
    State(state): State<AppState>,
    Json(payload): Json<CreateCollectionRequest>,
) -> AppResult<Json<CollectionResponse>> {
    validate_required(&payload.name, "Name", 100)?;

    let create_collection = CreateCollection {
        name: payload.name.trim().to_string(),
    };

    let collection = CollectionRepository::create(&state.db, &create_collection).await?;
    Ok(Json(collection.into()))
}

/// List collections, default first
#[utoipa::path(
    get,
    path = "/api/collections",
    params(PaginationParams),
    responses(
        (status = 200, description = "List of collections", body = CollectionListResponse)
    ),
    tag = "Collections"
)]
pub async fn list_collections(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<CollectionListResponse>> {
    let (limit, offset) = params.resolve();

    let collections = CollectionRepository::list(&state.db, limit, offset).await?;
    let total = CollectionRepository::count(&state.db).await?;

    Ok(Json(CollectionListResponse {
        data: into_responses(collections),
        total,
        limit,
        offset,
    }))
}

/// Get a collection by ID
#[utoipa::path(
    get,
    path = "/api/collections/{id}",
    params(
        ("id" = String, Path, description = "Collection ID")
    ),
    responses(
        (status = 200, description = "Collection details", body = CollectionResponse),
        (status = 404, description = "Collection not found")
    ),
    tag = "Collections"
)]
pub async fn get_collection(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<CollectionResponse>> {
    let collection = CollectionRepository::find_by_id(&state.db, &id).await?;
    Ok(Json(collection.into()))
}

/// Delete a collection; the default collection is protected
#[utoipa::path(
    delete,
    path = "/api/collections/{id}",
    params(
        ("id" = String, Path, description = "Collection ID")
    ),
    responses(
        (status = 200, description = "Collection deleted successfully"),
        (status = 403, description = "Default collection cannot be deleted"),
        (status = 404, description = "Collection not found")
    ),
    tag = "Collections"
)]
pub async fn delete_collection(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<()> {
    let members = CollectionService::delete(&state.db, &id).await?;
    for video_id in members {
        sync_feed(&state, &video_id).await?;
    }

    Ok(())
}

/// Videos in a collection, oldest addition first
#[utoipa::path(
    get,
    path = "/api/collections/{id}/videos",
    params(
        ("id" = String, Path, description = "Collection ID")
    ),
    responses(
        (status = 200, description = "Videos in the collection", body = Vec<Video>),
        (status = 404, description = "Collection not found")
    ),
    tag = "Collections"
)]
pub async fn list_collection_videos(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<Video>>> {
    let videos = CollectionRepository::videos(&state.db, &id).await?;
    Ok(Json(videos))
}

/// Add a video to a collection (idempotent)
#[utoipa::path(
    put,
    path = "/api/collections/{id}/videos/{video_id}",
    params(
        ("id" = String, Path, description = "Collection ID"),
        ("video_id" = String, Path, description = "Video ID")
    ),
    responses(
        (status = 200, description = "Membership after the call", body = MembershipResponse),
        (status = 404, description = "Collection or video not found")
    ),
    tag = "Collections"
)]
pub async fn add_collection_video(
    State(state): State<AppState>,
    Path((id, video_id)): Path<(String, String)>,
) -> AppResult<Json<MembershipResponse>> {
    let changed = CollectionService::add(&state.db, &id, &video_id).await?;
    sync_feed(&state, &video_id).await?;

    Ok(Json(MembershipResponse {
        member: true,
        changed,
    }))
}

/// Remove a video from a collection
#[utoipa::path(
    delete,
    path = "/api/collections/{id}/videos/{video_id}",
    params(
        ("id" = String, Path, description = "Collection ID"),
        ("video_id" = String, Path, description = "Video ID")
    ),
    responses(
        (status = 200, description = "Membership after the call", body = MembershipResponse)
    ),
    tag = "Collections"
)]
pub async fn remove_collection_video(
    State(state): State<AppState>,
    Path((id, video_id)): Path<(String, String)>,
) -> AppResult<Json<MembershipResponse>> {
    let changed = CollectionService::remove(&state.db, &video_id, Some(id.as_str())).await?;
    if changed {
        sync_feed(&state, &video_id).await?;
    }

    Ok(Json(MembershipResponse {
        member: false,
        changed,
    }))
}

// ============ Video membership handlers ============

/// Collections that hold the video
#[utoipa::path(
    get,
    path = "/api/videos/{id}/collections",
    params(
        ("id" = String, Path, description = "Video ID")
    ),
    responses(
        (status = 200, description = "Collections containing the video", body = Vec<CollectionResponse>),
        (status = 404, description = "Video not found")
    ),
    tag = "Membership"
)]
pub async fn video_collections(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<CollectionResponse>>> {
    let collections = CollectionService::containing(&state.db, &id).await?;
    Ok(Json(into_responses(collections)))
}

/// Whether the video belongs to one collection
#[utoipa::path(
    get,
    path = "/api/videos/{id}/collections/{collection_id}",
    params(
        ("id" = String, Path, description = "Video ID"),
        ("collection_id" = String, Path, description = "Collection ID")
    ),
    responses(
        (status = 200, description = "Membership", body = MembershipStatusResponse),
        (status = 404, description = "Collection not found")
    ),
    tag = "Membership"
)]
pub async fn video_in_collection(
    State(state): State<AppState>,
    Path((id, collection_id)): Path<(String, String)>,
) -> AppResult<Json<MembershipStatusResponse>> {
    CollectionRepository::find_by_id(&state.db, &collection_id).await?;
    let member = CollectionService::is_member(&state.db, &id, Some(collection_id.as_str())).await?;
    Ok(Json(MembershipStatusResponse { member }))
}

/// Collections the video can still be added to
#[utoipa::path(
    get,
    path = "/api/videos/{id}/collections/available",
    params(
        ("id" = String, Path, description = "Video ID")
    ),
    responses(
        (status = 200, description = "Collections not containing the video", body = Vec<CollectionResponse>),
        (status = 404, description = "Video not found")
    ),
    tag = "Membership"
)]
pub async fn available_collections(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<CollectionResponse>>> {
    let collections = CollectionService::available_for(&state.db, &id).await?;
    Ok(Json(into_responses(collections)))
}

/// Add the video to several collections at once
#[utoipa::path(
    post,
    path = "/api/videos/{id}/collections",
    params(
        ("id" = String, Path, description = "Video ID")
    ),
    request_body = AddToCollectionsRequest,
    responses(
        (status = 200, description = "Batch result", body = BatchMembershipResponse),
        (status = 404, description = "Video not found")
    ),
    tag = "Membership"
)]
pub async fn add_to_collections(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<AddToCollectionsRequest>,
) -> AppResult<Json<BatchMembershipResponse>> {
    let success = CollectionService::add_to_many(&state.db, &id, &payload.collection_ids).await?;
    sync_feed(&state, &id).await?;
    Ok(Json(BatchMembershipResponse { success }))
}

/// Remove the video from every collection
#[utoipa::path(
    delete,
    path = "/api/videos/{id}/collections",
    params(
        ("id" = String, Path, description = "Video ID")
    ),
    responses(
        (status = 200, description = "Batch result", body = BatchMembershipResponse),
        (status = 404, description = "Video not found")
    ),
    tag = "Membership"
)]
pub async fn remove_from_collections(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<BatchMembershipResponse>> {
    let success = CollectionService::remove_from_all(&state.db, &id).await?;
    sync_feed(&state, &id).await?;
    Ok(Json(BatchMembershipResponse { success }))
}

/// Flip membership in one collection (the default one when none is given)
#[utoipa::path(
    post,
    path = "/api/videos/{id}/collections/toggle",
    params(
        ("id" = String, Path, description = "Video ID")
    ),
    request_body = ToggleMembershipRequest,
    responses(
        (status = 200, description = "Membership after the call", body = MembershipResponse),
        (status = 404, description = "Collection or video not found")
    ),
    tag = "Membership"
)]
pub async fn toggle_collection(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ToggleMembershipRequest>,
) -> AppResult<Json<MembershipResponse>> {
    let member =
        CollectionService::toggle(&state.db, &id, payload.collection_id.as_deref()).await?;
    sync_feed(&state, &id).await?;

    Ok(Json(MembershipResponse {
        member,
        changed: true,
    }))
}
