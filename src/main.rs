use anyhow::Context;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use vidshelf::config::Config;
use vidshelf::handlers::{
    AddToCollectionsRequest, BatchMembershipResponse, ClearVideosResponse, CollectionListResponse,
    CollectionResponse, CreateCollectionRequest, CreateFavoriteListRequest,
    CreateSavedVideoRequest, FavoriteLinkResponse, InsertVideosResponse, MembershipResponse,
    MembershipStatusResponse, SavedVideoPageResponse, ToggleMembershipRequest, VideoListResponse,
};
use vidshelf::models::{FavoriteList, FeedEnvelope, SavedVideo, StatusUpdate, UpData, Video};
use vidshelf::services::{FeedSnapshot, LoadOutcome};
use vidshelf::state::AppState;
use vidshelf::{build_router, handlers};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::recommend::recommend,
        handlers::video::list_videos,
        handlers::video::insert_videos,
        handlers::video::clear_videos,
        handlers::video::search_videos,
        handlers::video::get_video,
        handlers::video::delete_video,
        handlers::video::update_video_status,
        handlers::video::toggle_video,
        handlers::collection::video_collections,
        handlers::collection::available_collections,
        handlers::collection::add_to_collections,
        handlers::collection::remove_from_collections,
        handlers::collection::toggle_collection,
        handlers::collection::video_in_collection,
        handlers::collection::create_collection,
        handlers::collection::list_collections,
        handlers::collection::get_collection,
        handlers::collection::delete_collection,
        handlers::collection::list_collection_videos,
        handlers::collection::add_collection_video,
        handlers::collection::remove_collection_video,
        handlers::feed::get_feed,
        handlers::feed::load_feed,
        handlers::feed::load_more_feed,
        handlers::feed::refresh_feed,
        handlers::feed::search_feed,
        handlers::favorite::list_saved_videos,
        handlers::favorite::create_saved_video,
        handlers::favorite::saved_videos_page,
        handlers::favorite::list_favorites,
        handlers::favorite::create_favorite,
        handlers::favorite::delete_favorite,
        handlers::favorite::list_favorite_videos,
        handlers::favorite::add_favorite_video,
        handlers::favorite::remove_favorite_video,
    ),
    components(schemas(
        Video,
        UpData,
        FeedEnvelope,
        StatusUpdate,
        VideoListResponse,
        InsertVideosResponse,
        ClearVideosResponse,
        CreateCollectionRequest,
        CollectionResponse,
        CollectionListResponse,
        AddToCollectionsRequest,
        ToggleMembershipRequest,
        MembershipResponse,
        MembershipStatusResponse,
        BatchMembershipResponse,
        FeedSnapshot,
        LoadOutcome,
        SavedVideo,
        FavoriteList,
        CreateSavedVideoRequest,
        CreateFavoriteListRequest,
        SavedVideoPageResponse,
        FavoriteLinkResponse,
    )),
    tags(
        (name = "Recommend", description = "Mock recommend feed upstream"),
        (name = "Videos", description = "Stored videos and engagement"),
        (name = "Membership", description = "Collections a video belongs to"),
        (name = "Collections", description = "Collection management endpoints"),
        (name = "Feed", description = "Recommend feed state"),
        (name = "Favorites", description = "Saved videos and favorite lists")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    let addr = config.server_addr();

    // Initialize application state (opens the database and runs migrations)
    tracing::info!(url = %config.database_url, "Opening database...");
    let state = AppState::new(config)
        .await
        .context("Failed to initialize application state")?;
    tracing::info!("Database ready");

    // Build the main application router
    let app = build_router(state)
        // Add Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        );

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Server started on http://{}", addr);
    tracing::info!("Swagger UI: http://{}/swagger-ui/", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
