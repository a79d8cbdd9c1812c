// Library crate for vidshelf
// Exports modules for use by the server binary and tests

pub mod config;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod services;
pub mod state;

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::handlers::{
    add_collection_video, add_favorite_video, add_to_collections, available_collections,
    clear_videos, create_collection, create_favorite, create_saved_video, delete_collection,
    delete_favorite, delete_video, get_collection, get_feed, get_video, insert_videos,
    list_collection_videos, list_collections, list_favorite_videos, list_favorites,
    list_saved_videos, list_videos, load_feed, load_more_feed, recommend, refresh_feed,
    remove_collection_video, remove_favorite_video, remove_from_collections, saved_videos_page,
    search_feed, search_videos, toggle_collection, toggle_video, update_video_status,
    video_collections, video_in_collection,
};
use crate::state::AppState;

/// Build the application router with the given state
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Video routes
        .route(
            "/videos",
            get(list_videos).post(insert_videos).delete(clear_videos),
        )
        .route("/videos/search", get(search_videos))
        .route("/videos/{id}", get(get_video).delete(delete_video))
        .route("/videos/{id}/status", patch(update_video_status))
        .route("/videos/{id}/toggle/{action}", post(toggle_video))
        // Membership routes (nested under videos)
        .route(
            "/videos/{id}/collections",
            get(video_collections)
                .post(add_to_collections)
                .delete(remove_from_collections),
        )
        .route(
            "/videos/{id}/collections/available",
            get(available_collections),
        )
        .route("/videos/{id}/collections/toggle", post(toggle_collection))
        .route(
            "/videos/{id}/collections/{collection_id}",
            get(video_in_collection),
        )
        // Collection routes
        .route(
            "/collections",
            get(list_collections).post(create_collection),
        )
        .route(
            "/collections/{id}",
            get(get_collection).delete(delete_collection),
        )
        .route("/collections/{id}/videos", get(list_collection_videos))
        .route(
            "/collections/{id}/videos/{video_id}",
            put(add_collection_video).delete(remove_collection_video),
        )
        // Feed routes
        .route("/feed", get(get_feed))
        .route("/feed/load", post(load_feed))
        .route("/feed/more", post(load_more_feed))
        .route("/feed/refresh", post(refresh_feed))
        .route("/feed/search", get(search_feed))
        // Legacy favorites routes
        .route(
            "/saved-videos",
            get(list_saved_videos).post(create_saved_video),
        )
        .route("/saved-videos/page", get(saved_videos_page))
        .route("/favorites", get(list_favorites).post(create_favorite))
        .route("/favorites/{id}", delete(delete_favorite))
        .route("/favorites/{id}/videos", get(list_favorite_videos))
        .route(
            "/favorites/{id}/videos/{video_id}",
            put(add_favorite_video).delete(remove_favorite_video),
        );

    Router::new()
        .route("/", get(|| async { "Hello, vidshelf!" }))
        // Mock recommend upstream
        .route("/user/video/recommend", get(recommend))
        .nest("/api", api_routes)
        .with_state(state)
}
