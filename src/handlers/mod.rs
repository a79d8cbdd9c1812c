pub mod collection;
pub mod common;
pub mod favorite;
pub mod feed;
pub mod recommend;
pub mod video;

pub use collection::{
    add_collection_video, add_to_collections, available_collections, create_collection,
    delete_collection, get_collection, list_collection_videos, list_collections,
    remove_collection_video, remove_from_collections, toggle_collection, video_collections,
    video_in_collection,
    AddToCollectionsRequest, BatchMembershipResponse, CollectionListResponse, CollectionResponse,
    CreateCollectionRequest, MembershipResponse, MembershipStatusResponse, ToggleMembershipRequest,
};
pub use common::{validate_required, PaginationParams, TitleQuery};
pub use favorite::{
    add_favorite_video, create_favorite, create_saved_video, delete_favorite,
    list_favorite_videos, list_favorites, list_saved_videos, remove_favorite_video,
    saved_videos_page, CreateFavoriteListRequest, CreateSavedVideoRequest, FavoriteLinkResponse,
    SavedVideoPageResponse,
};
pub use feed::{get_feed, load_feed, load_more_feed, refresh_feed, search_feed};
pub use recommend::recommend;
pub use video::{
    clear_videos, delete_video, get_video, insert_videos, list_videos, search_videos,
    toggle_video, update_video_status, ClearVideosResponse, InsertVideosResponse,
    VideoListResponse,
};
