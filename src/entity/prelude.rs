pub use super::collection::Entity as Collection;
pub use super::collection_item::Entity as CollectionItem;
pub use super::favorite_list::Entity as FavoriteList;
pub use super::saved_video::Entity as SavedVideo;
pub use super::video::Entity as Video;
pub use super::video_favorite::Entity as VideoFavorite;
