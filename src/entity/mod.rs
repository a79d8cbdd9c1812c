pub mod collection;
pub mod collection_item;
pub mod favorite_list;
pub mod saved_video;
pub mod video;
pub mod video_favorite;

pub mod prelude;

pub use prelude::*;
