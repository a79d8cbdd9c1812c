use uuid::Uuid;

use vidshelf::models::{Collection, CreateCollection, FavoriteList, SavedVideo, UpData, Video};
use vidshelf::repositories::{
    CollectionRepository, FavoriteRepository, SavedVideoRepository, VideoRepository,
};
use vidshelf::state::AppState;

/// Build a video that is not stored yet
pub fn video(title: &str) -> Video {
    let id = format!("BV{}", Uuid::new_v4().simple());
    Video {
        id,
        is_coin: false,
        coin_count: 2,
        is_collect: false,
        collect_count: 0,
        is_dislike: false,
        is_like: false,
        like_count: 5,
        thumb_photo: "https://i0.hdslb.com/bfs/archive/thumb.jpg".to_string(),
        title: title.to_string(),
        up_data: UpData {
            avatar: "https://i0.hdslb.com/bfs/face/avatar.jpg".to_string(),
            fans: 1000,
            is_follow: false,
            name: "测试UP主".to_string(),
            uid: "546195".to_string(),
            video_count: 12,
        },
    }
}

/// Factory for creating test data
pub struct Factory<'a> {
    state: &'a AppState,
}

#[allow(dead_code)]
impl<'a> Factory<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Store a video with the given title
    pub async fn create_video(&self, title: &str) -> Video {
        let video = video(title);
        VideoRepository::insert_many(&self.state.db, std::slice::from_ref(&video))
            .await
            .unwrap();
        video
    }

    pub async fn create_collection(&self, name: &str) -> Collection {
        let input = CreateCollection {
            name: name.to_string(),
        };

        CollectionRepository::create(&self.state.db, &input)
            .await
            .unwrap()
    }

    pub async fn default_collection(&self) -> Collection {
        CollectionRepository::find_default(&self.state.db)
            .await
            .unwrap()
    }

    pub async fn create_saved_video(&self, name: &str) -> SavedVideo {
        SavedVideoRepository::add(&self.state.db, name, "play.rectangle")
            .await
            .unwrap()
    }

    pub async fn create_favorite_list(&self, name: &str) -> FavoriteList {
        FavoriteRepository::create_list(&self.state.db, name)
            .await
            .unwrap()
    }
}
