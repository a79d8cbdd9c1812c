use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A video as exchanged with the recommend feed.
///
/// Wire keys keep the feed's historical spelling (`isLikeCount`, `avator`, ...)
/// so upstream payloads decode without translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    #[serde(default)]
    pub is_coin: bool,
    #[serde(rename = "isCoinCount", default)]
    pub coin_count: i64,
    #[serde(default)]
    pub is_collect: bool,
    #[serde(rename = "isCollectCount", default)]
    pub collect_count: i64,
    #[serde(default)]
    pub is_dislike: bool,
    #[serde(default)]
    pub is_like: bool,
    #[serde(rename = "isLikeCount", default)]
    pub like_count: i64,
    pub thumb_photo: String,
    pub title: String,
    pub up_data: UpData,
}

/// Uploader ("UP主") embedded in every video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpData {
    #[serde(rename = "avator")]
    pub avatar: String,
    #[serde(default)]
    pub fans: i64,
    #[serde(default)]
    pub is_follow: bool,
    pub name: String,
    pub uid: String,
    #[serde(default)]
    pub video_count: i64,
}

impl Video {
    /// Copy of this video under a new id, engagement state included.
    pub fn duplicate_with_id(&self, id: String) -> Self {
        Self { id, ..self.clone() }
    }

    pub fn title_matches(&self, query: &str) -> bool {
        query.is_empty() || self.title.to_lowercase().contains(&query.to_lowercase())
    }
}

/// Envelope returned by the recommend feed endpoint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FeedEnvelope {
    pub code: i32,
    pub data: Option<Vec<Video>>,
    pub msg: String,
}

impl FeedEnvelope {
    pub fn ok(videos: Vec<Video>) -> Self {
        Self {
            code: 0,
            data: Some(videos),
            msg: "success".to_string(),
        }
    }
}

/// Partial engagement update; absent fields are left untouched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub is_like: Option<bool>,
    pub is_dislike: Option<bool>,
    pub is_coin: Option<bool>,
    pub is_collect: Option<bool>,
    pub is_follow: Option<bool>,
}
