use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Video row of the legacy favorites schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SavedVideo {
    pub id: i64,
    pub name: String,
    pub cover_image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FavoriteList {
    pub id: i64,
    pub name: String,
    pub is_default: bool,
}
