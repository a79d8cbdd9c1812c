use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One row per video; the uploader is flattened into `up_*` columns.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "videos")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub is_coin: bool,
    pub coin_count: i64,
    pub is_collect: bool,
    pub collect_count: i64,
    pub is_dislike: bool,
    pub is_like: bool,
    pub like_count: i64,
    pub thumb_photo: String,
    pub title: String,
    pub up_avatar: String,
    pub up_fans: i64,
    pub up_is_follow: bool,
    pub up_name: String,
    pub up_uid: String,
    pub up_video_count: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::collection_item::Entity")]
    CollectionItems,
}

impl Related<super::collection_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CollectionItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
