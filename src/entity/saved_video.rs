use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "saved_videos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub cover_image: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::video_favorite::Entity")]
    VideoFavorites,
}

impl Related<super::video_favorite::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VideoFavorites.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
