use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "video_favorites")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub video_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub favorite_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::saved_video::Entity",
        from = "Column::VideoId",
        to = "super::saved_video::Column::Id",
        on_delete = "Cascade"
    )]
    SavedVideo,
    #[sea_orm(
        belongs_to = "super::favorite_list::Entity",
        from = "Column::FavoriteId",
        to = "super::favorite_list::Column::Id",
        on_delete = "Cascade"
    )]
    FavoriteList,
}

impl Related<super::saved_video::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SavedVideo.def()
    }
}

impl Related<super::favorite_list::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FavoriteList.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
