use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "favorite_lists")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    pub is_default: bool,
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
