use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::entity::favorite_list::{
    self, ActiveModel as ListActiveModel, Column as ListColumn, Entity as ListEntity,
};
use crate::entity::saved_video::{
    self, ActiveModel as SavedActiveModel, Column as SavedColumn, Entity as SavedEntity,
};
use crate::entity::video_favorite::{
    ActiveModel as LinkActiveModel, Column as LinkColumn, Entity as LinkEntity,
};
use crate::error::{AppError, AppResult};
use crate::models::{FavoriteList, SavedVideo};

/// Catalogue inserted into an empty `saved_videos` table on first start
pub const SAMPLE_VIDEOS: [(&str, &str); 20] = [
    ("Swift基础语法详解", "swift"),
    ("UIKit框架实战", "uikit"),
    ("Firebase后端集成", "flame"),
    ("Apple Pay集成教程", "apple.pay"),
    ("HealthKit数据处理", "heart.fill"),
    ("地图应用开发", "map"),
    ("游戏开发基础", "gamecontroller"),
    ("自动化测试技巧", "checkmark.circle"),
    ("SwiftUI动画特效", "sparkles"),
    ("App性能优化", "speedometer"),
    ("多语言支持实现", "globe"),
    ("蓝牙设备连接", "wave.3.right.circle"),
    ("PDF文件处理", "doc.text"),
    ("图像识别技术", "eye"),
    ("推送通知设置", "bell"),
    ("自定义UI组件", "square.and.pencil"),
    ("网络请求优化", "network"),
    ("iOS隐私保护", "lock.shield"),
    ("应用内购买实现", "cart"),
    ("WatchKit开发入门", "applewatch"),
];

/// Repository for the legacy `saved_videos` table
pub struct SavedVideoRepository;

impl SavedVideoRepository {
    pub async fn add(db: &DatabaseConnection, name: &str, cover_image: &str) -> AppResult<SavedVideo> {
        let model = SavedActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
            cover_image: Set(cover_image.to_string()),
        };

        let result = model.insert(db).await?;
        Ok(result.into())
    }

    pub async fn all(db: &DatabaseConnection) -> AppResult<Vec<SavedVideo>> {
        let models = SavedEntity::find()
            .order_by_asc(SavedColumn::Id)
            .all(db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    pub async fn count(db: &DatabaseConnection) -> AppResult<u64> {
        let count = SavedEntity::find().count(db).await?;
        Ok(count)
    }

    /// Insert the sample catalogue if the table is empty; returns rows added
    pub async fn seed_samples(db: &DatabaseConnection) -> AppResult<u64> {
        if Self::count(db).await? > 0 {
            return Ok(0);
        }

        for (name, cover_image) in SAMPLE_VIDEOS {
            Self::add(db, name, cover_image).await?;
        }

        tracing::info!(count = SAMPLE_VIDEOS.len(), "Seeded sample videos");
        Ok(SAMPLE_VIDEOS.len() as u64)
    }
}

/// Repository for favorite lists and their video links
pub struct FavoriteRepository;

impl FavoriteRepository {
    /// Create a favorite list; names are unique
    pub async fn create_list(db: &DatabaseConnection, name: &str) -> AppResult<FavoriteList> {
        Self::insert_list(db, name, false).await
    }

    /// Return the default list, creating it under `name` if missing
    pub async fn ensure_default(db: &DatabaseConnection, name: &str) -> AppResult<FavoriteList> {
        if let Some(model) = ListEntity::find()
            .filter(ListColumn::IsDefault.eq(true))
            .one(db)
            .await?
        {
            return Ok(model.into());
        }

        let list = Self::insert_list(db, name, true).await?;
        tracing::info!(id = list.id, name, "Created default favorite list");
        Ok(list)
    }

    pub async fn lists(db: &DatabaseConnection) -> AppResult<Vec<FavoriteList>> {
        let models = ListEntity::find()
            .order_by_desc(ListColumn::IsDefault)
            .order_by_asc(ListColumn::Id)
            .all(db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    /// Delete a list and its links; `false` if no such list
    pub async fn delete_list(db: &DatabaseConnection, id: i64) -> AppResult<bool> {
        let Some(model) = ListEntity::find_by_id(id).one(db).await? else {
            return Ok(false);
        };

        if model.is_default {
            return Err(AppError::Protected("Default favorite list".to_string()));
        }

        let active: ListActiveModel = model.into();
        active.delete(db).await?;
        Ok(true)
    }

    /// Link a saved video to a list; `false` if the link already existed
    pub async fn add_video(db: &DatabaseConnection, video_id: i64, favorite_id: i64) -> AppResult<bool> {
        ListEntity::find_by_id(favorite_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Favorite list".to_string()))?;
        SavedEntity::find_by_id(video_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Saved video".to_string()))?;

        if LinkEntity::find_by_id((video_id, favorite_id))
            .one(db)
            .await?
            .is_some()
        {
            return Ok(false);
        }

        let link = LinkActiveModel {
            video_id: Set(video_id),
            favorite_id: Set(favorite_id),
        };
        LinkEntity::insert(link).exec_without_returning(db).await?;

        Ok(true)
    }

    pub async fn remove_video(db: &DatabaseConnection, video_id: i64, favorite_id: i64) -> AppResult<bool> {
        let result = LinkEntity::delete_many()
            .filter(LinkColumn::VideoId.eq(video_id))
            .filter(LinkColumn::FavoriteId.eq(favorite_id))
            .exec(db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn videos_in(db: &DatabaseConnection, favorite_id: i64) -> AppResult<Vec<SavedVideo>> {
        ListEntity::find_by_id(favorite_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Favorite list".to_string()))?;

        let models = SavedEntity::find()
            .inner_join(LinkEntity)
            .filter(LinkColumn::FavoriteId.eq(favorite_id))
            .order_by_asc(SavedColumn::Id)
            .all(db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn insert_list(db: &DatabaseConnection, name: &str, is_default: bool) -> AppResult<FavoriteList> {
        let model = ListActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
            is_default: Set(is_default),
        };

        let result = model.insert(db).await.map_err(|e| {
            if e.to_string().contains("UNIQUE") || e.to_string().contains("unique") {
                AppError::Conflict(format!("Favorite list '{}'", name))
            } else {
                AppError::Database(e.to_string())
            }
        })?;

        Ok(result.into())
    }
}

// Conversion from SeaORM models to our domain models
impl From<saved_video::Model> for SavedVideo {
    fn from(m: saved_video::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            cover_image: m.cover_image,
        }
    }
}

impl From<favorite_list::Model> for FavoriteList {
    fn from(m: favorite_list::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            is_default: m.is_default,
        }
    }
}
