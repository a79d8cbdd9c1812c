use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::entity::collection::{self, ActiveModel, Column, Entity as CollectionEntity};
use crate::entity::collection_item::{
    ActiveModel as ItemActiveModel, Column as ItemColumn, Entity as ItemEntity,
};
use crate::entity::video::Entity as VideoEntity;
use crate::error::{AppError, AppResult};
use crate::models::{Collection, CreateCollection, Video};
use crate::repositories::Repository;

/// Collection repository for database operations
pub struct CollectionRepository;

#[async_trait]
impl Repository<Collection> for CollectionRepository {
    async fn find_by_id(db: &DatabaseConnection, id: &str) -> AppResult<Collection> {
        let model = CollectionEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Collection".to_string()))?;

        Self::with_count(db, model).await
    }

    async fn delete(db: &DatabaseConnection, id: &str) -> AppResult<()> {
        let model = CollectionEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Collection".to_string()))?;

        if model.is_default {
            return Err(AppError::Protected("Default collection".to_string()));
        }

        // Membership rows go with it (ON DELETE CASCADE)
        let active: ActiveModel = model.into();
        active.delete(db).await?;

        Ok(())
    }

    async fn list(
        db: &DatabaseConnection,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<Collection>> {
        let models = CollectionEntity::find()
            .order_by_desc(Column::IsDefault)
            .order_by_asc(Column::CreatedAt)
            .order_by(Expr::cust("collections.rowid"), Order::Asc)
            .offset(offset)
            .limit(limit)
            .all(db)
            .await?;

        Self::with_counts(db, models).await
    }

    async fn count(db: &DatabaseConnection) -> AppResult<u64> {
        let count = CollectionEntity::find().count(db).await?;
        Ok(count)
    }
}

impl CollectionRepository {
    /// Create a new (non-default) collection
    pub async fn create(db: &DatabaseConnection, input: &CreateCollection) -> AppResult<Collection> {
        let model = ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(input.name.clone()),
            is_default: Set(false),
            created_at: Set(time::OffsetDateTime::now_utc()),
        };

        let result = model.insert(db).await?;
        Self::with_count(db, result).await
    }

    /// Return the default collection, creating it under `name` if missing
    pub async fn ensure_default(db: &DatabaseConnection, name: &str) -> AppResult<Collection> {
        if let Some(model) = CollectionEntity::find()
            .filter(Column::IsDefault.eq(true))
            .one(db)
            .await?
        {
            return Self::with_count(db, model).await;
        }

        let model = ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(name.to_string()),
            is_default: Set(true),
            created_at: Set(time::OffsetDateTime::now_utc()),
        };

        let result = model.insert(db).await?;
        tracing::info!(id = %result.id, name, "Created default collection");
        Self::with_count(db, result).await
    }

    pub async fn find_default(db: &DatabaseConnection) -> AppResult<Collection> {
        let model = CollectionEntity::find()
            .filter(Column::IsDefault.eq(true))
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Default collection".to_string()))?;

        Self::with_count(db, model).await
    }

    /// Every collection, default first, then oldest first
    pub async fn all(db: &DatabaseConnection) -> AppResult<Vec<Collection>> {
        let models = CollectionEntity::find()
            .order_by_desc(Column::IsDefault)
            .order_by_asc(Column::CreatedAt)
            .order_by(Expr::cust("collections.rowid"), Order::Asc)
            .all(db)
            .await?;

        Self::with_counts(db, models).await
    }

    /// Add a video to a collection.
    ///
    /// Returns `false` when the video was already a member; no duplicate row
    /// is written.
    pub async fn add_video(
        db: &DatabaseConnection,
        collection_id: &str,
        video_id: &str,
    ) -> AppResult<bool> {
        Self::verify_parents(db, collection_id, video_id).await?;

        if Self::contains(db, collection_id, video_id).await? {
            return Ok(false);
        }

        let item = ItemActiveModel {
            collection_id: Set(collection_id.to_string()),
            video_id: Set(video_id.to_string()),
            added_at: Set(time::OffsetDateTime::now_utc()),
        };
        ItemEntity::insert(item).exec_without_returning(db).await?;

        Ok(true)
    }

    /// Remove a video from a collection; `false` if it was not a member
    pub async fn remove_video(
        db: &DatabaseConnection,
        collection_id: &str,
        video_id: &str,
    ) -> AppResult<bool> {
        let result = ItemEntity::delete_many()
            .filter(ItemColumn::CollectionId.eq(collection_id))
            .filter(ItemColumn::VideoId.eq(video_id))
            .exec(db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn contains(
        db: &DatabaseConnection,
        collection_id: &str,
        video_id: &str,
    ) -> AppResult<bool> {
        let found = ItemEntity::find_by_id((collection_id.to_string(), video_id.to_string()))
            .one(db)
            .await?;

        Ok(found.is_some())
    }

    /// Videos of a collection in the order they were added
    pub async fn videos(db: &DatabaseConnection, collection_id: &str) -> AppResult<Vec<Video>> {
        // Surface a missing collection as 404 rather than an empty list
        CollectionEntity::find_by_id(collection_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Collection".to_string()))?;

        let models = VideoEntity::find()
            .inner_join(ItemEntity)
            .filter(ItemColumn::CollectionId.eq(collection_id))
            .order_by_asc(ItemColumn::AddedAt)
            .order_by(Expr::cust("collection_items.rowid"), Order::Asc)
            .all(db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    pub async fn video_count(db: &DatabaseConnection, collection_id: &str) -> AppResult<u64> {
        let count = ItemEntity::find()
            .filter(ItemColumn::CollectionId.eq(collection_id))
            .count(db)
            .await?;

        Ok(count)
    }

    /// Ids of every collection holding `video_id`
    pub async fn ids_containing(db: &DatabaseConnection, video_id: &str) -> AppResult<Vec<String>> {
        let items = ItemEntity::find()
            .filter(ItemColumn::VideoId.eq(video_id))
            .all(db)
            .await?;

        Ok(items.into_iter().map(|item| item.collection_id).collect())
    }

    async fn verify_parents(
        db: &DatabaseConnection,
        collection_id: &str,
        video_id: &str,
    ) -> AppResult<()> {
        CollectionEntity::find_by_id(collection_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Collection".to_string()))?;

        VideoEntity::find_by_id(video_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Video".to_string()))?;

        Ok(())
    }

    async fn with_count(db: &DatabaseConnection, model: collection::Model) -> AppResult<Collection> {
        let video_count = Self::video_count(db, &model.id).await?;
        Ok(Collection::from_model(model, video_count))
    }

    async fn with_counts(
        db: &DatabaseConnection,
        models: Vec<collection::Model>,
    ) -> AppResult<Vec<Collection>> {
        let mut collections = Vec::with_capacity(models.len());
        for model in models {
            collections.push(Self::with_count(db, model).await?);
        }
        Ok(collections)
    }
}

impl Collection {
    fn from_model(m: collection::Model, video_count: u64) -> Self {
        Self {
            id: m.id,
            name: m.name,
            is_default: m.is_default,
            created_at: m.created_at,
            video_count,
        }
    }
}
