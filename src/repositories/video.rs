use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, LikeExpr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::entity::video::{self, ActiveModel, Column, Entity as VideoEntity};
use crate::error::{AppError, AppResult};
use crate::models::{StatusUpdate, UpData, Video};
use crate::repositories::Repository;
use crate::services::interaction;

/// Video repository for database operations
pub struct VideoRepository;

#[async_trait]
impl Repository<Video> for VideoRepository {
    async fn find_by_id(db: &DatabaseConnection, id: &str) -> AppResult<Video> {
        let model = VideoEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Video".to_string()))?;

        Ok(model.into())
    }

    async fn delete(db: &DatabaseConnection, id: &str) -> AppResult<()> {
        let result = VideoEntity::delete_by_id(id).exec(db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Video".to_string()));
        }

        Ok(())
    }

    async fn list(db: &DatabaseConnection, limit: u64, offset: u64) -> AppResult<Vec<Video>> {
        let models = VideoEntity::find()
            .order_by(insertion_order(), Order::Asc)
            .offset(offset)
            .limit(limit)
            .all(db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn count(db: &DatabaseConnection) -> AppResult<u64> {
        let count = VideoEntity::find().count(db).await?;
        Ok(count)
    }
}

impl VideoRepository {
    /// Insert a batch of videos in a single transaction.
    ///
    /// Rows whose id is already stored are skipped so that local engagement
    /// state survives a re-fetch. Returns the number of rows written.
    pub async fn insert_many(db: &DatabaseConnection, videos: &[Video]) -> AppResult<u64> {
        if videos.is_empty() {
            return Ok(0);
        }

        let txn = db.begin().await?;
        let mut inserted = 0;

        for video in videos {
            inserted += VideoEntity::insert(to_active_model(video))
                .on_conflict(OnConflict::column(Column::Id).do_nothing().to_owned())
                .exec_without_returning(&txn)
                .await?;
        }

        txn.commit().await?;

        tracing::debug!(requested = videos.len(), inserted, "Stored video batch");
        Ok(inserted)
    }

    /// All stored videos in insertion order
    pub async fn all(db: &DatabaseConnection) -> AppResult<Vec<Video>> {
        let models = VideoEntity::find()
            .order_by(insertion_order(), Order::Asc)
            .all(db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    /// Stored rows for `ids`, in the order the ids are given; unknown ids are
    /// left out
    pub async fn find_many(db: &DatabaseConnection, ids: &[String]) -> AppResult<Vec<Video>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut by_id: HashMap<String, Video> = VideoEntity::find()
            .filter(Column::Id.is_in(ids.iter().cloned()))
            .all(db)
            .await?
            .into_iter()
            .map(|m| (m.id.clone(), m.into()))
            .collect();

        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }

    /// Zero-based page of the feed, `page_size` videos per page
    pub async fn page(db: &DatabaseConnection, page: u64, page_size: u64) -> AppResult<Vec<Video>> {
        let page_size = page_size.max(1);
        let in_range = page
            .checked_mul(page_size)
            .is_some_and(|offset| offset <= i64::MAX as u64);
        if !in_range {
            return Err(AppError::Validation(format!(
                "Page {} of size {} is out of range",
                page, page_size
            )));
        }

        let models = VideoEntity::find()
            .order_by(insertion_order(), Order::Asc)
            .paginate(db, page_size)
            .fetch_page(page)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    /// Case-insensitive title search; an empty query matches everything
    pub async fn search_by_title(db: &DatabaseConnection, query: &str) -> AppResult<Vec<Video>> {
        let query = query.trim();
        if query.is_empty() {
            return Self::all(db).await;
        }

        // SQLite LIKE folds case for ASCII only
        if !query.is_ascii() {
            let all = Self::all(db).await?;
            return Ok(all.into_iter().filter(|v| v.title_matches(query)).collect());
        }

        let pattern = LikeExpr::new(format!("%{}%", escape_like(query))).escape('\\');
        let models = VideoEntity::find()
            .filter(Column::Title.like(pattern))
            .order_by(insertion_order(), Order::Asc)
            .all(db)
            .await?;
        let videos = models.into_iter().map(|m| m.into()).collect();

        Ok(videos)
    }

    /// Apply a partial engagement update (like/dislike/coin/follow).
    ///
    /// `is_collect` is owned by collection membership and must go through
    /// `CollectionService`; it is rejected here.
    pub async fn update_status(
        db: &DatabaseConnection,
        id: &str,
        update: &StatusUpdate,
    ) -> AppResult<Video> {
        if update.is_collect.is_some() {
            return Err(AppError::Validation(
                "Collect status follows collection membership".to_string(),
            ));
        }

        let current = Self::find_by_id(db, id).await?;
        let next = interaction::apply(&current, update)?;

        if next == current {
            return Ok(current);
        }

        Self::write_engagement(db, &next).await
    }

    /// Persist the engagement columns of `video` (flags, counts, follow state)
    pub async fn write_engagement(db: &DatabaseConnection, video: &Video) -> AppResult<Video> {
        let model = VideoEntity::find_by_id(video.id.as_str())
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Video".to_string()))?;

        let mut active: ActiveModel = model.into();
        active.is_like = Set(video.is_like);
        active.like_count = Set(video.like_count);
        active.is_dislike = Set(video.is_dislike);
        active.is_coin = Set(video.is_coin);
        active.coin_count = Set(video.coin_count);
        active.is_collect = Set(video.is_collect);
        active.collect_count = Set(video.collect_count);
        active.up_is_follow = Set(video.up_data.is_follow);
        active.up_fans = Set(video.up_data.fans);

        let result = active.update(db).await?;
        Ok(result.into())
    }

    /// Remove every stored video; returns the number of rows deleted
    pub async fn clear(db: &DatabaseConnection) -> AppResult<u64> {
        let result = VideoEntity::delete_many().exec(db).await?;
        tracing::info!(deleted = result.rows_affected, "Cleared stored videos");
        Ok(result.rows_affected)
    }
}

/// Escape LIKE wildcards so the query matches literally
fn escape_like(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for c in query.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn insertion_order() -> sea_orm::sea_query::SimpleExpr {
    Expr::cust("videos.rowid")
}

fn to_active_model(video: &Video) -> ActiveModel {
    ActiveModel {
        id: Set(video.id.clone()),
        is_coin: Set(video.is_coin),
        coin_count: Set(video.coin_count),
        is_collect: Set(video.is_collect),
        collect_count: Set(video.collect_count),
        is_dislike: Set(video.is_dislike),
        is_like: Set(video.is_like),
        like_count: Set(video.like_count),
        thumb_photo: Set(video.thumb_photo.clone()),
        title: Set(video.title.clone()),
        up_avatar: Set(video.up_data.avatar.clone()),
        up_fans: Set(video.up_data.fans),
        up_is_follow: Set(video.up_data.is_follow),
        up_name: Set(video.up_data.name.clone()),
        up_uid: Set(video.up_data.uid.clone()),
        up_video_count: Set(video.up_data.video_count),
    }
}

// Conversion from SeaORM model to our domain model
impl From<video::Model> for Video {
    fn from(m: video::Model) -> Self {
        Self {
            id: m.id,
            is_coin: m.is_coin,
            coin_count: m.coin_count,
            is_collect: m.is_collect,
            collect_count: m.collect_count,
            is_dislike: m.is_dislike,
            is_like: m.is_like,
            like_count: m.like_count,
            thumb_photo: m.thumb_photo,
            title: m.title,
            up_data: UpData {
                avatar: m.up_avatar,
                fans: m.up_fans,
                is_follow: m.up_is_follow,
                name: m.up_name,
                uid: m.up_uid,
                video_count: m.up_video_count,
            },
        }
    }
}
