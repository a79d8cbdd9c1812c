use sea_orm::DatabaseConnection;

use crate::error::AppResult;
use crate::models::{Collection, StatusUpdate, Video};
use crate::repositories::{CollectionRepository, Repository, VideoRepository};
use crate::services::interaction;

/// Membership operations across collections.
///
/// A video counts as collected while it belongs to at least one collection;
/// every operation here re-synchronises `is_collect` / `collect_count`
/// after changing membership. Operations that take an optional collection id
/// target the default collection when it is `None`.
pub struct CollectionService;

impl CollectionService {
    /// Flip membership in the target collection; returns the new membership
    pub async fn toggle(
        db: &DatabaseConnection,
        video_id: &str,
        collection_id: Option<&str>,
    ) -> AppResult<bool> {
        let target = Self::target(db, collection_id).await?;

        let member = if CollectionRepository::contains(db, &target, video_id).await? {
            CollectionRepository::remove_video(db, &target, video_id).await?;
            false
        } else {
            CollectionRepository::add_video(db, &target, video_id).await?;
            true
        };

        Self::sync_collect_flag(db, video_id).await?;
        Ok(member)
    }

    pub async fn add(db: &DatabaseConnection, collection_id: &str, video_id: &str) -> AppResult<bool> {
        let added = CollectionRepository::add_video(db, collection_id, video_id).await?;
        Self::sync_collect_flag(db, video_id).await?;
        Ok(added)
    }

    pub async fn add_to_default(db: &DatabaseConnection, video_id: &str) -> AppResult<bool> {
        let target = Self::target(db, None).await?;
        Self::add(db, &target, video_id).await
    }

    pub async fn remove(
        db: &DatabaseConnection,
        video_id: &str,
        collection_id: Option<&str>,
    ) -> AppResult<bool> {
        let target = Self::target(db, collection_id).await?;
        let removed = CollectionRepository::remove_video(db, &target, video_id).await?;
        if removed {
            Self::sync_collect_flag(db, video_id).await?;
        }
        Ok(removed)
    }

    pub async fn is_member(
        db: &DatabaseConnection,
        video_id: &str,
        collection_id: Option<&str>,
    ) -> AppResult<bool> {
        let target = Self::target(db, collection_id).await?;
        CollectionRepository::contains(db, &target, video_id).await
    }

    /// Collections that do not hold the video yet
    pub async fn available_for(db: &DatabaseConnection, video_id: &str) -> AppResult<Vec<Collection>> {
        VideoRepository::find_by_id(db, video_id).await?;
        let holding = CollectionRepository::ids_containing(db, video_id).await?;
        let all = CollectionRepository::all(db).await?;

        Ok(all.into_iter().filter(|c| !holding.contains(&c.id)).collect())
    }

    /// Collections that hold the video
    pub async fn containing(db: &DatabaseConnection, video_id: &str) -> AppResult<Vec<Collection>> {
        VideoRepository::find_by_id(db, video_id).await?;
        let holding = CollectionRepository::ids_containing(db, video_id).await?;
        let all = CollectionRepository::all(db).await?;

        Ok(all.into_iter().filter(|c| holding.contains(&c.id)).collect())
    }

    /// Add the video to every listed collection.
    ///
    /// Keeps going after a failure; returns `true` only if every add
    /// succeeded (already being a member counts as success).
    pub async fn add_to_many(
        db: &DatabaseConnection,
        video_id: &str,
        collection_ids: &[String],
    ) -> AppResult<bool> {
        VideoRepository::find_by_id(db, video_id).await?;

        let mut success = true;
        for collection_id in collection_ids {
            if let Err(e) = CollectionRepository::add_video(db, collection_id, video_id).await {
                tracing::warn!(video_id, collection_id = %collection_id, error = %e, "Failed to add video to collection");
                success = false;
            }
        }

        Self::sync_collect_flag(db, video_id).await?;
        Ok(success)
    }

    /// Remove the video from every collection holding it
    pub async fn remove_from_all(db: &DatabaseConnection, video_id: &str) -> AppResult<bool> {
        VideoRepository::find_by_id(db, video_id).await?;

        let mut success = true;
        for collection_id in CollectionRepository::ids_containing(db, video_id).await? {
            if !CollectionRepository::remove_video(db, &collection_id, video_id).await? {
                success = false;
            }
        }

        Self::sync_collect_flag(db, video_id).await?;
        Ok(success)
    }

    /// Delete a collection; returns the ids of the videos it held, whose
    /// collect flags have been re-synchronised.
    pub async fn delete(db: &DatabaseConnection, collection_id: &str) -> AppResult<Vec<String>> {
        let members: Vec<String> = CollectionRepository::videos(db, collection_id)
            .await?
            .into_iter()
            .map(|v| v.id)
            .collect();

        CollectionRepository::delete(db, collection_id).await?;

        for video_id in &members {
            Self::sync_collect_flag(db, video_id).await?;
        }

        Ok(members)
    }

    /// Apply a status update, routing `is_collect` through membership:
    /// collecting adds to the default collection, un-collecting removes the
    /// video from every collection.
    pub async fn update_status(
        db: &DatabaseConnection,
        video_id: &str,
        update: &StatusUpdate,
    ) -> AppResult<Video> {
        let flags = StatusUpdate {
            is_collect: None,
            ..*update
        };
        let video = VideoRepository::update_status(db, video_id, &flags).await?;

        match update.is_collect {
            Some(true) if !video.is_collect => {
                Self::add_to_default(db, video_id).await?;
            }
            Some(false) if video.is_collect => {
                Self::remove_from_all(db, video_id).await?;
            }
            _ => return Ok(video),
        }

        VideoRepository::find_by_id(db, video_id).await
    }

    /// Bring the collect flag in line with membership
    async fn sync_collect_flag(db: &DatabaseConnection, video_id: &str) -> AppResult<()> {
        let video = VideoRepository::find_by_id(db, video_id).await?;
        let collected = !CollectionRepository::ids_containing(db, video_id)
            .await?
            .is_empty();

        if video.is_collect == collected {
            return Ok(());
        }

        let update = StatusUpdate {
            is_collect: Some(collected),
            ..Default::default()
        };
        let next = interaction::apply(&video, &update)?;
        VideoRepository::write_engagement(db, &next).await?;

        Ok(())
    }

    async fn target(db: &DatabaseConnection, collection_id: Option<&str>) -> AppResult<String> {
        match collection_id {
            Some(id) => Ok(id.to_string()),
            None => Ok(CollectionRepository::find_default(db).await?.id),
        }
    }
}
