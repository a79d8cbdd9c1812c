use std::str::FromStr;
use std::sync::Arc;

use sea_orm::{DatabaseConnection, SqlxSqliteConnector};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::config::Config;
use crate::repositories::{
    CollectionRepository, FavoriteRepository, SavedVideoRepository, VideoRepository,
};
use crate::services::{HttpRecommendSource, RecommendFeed, RecommendSource, StoreRecommendSource};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// SeaORM connection wrapping the SQLx pool the migrations ran on
    pub db: DatabaseConnection,
    pub config: Config,
    /// Recommend feed shown on the home screen
    pub feed: Arc<RecommendFeed>,
    /// Upstream the feed's first page is fetched from
    pub recommend_source: Arc<dyn RecommendSource>,
}

impl AppState {
    /// Open the database, run migrations and bootstrap default data.
    ///
    /// The feed is fetched from `RECOMMEND_URL` when configured, otherwise
    /// from the local store.
    pub async fn new(config: Config) -> Result<Self, AppStateError> {
        let db = connect(&config).await?;

        let recommend_source: Arc<dyn RecommendSource> = match &config.recommend_url {
            Some(url) => {
                tracing::info!(%url, "Using remote recommend feed");
                Arc::new(HttpRecommendSource::new(
                    url.clone(),
                    config.recommend_token.clone(),
                ))
            }
            None => Arc::new(StoreRecommendSource::new(db.clone())),
        };

        Self::assemble(db, config, recommend_source).await
    }

    /// Create AppState with a custom feed source (for testing)
    #[allow(dead_code)]
    pub async fn with_source(
        config: Config,
        recommend_source: Arc<dyn RecommendSource>,
    ) -> Result<Self, AppStateError> {
        let db = connect(&config).await?;
        Self::assemble(db, config, recommend_source).await
    }

    async fn assemble(
        db: DatabaseConnection,
        config: Config,
        recommend_source: Arc<dyn RecommendSource>,
    ) -> Result<Self, AppStateError> {
        bootstrap(&db, &config).await?;

        let stored = VideoRepository::all(&db)
            .await
            .map_err(|e| AppStateError::Bootstrap(e.to_string()))?;
        let feed = Arc::new(RecommendFeed::new(
            stored,
            config.feed_batch_size,
            config.feed_load_delay(),
        ));

        Ok(Self {
            db,
            config,
            feed,
            recommend_source,
        })
    }
}

async fn connect(config: &Config) -> Result<DatabaseConnection, AppStateError> {
    let options = SqliteConnectOptions::from_str(&config.database_url)
        .map_err(|e| AppStateError::Sqlite(e.to_string()))?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool: SqlitePool = SqlitePoolOptions::new()
        .max_connections(config.database_max_connections.max(1))
        .connect_with(options)
        .await
        .map_err(|e| AppStateError::Sqlite(e.to_string()))?;

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| AppStateError::Migration(e.to_string()))?;

    Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
}

/// Guarantee the protected defaults exist and seed the sample catalogue
async fn bootstrap(db: &DatabaseConnection, config: &Config) -> Result<(), AppStateError> {
    CollectionRepository::ensure_default(db, &config.default_collection_name)
        .await
        .map_err(|e| AppStateError::Bootstrap(e.to_string()))?;
    FavoriteRepository::ensure_default(db, &config.default_favorite_name)
        .await
        .map_err(|e| AppStateError::Bootstrap(e.to_string()))?;

    if config.seed_samples {
        SavedVideoRepository::seed_samples(db)
            .await
            .map_err(|e| AppStateError::Bootstrap(e.to_string()))?;
    }

    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum AppStateError {
    #[error("SQLite connection error: {0}")]
    Sqlite(String),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Bootstrap error: {0}")]
    Bootstrap(String),
}
