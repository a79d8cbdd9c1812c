use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    // Database
    pub database_url: String,
    pub database_max_connections: u32,

    // Server
    pub host: String,
    pub port: u16,

    // Protected defaults
    pub default_collection_name: String,
    pub default_favorite_name: String,

    // Feed
    pub feed_batch_size: usize,
    pub feed_load_delay_ms: u64,
    pub home_page_size: usize,
    pub recommend_url: Option<String>,
    pub recommend_token: Option<String>,
    pub seed_samples: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if exists

        Ok(Self {
            // Database
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://vidshelf.db?mode=rwc".to_string()),
            database_max_connections: parse_var("DATABASE_MAX_CONNECTIONS", 5)?,

            // Server
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_var("PORT", 3000)?,

            default_collection_name: env::var("DEFAULT_COLLECTION_NAME")
                .unwrap_or_else(|_| DEFAULT_NAME.to_string()),
            default_favorite_name: env::var("DEFAULT_FAVORITE_NAME")
                .unwrap_or_else(|_| DEFAULT_NAME.to_string()),

            // Feed
            feed_batch_size: parse_var("FEED_BATCH_SIZE", 8)?,
            feed_load_delay_ms: parse_var("FEED_LOAD_DELAY_MS", 1000)?,
            home_page_size: parse_var("HOME_PAGE_SIZE", 10)?,
            recommend_url: env::var("RECOMMEND_URL").ok().filter(|v| !v.is_empty()),
            recommend_token: env::var("RECOMMEND_TOKEN").ok().filter(|v| !v.is_empty()),
            seed_samples: parse_var("SEED_SAMPLES", true)?,
        })
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn feed_load_delay(&self) -> Duration {
        Duration::from_millis(self.feed_load_delay_ms)
    }
}

/// Name shared by the default collection and the default favorite list.
pub const DEFAULT_NAME: &str = "默认收藏夹";

fn parse_var<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(key)),
        Err(env::VarError::NotPresent) => Ok(default),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::Invalid(key)),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid environment variable: {0}")]
    Invalid(&'static str),
}
