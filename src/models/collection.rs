use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub name: String,
    pub is_default: bool,
    pub created_at: OffsetDateTime,
    /// Derived from the membership table, never stored
    pub video_count: u64,
}

#[derive(Debug, Deserialize)]
pub struct CreateCollection {
    pub name: String,
}
