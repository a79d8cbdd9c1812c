pub mod collections;
pub mod feed;
pub mod interaction;

pub use collections::CollectionService;
pub use feed::{
    FeedSnapshot, HttpRecommendSource, LoadOutcome, Pager, RecommendFeed, RecommendSource,
    StoreRecommendSource,
};
pub use interaction::Action;
