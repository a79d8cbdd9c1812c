//! Engagement rules for a single video.
//!
//! Like and dislike are mutually exclusive. Every counted flag moves its
//! counter by one when it flips and the counter never drops below zero.

use std::str::FromStr;

use crate::error::{AppError, AppResult};
use crate::models::{StatusUpdate, Video};

/// Single-flag action a client can toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Like,
    Dislike,
    Coin,
    Collect,
    Follow,
}

impl FromStr for Action {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "like" => Ok(Self::Like),
            "dislike" => Ok(Self::Dislike),
            "coin" => Ok(Self::Coin),
            "collect" => Ok(Self::Collect),
            "follow" => Ok(Self::Follow),
            other => Err(AppError::Validation(format!("Unknown action: {}", other))),
        }
    }
}

/// Update that flips `action` relative to the current state of `video`
pub fn toggle_update(video: &Video, action: Action) -> StatusUpdate {
    let mut update = StatusUpdate::default();
    match action {
        Action::Like => update.is_like = Some(!video.is_like),
        Action::Dislike => update.is_dislike = Some(!video.is_dislike),
        Action::Coin => update.is_coin = Some(!video.is_coin),
        Action::Collect => update.is_collect = Some(!video.is_collect),
        Action::Follow => update.is_follow = Some(!video.up_data.is_follow),
    }
    update
}

/// Apply `update` to `video` and return the resulting state
pub fn apply(video: &Video, update: &StatusUpdate) -> AppResult<Video> {
    if update.is_like == Some(true) && update.is_dislike == Some(true) {
        return Err(AppError::Validation(
            "A video cannot be liked and disliked at once".to_string(),
        ));
    }

    let mut next = video.clone();

    if let Some(like) = update.is_like {
        flip(&mut next.is_like, &mut next.like_count, like);
        if like {
            next.is_dislike = false;
        }
    }
    if let Some(dislike) = update.is_dislike {
        next.is_dislike = dislike;
        if dislike {
            flip(&mut next.is_like, &mut next.like_count, false);
        }
    }
    if let Some(coin) = update.is_coin {
        flip(&mut next.is_coin, &mut next.coin_count, coin);
    }
    if let Some(collect) = update.is_collect {
        flip(&mut next.is_collect, &mut next.collect_count, collect);
    }
    if let Some(follow) = update.is_follow {
        flip(&mut next.up_data.is_follow, &mut next.up_data.fans, follow);
    }

    Ok(next)
}

fn flip(flag: &mut bool, count: &mut i64, value: bool) {
    if *flag == value {
        return;
    }
    *flag = value;
    *count = if value {
        count.saturating_add(1)
    } else {
        (*count - 1).max(0)
    };
}
