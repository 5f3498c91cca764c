use crate::user;
use chrono::{DateTime, Utc};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(pub Uuid);

impl Id {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reward {
    pub id: Id,
    pub user_id: user::Id,
    pub points: u32,
    pub title: String,
    pub description: Option<String>,
    pub is_redeemed: bool,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewReward {
    pub user_id: user::Id,
    pub points: u32,
    pub title: String,
    pub description: Option<String>,
    pub is_redeemed: bool,
}

impl NewReward {
    pub(crate) fn into_reward(self, id: Id, created: DateTime<Utc>) -> Reward {
        Reward {
            id,
            user_id: self.user_id,
            points: self.points,
            title: self.title,
            description: self.description,
            is_redeemed: self.is_redeemed,
            created,
        }
    }
}

/// Shallow patch, see [`crate::bill::BillUpdate`]. `description: Some(None)` clears the
/// description.
#[derive(Debug, Clone, Default)]
pub struct RewardUpdate {
    pub points: Option<u32>,
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub is_redeemed: Option<bool>,
}

impl RewardUpdate {
    pub fn redeemed() -> Self {
        Self {
            is_redeemed: Some(true),
            ..Default::default()
        }
    }
}

impl Reward {
    pub(crate) fn apply(&mut self, update: RewardUpdate) {
        let RewardUpdate {
            points,
            title,
            description,
            is_redeemed,
        } = update;
        if let Some(points) = points {
            self.points = points;
        }
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(is_redeemed) = is_redeemed {
            self.is_redeemed = is_redeemed;
        }
    }
}
