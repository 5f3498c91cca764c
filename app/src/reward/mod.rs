use crate::{auth, bill::Bill, database::Database};
use serde::Deserialize;
use thiserror::Error;

mod entities;

pub use entities::{Id, NewReward, Reward, RewardUpdate};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("reward not found")]
    NotFound,
    #[error("reward has already been redeemed")]
    AlreadyRedeemed,
}

/// Points granted for paying a bill on or before its due date. Zero disables the bonus.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct OnTimeBonus {
    pub points: u32,
}

impl OnTimeBonus {
    pub(crate) fn reward_for(&self, bill: &Bill) -> NewReward {
        NewReward {
            user_id: bill.user_id,
            points: self.points,
            title: "On-time Payment Bonus".to_owned(),
            description: Some(format!("Earned for paying {} on time", bill.name)),
            is_redeemed: false,
        }
    }
}

pub async fn list(grant: &auth::Grant, db: &Database) -> Vec<Reward> {
    let mut rewards = db.get_rewards_by_user_id(grant.user_id).await;
    rewards.sort_by(|a, b| b.created.cmp(&a.created));
    rewards
}

/// Points that can still be redeemed.
pub fn available_points(rewards: &[Reward]) -> u64 {
    rewards
        .iter()
        .filter(|reward| !reward.is_redeemed)
        .map(|reward| u64::from(reward.points))
        .sum()
}

pub async fn redeem(grant: &auth::Grant, db: &Database, id: Id) -> Result<Reward, Error> {
    let mut tables = db.write().await;
    let reward = tables
        .get_reward(id)
        .filter(|reward| reward.user_id == grant.user_id)
        .ok_or(Error::NotFound)?;
    if reward.is_redeemed {
        return Err(Error::AlreadyRedeemed);
    }
    let reward = tables
        .update_reward(id, RewardUpdate::redeemed())
        .ok_or(Error::NotFound)?;
    log::info!(
        "user {} redeemed reward {} for {} points",
        grant.user_id,
        reward.id,
        reward.points
    );
    Ok(reward)
}
