use super::{Database, ReferenceError, Tables};
use crate::reward::{self, NewReward, Reward, RewardUpdate};
use crate::user;
use chrono::Utc;

impl Tables {
    pub(crate) fn create_reward(&mut self, new: NewReward) -> Result<Reward, ReferenceError> {
        self.check_user(new.user_id)?;
        let reward = new.into_reward(reward::Id::generate(), Utc::now());
        self.insert_reward(reward.clone());
        Ok(reward)
    }

    pub(super) fn insert_reward(&mut self, reward: Reward) {
        self.rewards.insert(reward.id, reward);
    }

    pub(crate) fn get_reward(&self, id: reward::Id) -> Option<Reward> {
        self.rewards.get(&id).cloned()
    }

    pub(crate) fn get_rewards_by_user_id(&self, user_id: user::Id) -> Vec<Reward> {
        self.rewards
            .values()
            .filter(|reward| reward.user_id == user_id)
            .cloned()
            .collect()
    }

    pub(crate) fn update_reward(&mut self, id: reward::Id, update: RewardUpdate) -> Option<Reward> {
        let reward = self.rewards.get_mut(&id)?;
        reward.apply(update);
        Some(reward.clone())
    }
}

impl Database {
    pub async fn create_reward(&self, new: NewReward) -> Result<Reward, ReferenceError> {
        self.write().await.create_reward(new)
    }

    pub async fn get_rewards_by_user_id(&self, user_id: user::Id) -> Vec<Reward> {
        self.read().await.get_rewards_by_user_id(user_id)
    }

    pub async fn update_reward(&self, id: reward::Id, update: RewardUpdate) -> Option<Reward> {
        self.write().await.update_reward(id, update)
    }
}
