use super::parse_id;
use crate::{
    access,
    error::{self, JsonResult},
    state::RocketState,
};
use app::reward;
use chrono::{DateTime, Utc};
use rocket::{get, post, serde::json::Json, State};
use rocket_okapi::openapi;
use schemars::JsonSchema;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize, JsonSchema)]
pub(super) struct RewardModel {
    /// Unique reward identifier.
    id: Uuid,
    points: u32,
    title: String,
    description: Option<String>,
    /// 1 once the points have been spent, 0 otherwise.
    is_redeemed: u8,
    /// When the reward was granted.
    created_at: DateTime<Utc>,
}

impl RewardModel {
    pub(super) fn from_entity(reward: &reward::Reward) -> Self {
        Self {
            id: reward.id.0,
            points: reward.points,
            title: reward.title.clone(),
            description: reward.description.clone(),
            is_redeemed: u8::from(reward.is_redeemed),
            created_at: reward.created,
        }
    }
}

#[derive(Debug, Serialize, JsonSchema)]
pub(super) struct RewardsResponse {
    rewards: Vec<RewardModel>,
    /// Sum of the points of all rewards that haven't been redeemed yet.
    available_points: u64,
}

#[derive(Debug, Serialize, JsonSchema)]
pub(super) struct RewardResponse {
    reward: RewardModel,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(super) enum RedeemError {
    /// No reward with this id belongs to you.
    NotFound,
    /// The reward was redeemed before.
    AlreadyRedeemed,
}

/// List your rewards, newest first.
#[openapi(tag = "Rewards")]
#[get("/rewards")]
pub(super) async fn list(
    state: &State<RocketState>,
    guard: access::UserGuard,
) -> Json<RewardsResponse> {
    let rewards = reward::list(guard.grant(), &state.db).await;
    Json(RewardsResponse {
        available_points: reward::available_points(&rewards),
        rewards: rewards.iter().map(RewardModel::from_entity).collect(),
    })
}

/// Redeem one of your rewards.
#[openapi(tag = "Rewards")]
#[post("/rewards/<id>/redeem")]
pub(super) async fn redeem(
    state: &State<RocketState>,
    guard: access::UserGuard,
    id: String,
) -> JsonResult<RewardResponse, RedeemError> {
    let id = parse_id(&id).ok_or_else(|| {
        error::not_found(RedeemError::NotFound, reward::Error::NotFound.to_string())
    })?;
    reward::redeem(guard.grant(), &state.db, reward::Id(id))
        .await
        .map(|reward| {
            Json(RewardResponse {
                reward: RewardModel::from_entity(&reward),
            })
        })
        .map_err(|e| match e {
            reward::Error::NotFound => error::not_found(RedeemError::NotFound, e.to_string()),
            reward::Error::AlreadyRedeemed => {
                error::bad_request(RedeemError::AlreadyRedeemed, e.to_string())
            }
        })
}
