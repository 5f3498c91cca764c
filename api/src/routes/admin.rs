use crate::{access, state::RocketState};
use chrono::{DateTime, Utc};
use rocket::{get, serde::json::Json, State};
use rocket_okapi::openapi;
use schemars::JsonSchema;
use serde::Serialize;

#[derive(Debug, Serialize, JsonSchema)]
pub(super) struct StatusResponse {
    /// Always "healthy" when the server answers.
    status: &'static str,
    /// Uptime as minutes and seconds, e.g. "12m 5s".
    uptime: String,
    uptime_secs: i64,
    /// When the server started.
    started_at: DateTime<Utc>,
    /// Server time of this response.
    timestamp: DateTime<Utc>,
}

impl StatusResponse {
    fn new(started_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let uptime_secs = now.signed_duration_since(started_at).num_seconds().max(0);
        Self {
            status: "healthy",
            uptime: format!("{}m {}s", uptime_secs / 60, uptime_secs % 60),
            uptime_secs,
            started_at,
            timestamp: now,
        }
    }
}

/// Report that the server is up and for how long.
#[openapi(tag = "Admin")]
#[get("/admin/status")]
pub(super) async fn status(
    state: &State<RocketState>,
    _guard: access::AdminGuard,
) -> Json<StatusResponse> {
    Json(StatusResponse::new(state.started_at, Utc::now()))
}
