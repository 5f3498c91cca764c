//! This library contains definitions for the API layer.

use app::{database::Database, mailer::Mailer};
use chrono::Utc;
use rocket::{Build, Rocket};
use state::RocketState;
use std::sync::Arc;

mod access;
mod error;
mod rate_limit;
mod routes;
mod state;

pub use rate_limit::RateLimit;
pub use state::Settings;

pub fn register(
    rocket: Rocket<Build>,
    db: Database,
    mailer: Arc<dyn Mailer>,
    settings: Settings,
    rate_limit: RateLimit,
) -> Rocket<Build> {
    routes::register(
        rocket,
        RocketState {
            db,
            mailer,
            settings,
            rate_limit,
            started_at: Utc::now(),
        },
    )
}
