use app::{database::Database, mailer::Mailer, reminder::Calendar, reward::OnTimeBonus};
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::rate_limit::RateLimit;

pub struct Settings {
    pub calendar: Calendar,
    pub on_time_bonus: OnTimeBonus,
    /// Required in the `X-Admin-Token` header of reminder and admin routes. `None` leaves them
    /// open.
    pub admin_token: Option<String>,
}

pub struct RocketState {
    pub db: Database,
    pub mailer: Arc<dyn Mailer>,
    pub settings: Settings,
    pub rate_limit: RateLimit,
    pub started_at: DateTime<Utc>,
}
