use std::{sync::Arc, time::Duration};

use anyhow::anyhow;
use app::database::{seed_development_data, Database, ReferenceCheck};
use app::mailer::{self, HttpMailer, LogMailer, Mailer};
use app::reminder::{self, Calendar};
use app::reward::OnTimeBonus;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Config {
    #[serde(default)]
    store: StoreConfig,
    #[serde(default)]
    reminders: RemindersConfig,
    /// Without a mailer section, e-mails are only written to the log.
    mailer: Option<mailer::Config>,
    #[serde(default)]
    rewards: RewardsConfig,
    rate_limit: RateLimitConfig,
    admin_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct StoreConfig {
    #[serde(default)]
    reference_check: ReferenceCheck,
}

#[derive(Debug, Default, Deserialize)]
struct RemindersConfig {
    /// Day boundaries are drawn at midnight of this UTC offset.
    #[serde(default)]
    utc_offset_minutes: i32,
    /// Zero disables the in-process scan; the scan can still be triggered over HTTP.
    #[serde(default)]
    interval_secs: u64,
}

impl RemindersConfig {
    fn calendar(&self) -> anyhow::Result<Calendar> {
        Calendar::from_utc_offset_minutes(self.utc_offset_minutes).ok_or_else(|| {
            anyhow!(
                "reminders.utc_offset_minutes out of range: {}",
                self.utc_offset_minutes
            )
        })
    }
}

#[derive(Debug, Deserialize)]
struct RewardsConfig {
    on_time_points: u32,
}

impl Default for RewardsConfig {
    fn default() -> Self {
        Self { on_time_points: 50 }
    }
}

#[derive(Debug, Deserialize)]
struct RateLimitConfig {
    limit: usize,
    span: Duration,
}

impl RateLimitConfig {
    fn into_rate_limit(self) -> api::RateLimit {
        api::RateLimit::new(self.limit, self.span)
    }
}

#[rocket::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let rocket = rocket::build();
    let config: Config = rocket
        .figment()
        .extract()
        .map_err(|e| anyhow!("invalid configuration: {}", e))?;

    let db = Database::new(config.store.reference_check);
    #[cfg(debug_assertions)]
    seed_development_data(&db).await;

    let calendar = config.reminders.calendar()?;
    let mailer: Arc<dyn Mailer> = match config.mailer {
        Some(mailer) => Arc::new(HttpMailer::new(mailer)?),
        None => {
            log::warn!("no mailer configured, reminder e-mails will only be logged");
            Arc::new(LogMailer)
        }
    };
    if config.reminders.interval_secs > 0 {
        reminder::start_worker(
            db.clone(),
            mailer.clone(),
            calendar,
            Duration::from_secs(config.reminders.interval_secs),
        );
    }
    if config.admin_token.is_none() {
        log::warn!("admin_token is not set, reminder routes are open to anyone");
    }

    let rocket = api::register(
        rocket,
        db,
        mailer,
        api::Settings {
            calendar,
            on_time_bonus: OnTimeBonus {
                points: config.rewards.on_time_points,
            },
            admin_token: config.admin_token,
        },
        config.rate_limit.into_rate_limit(),
    );
    if let Err(e) = rocket.launch().await {
        return Err(anyhow!("server failed: {}", e));
    }
    Ok(())
}
