//! Bill reminders. Every unpaid bill is bucketed by how many calendar days remain until it is
//! due (see [`classify`]); bills that land in a bucket get an e-mail sent to their owner.
//!
//! A scan is triggered from outside (an HTTP endpoint hit by cron) or by the optional worker
//! started with [`start_worker`]. A scan never fails as a whole: every classified bill yields a
//! [`ReminderOutcome`], including the ones that were skipped or whose e-mail failed.

use crate::{
    bill::{self, Bill},
    database::Database,
    mailer::{Mailer, ReminderEmail},
    worker,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::{sync::Arc, time::Duration};

mod entities;

pub use entities::{
    classify, days_until_due, Calendar, Delivery, ReminderClass, ReminderOutcome,
    UnknownReminderClass,
};

const NO_VALID_EMAIL: &str = "no valid email address";
const BILL_NOT_FOUND: &str = "bill not found";

pub async fn process_reminders(
    db: &Database,
    mailer: &dyn Mailer,
    calendar: &Calendar,
) -> Vec<ReminderOutcome> {
    process_reminders_at(db, mailer, calendar, Utc::now()).await
}

async fn process_reminders_at(
    db: &Database,
    mailer: &dyn Mailer,
    calendar: &Calendar,
    now: DateTime<Utc>,
) -> Vec<ReminderOutcome> {
    let unpaid = db.get_unpaid_bills_with_owner().await;
    log::info!("processing reminders for {} unpaid bills", unpaid.len());

    let mut outcomes = Vec::new();
    for (bill, user) in unpaid {
        let Some(class) = classify(calendar.days_until_due(now, bill.due_date)) else {
            continue;
        };
        let delivery = match user.email() {
            Some(address) => dispatch(mailer, address, &bill, class).await,
            None => {
                log::warn!(
                    "no valid email for user {}, skipping {} reminder for bill {}",
                    user.id,
                    class,
                    bill.id
                );
                Delivery::Skipped(NO_VALID_EMAIL.to_owned())
            }
        };
        outcomes.push(ReminderOutcome::new(&bill, class, delivery));
    }

    log::info!(
        "processed {} reminders, {} sent",
        outcomes.len(),
        outcomes.iter().filter(|outcome| outcome.success()).count()
    );
    outcomes
}

/// Sends a reminder of the given class for a single bill, bypassing classification.
pub async fn send_test_reminder(
    db: &Database,
    mailer: &dyn Mailer,
    address: &str,
    bill_id: bill::Id,
    class: ReminderClass,
) -> ReminderOutcome {
    match db.get_bill(bill_id).await {
        Some(bill) => {
            let delivery = dispatch(mailer, address, &bill, class).await;
            ReminderOutcome::new(&bill, class, delivery)
        }
        None => ReminderOutcome {
            bill_id,
            bill_name: "Unknown".to_owned(),
            reminder_class: class,
            delivery: Delivery::Failed(BILL_NOT_FOUND.to_owned()),
        },
    }
}

async fn dispatch(
    mailer: &dyn Mailer,
    address: &str,
    bill: &Bill,
    class: ReminderClass,
) -> Delivery {
    match mailer.send(&ReminderEmail::new(address, bill, class)).await {
        Ok(()) => Delivery::Sent,
        Err(e) => {
            log::error!(
                "failed to send {} reminder for bill {}: {:#}",
                class,
                bill.id,
                e
            );
            Delivery::Failed(format!("{:#}", e))
        }
    }
}

/// Runs a reminder scan every `interval`.
pub fn start_worker(
    db: Database,
    mailer: Arc<dyn Mailer>,
    calendar: Calendar,
    interval: Duration,
) {
    log::info!("running reminder scans every {:?}", interval);
    worker::start(ReminderWorker {
        db,
        mailer,
        calendar,
        interval,
    });
}

struct ReminderWorker {
    db: Database,
    mailer: Arc<dyn Mailer>,
    calendar: Calendar,
    interval: Duration,
}

#[async_trait]
impl worker::Worker for ReminderWorker {
    async fn run(&mut self) {
        process_reminders(&self.db, self.mailer.as_ref(), &self.calendar).await;
    }

    fn timeout(&self) -> Duration {
        self.interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bill::BillUpdate;
    use crate::database::fixtures;
    use anyhow::anyhow;
    use chrono::TimeZone;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<ReminderEmail>>,
        failing_address: Option<&'static str>,
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, email: &ReminderEmail) -> anyhow::Result<()> {
            if self.failing_address == Some(email.to.as_str()) {
                return Err(anyhow!("mailbox unavailable"));
            }
            self.sent.lock().await.push(email.clone());
            Ok(())
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 15, 30, 0).unwrap()
    }

    fn due_in(days: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 8, 0, 0).unwrap() + chrono::Duration::days(days)
    }

    fn outcome_for<'a>(outcomes: &'a [ReminderOutcome], bill: &Bill) -> &'a ReminderOutcome {
        outcomes
            .iter()
            .find(|outcome| outcome.bill_id == bill.id)
            .unwrap()
    }

    #[tokio::test]
    async fn two_days_out_sends_one_reminder() {
        let db = Database::default();
        let user = fixtures::user(&db, "a@b.com").await;
        let bill = db
            .create_bill(fixtures::new_bill(&user, "Credit Card", due_in(2)))
            .await
            .unwrap();
        let mailer = RecordingMailer::default();

        let outcomes = process_reminders_at(&db, &mailer, &Calendar::default(), now()).await;
        assert_eq!(
            outcomes,
            vec![ReminderOutcome {
                bill_id: bill.id,
                bill_name: "Credit Card".to_owned(),
                reminder_class: ReminderClass::TwoDays,
                delivery: Delivery::Sent,
            }]
        );
        let sent = mailer.sent.lock().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "a@b.com");
    }

    #[tokio::test]
    async fn paid_bills_are_not_scanned() {
        let db = Database::default();
        let user = fixtures::user(&db, "a@b.com").await;
        let bill = db
            .create_bill(fixtures::new_bill(&user, "Credit Card", due_in(2)))
            .await
            .unwrap();
        db.update_bill(bill.id, BillUpdate::paid()).await.unwrap();
        let mailer = RecordingMailer::default();

        let outcomes = process_reminders_at(&db, &mailer, &Calendar::default(), now()).await;
        assert!(outcomes.is_empty());
        assert!(mailer.sent.lock().await.is_empty());
    }

    #[tokio::test]
    async fn buckets_follow_exact_day_deltas() {
        let db = Database::default();
        let user = fixtures::user(&db, "a@b.com").await;
        let mut bills = Vec::new();
        for days in [7, 3, 2, 1, 0, -1, 8] {
            let bill = db
                .create_bill(fixtures::new_bill(&user, &format!("due {}", days), due_in(days)))
                .await
                .unwrap();
            bills.push((days, bill));
        }
        let mailer = RecordingMailer::default();

        let outcomes = process_reminders_at(&db, &mailer, &Calendar::default(), now()).await;
        assert_eq!(outcomes.len(), 4);
        for (days, bill) in &bills {
            let class = outcomes
                .iter()
                .find(|outcome| outcome.bill_id == bill.id)
                .map(|outcome| outcome.reminder_class);
            let expected = match days {
                7 => Some(ReminderClass::SevenDays),
                2 => Some(ReminderClass::TwoDays),
                0 => Some(ReminderClass::DueToday),
                -1 => Some(ReminderClass::Overdue),
                _ => None,
            };
            assert_eq!(class, expected, "bill due in {} days", days);
        }
    }

    #[tokio::test]
    async fn invalid_addresses_are_skipped_and_reported() {
        let db = Database::default();
        let valid = fixtures::user(&db, "a@b.com").await;
        let invalid = fixtures::user(&db, "johndoe").await;
        let sendable = db
            .create_bill(fixtures::new_bill(&valid, "Hydro", due_in(0)))
            .await
            .unwrap();
        let skipped = db
            .create_bill(fixtures::new_bill(&invalid, "Phone", due_in(7)))
            .await
            .unwrap();
        db.create_bill(fixtures::new_bill(&invalid, "Netflix", due_in(15)))
            .await
            .unwrap();
        let mailer = RecordingMailer::default();

        let outcomes = process_reminders_at(&db, &mailer, &Calendar::default(), now()).await;
        assert_eq!(outcomes.len(), 2);
        assert_eq!(mailer.sent.lock().await.len(), 1);
        assert!(outcome_for(&outcomes, &sendable).success());
        let skipped = outcome_for(&outcomes, &skipped);
        assert_eq!(skipped.delivery, Delivery::Skipped(NO_VALID_EMAIL.to_owned()));
        assert_eq!(skipped.error(), Some(NO_VALID_EMAIL));
    }

    #[tokio::test]
    async fn one_failed_dispatch_does_not_stop_the_scan() {
        let db = Database::default();
        let failing = fixtures::user(&db, "broken@b.com").await;
        let working = fixtures::user(&db, "works@b.com").await;
        let failed = db
            .create_bill(fixtures::new_bill(&failing, "Hydro", due_in(-3)))
            .await
            .unwrap();
        let sent = db
            .create_bill(fixtures::new_bill(&working, "Internet", due_in(-3)))
            .await
            .unwrap();
        let mailer = RecordingMailer {
            failing_address: Some("broken@b.com"),
            ..Default::default()
        };

        let outcomes = process_reminders_at(&db, &mailer, &Calendar::default(), now()).await;
        assert_eq!(outcomes.len(), 2);
        let failed = outcome_for(&outcomes, &failed);
        assert!(!failed.success());
        assert_eq!(failed.error(), Some("mailbox unavailable"));
        assert!(outcome_for(&outcomes, &sent).success());
    }

    #[tokio::test]
    async fn test_reminder_uses_requested_class() {
        let db = Database::default();
        let user = fixtures::user(&db, "a@b.com").await;
        let bill = db
            .create_bill(fixtures::new_bill(&user, "Netflix", due_in(15)))
            .await
            .unwrap();
        let mailer = RecordingMailer::default();

        let outcome =
            send_test_reminder(&db, &mailer, "admin@b.com", bill.id, ReminderClass::Overdue).await;
        assert!(outcome.success());
        assert_eq!(outcome.reminder_class, ReminderClass::Overdue);
        assert_eq!(mailer.sent.lock().await[0].to, "admin@b.com");
    }

    #[tokio::test]
    async fn test_reminder_for_unknown_bill_fails() {
        let db = Database::default();
        let mailer = RecordingMailer::default();
        let id = bill::Id::default();

        let outcome =
            send_test_reminder(&db, &mailer, "admin@b.com", id, ReminderClass::TwoDays).await;
        assert_eq!(outcome.bill_name, "Unknown");
        assert_eq!(outcome.error(), Some(BILL_NOT_FOUND));
        assert!(mailer.sent.lock().await.is_empty());
    }
}
