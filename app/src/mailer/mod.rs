//! The e-mail side of reminders. [`Mailer`] is the seam the reminder scan dispatches through;
//! [`HttpMailer`] talks to a transactional e-mail API, [`LogMailer`] only writes the e-mail to
//! the log.

use crate::{bill::Bill, reminder::ReminderClass};
use async_trait::async_trait;

mod http;

pub use http::{Config, HttpMailer};

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &ReminderEmail) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderEmail {
    pub to: String,
    pub subject: String,
    pub text: String,
}

impl ReminderEmail {
    pub fn new(to: &str, bill: &Bill, class: ReminderClass) -> Self {
        let (subject, status) = match class {
            ReminderClass::SevenDays => (
                format!("Reminder: {} is due in 7 days", bill.name),
                "is due in 7 days",
            ),
            ReminderClass::TwoDays => (
                format!("Reminder: {} is due in 2 days", bill.name),
                "is due in 2 days",
            ),
            ReminderClass::DueToday => (format!("{} is due today", bill.name), "is due today"),
            ReminderClass::Overdue => (format!("Overdue: {} is past due", bill.name), "was due"),
        };
        let text = format!(
            "Hi,\n\nYour {} bill \"{}\" for ${} {} on {}.\n\nOpen the app to pay it and keep your on-time streak.\n",
            bill.company,
            bill.name,
            bill.amount,
            status,
            bill.due_date.format("%B %-d, %Y"),
        );
        Self {
            to: to.to_owned(),
            subject,
            text,
        }
    }
}

/// Writes e-mails to the log instead of sending them. Used when no e-mail API is configured.
#[derive(Debug, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: &ReminderEmail) -> anyhow::Result<()> {
        log::info!("e-mail to {}: {}", email.to, email.subject);
        log::debug!("{}", email.text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bill::{self, BillType, Priority};
    use crate::user;
    use chrono::{TimeZone, Utc};

    fn bill() -> Bill {
        Bill {
            id: bill::Id::default(),
            user_id: user::Id::default(),
            name: "Phone Bill".to_owned(),
            company: "Verizon".to_owned(),
            amount: "125.00".parse().unwrap(),
            due_date: Utc.with_ymd_and_hms(2024, 7, 4, 12, 0, 0).unwrap(),
            priority: Priority::Medium,
            icon: "fas fa-phone".to_owned(),
            is_paid: false,
            bill_type: BillType::Phone,
            created: Utc::now(),
        }
    }

    #[test]
    fn renders_subject_per_class() {
        let bill = bill();
        let email = ReminderEmail::new("a@b.com", &bill, ReminderClass::SevenDays);
        assert_eq!(email.to, "a@b.com");
        assert_eq!(email.subject, "Reminder: Phone Bill is due in 7 days");
        assert!(email
            .text
            .contains("Your Verizon bill \"Phone Bill\" for $125.00 is due in 7 days on July 4, 2024."));
        assert_eq!(
            ReminderEmail::new("a@b.com", &bill, ReminderClass::DueToday).subject,
            "Phone Bill is due today"
        );
        assert_eq!(
            ReminderEmail::new("a@b.com", &bill, ReminderClass::Overdue).subject,
            "Overdue: Phone Bill is past due"
        );
    }

    #[tokio::test]
    async fn log_mailer_always_succeeds() {
        let email = ReminderEmail::new("a@b.com", &bill(), ReminderClass::TwoDays);
        assert!(LogMailer.send(&email).await.is_ok());
    }
}
