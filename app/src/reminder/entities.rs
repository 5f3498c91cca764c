use crate::bill::{self, Bill};
use chrono::{DateTime, FixedOffset, Offset, TimeZone, Utc};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// The urgency bucket of an unpaid bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReminderClass {
    SevenDays,
    TwoDays,
    DueToday,
    Overdue,
}

#[derive(Debug, Error)]
#[error("unknown reminder class {0:?}")]
pub struct UnknownReminderClass(pub String);

impl ReminderClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderClass::SevenDays => "seven-days",
            ReminderClass::TwoDays => "two-days",
            ReminderClass::DueToday => "due-today",
            ReminderClass::Overdue => "overdue",
        }
    }
}

impl fmt::Display for ReminderClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReminderClass {
    type Err = UnknownReminderClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "seven-days" => Ok(ReminderClass::SevenDays),
            "two-days" => Ok(ReminderClass::TwoDays),
            "due-today" => Ok(ReminderClass::DueToday),
            "overdue" => Ok(ReminderClass::Overdue),
            _ => Err(UnknownReminderClass(s.to_owned())),
        }
    }
}

/// Whole calendar days from `now` until `due`, negative once the due date has passed. The time
/// of day of either instant doesn't matter, only the dates in their time zone.
pub fn days_until_due<Tz: TimeZone>(now: &DateTime<Tz>, due: &DateTime<Tz>) -> i64 {
    due.date_naive()
        .signed_duration_since(now.date_naive())
        .num_days()
}

/// Maps a day delta onto a reminder class. Only the exact milestones 7, 2 and 0 days out
/// produce a reminder, plus every overdue day; everything else gets none.
pub fn classify(days_until_due: i64) -> Option<ReminderClass> {
    match days_until_due {
        7 => Some(ReminderClass::SevenDays),
        2 => Some(ReminderClass::TwoDays),
        0 => Some(ReminderClass::DueToday),
        days if days < 0 => Some(ReminderClass::Overdue),
        _ => None,
    }
}

/// The time zone in which day boundaries are drawn.
#[derive(Debug, Clone, Copy)]
pub struct Calendar {
    offset: FixedOffset,
}

impl Calendar {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Returns `None` for offsets outside of ±24 hours.
    pub fn from_utc_offset_minutes(minutes: i32) -> Option<Self> {
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(Self::new)
    }

    pub fn days_until_due(&self, now: DateTime<Utc>, due: DateTime<Utc>) -> i64 {
        days_until_due(
            &now.with_timezone(&self.offset),
            &due.with_timezone(&self.offset),
        )
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Self::new(Utc.fix())
    }
}

/// What happened to a single reminder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    /// The mailer reported an error.
    Failed(String),
    /// Nothing was dispatched, e.g. because the owner has no usable address.
    Skipped(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderOutcome {
    pub bill_id: bill::Id,
    pub bill_name: String,
    pub reminder_class: ReminderClass,
    pub delivery: Delivery,
}

impl ReminderOutcome {
    pub(crate) fn new(bill: &Bill, reminder_class: ReminderClass, delivery: Delivery) -> Self {
        Self {
            bill_id: bill.id,
            bill_name: bill.name.clone(),
            reminder_class,
            delivery,
        }
    }

    pub fn success(&self) -> bool {
        self.delivery == Delivery::Sent
    }

    pub fn error(&self) -> Option<&str> {
        match self.delivery {
            Delivery::Sent => None,
            Delivery::Failed(ref reason) | Delivery::Skipped(ref reason) => Some(reason.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn classifies_exact_milestones_only() {
        assert_eq!(classify(7), Some(ReminderClass::SevenDays));
        assert_eq!(classify(2), Some(ReminderClass::TwoDays));
        assert_eq!(classify(0), Some(ReminderClass::DueToday));
        assert_eq!(classify(-1), Some(ReminderClass::Overdue));
        assert_eq!(classify(-30), Some(ReminderClass::Overdue));
        for days in [1, 3, 6, 8, 15] {
            assert_eq!(classify(days), None, "{} days out", days);
        }
    }

    #[test]
    fn day_delta_ignores_time_of_day() {
        let calendar = Calendar::default();
        let now = at("2024-03-10T23:59:00Z");
        assert_eq!(calendar.days_until_due(now, at("2024-03-12T00:01:00Z")), 2);
        assert_eq!(calendar.days_until_due(now, at("2024-03-10T00:00:00Z")), 0);
        assert_eq!(calendar.days_until_due(now, at("2024-03-09T23:59:59Z")), -1);
        assert_eq!(
            calendar.days_until_due(now, at("2024-03-17T08:00:00Z")),
            calendar.days_until_due(at("2024-03-10T00:00:00Z"), at("2024-03-17T00:00:00Z"))
        );
    }

    #[test]
    fn day_boundaries_follow_the_calendar_offset() {
        // 02:00 UTC is still the previous evening five hours west of UTC.
        let now = at("2024-03-10T02:00:00Z");
        let due = at("2024-03-12T12:00:00Z");
        assert_eq!(Calendar::default().days_until_due(now, due), 2);
        let eastern = Calendar::from_utc_offset_minutes(-300).unwrap();
        assert_eq!(eastern.days_until_due(now, due), 3);
        assert!(Calendar::from_utc_offset_minutes(25 * 60).is_none());
    }

    #[test]
    fn reminder_class_names_round_trip() {
        for class in [
            ReminderClass::SevenDays,
            ReminderClass::TwoDays,
            ReminderClass::DueToday,
            ReminderClass::Overdue,
        ] {
            assert_eq!(class.as_str().parse::<ReminderClass>().unwrap(), class);
        }
        assert!("7-days".parse::<ReminderClass>().is_err());
    }
}
