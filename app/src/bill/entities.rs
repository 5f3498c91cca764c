use crate::{money::Amount, user};
use chrono::{DateTime, Utc};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(pub Uuid);

impl Id {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Urgent,
    Medium,
    Low,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum BillType {
    Hydro,
    Internet,
    Phone,
    Subscription,
    #[default]
    Other,
}

/// An obligation owed by a user to a company. Bills are never deleted; paying one only flips
/// [`Bill::is_paid`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bill {
    pub id: Id,
    pub user_id: user::Id,
    pub name: String,
    pub company: String,
    pub amount: Amount,
    pub due_date: DateTime<Utc>,
    pub priority: Priority,
    pub icon: String,
    pub is_paid: bool,
    pub bill_type: BillType,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewBill {
    pub user_id: user::Id,
    pub name: String,
    pub company: String,
    pub amount: Amount,
    pub due_date: DateTime<Utc>,
    pub priority: Priority,
    pub icon: String,
    pub is_paid: bool,
    pub bill_type: BillType,
}

impl NewBill {
    pub(crate) fn into_bill(self, id: Id, created: DateTime<Utc>) -> Bill {
        Bill {
            id,
            user_id: self.user_id,
            name: self.name,
            company: self.company,
            amount: self.amount,
            due_date: self.due_date,
            priority: self.priority,
            icon: self.icon,
            is_paid: self.is_paid,
            bill_type: self.bill_type,
            created,
        }
    }
}

/// A shallow patch: every `Some` field replaces the stored value, `None` leaves it alone. The
/// owner, id and creation time can't be patched.
#[derive(Debug, Clone, Default)]
pub struct BillUpdate {
    pub name: Option<String>,
    pub company: Option<String>,
    pub amount: Option<Amount>,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: Option<Priority>,
    pub icon: Option<String>,
    pub is_paid: Option<bool>,
    pub bill_type: Option<BillType>,
}

impl BillUpdate {
    pub fn paid() -> Self {
        Self {
            is_paid: Some(true),
            ..Default::default()
        }
    }
}

impl Bill {
    pub(crate) fn apply(&mut self, update: BillUpdate) {
        let BillUpdate {
            name,
            company,
            amount,
            due_date,
            priority,
            icon,
            is_paid,
            bill_type,
        } = update;
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(company) = company {
            self.company = company;
        }
        if let Some(amount) = amount {
            self.amount = amount;
        }
        if let Some(due_date) = due_date {
            self.due_date = due_date;
        }
        if let Some(priority) = priority {
            self.priority = priority;
        }
        if let Some(icon) = icon {
            self.icon = icon;
        }
        if let Some(is_paid) = is_paid {
            self.is_paid = is_paid;
        }
        if let Some(bill_type) = bill_type {
            self.bill_type = bill_type;
        }
    }
}
