use crate::{bill, money::Amount, user};
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
pub enum Status {
    Pending,
    Completed,
    Failed,
}

/// A payment made towards a bill. Payments are immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payment {
    pub id: Id,
    pub bill_id: bill::Id,
    pub user_id: user::Id,
    pub amount: Amount,
    pub payment_date: DateTime<Utc>,
    pub status: Status,
}

/// Input for a new payment. The store stamps the payment date with the time it is recorded.
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub bill_id: bill::Id,
    pub user_id: user::Id,
    pub amount: Amount,
    pub status: Status,
}

impl NewPayment {
    pub(crate) fn into_payment(self, id: Id, payment_date: DateTime<Utc>) -> Payment {
        Payment {
            id,
            bill_id: self.bill_id,
            user_id: self.user_id,
            amount: self.amount,
            payment_date,
            status: self.status,
        }
    }
}
