//! Bills owned by a user. Besides plain listing and creation, this module implements paying a
//! bill, which touches three record kinds at once: the bill is flagged as paid, a completed
//! payment is recorded and, when the bill is paid on time, an on-time bonus reward is granted.
//! All of it happens under a single store write, so a bill can't be paid twice.

use crate::{
    auth,
    database::{Database, ReferenceError},
    payment::{self, NewPayment, Payment},
    reminder::Calendar,
    reward::{OnTimeBonus, Reward},
};
use chrono::Utc;
use thiserror::Error;

mod entities;

pub use entities::{Bill, BillType, BillUpdate, Id, NewBill, Priority};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("bill not found")]
    NotFound,
    #[error("bill has already been paid")]
    AlreadyPaid,
    #[error("{0} must not be empty")]
    MissingField(&'static str),
    #[error("{0}")]
    InvalidReference(#[from] ReferenceError),
}

/// Everything that changed when a bill got paid.
#[derive(Debug)]
pub struct PaidBill {
    pub bill: Bill,
    pub payment: Payment,
    pub reward: Option<Reward>,
}

/// Lists the user's bills, soonest due first.
pub async fn list(grant: &auth::Grant, db: &Database) -> Vec<Bill> {
    let mut bills = db.get_bills_by_user_id(grant.user_id).await;
    bills.sort_by_key(|bill| bill.due_date);
    bills
}

pub async fn get(grant: &auth::Grant, db: &Database, id: Id) -> Option<Bill> {
    db.get_bill(id)
        .await
        .filter(|bill| bill.user_id == grant.user_id)
}

/// Creates a bill owned by the grant's user, whatever `new.user_id` says.
pub async fn create(grant: &auth::Grant, db: &Database, mut new: NewBill) -> Result<Bill, Error> {
    for (field, value) in [
        ("name", &new.name),
        ("company", &new.company),
        ("icon", &new.icon),
    ] {
        if value.trim().is_empty() {
            return Err(Error::MissingField(field));
        }
    }
    new.user_id = grant.user_id;
    let bill = db.create_bill(new).await?;
    log::info!("user {} added bill {}", grant.user_id, bill.id);
    Ok(bill)
}

pub async fn pay(
    grant: &auth::Grant,
    db: &Database,
    id: Id,
    bonus: &OnTimeBonus,
    calendar: &Calendar,
) -> Result<PaidBill, Error> {
    let mut tables = db.write().await;
    let bill = tables
        .get_bill(id)
        .filter(|bill| bill.user_id == grant.user_id)
        .ok_or(Error::NotFound)?;
    if bill.is_paid {
        return Err(Error::AlreadyPaid);
    }
    let payment = tables.create_payment(NewPayment {
        bill_id: bill.id,
        user_id: bill.user_id,
        amount: bill.amount,
        status: payment::Status::Completed,
    })?;
    let bill = tables
        .update_bill(id, BillUpdate::paid())
        .ok_or(Error::NotFound)?;
    let reward = if bonus.points > 0 && calendar.days_until_due(Utc::now(), bill.due_date) >= 0 {
        Some(tables.create_reward(bonus.reward_for(&bill))?)
    } else {
        None
    };
    log::info!(
        "user {} paid bill {} with payment {}",
        grant.user_id,
        bill.id,
        payment.id
    );
    Ok(PaidBill {
        bill,
        payment,
        reward,
    })
}
