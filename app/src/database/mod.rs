//! The record store. All users, bills, payments and rewards live in process memory behind a
//! single [`RwLock`], which gives the store a single-writer discipline: writes are serialized,
//! reads share the lock.
//!
//! [`Database`] is a cheap handle; clone it wherever the store is needed. Lookups that find
//! nothing return `None` rather than an error, and updates of unknown ids do the same.

use crate::{bill, payment, reward, user};
use serde::Deserialize;
use std::{collections::HashMap, sync::Arc};
use thiserror::Error;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

pub use seeder::seed_development_data;

mod bills;
mod payments;
mod rewards;
mod seeder;
mod users;

/// Whether creates verify that the records they point at exist.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceCheck {
    /// Owner ids are stored as given.
    #[default]
    Trust,
    /// Creates naming a missing user or bill fail with a [`ReferenceError`].
    Enforce,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReferenceError {
    #[error("user {0} does not exist")]
    UnknownUser(user::Id),
    #[error("bill {0} does not exist")]
    UnknownBill(bill::Id),
}

#[derive(Debug, Clone, Default)]
pub struct Database {
    tables: Arc<RwLock<Tables>>,
}

#[derive(Debug, Default)]
pub(crate) struct Tables {
    users: HashMap<user::Id, user::User>,
    bills: HashMap<bill::Id, bill::Bill>,
    payments: HashMap<payment::Id, payment::Payment>,
    rewards: HashMap<reward::Id, reward::Reward>,
    reference_check: ReferenceCheck,
}

impl Database {
    pub fn new(reference_check: ReferenceCheck) -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables {
                reference_check,
                ..Default::default()
            })),
        }
    }

    pub(crate) async fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().await
    }

    /// Operations that must check and mutate atomically hold this guard for their whole
    /// duration.
    pub(crate) async fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().await
    }
}

impl Tables {
    fn check_user(&self, id: user::Id) -> Result<(), ReferenceError> {
        match self.reference_check {
            ReferenceCheck::Enforce if !self.users.contains_key(&id) => {
                Err(ReferenceError::UnknownUser(id))
            }
            _ => Ok(()),
        }
    }

    fn check_bill(&self, id: bill::Id) -> Result<(), ReferenceError> {
        match self.reference_check {
            ReferenceCheck::Enforce if !self.bills.contains_key(&id) => {
                Err(ReferenceError::UnknownBill(id))
            }
            _ => Ok(()),
        }
    }
}
