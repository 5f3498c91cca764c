use futures::FutureExt;
use std::{future::Future, panic::AssertUnwindSafe};

pub mod auth;
pub mod bill;
pub mod database;
pub mod mailer;
pub mod money;
pub mod payment;
pub mod reminder;
pub mod reward;
pub mod user;
mod worker;

pub use database::{Database, ReferenceCheck};
pub use money::Amount;

async fn swallow_panic(f: impl Future<Output = ()>) {
    if AssertUnwindSafe(f).catch_unwind().await.is_err() {
        log::error!("worker run panicked");
    }
}
