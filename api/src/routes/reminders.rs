//! Routes that trigger reminder e-mails. They are meant to be hit by a scheduler or an
//! operator, not by end users.

use crate::{
    access,
    error::{self, JsonResult},
    state::RocketState,
};
use app::{bill, reminder};
use rocket::{post, serde::json::Json, State};
use rocket_okapi::openapi;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, JsonSchema)]
pub(super) struct ReminderResultModel {
    bill_id: Uuid,
    bill_name: String,
    /// One of "seven-days", "two-days", "due-today" or "overdue".
    reminder_class: String,
    /// True if the e-mail was handed to the mail provider.
    success: bool,
    /// True if nothing was sent because the owner has no usable address.
    skipped: bool,
    /// Why the reminder wasn't sent.
    error: Option<String>,
}

impl ReminderResultModel {
    fn from_entity(outcome: &reminder::ReminderOutcome) -> Self {
        Self {
            bill_id: outcome.bill_id.0,
            bill_name: outcome.bill_name.clone(),
            reminder_class: outcome.reminder_class.to_string(),
            success: outcome.success(),
            skipped: matches!(outcome.delivery, reminder::Delivery::Skipped(_)),
            error: outcome.error().map(str::to_owned),
        }
    }
}

#[derive(Debug, Serialize, JsonSchema)]
pub(super) struct ReminderResultsResponse {
    results: Vec<ReminderResultModel>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub(super) struct ReminderResultResponse {
    result: ReminderResultModel,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub(super) struct TestReminderRequest {
    /// Where to send the reminder, regardless of who owns the bill.
    email: String,
    bill_id: Uuid,
    /// One of "seven-days", "two-days", "due-today" or "overdue".
    reminder_class: String,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(super) enum TestReminderError {
    /// The reminder class isn't one of the known ones.
    InvalidReminderClass,
    /// The address doesn't look like an e-mail address.
    InvalidEmail,
}

/// Scan all unpaid bills and send the reminders that are due today.
#[openapi(tag = "Reminders")]
#[post("/reminders/run")]
pub(super) async fn run(
    state: &State<RocketState>,
    _guard: access::AdminGuard,
) -> Json<ReminderResultsResponse> {
    let outcomes = reminder::process_reminders(
        &state.db,
        state.mailer.as_ref(),
        &state.settings.calendar,
    )
    .await;
    Json(ReminderResultsResponse {
        results: outcomes
            .iter()
            .map(ReminderResultModel::from_entity)
            .collect(),
    })
}

/// Send a single reminder for a bill to an arbitrary address.
#[openapi(tag = "Reminders")]
#[post("/reminders/test", data = "<req>")]
pub(super) async fn test(
    state: &State<RocketState>,
    _guard: access::AdminGuard,
    req: Json<TestReminderRequest>,
) -> JsonResult<ReminderResultResponse, TestReminderError> {
    if !req.email.contains('@') {
        return Err(error::bad_request(
            TestReminderError::InvalidEmail,
            format!("{:?} is not an e-mail address", req.email),
        ));
    }
    let class = req
        .reminder_class
        .parse::<reminder::ReminderClass>()
        .map_err(|e| error::bad_request(TestReminderError::InvalidReminderClass, e.to_string()))?;
    let outcome = reminder::send_test_reminder(
        &state.db,
        state.mailer.as_ref(),
        &req.email,
        bill::Id(req.bill_id),
        class,
    )
    .await;
    Ok(Json(ReminderResultResponse {
        result: ReminderResultModel::from_entity(&outcome),
    }))
}
