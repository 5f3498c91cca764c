use super::{parse_id, payments::PaymentModel, rewards::RewardModel};
use crate::{
    access,
    error::{self, JsonResult},
    state::RocketState,
};
use app::{bill, money::Amount};
use chrono::{DateTime, Utc};
use rocket::{get, post, serde::json::Json, State};
use rocket_okapi::openapi;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub(super) enum PriorityModel {
    Urgent,
    Medium,
    Low,
}

impl From<bill::Priority> for PriorityModel {
    fn from(priority: bill::Priority) -> Self {
        match priority {
            bill::Priority::Urgent => Self::Urgent,
            bill::Priority::Medium => Self::Medium,
            bill::Priority::Low => Self::Low,
        }
    }
}

impl From<PriorityModel> for bill::Priority {
    fn from(priority: PriorityModel) -> Self {
        match priority {
            PriorityModel::Urgent => Self::Urgent,
            PriorityModel::Medium => Self::Medium,
            PriorityModel::Low => Self::Low,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub(super) enum BillTypeModel {
    Hydro,
    Internet,
    Phone,
    Subscription,
    Other,
}

impl From<bill::BillType> for BillTypeModel {
    fn from(bill_type: bill::BillType) -> Self {
        match bill_type {
            bill::BillType::Hydro => Self::Hydro,
            bill::BillType::Internet => Self::Internet,
            bill::BillType::Phone => Self::Phone,
            bill::BillType::Subscription => Self::Subscription,
            bill::BillType::Other => Self::Other,
        }
    }
}

impl From<BillTypeModel> for bill::BillType {
    fn from(bill_type: BillTypeModel) -> Self {
        match bill_type {
            BillTypeModel::Hydro => Self::Hydro,
            BillTypeModel::Internet => Self::Internet,
            BillTypeModel::Phone => Self::Phone,
            BillTypeModel::Subscription => Self::Subscription,
            BillTypeModel::Other => Self::Other,
        }
    }
}

#[derive(Debug, Serialize, JsonSchema)]
pub(super) struct BillModel {
    /// Unique bill identifier.
    id: Uuid,
    /// Short name shown in the bill list, e.g. "Electricity Bill".
    name: String,
    /// The company that issued the bill.
    company: String,
    /// Amount due, as decimal text with two places.
    #[schemars(with = "String")]
    amount: Amount,
    /// When the bill is due.
    due_date: DateTime<Utc>,
    priority: PriorityModel,
    /// Icon class used by the client, e.g. "fas fa-bolt".
    icon: String,
    /// 1 once the bill has been paid, 0 otherwise.
    is_paid: u8,
    bill_type: BillTypeModel,
    /// Bill creation time.
    created_at: DateTime<Utc>,
}

impl BillModel {
    pub(super) fn from_entity(bill: &bill::Bill) -> Self {
        Self {
            id: bill.id.0,
            name: bill.name.clone(),
            company: bill.company.clone(),
            amount: bill.amount,
            due_date: bill.due_date,
            priority: bill.priority.into(),
            icon: bill.icon.clone(),
            is_paid: u8::from(bill.is_paid),
            bill_type: bill.bill_type.into(),
            created_at: bill.created,
        }
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub(super) struct BillRequest {
    name: String,
    company: String,
    /// Amount due, as decimal text with at most two places, e.g. "247.80".
    amount: String,
    due_date: DateTime<Utc>,
    priority: PriorityModel,
    icon: String,
    /// Defaults to "other".
    bill_type: Option<BillTypeModel>,
    /// 0 or 1, defaults to 0. Lets clients record bills that were already paid elsewhere.
    is_paid: Option<u8>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub(super) struct BillResponse {
    bill: BillModel,
}

#[derive(Debug, Serialize, JsonSchema)]
pub(super) struct BillsResponse {
    bills: Vec<BillModel>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub(super) struct PaidBillResponse {
    bill: BillModel,
    payment: PaymentModel,
    /// The on-time bonus, if one was granted.
    reward: Option<RewardModel>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(super) enum BillError {
    /// No bill with this id belongs to you.
    NotFound,
    /// The bill was paid before.
    AlreadyPaid,
    /// A required text field was empty.
    MissingField,
    /// The amount wasn't a non-negative decimal with at most two places.
    InvalidAmount,
    /// `is_paid` was neither 0 nor 1.
    InvalidIsPaid,
    /// The bill refers to a record that doesn't exist.
    InvalidReference,
}

fn map_error(e: bill::Error) -> error::JsonError<BillError> {
    let description = e.to_string();
    match e {
        bill::Error::NotFound => error::not_found(BillError::NotFound, description),
        bill::Error::AlreadyPaid => error::bad_request(BillError::AlreadyPaid, description),
        bill::Error::MissingField(_) => error::bad_request(BillError::MissingField, description),
        bill::Error::InvalidReference(_) => {
            error::bad_request(BillError::InvalidReference, description)
        }
    }
}

fn not_found() -> error::JsonError<BillError> {
    map_error(bill::Error::NotFound)
}

/// List your bills, soonest due first.
#[openapi(tag = "Bills")]
#[get("/bills")]
pub(super) async fn list(
    state: &State<RocketState>,
    guard: access::UserGuard,
) -> Json<BillsResponse> {
    Json(BillsResponse {
        bills: bill::list(guard.grant(), &state.db)
            .await
            .iter()
            .map(BillModel::from_entity)
            .collect(),
    })
}

/// Add a new bill.
#[openapi(tag = "Bills")]
#[post("/bills", data = "<req>")]
pub(super) async fn post(
    state: &State<RocketState>,
    guard: access::UserGuard,
    req: Json<BillRequest>,
) -> JsonResult<BillResponse, BillError> {
    let req = req.into_inner();
    let amount = req
        .amount
        .parse::<Amount>()
        .map_err(|e| error::bad_request(BillError::InvalidAmount, e.to_string()))?;
    let is_paid = match req.is_paid {
        None | Some(0) => false,
        Some(1) => true,
        Some(other) => {
            return Err(error::bad_request(
                BillError::InvalidIsPaid,
                format!("is_paid must be 0 or 1, got {}", other),
            ))
        }
    };
    let new = bill::NewBill {
        user_id: guard.grant().user_id,
        name: req.name,
        company: req.company,
        amount,
        due_date: req.due_date,
        priority: req.priority.into(),
        icon: req.icon,
        is_paid,
        bill_type: req.bill_type.map(Into::into).unwrap_or_default(),
    };
    bill::create(guard.grant(), &state.db, new)
        .await
        .map(|bill| {
            Json(BillResponse {
                bill: BillModel::from_entity(&bill),
            })
        })
        .map_err(map_error)
}

/// Get one of your bills.
#[openapi(tag = "Bills")]
#[get("/bills/<id>")]
pub(super) async fn get(
    state: &State<RocketState>,
    guard: access::UserGuard,
    id: String,
) -> JsonResult<BillResponse, BillError> {
    let id = parse_id(&id).ok_or_else(not_found)?;
    bill::get(guard.grant(), &state.db, bill::Id(id))
        .await
        .map(|bill| {
            Json(BillResponse {
                bill: BillModel::from_entity(&bill),
            })
        })
        .ok_or_else(not_found)
}

/// Pay one of your bills. Paying on or before the due date earns an on-time bonus.
#[openapi(tag = "Bills")]
#[post("/bills/<id>/pay")]
pub(super) async fn pay(
    state: &State<RocketState>,
    guard: access::UserGuard,
    id: String,
) -> JsonResult<PaidBillResponse, BillError> {
    let id = parse_id(&id).ok_or_else(not_found)?;
    let paid = bill::pay(
        guard.grant(),
        &state.db,
        bill::Id(id),
        &state.settings.on_time_bonus,
        &state.settings.calendar,
    )
    .await
    .map_err(map_error)?;
    Ok(Json(PaidBillResponse {
        bill: BillModel::from_entity(&paid.bill),
        payment: PaymentModel::from_entity(&paid.payment),
        reward: paid.reward.as_ref().map(RewardModel::from_entity),
    }))
}
