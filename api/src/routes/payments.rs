use crate::{access, state::RocketState};
use app::{money::Amount, payment};
use chrono::{DateTime, Utc};
use rocket::{get, serde::json::Json, State};
use rocket_okapi::openapi;
use schemars::JsonSchema;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize, JsonSchema)]
pub(super) struct PaymentModel {
    /// Unique payment identifier.
    id: Uuid,
    /// The bill this payment settled.
    bill_id: Uuid,
    /// Amount paid, as decimal text with two places.
    #[schemars(with = "String")]
    amount: Amount,
    /// When the payment was recorded.
    payment_date: DateTime<Utc>,
    /// Payment status.
    status: PaymentStatus,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
enum PaymentStatus {
    /// Waiting for the payment processor.
    Pending,
    /// The payment went through.
    Completed,
    /// The payment failed.
    Failed,
}

impl PaymentModel {
    pub(super) fn from_entity(payment: &payment::Payment) -> Self {
        Self {
            id: payment.id.0,
            bill_id: payment.bill_id.0,
            amount: payment.amount,
            payment_date: payment.payment_date,
            status: match payment.status {
                payment::Status::Pending => PaymentStatus::Pending,
                payment::Status::Completed => PaymentStatus::Completed,
                payment::Status::Failed => PaymentStatus::Failed,
            },
        }
    }
}

#[derive(Debug, Serialize, JsonSchema)]
pub(super) struct PaymentsResponse {
    payments: Vec<PaymentModel>,
}

/// List all payments made from your account, most recent first.
#[openapi(tag = "Payments")]
#[get("/payments")]
pub(super) async fn list(
    state: &State<RocketState>,
    guard: access::UserGuard,
) -> Json<PaymentsResponse> {
    Json(PaymentsResponse {
        payments: payment::list(guard.grant(), &state.db)
            .await
            .iter()
            .map(PaymentModel::from_entity)
            .collect(),
    })
}
