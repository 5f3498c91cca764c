use crate::{auth, database::Database};

mod entities;

pub use entities::{Id, NewPayment, Payment, Status};

/// Lists the user's payments, most recent first.
pub async fn list(grant: &auth::Grant, db: &Database) -> Vec<Payment> {
    let mut payments = db.get_payments_by_user_id(grant.user_id).await;
    payments.sort_by(|a, b| b.payment_date.cmp(&a.payment_date));
    payments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bill;
    use crate::database::fixtures;
    use chrono::{Duration, Utc};

    fn payment(user_id: crate::user::Id, days_ago: i64) -> Payment {
        Payment {
            id: Id::generate(),
            bill_id: bill::Id::generate(),
            user_id,
            amount: "10.00".parse().unwrap(),
            payment_date: Utc::now() - Duration::days(days_ago),
            status: Status::Completed,
        }
    }

    #[tokio::test]
    async fn lists_own_payments_most_recent_first() {
        let db = Database::default();
        let user = fixtures::user(&db, "a@b.com").await;
        let other = fixtures::user(&db, "other@b.com").await;
        let older = payment(user.id, 3);
        let newest = payment(user.id, 0);
        let middle = payment(user.id, 1);
        for payment in [older.clone(), newest.clone(), middle.clone(), payment(other.id, 0)] {
            fixtures::insert_payment(&db, payment).await;
        }

        let grant = auth::Grant { user_id: user.id };
        assert_eq!(list(&grant, &db).await, vec![newest, middle, older]);
    }
}
