use super::{Database, ReferenceError, Tables};
use crate::payment::{self, NewPayment, Payment};
use crate::user;
use chrono::Utc;

impl Tables {
    /// Records a payment dated now.
    pub(crate) fn create_payment(&mut self, new: NewPayment) -> Result<Payment, ReferenceError> {
        self.check_user(new.user_id)?;
        self.check_bill(new.bill_id)?;
        let payment = new.into_payment(payment::Id::generate(), Utc::now());
        self.payments.insert(payment.id, payment.clone());
        Ok(payment)
    }

    pub(crate) fn get_payments_by_user_id(&self, user_id: user::Id) -> Vec<Payment> {
        self.payments
            .values()
            .filter(|payment| payment.user_id == user_id)
            .cloned()
            .collect()
    }
}

impl Database {
    pub async fn create_payment(&self, new: NewPayment) -> Result<Payment, ReferenceError> {
        self.write().await.create_payment(new)
    }

    pub async fn get_payments_by_user_id(&self, user_id: user::Id) -> Vec<Payment> {
        self.read().await.get_payments_by_user_id(user_id)
    }
}
