use super::{Database, ReferenceError, Tables};
use crate::bill::{self, Bill, BillUpdate, NewBill};
use crate::user::{self, User};
use chrono::Utc;

impl Tables {
    pub(crate) fn create_bill(&mut self, new: NewBill) -> Result<Bill, ReferenceError> {
        self.check_user(new.user_id)?;
        let bill = new.into_bill(bill::Id::generate(), Utc::now());
        self.insert_bill(bill.clone());
        Ok(bill)
    }

    pub(super) fn insert_bill(&mut self, bill: Bill) {
        self.bills.insert(bill.id, bill);
    }

    pub(crate) fn get_bill(&self, id: bill::Id) -> Option<Bill> {
        self.bills.get(&id).cloned()
    }

    pub(crate) fn get_bills_by_user_id(&self, user_id: user::Id) -> Vec<Bill> {
        self.bills
            .values()
            .filter(|bill| bill.user_id == user_id)
            .cloned()
            .collect()
    }

    pub(crate) fn update_bill(&mut self, id: bill::Id, update: BillUpdate) -> Option<Bill> {
        let bill = self.bills.get_mut(&id)?;
        bill.apply(update);
        Some(bill.clone())
    }

    /// Unpaid bills together with their owners. Bills whose owner is missing are left out.
    pub(crate) fn get_unpaid_bills_with_owner(&self) -> Vec<(Bill, User)> {
        self.bills
            .values()
            .filter(|bill| !bill.is_paid)
            .filter_map(|bill| {
                self.users
                    .get(&bill.user_id)
                    .map(|user| (bill.clone(), user.clone()))
            })
            .collect()
    }
}

impl Database {
    pub async fn create_bill(&self, new: NewBill) -> Result<Bill, ReferenceError> {
        self.write().await.create_bill(new)
    }

    pub async fn get_bill(&self, id: bill::Id) -> Option<Bill> {
        self.read().await.get_bill(id)
    }

    pub async fn get_bills_by_user_id(&self, user_id: user::Id) -> Vec<Bill> {
        self.read().await.get_bills_by_user_id(user_id)
    }

    pub async fn update_bill(&self, id: bill::Id, update: BillUpdate) -> Option<Bill> {
        self.write().await.update_bill(id, update)
    }

    pub async fn get_unpaid_bills_with_owner(&self) -> Vec<(Bill, User)> {
        self.read().await.get_unpaid_bills_with_owner()
    }
}
