use super::Database;
use crate::bill::{self, Bill, BillType, Priority};
use crate::money::Amount;
use crate::reward::{self, Reward};
use crate::user::{self, User};
use chrono::{Duration, Utc};
use uuid::Uuid;

const DEMO_USER: u128 = 1;

struct DemoBill {
    name: &'static str,
    company: &'static str,
    cents: u32,
    due_in_days: i64,
    priority: Priority,
    icon: &'static str,
    bill_type: BillType,
}

const DEMO_BILLS: [DemoBill; 5] = [
    DemoBill {
        name: "Electricity Bill",
        company: "ConEd Energy",
        cents: 24780,
        due_in_days: 1,
        priority: Priority::Urgent,
        icon: "fas fa-bolt",
        bill_type: BillType::Hydro,
    },
    DemoBill {
        name: "Credit Card",
        company: "Chase Sapphire",
        cents: 124530,
        due_in_days: 2,
        priority: Priority::Urgent,
        icon: "fas fa-credit-card",
        bill_type: BillType::Other,
    },
    DemoBill {
        name: "Internet Bill",
        company: "Spectrum",
        cents: 8999,
        due_in_days: 5,
        priority: Priority::Medium,
        icon: "fas fa-wifi",
        bill_type: BillType::Internet,
    },
    DemoBill {
        name: "Phone Bill",
        company: "Verizon",
        cents: 12500,
        due_in_days: 7,
        priority: Priority::Medium,
        icon: "fas fa-phone",
        bill_type: BillType::Phone,
    },
    DemoBill {
        name: "Netflix",
        company: "Streaming Service",
        cents: 1599,
        due_in_days: 15,
        priority: Priority::Low,
        icon: "fas fa-tv",
        bill_type: BillType::Subscription,
    },
];

const DEMO_REWARDS: [(u32, &str, &str); 2] = [
    (250, "On-time Payment Bonus", "Earned for paying 5 bills on time"),
    (100, "First Payment", "Welcome bonus for first payment"),
];

/// Inserts the demo account with a handful of bills and rewards. Running it twice is a no-op.
pub async fn seed_development_data(db: &Database) {
    let mut tables = db.write().await;
    let user_id = user::Id(Uuid::from_u128(DEMO_USER));
    if tables.get_user(user_id).is_some() {
        return;
    }
    tables.insert_user(User {
        id: user_id,
        username: "johndoe@example.com".to_owned(),
        password: "demo123".to_owned(),
        name: "John Doe".to_owned(),
    });
    let now = Utc::now();
    for (index, demo) in (1..).zip(DEMO_BILLS) {
        tables.insert_bill(Bill {
            id: bill::Id(Uuid::from_u128(100 + index)),
            user_id,
            name: demo.name.to_owned(),
            company: demo.company.to_owned(),
            amount: Amount::from_cents(demo.cents),
            due_date: now + Duration::days(demo.due_in_days),
            priority: demo.priority,
            icon: demo.icon.to_owned(),
            is_paid: false,
            bill_type: demo.bill_type,
            created: now,
        });
    }
    for (index, (points, title, description)) in (1..).zip(DEMO_REWARDS) {
        tables.insert_reward(Reward {
            id: reward::Id(Uuid::from_u128(200 + index)),
            user_id,
            points,
            title: title.to_owned(),
            description: Some(description.to_owned()),
            is_redeemed: false,
            created: now,
        });
    }
    log::info!("seeded development data for user {}", user_id);
}
