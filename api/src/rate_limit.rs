use std::sync::Arc;

use app::user;
use dashmap::{mapref::entry::Entry, DashMap};
use std::time::Duration;

/// Allows each user at most `limit` requests within any `span`.
pub struct RateLimit {
    limit: usize,
    span: Duration,
    counter: Arc<DashMap<user::Id, usize>>,
}

impl RateLimit {
    pub fn new(limit: usize, span: Duration) -> Self {
        Self {
            limit,
            span,
            counter: Arc::new(Default::default()),
        }
    }

    /// Returns true if the user should be rate limited, false otherwise. Every request that is let
    /// through is counted for `span`.
    pub fn limit(&self, user_id: user::Id) -> bool {
        match self.counter.entry(user_id) {
            Entry::Occupied(mut entry) => {
                if *entry.get() >= self.limit {
                    return true;
                }
                *entry.get_mut() += 1;
            }
            Entry::Vacant(entry) => {
                if self.limit == 0 {
                    return true;
                }
                entry.insert(1);
            }
        }
        self.decrement_later(user_id);
        false
    }

    fn decrement_later(&self, user_id: user::Id) {
        let counter = Arc::clone(&self.counter);
        let span = self.span;
        tokio::spawn(async move {
            tokio::time::sleep(span).await;
            let emptied = match counter.get_mut(&user_id) {
                Some(mut count) => {
                    *count -= 1;
                    *count == 0
                }
                None => {
                    log::error!(
                        "rate limit entry for user {} vanished, this is a bug",
                        user_id
                    );
                    false
                }
            };
            if emptied {
                counter.remove_if(&user_id, |_, count| *count == 0);
            }
        });
    }
}
