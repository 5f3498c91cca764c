//! Identity is established by an external provider; this service only receives the resulting
//! user id. A [`Grant`] is the compile-time proof that the id belongs to a registered user.

use crate::user;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("access denied")]
pub struct AccessDenied;

/// Proof that the request acts on behalf of an existing user.
#[derive(Debug, Clone, Copy)]
pub struct Grant {
    pub user_id: user::Id,
}
