use crate::{auth, database::Database};
use thiserror::Error;

mod entities;

pub use entities::{Id, NewUser, User};

const MIN_PASSWORD_CHARS: usize = 6;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("username is already taken")]
    UsernameTaken,
    #[error("username must not be empty")]
    InvalidUsername,
    #[error("name must not be empty")]
    InvalidName,
    #[error("password must be at least {MIN_PASSWORD_CHARS} characters long")]
    InvalidPassword,
}

/// Registers a new user. The username check and the insert happen under a single store write,
/// so two concurrent signups can't both claim the same username.
pub async fn signup(db: &Database, new: NewUser) -> Result<User, Error> {
    if new.username.trim().is_empty() {
        return Err(Error::InvalidUsername);
    }
    if new.name.trim().is_empty() {
        return Err(Error::InvalidName);
    }
    if new.password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(Error::InvalidPassword);
    }
    let user = db.create_user(new).await?;
    log::info!("registered user {}", user.id);
    Ok(user)
}

pub async fn login(
    db: &Database,
    username: &str,
    password: &str,
) -> Result<User, auth::AccessDenied> {
    match db.get_user_by_username(username).await {
        Some(user) if user.password == password => Ok(user),
        _ => Err(auth::AccessDenied),
    }
}

pub async fn get(grant: &auth::Grant, db: &Database) -> Option<User> {
    db.get_user(grant.user_id).await
}
