//! Routes for registering, logging in and querying user information.

use rocket::{get, post, serde::json::Json, State};
use rocket_okapi::{openapi, JsonSchema};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use app::user;

use crate::{
    access,
    error::{self, JsonResult},
    state::RocketState,
};

#[derive(Debug, Deserialize, JsonSchema)]
pub(super) struct SignupRequest {
    /// Contact e-mail address, also used to log in.
    username: String,
    password: String,
    /// Display name.
    name: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub(super) struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Debug, Serialize, JsonSchema)]
struct UserModel {
    /// Unique user identifier, passed as `X-User-Id` on subsequent requests.
    id: Uuid,
    /// Registered username, doubling as the contact e-mail address.
    username: String,
    /// Display name.
    name: String,
}

impl UserModel {
    fn from_entity(user: user::User) -> Self {
        Self {
            id: user.id.0,
            username: user.username,
            name: user.name,
        }
    }
}

#[derive(Debug, Serialize, JsonSchema)]
pub(super) struct UserResponse {
    user: UserModel,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(super) enum SignupError {
    /// Another account already uses this username.
    UsernameTaken,
    /// The username was empty.
    InvalidUsername,
    /// The name was empty.
    InvalidName,
    /// The password was too short.
    InvalidPassword,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(super) enum LoginError {
    /// Unknown username or wrong password.
    InvalidCredentials,
}

/// Register a new account.
#[openapi(tag = "User")]
#[post("/signup", data = "<req>")]
pub(super) async fn signup(
    state: &State<RocketState>,
    req: Json<SignupRequest>,
) -> JsonResult<UserResponse, SignupError> {
    let req = req.into_inner();
    user::signup(
        &state.db,
        user::NewUser {
            username: req.username,
            password: req.password,
            name: req.name,
        },
    )
    .await
    .map(|user| {
        Json(UserResponse {
            user: UserModel::from_entity(user),
        })
    })
    .map_err(|e| match e {
        user::Error::UsernameTaken => error::conflict(SignupError::UsernameTaken, e.to_string()),
        user::Error::InvalidUsername => {
            error::bad_request(SignupError::InvalidUsername, e.to_string())
        }
        user::Error::InvalidName => error::bad_request(SignupError::InvalidName, e.to_string()),
        user::Error::InvalidPassword => {
            error::bad_request(SignupError::InvalidPassword, e.to_string())
        }
    })
}

/// Log in with a username and password.
#[openapi(tag = "User")]
#[post("/login", data = "<req>")]
pub(super) async fn login(
    state: &State<RocketState>,
    req: Json<LoginRequest>,
) -> JsonResult<UserResponse, LoginError> {
    user::login(&state.db, &req.username, &req.password)
        .await
        .map(|user| {
            Json(UserResponse {
                user: UserModel::from_entity(user),
            })
        })
        .map_err(|_| {
            error::forbidden(
                LoginError::InvalidCredentials,
                "invalid username or password".to_owned(),
            )
        })
}

/// Get the current user's details.
#[openapi(tag = "User")]
#[get("/user")]
pub(super) async fn get(
    guard: access::UserGuard,
    state: &State<RocketState>,
) -> Option<Json<UserResponse>> {
    user::get(guard.grant(), &state.db).await.map(|user| {
        Json(UserResponse {
            user: UserModel::from_entity(user),
        })
    })
}
