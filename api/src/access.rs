use okapi::openapi3::{Object, SecurityRequirement, SecurityScheme, SecuritySchemeData};
use rocket::{
    async_trait,
    http::Status,
    request::{FromRequest, Outcome},
    Request,
};
use rocket_okapi::{
    gen::OpenApiGenerator,
    request::{OpenApiFromRequest, RequestHeaderInput},
};
use thiserror::Error;

use crate::state::RocketState;

/// Requests made on behalf of a user authenticated by the identity provider.
pub struct UserGuard(app::auth::Grant);

impl UserGuard {
    pub fn grant(&self) -> &app::auth::Grant {
        &self.0
    }
}

/// Administrative requests such as triggering a reminder scan.
pub struct AdminGuard;

#[derive(Debug, Error)]
pub enum Error {
    #[error("access denied")]
    AccessDenied(#[from] app::auth::AccessDenied),
    #[error("rate limit exceeded")]
    RateLimited,
    #[error("application state is not managed")]
    MissingState,
}

const USER_HEADER: &str = "X-User-Id";
const ADMIN_HEADER: &str = "X-Admin-Token";

#[async_trait]
impl<'r> FromRequest<'r> for UserGuard {
    type Error = Error;

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let state = match req.rocket().state::<RocketState>() {
            Some(state) => state,
            None => return Outcome::Error((Status::InternalServerError, Error::MissingState)),
        };
        let user_id = match req.headers().get_one(USER_HEADER) {
            Some(user_id) => user_id,
            None => return Outcome::Error((Status::Forbidden, app::auth::AccessDenied.into())),
        };
        match app::auth::get_grant(&state.db, user_id).await {
            Ok(grant) => {
                if state.rate_limit.limit(grant.user_id) {
                    log::info!("rate limiting user {}", grant.user_id);
                    Outcome::Error((Status::TooManyRequests, Error::RateLimited))
                } else {
                    Outcome::Success(Self(grant))
                }
            }
            Err(e) => Outcome::Error((Status::Forbidden, e.into())),
        }
    }
}

#[async_trait]
impl<'r> FromRequest<'r> for AdminGuard {
    type Error = Error;

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let state = match req.rocket().state::<RocketState>() {
            Some(state) => state,
            None => return Outcome::Error((Status::InternalServerError, Error::MissingState)),
        };
        let token = req.headers().get_one(ADMIN_HEADER);
        match state.settings.admin_token.as_deref() {
            Some(expected) if token != Some(expected) => {
                Outcome::Error((Status::Forbidden, app::auth::AccessDenied.into()))
            }
            _ => Outcome::Success(Self),
        }
    }
}

impl<'a> OpenApiFromRequest<'a> for UserGuard {
    fn from_request_input(
        _gen: &mut OpenApiGenerator,
        _name: String,
        _required: bool,
    ) -> rocket_okapi::Result<RequestHeaderInput> {
        Ok(openapi_auth(
            USER_HEADER,
            "Id of the user authenticated by the identity provider",
        ))
    }
}

impl<'a> OpenApiFromRequest<'a> for AdminGuard {
    fn from_request_input(
        _: &mut OpenApiGenerator,
        _: String,
        _: bool,
    ) -> rocket_okapi::Result<RequestHeaderInput> {
        Ok(openapi_auth(ADMIN_HEADER, "Administrative token"))
    }
}

fn openapi_auth(header: &str, what: &str) -> RequestHeaderInput {
    let security_scheme = SecurityScheme {
        description: Some(format!("{}, passed in \"{}\".", what, header)),
        data: SecuritySchemeData::ApiKey {
            name: header.to_owned(),
            location: "header".to_owned(),
        },
        extensions: Object::default(),
    };
    let mut security_req = SecurityRequirement::new();
    security_req.insert(header.to_owned(), Vec::new());
    RequestHeaderInput::Security(header.to_owned(), security_scheme, security_req)
}
