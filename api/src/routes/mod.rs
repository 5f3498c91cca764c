//! Add top-level routes as submodules here.

use crate::{error, state::RocketState};
use rocket::{catchers, Build, Rocket};
use rocket_okapi::{
    openapi_get_routes,
    swagger_ui::{make_swagger_ui, DefaultModelRendering, SwaggerUIConfig},
};
use std::str::FromStr;
use uuid::Uuid;

mod admin;
mod bills;
mod payments;
mod reminders;
mod rewards;
mod user;

const VERSION: &str = "/v0";

pub fn register(rocket: Rocket<Build>, state: RocketState) -> Rocket<Build> {
    let rocket = rocket.manage(state);
    let rocket = rocket
        .mount(
            VERSION,
            openapi_get_routes![
                user::signup,
                user::login,
                user::get,
                bills::list,
                bills::post,
                bills::get,
                bills::pay,
                payments::list,
                rewards::list,
                rewards::redeem,
                reminders::run,
                reminders::test,
                admin::status,
            ],
        )
        .register(VERSION, catchers![error::default_catcher]);
    mount_swagger(rocket)
}

pub fn mount_swagger(rocket: Rocket<Build>) -> Rocket<Build> {
    rocket.mount(
        format!("{}/swagger", VERSION),
        make_swagger_ui(&SwaggerUIConfig {
            url: "../openapi.json".to_owned(),
            default_model_rendering: DefaultModelRendering::Model,
            show_extensions: true,
            ..Default::default()
        }),
    )
}

/// Ids in paths that aren't UUIDs can't name any record.
fn parse_id(id: &str) -> Option<Uuid> {
    Uuid::from_str(id).ok()
}
