//! HTTP inbound adapter exposing the REST API under `/api/v1`.

pub mod advice;
pub mod auth;
pub mod error;
pub mod health;
pub mod schemas;
pub mod shelters;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod token_config;
pub mod users;
pub(crate) mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register every `/api/v1` handler on `cfg`.
///
/// `/shelters/nearby` is registered ahead of `/shelters/{id}` so the literal
/// segment wins.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use shelter_backend::inbound::http::configure_api;
///
/// let _app = App::new().service(web::scope("/api/v1").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(users::register)
        .service(users::login)
        .service(users::current_user)
        .service(users::update_profile)
        .service(advice::my_advice)
        .service(shelters::list_shelters)
        .service(shelters::nearby_shelters)
        .service(shelters::get_shelter)
        .service(shelters::create_shelter)
        .service(shelters::replace_shelter)
        .service(shelters::patch_shelter)
        .service(shelters::delete_shelter);
}
