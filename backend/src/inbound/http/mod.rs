//! HTTP inbound adapter exposing the BFF endpoints under `/api/v1`.

pub mod cache_control;
pub mod error;
pub mod health;
pub mod landing;
pub mod navigation;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

use actix_web::web;

pub use error::ApiResult;

/// Register every `/api/v1` handler on `cfg`.
///
/// The caller owns the scope and its session middleware.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use staffdesk::inbound::http::configure_api;
///
/// let _app = App::new().service(web::scope("/api/v1").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(users::login)
        .service(users::logout)
        .service(users::current_user)
        .service(navigation::get_navigation)
        .service(navigation::refresh_badges)
        .service(landing::get_landing)
        .service(landing::route_guard);
}
