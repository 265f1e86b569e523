//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test::TestRequest, web};

use super::configure_api;
use super::state::HttpState;
use super::users::LoginRequest;
use crate::Trace;
use crate::domain::ports::{FIXTURE_PASSWORD, FixtureLoginService, FixturePrincipalDirectory};
use crate::domain::{BadgePollerHandle, BadgeSnapshot};

/// Cookie name used by [`test_session_middleware`].
pub const TEST_SESSION_COOKIE: &str = "session";

/// Session middleware with a fresh key and an insecure cookie for plain
/// HTTP test requests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(TEST_SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build()
}

/// Session cookie set by `response`, if any.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == TEST_SESSION_COOKIE)
        .map(Cookie::into_owned)
}

/// Fixture-backed state with no pending badges.
pub fn fixture_state() -> HttpState {
    HttpState::new(
        Arc::new(FixtureLoginService),
        Arc::new(FixturePrincipalDirectory::default()),
        BadgePollerHandle::detached(BadgeSnapshot::empty()),
    )
}

/// `/api/v1` application over `state`, wired like the server.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().app_data(web::Data::new(state)).wrap(Trace).service(
        web::scope("/api/v1")
            .wrap(test_session_middleware())
            .configure(configure_api),
    )
}

/// `POST /api/v1/login` for a fixture principal.
pub fn login_request(username: &str) -> TestRequest {
    TestRequest::post().uri("/api/v1/login").set_json(LoginRequest {
        username: username.to_owned(),
        password: FIXTURE_PASSWORD.to_owned(),
    })
}
