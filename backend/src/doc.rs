//! OpenAPI document for the BFF surface.
//!
//! Served by Swagger UI in debug builds and printed by the `openapi-dump`
//! binary.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    Error, ErrorCode, LandingComponent, NavigationView, NotificationSource, PrincipalDto,
    RouteDecision, VisibleCategory, VisibleEntry,
};
use crate::inbound::http::landing::LandingResponse;
use crate::inbound::http::users::LoginRequest;

/// Adds the session cookie security scheme.
struct SessionCookieScheme;

impl Modify for SessionCookieScheme {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);
        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SessionCookieScheme),
    info(
        title = "staffdesk API",
        description = "Navigation, landing and route-guard view models for the staff portal."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::current_user,
        crate::inbound::http::navigation::get_navigation,
        crate::inbound::http::navigation::refresh_badges,
        crate::inbound::http::landing::get_landing,
        crate::inbound::http::landing::route_guard,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        LoginRequest,
        PrincipalDto,
        NavigationView,
        VisibleCategory,
        VisibleEntry,
        NotificationSource,
        LandingComponent,
        LandingResponse,
        RouteDecision,
    )),
    tags(
        (name = "session", description = "Sign-in and the current principal"),
        (name = "navigation", description = "Sidebar, landing and route guard"),
        (name = "health", description = "Orchestration probes")
    )
)]
pub struct ApiDoc;
