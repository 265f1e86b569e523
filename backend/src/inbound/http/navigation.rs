//! Sidebar handlers.
//!
//! ```text
//! GET /api/v1/navigation
//! POST /api/v1/navigation/badges/refresh
//! ```

use actix_web::{HttpResponse, get, post, web};
use tracing::debug;

use crate::domain::{Error, NavigationView, render_navigation};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Navigation visible to the caller, with badge text attached.
///
/// Anonymous callers get an empty category list rather than an error.
#[utoipa::path(
    get,
    path = "/api/v1/navigation",
    responses(
        (status = 200, description = "Visible navigation", body = NavigationView),
        (status = 503, description = "Principal directory unavailable", body = Error)
    ),
    tags = ["navigation"],
    operation_id = "getNavigation",
    security(("SessionCookie" = []), ())
)]
#[get("/navigation")]
pub async fn get_navigation(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let principal = state.current_principal(&session).await?;
    let badges = state.badges.snapshot();
    let view = render_navigation(state.navigation, principal.as_ref(), &badges);
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(view))
}

/// Ask the badge poller for an immediate refresh.
///
/// Only principals who can see a badged entry may trigger a fetch.
#[utoipa::path(
    post,
    path = "/api/v1/navigation/badges/refresh",
    responses(
        (status = 202, description = "Refresh scheduled"),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "No badged entry is visible", body = Error),
        (status = 503, description = "Principal directory unavailable", body = Error)
    ),
    tags = ["navigation"],
    operation_id = "refreshBadges",
    security(("SessionCookie" = []))
)]
#[post("/navigation/badges/refresh")]
pub async fn refresh_badges(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let principal = state.require_principal(&session).await?;
    if !state.navigation.shows_badges_to(Some(&principal)) {
        return Err(Error::forbidden("no notification badges are visible"));
    }
    state.badges.request_refresh();
    debug!(principal = %principal.id(), "badge refresh requested");
    Ok(HttpResponse::Accepted().finish())
}
