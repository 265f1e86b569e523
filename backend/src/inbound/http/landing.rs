//! Landing and route-guard handlers.
//!
//! ```text
//! GET /api/v1/landing
//! GET /api/v1/route-guard?path=/employees
//! ```

use actix_web::{HttpResponse, get, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    Error, LandingComponent, RouteDecision, SessionState, choose_landing, guard_route,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Body of `GET /api/v1/landing`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LandingResponse {
    pub component: LandingComponent,
}

/// Query of `GET /api/v1/route-guard`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RouteGuardQuery {
    /// Client-side path being opened.
    #[param(example = "/employees")]
    pub path: String,
}

/// Dashboard for the signed-in principal.
#[utoipa::path(
    get,
    path = "/api/v1/landing",
    responses(
        (status = 200, description = "Landing dashboard", body = LandingResponse),
        (status = 401, description = "Login required", body = Error),
        (status = 503, description = "Principal directory unavailable", body = Error)
    ),
    tags = ["navigation"],
    operation_id = "getLanding",
    security(("SessionCookie" = []))
)]
#[get("/landing")]
pub async fn get_landing(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let principal = state.require_principal(&session).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(LandingResponse {
            component: choose_landing(&principal),
        }))
}

/// Decide whether the caller may open `path`.
///
/// Anonymous callers asking for a protected path get a redirect to `/`,
/// never an authentication error.
#[utoipa::path(
    get,
    path = "/api/v1/route-guard",
    params(RouteGuardQuery),
    responses(
        (status = 200, description = "Guard decision", body = RouteDecision),
        (status = 503, description = "Principal directory unavailable", body = Error)
    ),
    tags = ["navigation"],
    operation_id = "guardRoute",
    security(("SessionCookie" = []), ())
)]
#[get("/route-guard")]
pub async fn route_guard(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<RouteGuardQuery>,
) -> ApiResult<HttpResponse> {
    let session_state = SessionState::from_principal(state.current_principal(&session).await?);
    let decision = guard_route(&session_state, &query.path);
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(decision))
}
