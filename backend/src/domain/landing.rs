//! Route guard and landing selection.
//!
//! Purpose: decide what a visitor sees for a requested path. The session is
//! a two-state machine (`Unauthenticated` / `Authenticated`); authenticated
//! principals reach any path and land on a role-specific dashboard at `/`,
//! while anonymous visitors are confined to the public allow-list and sent
//! back to `/` otherwise. A redirect, never an authentication error, keeps
//! protected paths from being disclosed.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Principal, Role};

/// Root path; the only target of guard redirects.
pub const ROOT_ROUTE: &str = "/";

const PUBLIC_ROUTES: [&str; 3] = [ROOT_ROUTE, "/pricing", "/subscription"];
const PUBLIC_PREFIXES: [&str; 2] = ["/subscription/", "/take-test/"];

/// Dashboard rendered at `/` for an authenticated principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LandingComponent {
    /// Self-service view for employees.
    PersonalDashboard,
    /// Fleet and expense view for logistics managers.
    LogisticsDashboard,
    /// Organisation-wide view for everybody else.
    AdminDashboard,
}

/// Landing component for `principal`.
///
/// Principals without a recognised role fall through to the admin
/// dashboard, whose widgets are gated individually.
///
/// # Examples
/// ```
/// use staffdesk::domain::{choose_landing, LandingComponent, Principal, PrincipalId, Role};
///
/// let lena = Principal::builder(PrincipalId::new("5").unwrap(), "lena")
///     .role(Role::LogisticsManager)
///     .build()
///     .unwrap();
/// assert_eq!(choose_landing(&lena), LandingComponent::LogisticsDashboard);
/// ```
#[must_use]
pub fn choose_landing(principal: &Principal) -> LandingComponent {
    match principal.role() {
        Some(Role::Employee) => LandingComponent::PersonalDashboard,
        Some(Role::LogisticsManager) => LandingComponent::LogisticsDashboard,
        _ => LandingComponent::AdminDashboard,
    }
}

/// Client session as seen by the guard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    /// No principal is signed in.
    #[default]
    Unauthenticated,
    /// A principal is signed in.
    Authenticated(Arc<Principal>),
}

impl SessionState {
    /// Session for an optional principal.
    #[must_use]
    pub fn from_principal(principal: Option<Principal>) -> Self {
        principal.map_or(Self::Unauthenticated, |principal| {
            Self::Authenticated(Arc::new(principal))
        })
    }

    /// Transition on successful login; replaces any previous principal.
    #[must_use]
    pub fn login(self, principal: Principal) -> Self {
        Self::Authenticated(Arc::new(principal))
    }

    /// Transition on logout or session invalidation.
    #[must_use]
    pub fn logout(self) -> Self {
        Self::Unauthenticated
    }

    /// Signed-in principal, if any.
    #[must_use]
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            Self::Unauthenticated => None,
            Self::Authenticated(principal) => Some(principal.as_ref()),
        }
    }
}

/// Outcome of guarding one path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum RouteDecision {
    /// Render the requested path.
    Allow,
    /// Render the role's landing dashboard.
    Landing {
        /// Dashboard to render.
        component: LandingComponent,
    },
    /// Navigate elsewhere.
    Redirect {
        /// Target path.
        #[schema(example = "/")]
        location: String,
    },
}

/// Whether anonymous visitors may open `path`.
///
/// # Examples
/// ```
/// use staffdesk::domain::is_public_route;
///
/// assert!(is_public_route("/take-test/abc"));
/// assert!(!is_public_route("/take-test"));
/// assert!(!is_public_route("/employees"));
/// ```
#[must_use]
pub fn is_public_route(path: &str) -> bool {
    PUBLIC_ROUTES.contains(&path) || PUBLIC_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}

/// Decide what to render for `path` under `session`.
#[must_use]
pub fn guard_route(session: &SessionState, path: &str) -> RouteDecision {
    match session.principal() {
        Some(principal) if path == ROOT_ROUTE => RouteDecision::Landing {
            component: choose_landing(principal),
        },
        Some(_) => RouteDecision::Allow,
        None if is_public_route(path) => RouteDecision::Allow,
        None => RouteDecision::Redirect {
            location: ROOT_ROUTE.to_owned(),
        },
    }
}
