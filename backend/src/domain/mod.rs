//! Domain model for navigation visibility and role resolution.
//!
//! Purpose: decide, for one principal, which screens are reachable, which
//! navigation entries and badges appear, and where a visitor lands. All
//! decisions here are pure functions of their inputs and never fail; only
//! the ports talk to collaborators.
//!
//! Public surface:
//! - `Role`, `AccessLevel`, `PermissionMap`, `Principal`, `CapabilitySet`:
//!   identity and grants.
//! - `can_access` / `AccessRequirement`: the access predicate.
//! - `NavigationModel`, `default_catalogue`, `visible_navigation`,
//!   `render_navigation`: the sidebar and its filter.
//! - `BadgePoller`, `BadgeSnapshot`: live notification counts.
//! - `guard_route`, `choose_landing`, `SessionState`: the route guard.
//! - `Error` / `ErrorCode`: transport-agnostic failures.

mod access;
mod auth;
mod badges;
mod capability;
pub mod error;
mod landing;
mod navigation;
mod permission;
pub mod ports;
mod principal;
mod role;
mod trace_id;

pub use self::access::{AccessRequirement, can_access};
pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::badges::{
    ALL_NOTIFICATION_SOURCES, BADGE_DISPLAY_CAP, BadgeCount, BadgePoller, BadgePollerHandle,
    BadgeSnapshot, DEFAULT_BADGE_POLL_INTERVAL, NotificationSource, PollerShutdown,
};
pub use self::capability::{
    CRM_INQUIRIES_ROUTE, Capability, CapabilitySet, JOB_APPLICATIONS_ROUTE, SpecialRoute,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::landing::{
    LandingComponent, ROOT_ROUTE, RouteDecision, SessionState, choose_landing, guard_route,
    is_public_route,
};
pub use self::navigation::{
    NavigationCategory, NavigationEntry, NavigationModel, NavigationModelError, NavigationView,
    ORGANIZATION_ROUTE, TRIAL_REQUESTS_ROUTE, VisibleCategory, VisibleEntry, default_catalogue,
    organization_label, render_navigation, visible_navigation,
};
pub use self::permission::{AccessLevel, ModuleKey, ModuleKeyValidationError, PermissionMap};
pub use self::principal::{
    Principal, PrincipalBuilder, PrincipalDto, PrincipalId, PrincipalValidationError,
    SUPER_USER_USERNAME,
};
pub use self::role::{ALL_ROLES, Role, RoleParseError, RoleSet};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
