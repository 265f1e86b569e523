//! Navigation model: the static catalogue of categories and entries.
//!
//! Purpose: describe every screen reachable from the sidebar together with
//! the access requirement gating it. The catalogue is compiled into the
//! service and never mutated; per-principal output comes from
//! [`visible_navigation`] and [`render_navigation`].
//!
//! Public surface:
//! - `NavigationEntry`, `NavigationCategory`, `NavigationModel` - the model.
//! - `default_catalogue` - the application's catalogue, built once.
//! - `visible_navigation` / `render_navigation` - the visibility filter.

mod catalogue;
mod filter;

use std::collections::BTreeSet;
use std::fmt;

use super::{AccessRequirement, ModuleKey, NotificationSource, Principal, RoleSet};

pub use self::catalogue::{ORGANIZATION_ROUTE, TRIAL_REQUESTS_ROUTE, default_catalogue};
pub use self::filter::{
    NavigationView, VisibleCategory, VisibleEntry, organization_label, render_navigation,
    visible_navigation,
};

/// One sidebar entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationEntry {
    label: String,
    route: String,
    icon: String,
    requirement: AccessRequirement,
    notification_source: Option<NotificationSource>,
}

impl NavigationEntry {
    /// Entry reachable by the given roles.
    ///
    /// The route doubles as the route key for special-route grants.
    pub fn new(
        label: impl Into<String>,
        route: impl Into<String>,
        icon: impl Into<String>,
        allowed_roles: RoleSet,
    ) -> Self {
        let route = route.into();
        Self {
            label: label.into(),
            requirement: AccessRequirement::roles(allowed_roles).with_route(route.clone()),
            route,
            icon: icon.into(),
            notification_source: None,
        }
    }

    /// Let a module permission override the role check.
    #[must_use]
    pub fn with_permission(mut self, key: ModuleKey) -> Self {
        self.requirement = self.requirement.with_permission(key);
        self
    }

    /// Attach a live count feed rendered as a badge.
    #[must_use]
    pub fn with_notification(mut self, source: NotificationSource) -> Self {
        self.notification_source = Some(source);
        self
    }

    /// Static display label.
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    /// Route path; unique across the catalogue.
    pub fn route(&self) -> &str {
        self.route.as_str()
    }

    /// Symbolic icon name understood by the client.
    pub fn icon(&self) -> &str {
        self.icon.as_str()
    }

    /// Access requirement gating the entry.
    pub fn requirement(&self) -> &AccessRequirement {
        &self.requirement
    }

    /// Live count feed, if any.
    pub fn notification_source(&self) -> Option<NotificationSource> {
        self.notification_source
    }
}

/// Titled, ordered group of entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationCategory {
    title: String,
    entries: Vec<NavigationEntry>,
}

impl NavigationCategory {
    /// Category with the given entries in display order.
    pub fn new(title: impl Into<String>, entries: Vec<NavigationEntry>) -> Self {
        Self {
            title: title.into(),
            entries,
        }
    }

    /// Display title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Entries in display order.
    pub fn entries(&self) -> &[NavigationEntry] {
        &self.entries
    }
}

/// Errors raised when assembling a navigation model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationModelError {
    /// Two entries share a route.
    DuplicateRoute {
        /// The repeated route.
        route: String,
    },
}

impl fmt::Display for NavigationModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateRoute { route } => write!(f, "duplicate navigation route: {route}"),
        }
    }
}

impl std::error::Error for NavigationModelError {}

/// Ordered catalogue of categories.
///
/// ## Invariants
/// - Entry routes are unique across all categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationModel {
    categories: Vec<NavigationCategory>,
}

impl NavigationModel {
    /// Assemble a model, rejecting duplicate routes.
    ///
    /// # Examples
    /// ```
    /// use staffdesk::domain::{NavigationCategory, NavigationEntry, NavigationModel, Role, RoleSet};
    ///
    /// let tasks = NavigationEntry::new("Tasks", "/tasks", "check-square", RoleSet::of(&[Role::Employee]));
    /// let model = NavigationModel::new(vec![NavigationCategory::new(
    ///     "Work",
    ///     vec![tasks.clone(), tasks],
    /// )]);
    /// assert!(model.is_err());
    /// ```
    pub fn new(categories: Vec<NavigationCategory>) -> Result<Self, NavigationModelError> {
        let mut seen = BTreeSet::new();
        for entry in categories.iter().flat_map(NavigationCategory::entries) {
            if !seen.insert(entry.route()) {
                return Err(NavigationModelError::DuplicateRoute {
                    route: entry.route().to_owned(),
                });
            }
        }
        Ok(Self { categories })
    }

    /// Categories in display order.
    pub fn categories(&self) -> &[NavigationCategory] {
        &self.categories
    }

    /// Look up an entry by route.
    pub fn entry(&self, route: &str) -> Option<&NavigationEntry> {
        self.categories
            .iter()
            .flat_map(NavigationCategory::entries)
            .find(|entry| entry.route() == route)
    }

    /// Whether `principal` can open at least one entry that carries a badge.
    ///
    /// Only such principals consume notification counts.
    pub fn shows_badges_to(&self, principal: Option<&Principal>) -> bool {
        self.categories
            .iter()
            .flat_map(NavigationCategory::entries)
            .filter(|entry| entry.notification_source().is_some())
            .any(|entry| entry.requirement().admits(principal))
    }
}
