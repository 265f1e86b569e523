//! Visibility filter turning the catalogue into one principal's sidebar.
//!
//! Output is a pure function of `(model, principal)`: no hidden counters and
//! no caching across principals. Categories left without entries are dropped
//! rather than rendered empty.

use serde::Serialize;
use utoipa::ToSchema;

use super::{NavigationEntry, NavigationModel, catalogue::ORGANIZATION_ROUTE};
use crate::domain::{BadgeSnapshot, NotificationSource, Principal, Role};

const ORGANIZATION_LABEL: &str = "Organization";
const RESPONSIBILITIES_LABEL: &str = "Responsibilities & Reporting";

/// Entry as shown to one principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VisibleEntry {
    /// Display label after per-viewer resolution.
    #[schema(example = "Tasks")]
    pub label: String,
    /// Route path.
    #[schema(example = "/tasks")]
    pub route: String,
    /// Symbolic icon name.
    #[schema(example = "check-square")]
    pub icon: String,
    /// Live count feed backing the badge.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_source: Option<NotificationSource>,
    /// Badge text; absent when there is nothing to show.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "99+")]
    pub badge: Option<String>,
}

/// Category as shown to one principal; never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VisibleCategory {
    /// Display title.
    #[schema(example = "Work")]
    pub title: String,
    /// Visible entries in catalogue order.
    pub entries: Vec<VisibleEntry>,
}

/// Sidebar payload with badges attached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NavigationView {
    /// Visible categories in catalogue order.
    pub categories: Vec<VisibleCategory>,
}

/// Label of the organisation entry for `principal`.
///
/// HR administrators and the super-user manage the organisation; everybody
/// else sees their own responsibilities there.
///
/// # Examples
/// ```
/// use staffdesk::domain::{organization_label, Principal, PrincipalId, Role};
///
/// let hr = Principal::builder(PrincipalId::new("1").unwrap(), "hilda")
///     .role(Role::HrAdmin)
///     .build()
///     .unwrap();
/// assert_eq!(organization_label(Some(&hr)), "Organization");
/// assert_eq!(organization_label(None), "Responsibilities & Reporting");
/// ```
#[must_use]
pub fn organization_label(principal: Option<&Principal>) -> &'static str {
    let manages_organization = principal.is_some_and(|principal| {
        principal.is_super_user() || principal.role() == Some(Role::HrAdmin)
    });
    if manages_organization {
        ORGANIZATION_LABEL
    } else {
        RESPONSIBILITIES_LABEL
    }
}

fn resolve_label(entry: &NavigationEntry, principal: Option<&Principal>) -> String {
    if entry.route() == ORGANIZATION_ROUTE {
        organization_label(principal).to_owned()
    } else {
        entry.label().to_owned()
    }
}

/// Categories and entries `principal` may see, without badges.
///
/// # Examples
/// ```
/// use staffdesk::domain::{default_catalogue, visible_navigation};
///
/// assert!(visible_navigation(default_catalogue(), None).is_empty());
/// ```
#[must_use]
pub fn visible_navigation(
    model: &NavigationModel,
    principal: Option<&Principal>,
) -> Vec<VisibleCategory> {
    model
        .categories()
        .iter()
        .filter_map(|category| {
            let entries: Vec<VisibleEntry> = category
                .entries()
                .iter()
                .filter(|entry| entry.requirement().admits(principal))
                .map(|entry| VisibleEntry {
                    label: resolve_label(entry, principal),
                    route: entry.route().to_owned(),
                    icon: entry.icon().to_owned(),
                    notification_source: entry.notification_source(),
                    badge: None,
                })
                .collect();
            (!entries.is_empty()).then(|| VisibleCategory {
                title: category.title().to_owned(),
                entries,
            })
        })
        .collect()
}

/// Visible navigation with badge text resolved from `badges`.
///
/// Badges only attach to entries that survived filtering, so a count is
/// never disclosed to a principal who cannot open the entry.
#[must_use]
pub fn render_navigation(
    model: &NavigationModel,
    principal: Option<&Principal>,
    badges: &BadgeSnapshot,
) -> NavigationView {
    let mut categories = visible_navigation(model, principal);
    for entry in categories
        .iter_mut()
        .flat_map(|category| category.entries.iter_mut())
    {
        entry.badge = entry
            .notification_source
            .and_then(|source| badges.count(source).display_text());
    }
    NavigationView { categories }
}
