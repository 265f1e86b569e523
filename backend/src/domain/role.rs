//! Role tags assigned to principals and the role sets navigation entries allow.
//!
//! The role enumeration is closed: the session collaborator may only hand out
//! these tags. Tags outside the enumeration never become a [`Role`]; see
//! [`crate::domain::Principal`] for how such values are treated.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Coarse-grained role carried by every authenticated principal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Human resources administrator with organisation-wide reach.
    HrAdmin,
    /// Manager of a single branch office.
    BranchManager,
    /// Lead of a small team inside a department.
    TeamLead,
    /// Regular employee with access to personal tooling only.
    Employee,
    /// Owner of fleet, shipment and expense tracking.
    LogisticsManager,
    /// Head of a department.
    DepartmentHead,
    /// Manager of a production studio.
    StudioManager,
    /// Owner of the social-media accounts.
    SocialMediaManager,
    /// Produces social-media content.
    ContentCreator,
    /// Edits and schedules social-media content.
    ContentEditor,
    /// Analyses social-media account performance.
    SocialMediaSpecialist,
    /// Sets creative direction across studios and channels.
    CreativeDirector,
    /// Application administrator role tag.
    Admin,
}

/// Every role, in declaration order.
pub const ALL_ROLES: [Role; 13] = [
    Role::HrAdmin,
    Role::BranchManager,
    Role::TeamLead,
    Role::Employee,
    Role::LogisticsManager,
    Role::DepartmentHead,
    Role::StudioManager,
    Role::SocialMediaManager,
    Role::ContentCreator,
    Role::ContentEditor,
    Role::SocialMediaSpecialist,
    Role::CreativeDirector,
    Role::Admin,
];

impl Role {
    /// Wire representation of the role tag.
    ///
    /// # Examples
    /// ```
    /// use staffdesk::domain::Role;
    ///
    /// assert_eq!(Role::LogisticsManager.as_str(), "logistics_manager");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HrAdmin => "hr_admin",
            Self::BranchManager => "branch_manager",
            Self::TeamLead => "team_lead",
            Self::Employee => "employee",
            Self::LogisticsManager => "logistics_manager",
            Self::DepartmentHead => "department_head",
            Self::StudioManager => "studio_manager",
            Self::SocialMediaManager => "social_media_manager",
            Self::ContentCreator => "content_creator",
            Self::ContentEditor => "content_editor",
            Self::SocialMediaSpecialist => "social_media_specialist",
            Self::CreativeDirector => "creative_director",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a role tag is not part of the closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleParseError {
    tag: String,
}

impl RoleParseError {
    /// The rejected tag as received.
    pub fn tag(&self) -> &str {
        self.tag.as_str()
    }
}

impl fmt::Display for RoleParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role tag: {}", self.tag)
    }
}

impl std::error::Error for RoleParseError {}

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_ROLES
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| RoleParseError { tag: s.to_owned() })
    }
}

/// Ordered set of roles an entry or endpoint admits.
///
/// An empty set admits nobody through role membership; only the super-user
/// and special-route overrides can reach such an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSet(BTreeSet<Role>);

impl RoleSet {
    /// Role set admitting nobody by role.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a role set from a slice of roles.
    ///
    /// # Examples
    /// ```
    /// use staffdesk::domain::{Role, RoleSet};
    ///
    /// let roles = RoleSet::of(&[Role::HrAdmin, Role::Admin]);
    /// assert!(roles.contains(Role::Admin));
    /// assert!(!roles.contains(Role::Employee));
    /// ```
    #[must_use]
    pub fn of(roles: &[Role]) -> Self {
        Self(roles.iter().copied().collect())
    }

    /// Whether `role` is a member.
    #[must_use]
    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    /// Whether the set has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate members in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
