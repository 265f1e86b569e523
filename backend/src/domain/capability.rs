//! Capability sets unifying every way a principal can be granted access.
//!
//! Three override mechanisms grant access on top of role membership: the
//! `admin` username, per-route boolean flags, and the module permission map.
//! A [`CapabilitySet`] folds all of them, plus the role itself, into one
//! lookup computed when the principal is loaded.

use std::collections::BTreeSet;

use super::{ModuleKey, Role};

/// Route path of the job applications screen.
pub const JOB_APPLICATIONS_ROUTE: &str = "/job-applications";
/// Route path of the CRM inquiries screen.
pub const CRM_INQUIRIES_ROUTE: &str = "/crm-inquiries";

/// Routes that individual principals can be granted regardless of role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SpecialRoute {
    /// `/job-applications`, granted by `hasJobApplicationsAccess`.
    JobApplications,
    /// `/crm-inquiries`, granted by `hasCrmAccess`.
    CrmInquiries,
}

impl SpecialRoute {
    /// Match a route key against the fixed special-route set.
    ///
    /// # Examples
    /// ```
    /// use staffdesk::domain::SpecialRoute;
    ///
    /// assert_eq!(
    ///     SpecialRoute::from_route("/crm-inquiries"),
    ///     Some(SpecialRoute::CrmInquiries)
    /// );
    /// assert_eq!(SpecialRoute::from_route("/tasks"), None);
    /// ```
    #[must_use]
    pub fn from_route(route: &str) -> Option<Self> {
        match route {
            JOB_APPLICATIONS_ROUTE => Some(Self::JobApplications),
            CRM_INQUIRIES_ROUTE => Some(Self::CrmInquiries),
            _ => None,
        }
    }

    /// Route path this grant opens.
    #[must_use]
    pub const fn route(self) -> &'static str {
        match self {
            Self::JobApplications => JOB_APPLICATIONS_ROUTE,
            Self::CrmInquiries => CRM_INQUIRIES_ROUTE,
        }
    }
}

/// One named grant held by a principal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Capability {
    /// Unconditional access to everything.
    SuperUser,
    /// Access to one special route.
    SpecialRoute(SpecialRoute),
    /// `view` or `manage` access to one module.
    Module(ModuleKey),
    /// Membership of one role.
    Role(Role),
}

/// Immutable set of capabilities computed once per principal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet(BTreeSet<Capability>);

impl CapabilitySet {
    /// Build a set from individual capabilities.
    #[must_use]
    pub fn from_capabilities(capabilities: impl IntoIterator<Item = Capability>) -> Self {
        Self(capabilities.into_iter().collect())
    }

    /// Whether the set holds `capability`.
    #[must_use]
    pub fn has(&self, capability: &Capability) -> bool {
        self.0.contains(capability)
    }

    /// Whether the set holds [`Capability::SuperUser`].
    #[must_use]
    pub fn is_super_user(&self) -> bool {
        self.has(&Capability::SuperUser)
    }

    /// Whether `route` is a special route this set opens.
    #[must_use]
    pub fn opens_route(&self, route: &str) -> bool {
        SpecialRoute::from_route(route)
            .is_some_and(|special| self.has(&Capability::SpecialRoute(special)))
    }

    /// Whether the set grants access to the module `key`.
    #[must_use]
    pub fn grants_module(&self, key: &ModuleKey) -> bool {
        self.0
            .iter()
            .any(|capability| matches!(capability, Capability::Module(granted) if granted == key))
    }

    /// Whether the set holds membership of `role`.
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.has(&Capability::Role(role))
    }

    /// Iterate capabilities in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = &Capability> {
        self.0.iter()
    }
}
