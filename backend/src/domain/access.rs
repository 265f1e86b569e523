//! Access predicate deciding whether a principal may reach a gated screen.
//!
//! The predicate is total: it never fails and never panics. An absent
//! principal is denied everything; otherwise the first matching rule wins:
//!
//! 1. the `admin` super-user is always admitted;
//! 2. a special route whose boolean grant the principal holds is admitted;
//! 3. a permission key the principal can `view` or `manage` is admitted;
//! 4. otherwise the principal's role must be one of the allowed roles.
//!
//! All rules are evaluated against the principal's precomputed
//! [`CapabilitySet`](super::CapabilitySet).

use super::{ModuleKey, Principal, RoleSet};

/// Decide whether `principal` may reach a screen gated by the given inputs.
///
/// # Examples
/// ```
/// use staffdesk::domain::{can_access, Principal, PrincipalId, Role, RoleSet};
///
/// let jdoe = Principal::builder(PrincipalId::new("1").unwrap(), "jdoe")
///     .role(Role::Employee)
///     .build()
///     .unwrap();
/// let hr_only = RoleSet::of(&[Role::HrAdmin, Role::Admin]);
///
/// assert!(!can_access(Some(&jdoe), &hr_only, None, None));
/// assert!(!can_access(None, &hr_only, None, None));
/// ```
#[must_use]
pub fn can_access(
    principal: Option<&Principal>,
    allowed_roles: &RoleSet,
    route_key: Option<&str>,
    permission_key: Option<&ModuleKey>,
) -> bool {
    let Some(principal) = principal else {
        return false;
    };
    let capabilities = principal.capabilities();

    if capabilities.is_super_user() {
        return true;
    }
    if route_key.is_some_and(|route| capabilities.opens_route(route)) {
        return true;
    }
    if permission_key.is_some_and(|key| capabilities.grants_module(key)) {
        return true;
    }
    allowed_roles
        .iter()
        .any(|role| capabilities.has_role(role))
}

/// Everything a gated screen requires, bundled for reuse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessRequirement {
    allowed_roles: RoleSet,
    route_key: Option<String>,
    permission_key: Option<ModuleKey>,
}

impl AccessRequirement {
    /// Requirement admitting the given roles only.
    #[must_use]
    pub fn roles(allowed_roles: RoleSet) -> Self {
        Self {
            allowed_roles,
            route_key: None,
            permission_key: None,
        }
    }

    /// Attach the route key used for special-route grants.
    #[must_use]
    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route_key = Some(route.into());
        self
    }

    /// Attach the module whose permission overrides the role check.
    #[must_use]
    pub fn with_permission(mut self, key: ModuleKey) -> Self {
        self.permission_key = Some(key);
        self
    }

    /// Roles admitted by membership.
    #[must_use]
    pub fn allowed_roles(&self) -> &RoleSet {
        &self.allowed_roles
    }

    /// Module key consulted for permission overrides.
    #[must_use]
    pub fn permission_key(&self) -> Option<&ModuleKey> {
        self.permission_key.as_ref()
    }

    /// Evaluate the requirement for `principal`.
    #[must_use]
    pub fn admits(&self, principal: Option<&Principal>) -> bool {
        can_access(
            principal,
            &self.allowed_roles,
            self.route_key.as_deref(),
            self.permission_key.as_ref(),
        )
    }
}

#[cfg(test)]
mod tests;
