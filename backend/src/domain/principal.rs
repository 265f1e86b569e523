//! Authenticated principal as supplied by the session collaborator.
//!
//! Principals are immutable: a permission change pushed from the server
//! replaces the whole value. The capability set is derived once, when the
//! principal is built, so access checks never re-derive overrides.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{
    AccessLevel, Capability, CapabilitySet, ModuleKey, PermissionMap, Role, SpecialRoute,
};

/// Username that unconditionally passes every access check.
pub const SUPER_USER_USERNAME: &str = "admin";

/// Validation errors raised while building a [`Principal`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrincipalValidationError {
    /// The identifier was blank.
    EmptyId,
    /// The username was blank once trimmed.
    EmptyUsername,
}

impl fmt::Display for PrincipalValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "principal id must not be empty"),
            Self::EmptyUsername => write!(f, "username must not be empty"),
        }
    }
}

impl std::error::Error for PrincipalValidationError {}

/// Opaque principal identifier issued by the session collaborator.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PrincipalId(String);

impl PrincipalId {
    /// Validate and construct an identifier.
    pub fn new(id: impl Into<String>) -> Result<Self, PrincipalValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(PrincipalValidationError::EmptyId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for PrincipalId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<PrincipalId> for String {
    fn from(value: PrincipalId) -> Self {
        value.0
    }
}

impl TryFrom<String> for PrincipalId {
    type Error = PrincipalValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Authenticated principal.
///
/// ## Invariants
/// - `username` is non-empty once trimmed and stored verbatim.
/// - `role` is either a member of the closed [`Role`] enumeration or absent;
///   unknown tags decode to absent and fail every role check.
/// - `capabilities` always reflects the other fields.
///
/// # Examples
/// ```
/// use staffdesk::domain::{Principal, PrincipalId, Role};
///
/// let principal = Principal::builder(PrincipalId::new("42").unwrap(), "jdoe")
///     .role(Role::Employee)
///     .crm_access(true)
///     .build()
///     .unwrap();
/// assert_eq!(principal.role(), Some(Role::Employee));
/// assert!(principal.capabilities().opens_route("/crm-inquiries"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PrincipalDto", into = "PrincipalDto")]
pub struct Principal {
    id: PrincipalId,
    username: String,
    role: Option<Role>,
    permissions: PermissionMap,
    has_job_applications_access: bool,
    has_crm_access: bool,
    capabilities: CapabilitySet,
}

impl Principal {
    /// Start building a principal with the mandatory identity fields.
    pub fn builder(id: PrincipalId, username: impl Into<String>) -> PrincipalBuilder {
        PrincipalBuilder {
            id,
            username: username.into(),
            role: None,
            permissions: PermissionMap::new(),
            has_job_applications_access: false,
            has_crm_access: false,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> &PrincipalId {
        &self.id
    }

    /// Login name.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Role tag, absent when the collaborator sent an unknown value.
    pub fn role(&self) -> Option<Role> {
        self.role
    }

    /// Module permission overrides.
    pub fn permissions(&self) -> &PermissionMap {
        &self.permissions
    }

    /// Whether the principal was granted the job applications screen.
    pub fn has_job_applications_access(&self) -> bool {
        self.has_job_applications_access
    }

    /// Whether the principal was granted the CRM inquiries screen.
    pub fn has_crm_access(&self) -> bool {
        self.has_crm_access
    }

    /// Capabilities derived at construction.
    pub fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    /// Whether this is the `admin` super-user.
    pub fn is_super_user(&self) -> bool {
        self.capabilities.is_super_user()
    }
}

/// Builder for [`Principal`] that derives the capability set on `build`.
#[derive(Debug, Clone)]
pub struct PrincipalBuilder {
    id: PrincipalId,
    username: String,
    role: Option<Role>,
    permissions: PermissionMap,
    has_job_applications_access: bool,
    has_crm_access: bool,
}

impl PrincipalBuilder {
    /// Assign the role tag.
    #[must_use]
    pub fn role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// Assign or clear the role tag.
    #[must_use]
    pub fn maybe_role(mut self, role: Option<Role>) -> Self {
        self.role = role;
        self
    }

    /// Replace the module permission map.
    #[must_use]
    pub fn permissions(mut self, permissions: PermissionMap) -> Self {
        self.permissions = permissions;
        self
    }

    /// Grant or revoke the job applications screen.
    #[must_use]
    pub fn job_applications_access(mut self, granted: bool) -> Self {
        self.has_job_applications_access = granted;
        self
    }

    /// Grant or revoke the CRM inquiries screen.
    #[must_use]
    pub fn crm_access(mut self, granted: bool) -> Self {
        self.has_crm_access = granted;
        self
    }

    /// Validate the username and derive capabilities.
    ///
    /// The username is kept exactly as received; only the byte-for-byte
    /// value `admin` is a super-user.
    pub fn build(self) -> Result<Principal, PrincipalValidationError> {
        let username = self.username;
        if username.trim().is_empty() {
            return Err(PrincipalValidationError::EmptyUsername);
        }

        let mut capabilities = Vec::new();
        if username == SUPER_USER_USERNAME {
            capabilities.push(Capability::SuperUser);
        }
        if self.has_job_applications_access {
            capabilities.push(Capability::SpecialRoute(SpecialRoute::JobApplications));
        }
        if self.has_crm_access {
            capabilities.push(Capability::SpecialRoute(SpecialRoute::CrmInquiries));
        }
        capabilities.extend(
            self.permissions
                .granted_modules()
                .cloned()
                .map(Capability::Module),
        );
        capabilities.extend(self.role.map(Capability::Role));

        Ok(Principal {
            id: self.id,
            username,
            role: self.role,
            permissions: self.permissions,
            has_job_applications_access: self.has_job_applications_access,
            has_crm_access: self.has_crm_access,
            capabilities: CapabilitySet::from_capabilities(capabilities),
        })
    }
}

/// Identifier as it appears on the wire; some collaborators send numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawPrincipalId {
    Text(String),
    Number(u64),
}

/// Wire shape of the principal (`/api/user`).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = Principal)]
pub struct PrincipalDto {
    #[schema(value_type = String, example = "42")]
    id: RawPrincipalId,
    #[schema(example = "jdoe")]
    username: String,
    #[schema(value_type = Option<String>, example = "employee")]
    #[serde(default)]
    role: Option<String>,
    #[schema(value_type = Option<Object>)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    permissions: Option<BTreeMap<String, AccessLevel>>,
    #[serde(default)]
    has_job_applications_access: bool,
    #[serde(default)]
    has_crm_access: bool,
}

impl From<Principal> for PrincipalDto {
    fn from(value: Principal) -> Self {
        let Principal {
            id,
            username,
            role,
            permissions,
            has_job_applications_access,
            has_crm_access,
            capabilities: _,
        } = value;
        let permissions = (!permissions.is_empty()).then(|| {
            permissions
                .entries()
                .map(|(key, level)| (key.to_string(), level))
                .collect()
        });
        Self {
            id: RawPrincipalId::Text(id.into()),
            username,
            role: role.map(|role| role.as_str().to_owned()),
            permissions,
            has_job_applications_access,
            has_crm_access,
        }
    }
}

impl TryFrom<PrincipalDto> for Principal {
    type Error = PrincipalValidationError;

    fn try_from(value: PrincipalDto) -> Result<Self, Self::Error> {
        let PrincipalDto {
            id,
            username,
            role,
            permissions,
            has_job_applications_access,
            has_crm_access,
        } = value;
        let id = match id {
            RawPrincipalId::Text(raw) => PrincipalId::new(raw)?,
            RawPrincipalId::Number(raw) => PrincipalId::new(raw.to_string())?,
        };
        let role = role.and_then(|tag| match tag.parse::<Role>() {
            Ok(role) => Some(role),
            Err(error) => {
                tracing::warn!(principal = %id, %error, "ignoring unrecognised role tag");
                None
            }
        });
        let permissions = permissions
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(key, level)| match ModuleKey::new(key) {
                Ok(key) => Some((key, level)),
                Err(error) => {
                    tracing::warn!(principal = %id, %error, "ignoring malformed permission key");
                    None
                }
            })
            .fold(PermissionMap::new(), |map, (key, level)| map.with(key, level));

        Principal::builder(id, username)
            .maybe_role(role)
            .permissions(permissions)
            .job_applications_access(has_job_applications_access)
            .crm_access(has_crm_access)
            .build()
    }
}

#[cfg(test)]
mod tests;
