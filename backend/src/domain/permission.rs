//! Fine-grained module permissions layered on top of roles.
//!
//! A permission map grants access to individual modules independent of the
//! principal's role. Only `view` and `manage` grant access; `none` is the
//! same as an absent entry.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Access level granted for one module.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    /// No access.
    #[default]
    None,
    /// Read-only access.
    View,
    /// Full access.
    Manage,
}

impl AccessLevel {
    /// Whether this level grants access to the module at all.
    #[must_use]
    pub const fn grants_access(self) -> bool {
        matches!(self, Self::View | Self::Manage)
    }
}

/// Validation errors for [`ModuleKey`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleKeyValidationError {
    /// The key was blank once trimmed.
    Empty,
    /// The key carried leading or trailing whitespace.
    Untrimmed,
}

impl fmt::Display for ModuleKeyValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "module key must not be empty"),
            Self::Untrimmed => write!(f, "module key must not have surrounding whitespace"),
        }
    }
}

impl std::error::Error for ModuleKeyValidationError {}

/// Name of a module addressed by the permission map, such as `employees`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModuleKey(String);

impl ModuleKey {
    /// Validate and construct a module key.
    ///
    /// # Examples
    /// ```
    /// use staffdesk::domain::ModuleKey;
    ///
    /// let key = ModuleKey::new("logistics").expect("valid key");
    /// assert_eq!(key.as_ref(), "logistics");
    /// assert!(ModuleKey::new("  ").is_err());
    /// ```
    pub fn new(key: impl Into<String>) -> Result<Self, ModuleKeyValidationError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ModuleKeyValidationError::Empty);
        }
        if key.trim() != key {
            return Err(ModuleKeyValidationError::Untrimmed);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for ModuleKey {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ModuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<ModuleKey> for String {
    fn from(value: ModuleKey) -> Self {
        value.0
    }
}

impl TryFrom<String> for ModuleKey {
    type Error = ModuleKeyValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Per-module access levels for one principal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionMap(BTreeMap<ModuleKey, AccessLevel>);

impl PermissionMap {
    /// Empty permission map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy of this map with `key` set to `level`.
    #[must_use]
    pub fn with(mut self, key: ModuleKey, level: AccessLevel) -> Self {
        self.0.insert(key, level);
        self
    }

    /// Level granted for `key`; absent keys yield [`AccessLevel::None`].
    #[must_use]
    pub fn level(&self, key: &ModuleKey) -> AccessLevel {
        self.0.get(key).copied().unwrap_or_default()
    }

    /// Whether no module has an explicit level.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Every explicit entry, in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&ModuleKey, AccessLevel)> {
        self.0.iter().map(|(key, level)| (key, *level))
    }

    /// Modules whose level grants access, in key order.
    pub fn granted_modules(&self) -> impl Iterator<Item = &ModuleKey> {
        self.0
            .iter()
            .filter(|(_, level)| level.grants_access())
            .map(|(key, _)| key)
    }
}
