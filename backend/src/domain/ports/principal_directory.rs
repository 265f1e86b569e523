//! Driven port resolving a session's principal id to the full principal.
//!
//! The session cookie only stores the id; the principal itself (role,
//! permission map, route grants) is owned by the authentication backend and
//! re-read on every request so permission changes take effect without a new
//! login.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{
    AccessLevel, ModuleKey, PermissionMap, Principal, PrincipalBuilder, PrincipalId, Role,
};

define_port_error! {
    /// Errors raised while looking up principals.
    pub enum PrincipalDirectoryError {
        /// The directory could not be reached.
        Unavailable { message: String } =>
            "principal directory unavailable: {message}",
        /// The directory returned a principal that failed validation.
        InvalidRecord { message: String } =>
            "principal directory returned an invalid record: {message}",
    }
}

/// Port resolving principals by id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PrincipalDirectory: Send + Sync {
    /// Principal with the given id, if it still exists.
    async fn find(&self, id: &PrincipalId) -> Result<Option<Principal>, PrincipalDirectoryError>;
}

/// Password accepted for every fixture principal.
pub const FIXTURE_PASSWORD: &str = "password";

static FIXTURE_PRINCIPALS: OnceLock<Vec<Principal>> = OnceLock::new();

#[expect(clippy::expect_used, reason = "fixture ids and usernames are literals")]
fn fixture_principal(
    id: &str,
    username: &str,
    configure: impl FnOnce(PrincipalBuilder) -> PrincipalBuilder,
) -> Principal {
    let id = PrincipalId::new(id).expect("fixture principal ids are non-empty");
    configure(Principal::builder(id, username))
        .build()
        .expect("fixture principals are valid")
}

/// Representative principals covering every landing branch and override.
///
/// | username | role                      | extras                     |
/// |----------|---------------------------|----------------------------|
/// | `admin`  | `admin`                   | super-user                 |
/// | `hilda`  | `hr_admin`                |                            |
/// | `bruno`  | `branch_manager`          |                            |
/// | `jdoe`   | `employee`                |                            |
/// | `carla`  | `employee`                | CRM inquiries grant        |
/// | `lena`   | `logistics_manager`       |                            |
/// | `sam`    | `social_media_specialist` | `tasks: view` permission   |
///
/// # Panics
///
/// Panics if a fixture literal fails validation; the fixtures are covered
/// by unit tests.
#[expect(clippy::expect_used, reason = "fixture module keys are literals")]
pub fn fixture_principals() -> &'static [Principal] {
    FIXTURE_PRINCIPALS.get_or_init(|| {
        let tasks = ModuleKey::new("tasks").expect("fixture module keys are non-empty");
        vec![
            fixture_principal("123e4567-e89b-12d3-a456-426614174000", "admin", |b| {
                b.role(Role::Admin)
            }),
            fixture_principal("3f1c2a9e-1b7d-4f0e-9a51-6a2b8c1d0e01", "hilda", |b| {
                b.role(Role::HrAdmin)
            }),
            fixture_principal("3f1c2a9e-1b7d-4f0e-9a51-6a2b8c1d0e02", "bruno", |b| {
                b.role(Role::BranchManager)
            }),
            fixture_principal("3f1c2a9e-1b7d-4f0e-9a51-6a2b8c1d0e03", "jdoe", |b| {
                b.role(Role::Employee)
            }),
            fixture_principal("3f1c2a9e-1b7d-4f0e-9a51-6a2b8c1d0e04", "carla", |b| {
                b.role(Role::Employee).crm_access(true)
            }),
            fixture_principal("3f1c2a9e-1b7d-4f0e-9a51-6a2b8c1d0e05", "lena", |b| {
                b.role(Role::LogisticsManager)
            }),
            fixture_principal("3f1c2a9e-1b7d-4f0e-9a51-6a2b8c1d0e06", "sam", |b| {
                b.role(Role::SocialMediaSpecialist)
                    .permissions(PermissionMap::new().with(tasks, AccessLevel::View))
            }),
        ]
    })
}

/// In-memory directory serving [`fixture_principals`].
#[derive(Debug, Clone)]
pub struct FixturePrincipalDirectory {
    principals: Arc<[Principal]>,
}

impl Default for FixturePrincipalDirectory {
    fn default() -> Self {
        Self::new(fixture_principals().to_vec())
    }
}

impl FixturePrincipalDirectory {
    /// Directory serving exactly `principals`.
    pub fn new(principals: Vec<Principal>) -> Self {
        Self {
            principals: principals.into(),
        }
    }
}

#[async_trait]
impl PrincipalDirectory for FixturePrincipalDirectory {
    async fn find(&self, id: &PrincipalId) -> Result<Option<Principal>, PrincipalDirectoryError> {
        Ok(self
            .principals
            .iter()
            .find(|principal| principal.id() == id)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::CRM_INQUIRIES_ROUTE;
    use rstest::rstest;

    #[rstest]
    fn fixture_usernames_are_unique() {
        let principals = fixture_principals();
        let mut names: Vec<&str> = principals.iter().map(Principal::username).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), principals.len());
    }

    #[rstest]
    fn fixtures_cover_the_overrides() {
        let principals = fixture_principals();
        assert!(principals.iter().any(Principal::is_super_user));
        assert!(
            principals
                .iter()
                .any(|p| p.capabilities().opens_route(CRM_INQUIRIES_ROUTE))
        );
        assert!(principals.iter().any(|p| !p.permissions().is_empty()));
    }

    #[rstest]
    #[tokio::test]
    async fn directory_finds_fixtures_by_id() {
        let directory = FixturePrincipalDirectory::default();
        let lena = fixture_principals()
            .iter()
            .find(|principal| principal.username() == "lena")
            .expect("lena exists");
        let again = directory
            .find(lena.id())
            .await
            .expect("fixture lookup")
            .expect("lena by id");
        assert_eq!(&again, lena);
        assert_eq!(again.role(), Some(Role::LogisticsManager));
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_principals_resolve_to_none() {
        let directory = FixturePrincipalDirectory::default();
        let id = PrincipalId::new("missing").expect("id");
        assert!(directory.find(&id).await.expect("lookup").is_none());
    }
}
