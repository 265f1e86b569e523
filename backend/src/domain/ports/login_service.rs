//! Driving port for sign-in.
//!
//! Inbound adapters call it to exchange credentials for a principal id
//! without knowing which identity backend sits behind it.

use async_trait::async_trait;

use super::principal_directory::{FIXTURE_PASSWORD, fixture_principals};
use crate::domain::{Error, LoginCredentials, PrincipalId};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated principal's id.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<PrincipalId, Error>;
}

/// In-memory authenticator accepting every fixture principal.
///
/// Each username from
/// [`fixture_principals`](super::fixture_principals) signs in with the
/// password `password`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<PrincipalId, Error> {
        if credentials.password() != FIXTURE_PASSWORD {
            return Err(Error::unauthorized("invalid credentials"));
        }
        fixture_principals()
            .iter()
            .find(|principal| principal.username() == credentials.username())
            .map(|principal| principal.id().clone())
            .ok_or_else(|| Error::unauthorized("invalid credentials"))
    }
}
