//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` so they depend only on domain
//! ports and the badge handle, never on concrete adapters.

use std::sync::Arc;

use crate::domain::ports::{LoginService, PrincipalDirectory};
use crate::domain::{BadgePollerHandle, Error, NavigationModel, Principal, default_catalogue};

use super::session::SessionContext;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Credential check used by `POST /login`.
    pub login: Arc<dyn LoginService>,
    /// Resolves the principal behind a session id.
    pub principals: Arc<dyn PrincipalDirectory>,
    /// Latest badge counts and the refresh trigger.
    pub badges: BadgePollerHandle,
    /// Sidebar definition rendered by `GET /navigation`.
    pub navigation: &'static NavigationModel,
}

impl HttpState {
    /// Construct state over the built-in navigation catalogue.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use staffdesk::domain::{BadgePollerHandle, BadgeSnapshot};
    /// use staffdesk::domain::ports::{FixtureLoginService, FixturePrincipalDirectory};
    /// use staffdesk::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(FixtureLoginService),
    ///     Arc::new(FixturePrincipalDirectory::default()),
    ///     BadgePollerHandle::detached(BadgeSnapshot::empty()),
    /// );
    /// assert!(!state.navigation.categories().is_empty());
    /// ```
    pub fn new(
        login: Arc<dyn LoginService>,
        principals: Arc<dyn PrincipalDirectory>,
        badges: BadgePollerHandle,
    ) -> Self {
        Self {
            login,
            principals,
            badges,
            navigation: default_catalogue(),
        }
    }

    /// Principal signed in on `session`, if any.
    ///
    /// An id the directory no longer knows reads as signed out. Directory
    /// failures surface as `503 Service Unavailable`.
    pub async fn current_principal(
        &self,
        session: &SessionContext,
    ) -> Result<Option<Principal>, Error> {
        let Some(id) = session.principal_id()? else {
            return Ok(None);
        };
        let principal = self.principals.find(&id).await.map_err(|error| {
            tracing::warn!(principal = %id, %error, "principal directory lookup failed");
            Error::service_unavailable("principal directory unavailable")
        })?;
        if principal.is_none() {
            tracing::info!(principal = %id, "session refers to an unknown principal");
        }
        Ok(principal)
    }

    /// Signed-in principal, or `401 Unauthorized`.
    pub async fn require_principal(&self, session: &SessionContext) -> Result<Principal, Error> {
        self.current_principal(session)
            .await?
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}
