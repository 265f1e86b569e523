//! Reqwest-backed principal directory and login service.
//!
//! The collaborator owns identities. Lookups read
//! `GET {base}/api/users/{id}` and sign-in posts to `POST {base}/api/login`;
//! both answer with the principal in the `/api/user` wire shape.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use thiserror::Error;
use tracing::warn;

use super::dto::LoginRequestDto;
use crate::domain::ports::{LoginService, PrincipalDirectory, PrincipalDirectoryError};
use crate::domain::{Error, LoginCredentials, Principal, PrincipalId};

const USER_AGENT: &str = concat!("staffdesk/", env!("CARGO_PKG_VERSION"));

/// Errors raised while building the adapter.
#[derive(Debug, Error)]
pub enum PrincipalsBuildError {
    /// The reqwest client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    /// The base URL cannot carry path segments.
    #[error("principals base URL cannot be a base: {url}")]
    BaseUrl {
        /// The rejected URL.
        url: String,
    },
}

/// Identity collaborator reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpPrincipalDirectory {
    client: Client,
    base: Url,
    login: Url,
}

impl HttpPrincipalDirectory {
    /// Build an adapter whose requests time out after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when the client cannot be built or `base` cannot
    /// carry a path.
    pub fn new(base: &Url, timeout: Duration) -> Result<Self, PrincipalsBuildError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        let login = extend(base, &["api", "login"])?;
        Ok(Self {
            client,
            base: base.clone(),
            login,
        })
    }

    fn user_endpoint(&self, id: &PrincipalId) -> Result<Url, PrincipalsBuildError> {
        extend(&self.base, &["api", "users", id.as_ref()])
    }
}

/// Append `segments` below any path already on `base`.
fn extend(base: &Url, segments: &[&str]) -> Result<Url, PrincipalsBuildError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| PrincipalsBuildError::BaseUrl {
            url: base.to_string(),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[async_trait]
impl PrincipalDirectory for HttpPrincipalDirectory {
    async fn find(&self, id: &PrincipalId) -> Result<Option<Principal>, PrincipalDirectoryError> {
        let url = self
            .user_endpoint(id)
            .map_err(|error| PrincipalDirectoryError::unavailable(error.to_string()))?;
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|error| PrincipalDirectoryError::unavailable(error.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => decode_principal(response)
                .await
                .map(Some)
                .map_err(PrincipalDirectoryError::invalid_record),
            status => Err(PrincipalDirectoryError::unavailable(format!(
                "status {}",
                status.as_u16()
            ))),
        }
    }
}

#[async_trait]
impl LoginService for HttpPrincipalDirectory {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<PrincipalId, Error> {
        let response = self
            .client
            .post(self.login.clone())
            .json(&LoginRequestDto::from(credentials))
            .send()
            .await
            .map_err(|error| {
                warn!(%error, "identity service unreachable");
                Error::service_unavailable("identity service unavailable")
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(map_login_status(status));
        }
        decode_principal(response)
            .await
            .map(|principal| principal.id().clone())
            .map_err(|message| {
                warn!(%message, "identity service returned an invalid principal");
                Error::service_unavailable("identity service unavailable")
            })
    }
}

async fn decode_principal(response: Response) -> Result<Principal, String> {
    let body = response.bytes().await.map_err(|error| error.to_string())?;
    serde_json::from_slice(&body).map_err(|error| error.to_string())
}

fn map_login_status(status: StatusCode) -> Error {
    match status {
        StatusCode::BAD_REQUEST
        | StatusCode::UNAUTHORIZED
        | StatusCode::FORBIDDEN
        | StatusCode::NOT_FOUND => Error::unauthorized("invalid credentials"),
        _ => {
            warn!(status = status.as_u16(), "identity service rejected sign-in");
            Error::service_unavailable("identity service unavailable")
        }
    }
}
