//! Reqwest-backed notification count source.
//!
//! Transport only: URL construction, timeout and status mapping, and body
//! decoding. Turning failures into "no badge" is the poller's decision.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use thiserror::Error;

use super::dto::decode_count;
use crate::domain::NotificationSource;
use crate::domain::ports::{NotificationCountSource, NotificationCountSourceError};

const USER_AGENT: &str = concat!("staffdesk/", env!("CARGO_PKG_VERSION"));

/// Errors raised while building the adapter.
#[derive(Debug, Error)]
pub enum CountSourceBuildError {
    /// The reqwest client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    /// The base URL cannot carry path segments (e.g. `mailto:`).
    #[error("counts base URL cannot be a base: {url}")]
    BaseUrl {
        /// The rejected URL.
        url: String,
    },
}

fn path_segments(source: NotificationSource) -> &'static [&'static str] {
    match source {
        NotificationSource::PendingTrialRequests => {
            &["api", "trial-requests", "pending", "count"]
        }
    }
}

/// Resolve the count endpoint for `source` below `base`.
///
/// Any path already on `base` is kept as a prefix.
fn endpoint_for(base: &Url, source: NotificationSource) -> Result<Url, CountSourceBuildError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| CountSourceBuildError::BaseUrl {
            url: base.to_string(),
        })?
        .pop_if_empty()
        .extend(path_segments(source));
    Ok(url)
}

/// Count source issuing `GET {base}/api/trial-requests/pending/count`.
#[derive(Debug, Clone)]
pub struct HttpNotificationCountSource {
    client: Client,
    pending_trial_requests: Url,
}

impl HttpNotificationCountSource {
    /// Build an adapter whose requests time out after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when the client cannot be built or `base` cannot
    /// carry a path.
    pub fn new(base: &Url, timeout: Duration) -> Result<Self, CountSourceBuildError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            pending_trial_requests: endpoint_for(base, NotificationSource::PendingTrialRequests)?,
        })
    }

    fn endpoint(&self, source: NotificationSource) -> &Url {
        match source {
            NotificationSource::PendingTrialRequests => &self.pending_trial_requests,
        }
    }
}

#[async_trait]
impl NotificationCountSource for HttpNotificationCountSource {
    async fn fetch_count(
        &self,
        source: NotificationSource,
    ) -> Result<u64, NotificationCountSourceError> {
        let response = self
            .client
            .get(self.endpoint(source).clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(map_status_error(status));
        }
        let body = response.bytes().await.map_err(map_transport_error)?;
        decode_count(body.as_ref()).map_err(NotificationCountSourceError::decode)
    }
}

fn map_transport_error(error: reqwest::Error) -> NotificationCountSourceError {
    if error.is_timeout() {
        NotificationCountSourceError::timeout(error.to_string())
    } else {
        NotificationCountSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode) -> NotificationCountSourceError {
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            NotificationCountSourceError::timeout(format!("status {}", status.as_u16()))
        }
        _ => NotificationCountSourceError::status(status.as_u16()),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network mapping helpers.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://hr.example.test", "https://hr.example.test/api/trial-requests/pending/count")]
    #[case("https://hr.example.test/", "https://hr.example.test/api/trial-requests/pending/count")]
    #[case(
        "https://hr.example.test/backend/",
        "https://hr.example.test/backend/api/trial-requests/pending/count"
    )]
    #[case(
        "http://127.0.0.1:5000/backend",
        "http://127.0.0.1:5000/backend/api/trial-requests/pending/count"
    )]
    fn endpoints_extend_the_base_path(#[case] base: &str, #[case] expected: &str) {
        let base = Url::parse(base).expect("valid base");
        let url = endpoint_for(&base, NotificationSource::PendingTrialRequests)
            .expect("base accepts paths");
        assert_eq!(url.as_str(), expected);
    }

    #[rstest]
    fn rejects_bases_without_paths() {
        let base = Url::parse("mailto:hr@example.test").expect("valid url");
        let error = endpoint_for(&base, NotificationSource::PendingTrialRequests)
            .expect_err("mailto cannot be a base");
        assert!(matches!(error, CountSourceBuildError::BaseUrl { .. }));
    }

    #[rstest]
    #[case::gateway_timeout(StatusCode::GATEWAY_TIMEOUT, true)]
    #[case::request_timeout(StatusCode::REQUEST_TIMEOUT, true)]
    #[case::unauthorised(StatusCode::UNAUTHORIZED, false)]
    #[case::server_error(StatusCode::INTERNAL_SERVER_ERROR, false)]
    fn maps_statuses(#[case] status: StatusCode, #[case] is_timeout: bool) {
        let error = map_status_error(status);
        if is_timeout {
            assert!(matches!(error, NotificationCountSourceError::Timeout { .. }));
        } else {
            assert_eq!(error, NotificationCountSourceError::status(status.as_u16()));
        }
    }

    #[rstest]
    fn builds_with_a_plain_base() {
        let base = Url::parse("https://hr.example.test").expect("valid base");
        let source =
            HttpNotificationCountSource::new(&base, Duration::from_secs(10)).expect("builds");
        assert_eq!(
            source
                .endpoint(NotificationSource::PendingTrialRequests)
                .path(),
            "/api/trial-requests/pending/count"
        );
    }
}
