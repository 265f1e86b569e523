//! Service settings loaded through OrthoConfig (`STAFFDESK_*`).

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use staffdesk::domain::DEFAULT_BADGE_POLL_INTERVAL;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_COUNTS_TIMEOUT: Duration = Duration::from_millis(10_000);
const DEFAULT_PRINCIPALS_TIMEOUT: Duration = Duration::from_millis(5_000);

/// Settings values that parsed but do not make sense.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("invalid counts base URL '{value}': {source}")]
    CountsBaseUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid principals base URL '{value}': {source}")]
    PrincipalsBaseUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
}

/// Runtime settings for the staffdesk service.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STAFFDESK")]
pub struct AppSettings {
    /// Listener address; `0.0.0.0:8080` when unset.
    pub bind_addr: Option<String>,
    /// Base URL of the trial-request service; fixture counts when unset.
    pub counts_base_url: Option<String>,
    /// Badge poll period in milliseconds; five minutes when unset.
    pub badge_poll_interval_ms: Option<u64>,
    /// Per-request timeout for count fetches in milliseconds.
    pub counts_timeout_ms: Option<u64>,
    /// Base URL of the identity service; fixture principals when unset,
    /// which only debug builds accept.
    pub principals_base_url: Option<String>,
    /// Per-request timeout for identity calls in milliseconds.
    pub principals_timeout_ms: Option<u64>,
}

impl AppSettings {
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    pub fn counts_base_url(&self) -> Result<Option<Url>, SettingsError> {
        self.counts_base_url
            .as_deref()
            .map(|value| {
                Url::parse(value).map_err(|source| SettingsError::CountsBaseUrl {
                    value: value.to_owned(),
                    source,
                })
            })
            .transpose()
    }

    pub fn principals_base_url(&self) -> Result<Option<Url>, SettingsError> {
        self.principals_base_url
            .as_deref()
            .map(|value| {
                Url::parse(value).map_err(|source| SettingsError::PrincipalsBaseUrl {
                    value: value.to_owned(),
                    source,
                })
            })
            .transpose()
    }

    pub fn badge_poll_interval(&self) -> Duration {
        self.badge_poll_interval_ms
            .map_or(DEFAULT_BADGE_POLL_INTERVAL, Duration::from_millis)
    }

    pub fn counts_timeout(&self) -> Duration {
        self.counts_timeout_ms
            .map_or(DEFAULT_COUNTS_TIMEOUT, Duration::from_millis)
    }

    pub fn principals_timeout(&self) -> Duration {
        self.principals_timeout_ms
            .map_or(DEFAULT_PRINCIPALS_TIMEOUT, Duration::from_millis)
    }
}
