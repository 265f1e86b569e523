//! Listener and session-cookie configuration for the HTTP server.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};

use staffdesk::inbound::http::session_config::SessionSettings;

/// Everything `create_server` needs besides handler state.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
}

impl ServerConfig {
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
        }
    }

    /// Configuration from validated session settings.
    #[must_use]
    pub fn from_session(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        let SessionSettings {
            key,
            cookie_secure,
            same_site,
        } = session;
        Self::new(key, cookie_secure, same_site, bind_addr)
    }
}
