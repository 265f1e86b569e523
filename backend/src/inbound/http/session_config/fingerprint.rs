//! Truncated SHA-256 fingerprint of the session signing key.
//!
//! Logged at startup so operators can tell which key is live without the
//! key material ever reaching a log.

use actix_web::cookie::Key;
use sha2::{Digest, Sha256};

const FINGERPRINT_BYTES: usize = 8;

/// First 8 bytes of `SHA-256(signing key)`, lowercase hex.
///
/// # Examples
/// ```
/// use actix_web::cookie::Key;
/// use staffdesk::inbound::http::session_config::fingerprint::key_fingerprint;
///
/// let fp = key_fingerprint(&Key::generate());
/// assert_eq!(fp.len(), 16);
/// ```
#[must_use]
pub fn key_fingerprint(key: &Key) -> String {
    let digest = Sha256::digest(key.signing());
    hex::encode(&digest[..FINGERPRINT_BYTES])
}
