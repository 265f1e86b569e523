//! Wire shapes exchanged with the identity collaborator.
//!
//! Principals themselves decode through `Principal`'s own serde contract
//! (the `/api/user` shape); only the sign-in body lives here.

use serde::Serialize;

use crate::domain::LoginCredentials;

/// Body of `POST {base}/api/login`.
#[derive(Debug, Serialize)]
pub(super) struct LoginRequestDto<'a> {
    pub(super) username: &'a str,
    pub(super) password: &'a str,
}

impl<'a> From<&'a LoginCredentials> for LoginRequestDto<'a> {
    fn from(value: &'a LoginCredentials) -> Self {
        Self {
            username: value.username(),
            password: value.password(),
        }
    }
}
