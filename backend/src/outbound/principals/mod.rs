//! HTTP adapter for the identity collaborator that owns principals.

mod dto;
mod http_directory;

pub use http_directory::{HttpPrincipalDirectory, PrincipalsBuildError};
