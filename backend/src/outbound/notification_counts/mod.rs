//! HTTP adapter for the notification count feeds.

mod dto;
mod http_source;

pub use http_source::{CountSourceBuildError, HttpNotificationCountSource};
