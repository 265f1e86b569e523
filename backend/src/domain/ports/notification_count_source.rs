//! Driven port for the live counts behind navigation badges.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::NotificationSource;

define_port_error! {
    /// Errors surfaced while reading a notification count.
    pub enum NotificationCountSourceError {
        /// Network transport failed before a response arrived.
        Transport { message: String } =>
            "count source transport failed: {message}",
        /// The request exceeded its deadline.
        Timeout { message: String } =>
            "count source timed out: {message}",
        /// The collaborator answered with a non-success status.
        Status { status: u16 } =>
            "count source answered with status {status}",
        /// The body was not an object with a numeric `count`.
        Decode { message: String } =>
            "count source response decode failed: {message}",
    }
}

/// Port reading the current count for one notification source.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationCountSource: Send + Sync {
    /// Fetch the current count for `source`.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use staffdesk::domain::NotificationSource;
    /// use staffdesk::domain::ports::{FixtureNotificationCountSource, NotificationCountSource};
    ///
    /// let count = FixtureNotificationCountSource::default()
    ///     .fetch_count(NotificationSource::PendingTrialRequests)
    ///     .await?;
    /// assert_eq!(count, 0);
    /// # Ok::<(), staffdesk::domain::ports::NotificationCountSourceError>(())
    /// ```
    async fn fetch_count(
        &self,
        source: NotificationSource,
    ) -> Result<u64, NotificationCountSourceError>;
}

/// Fixture source reporting a constant count for every source.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureNotificationCountSource {
    count: u64,
}

impl FixtureNotificationCountSource {
    /// Fixture reporting `count` everywhere.
    #[must_use]
    pub const fn with_count(count: u64) -> Self {
        Self { count }
    }
}

#[async_trait]
impl NotificationCountSource for FixtureNotificationCountSource {
    async fn fetch_count(
        &self,
        _source: NotificationSource,
    ) -> Result<u64, NotificationCountSourceError> {
        Ok(self.count)
    }
}
