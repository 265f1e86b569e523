//! Notification badges: live counts rendered next to navigation entries.
//!
//! Counts come from external feeds polled by [`BadgePoller`]. Resolution is
//! fail-open-to-quiet: a feed that cannot be read counts as zero, and zero
//! renders no badge.

mod poller;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub use self::poller::{
    BadgePoller, BadgePollerHandle, DEFAULT_BADGE_POLL_INTERVAL, PollerShutdown,
};

/// Largest count rendered verbatim; anything above reads `99+`.
pub const BADGE_DISPLAY_CAP: u64 = 99;

/// Live count feeds an entry can declare.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum NotificationSource {
    /// Trial requests awaiting an HR decision.
    PendingTrialRequests,
}

/// Every notification source, polled in this order.
pub const ALL_NOTIFICATION_SOURCES: [NotificationSource; 1] =
    [NotificationSource::PendingTrialRequests];

/// Count reported by a feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct BadgeCount(u64);

impl BadgeCount {
    /// Zero count; renders no badge.
    pub const ZERO: Self = Self(0);

    /// Wrap a raw count.
    #[must_use]
    pub const fn new(count: u64) -> Self {
        Self(count)
    }

    /// Raw count.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Badge text, or `None` when nothing should be shown.
    ///
    /// # Examples
    /// ```
    /// use staffdesk::domain::BadgeCount;
    ///
    /// assert_eq!(BadgeCount::new(0).display_text(), None);
    /// assert_eq!(BadgeCount::new(7).display_text().as_deref(), Some("7"));
    /// assert_eq!(BadgeCount::new(150).display_text().as_deref(), Some("99+"));
    /// ```
    #[must_use]
    pub fn display_text(self) -> Option<String> {
        match self.0 {
            0 => None,
            count if count > BADGE_DISPLAY_CAP => Some(format!("{BADGE_DISPLAY_CAP}+")),
            count => Some(count.to_string()),
        }
    }
}

/// Latest count per source, published as one immutable value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BadgeSnapshot(BTreeMap<NotificationSource, BadgeCount>);

impl BadgeSnapshot {
    /// Snapshot with every count at zero.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Return a copy with `source` set to `count`.
    #[must_use]
    pub fn with(mut self, source: NotificationSource, count: BadgeCount) -> Self {
        self.0.insert(source, count);
        self
    }

    /// Count for `source`; unknown sources read as zero.
    #[must_use]
    pub fn count(&self, source: NotificationSource) -> BadgeCount {
        self.0.get(&source).copied().unwrap_or_default()
    }
}
