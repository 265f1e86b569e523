//! Background task keeping badge counts fresh.
//!
//! The poller owns the write side of a `watch` channel and publishes a whole
//! [`BadgeSnapshot`] per refresh; request handlers hold a
//! [`BadgePollerHandle`] and read the latest snapshot without locking.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Notify, watch};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use super::{ALL_NOTIFICATION_SOURCES, BadgeCount, BadgeSnapshot};
use crate::domain::ports::NotificationCountSource;

/// Poll period used when none is configured.
pub const DEFAULT_BADGE_POLL_INTERVAL: Duration = Duration::from_millis(300_000);

const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Read side of the badge board, cheap to clone into every worker.
#[derive(Debug, Clone)]
pub struct BadgePollerHandle {
    snapshots: watch::Receiver<BadgeSnapshot>,
    refresh: Arc<Notify>,
}

impl BadgePollerHandle {
    /// Handle serving a fixed snapshot with no poller behind it.
    ///
    /// Refresh requests are accepted and ignored.
    #[must_use]
    pub fn detached(snapshot: BadgeSnapshot) -> Self {
        let (_sender, snapshots) = watch::channel(snapshot);
        Self {
            snapshots,
            refresh: Arc::new(Notify::new()),
        }
    }

    /// Latest published counts.
    #[must_use]
    pub fn snapshot(&self) -> BadgeSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Ask the poller to refetch now instead of waiting for the next tick.
    ///
    /// Requests arriving while a fetch is in flight coalesce into one
    /// follow-up fetch.
    pub fn request_refresh(&self) {
        self.refresh.notify_one();
    }
}

/// Shutdown signal for [`BadgePoller::run`].
#[derive(Debug)]
pub struct PollerShutdown(watch::Sender<bool>);

impl Default for PollerShutdown {
    fn default() -> Self {
        Self::new()
    }
}

impl PollerShutdown {
    /// Create an untriggered signal.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _receiver) = watch::channel(false);
        Self(sender)
    }

    /// Receiver to pass to [`BadgePoller::run`].
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.0.subscribe()
    }

    /// Stop every subscribed poller; in-flight fetches are dropped.
    pub fn signal(&self) {
        self.0.send_replace(true);
    }
}

/// Periodic fetcher of notification counts.
pub struct BadgePoller {
    source: Arc<dyn NotificationCountSource>,
    interval: Duration,
    snapshots: watch::Sender<BadgeSnapshot>,
    refresh: Arc<Notify>,
}

impl BadgePoller {
    /// Create a poller and the handle reading its output.
    ///
    /// The board starts with every count at zero until the first fetch
    /// completes.
    pub fn new(
        source: Arc<dyn NotificationCountSource>,
        interval: Duration,
    ) -> (Self, BadgePollerHandle) {
        let (snapshots, receiver) = watch::channel(BadgeSnapshot::empty());
        let refresh = Arc::new(Notify::new());
        let handle = BadgePollerHandle {
            snapshots: receiver,
            refresh: Arc::clone(&refresh),
        };
        let poller = Self {
            source,
            interval: interval.max(MIN_POLL_INTERVAL),
            snapshots,
            refresh,
        };
        (poller, handle)
    }

    /// Fetch every source once and publish the result.
    ///
    /// A source that fails counts as zero for this round; the previous
    /// value is not retained.
    pub async fn refresh_once(&self) -> BadgeSnapshot {
        let mut snapshot = BadgeSnapshot::empty();
        for source in ALL_NOTIFICATION_SOURCES {
            let count = match self.source.fetch_count(source).await {
                Ok(count) => {
                    debug!(?source, count, "notification count fetched");
                    BadgeCount::new(count)
                }
                Err(error) => {
                    warn!(?source, %error, "notification count unavailable; showing no badge");
                    BadgeCount::ZERO
                }
            };
            snapshot = snapshot.with(source, count);
        }
        self.snapshots.send_replace(snapshot.clone());
        snapshot
    }

    /// Poll until `shutdown` fires or its sender is dropped.
    ///
    /// Fetches immediately, then on every interval tick and on every
    /// refresh request.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        if *shutdown.borrow_and_update() {
            return;
        }
        info!(interval = ?self.interval, "badge poller started");
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = shutdown.changed() => break,
                _ = ticker.tick() => {}
                () = self.refresh.notified() => debug!("badge refresh requested"),
            }
            tokio::select! {
                biased;
                _ = shutdown.changed() => break,
                _ = self.refresh_once() => {}
            }
        }
        info!("badge poller stopped");
    }
}
