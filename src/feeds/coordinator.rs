use crate::config::{Config, DEFAULT_UPDATE_INTERVAL};
use crate::feeds::error::{FetchError, RefreshError};
use crate::feeds::fetch::{deadline_after, fetch_before, HttpFetch};
use crate::feeds::snapshot::{Feed, FeedSnapshot};
use chrono::Utc;
use futures_util::future::join_all;
use log::{debug, error, info, warn};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior};

/// Read-only handle on the latest published snapshot.
///
/// Cloning is cheap; every clone observes the same snapshots.
#[derive(Debug, Clone)]
pub struct SnapshotReader {
    receiver: watch::Receiver<Arc<FeedSnapshot>>,
}

impl SnapshotReader {
    /// The snapshot published by the last successful cycle (empty before the first one).
    pub fn current(&self) -> Arc<FeedSnapshot> {
        self.receiver.borrow().clone()
    }

    /// Waits for the next published snapshot. Returns `None` once the coordinator is gone.
    pub async fn changed(&mut self) -> Option<Arc<FeedSnapshot>> {
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }
}

/// Owns the refresh cycle: fetches every feed concurrently, merges the successes
/// into a new [`FeedSnapshot`] and publishes it.
///
/// The coordinator is the only writer of the snapshot. Taking `&mut self` in
/// [`FeedCoordinator::refresh`] keeps cycles strictly sequential; readers obtained
/// through [`FeedCoordinator::subscribe`] only ever see complete snapshots.
pub struct FeedCoordinator<F = reqwest::Client> {
    fetcher: F,
    endpoints: Vec<(Feed, String)>,
    request_timeout: Duration,
    update_interval: Duration,
    publisher: watch::Sender<Arc<FeedSnapshot>>,
}

impl<F: HttpFetch> FeedCoordinator<F> {
    pub fn new(fetcher: F, config: &Config) -> Self {
        let endpoints = Feed::ALL
            .iter()
            .map(|feed| (*feed, config.endpoints.feed_url(*feed).to_string()))
            .collect();
        let (publisher, _) = watch::channel(Arc::new(FeedSnapshot::default()));
        Self {
            fetcher,
            endpoints,
            request_timeout: config.request_timeout,
            update_interval: config.update_interval,
            publisher,
        }
    }

    pub fn subscribe(&self) -> SnapshotReader {
        SnapshotReader {
            receiver: self.publisher.subscribe(),
        }
    }

    /// The currently published snapshot.
    pub fn snapshot(&self) -> Arc<FeedSnapshot> {
        self.publisher.borrow().clone()
    }

    /// Runs one cycle.
    ///
    /// All feeds are requested concurrently and must finish before a shared deadline
    /// (`request_timeout` from the start of the cycle). A feed that errors, times out
    /// or returns invalid JSON keeps its previous payload. If at least one feed
    /// succeeds, the merged snapshot is published and returned.
    ///
    /// # Errors
    ///
    /// Returns [`RefreshError::AllFeedsFailed`] if no feed succeeded. Nothing is
    /// published in that case, so readers keep the previous snapshot.
    pub async fn refresh(&mut self) -> Result<Arc<FeedSnapshot>, RefreshError> {
        let started = Instant::now();
        let deadline = deadline_after(self.request_timeout);

        let this = &*self;
        let outcomes = join_all(this.endpoints.iter().map(|(feed, url)| async move {
            (*feed, this.fetch_feed(url, deadline).await)
        }))
        .await;

        let mut fetched = Vec::with_capacity(outcomes.len());
        let mut failures = Vec::new();
        for (feed, outcome) in outcomes {
            match outcome {
                Ok(payload) => {
                    debug!("Fetched {} feed", feed);
                    fetched.push((feed, payload));
                }
                Err(e) => {
                    warn!("Failed to fetch {} feed: {:?}", feed, e);
                    failures.push((feed, e));
                }
            }
        }

        if fetched.is_empty() {
            error!(
                "All {} feeds failed, keeping the previous snapshot",
                failures.len()
            );
            return Err(RefreshError::AllFeedsFailed { failures });
        }

        info!(
            "Refreshed {}/{} feeds in {:?}",
            fetched.len(),
            self.endpoints.len(),
            started.elapsed()
        );
        let snapshot = Arc::new(self.publisher.borrow().merged(fetched, Utc::now()));
        self.publisher.send_replace(snapshot.clone());
        Ok(snapshot)
    }

    async fn fetch_feed(&self, url: &str, deadline: Instant) -> Result<Value, FetchError> {
        let body = fetch_before(&self.fetcher, url, deadline, self.request_timeout).await?;
        serde_json::from_slice(&body).map_err(|source| FetchError::JsonDecode {
            url: url.to_string(),
            source,
        })
    }

    /// Refreshes every `update_interval` until every reader has been dropped.
    ///
    /// The first scheduled cycle runs one interval from now; the initial refresh is
    /// the caller's responsibility. A failed cycle is logged and retried on the next tick.
    /// A zero interval is replaced by [`DEFAULT_UPDATE_INTERVAL`].
    pub async fn run(mut self) {
        let period = if self.update_interval.is_zero() {
            warn!(
                "Update interval is zero, refreshing every {:?} instead",
                DEFAULT_UPDATE_INTERVAL
            );
            DEFAULT_UPDATE_INTERVAL
        } else {
            self.update_interval
        };
        let mut ticker = tokio::time::interval_at(deadline_after(period), period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            if self.publisher.is_closed() {
                debug!("No snapshot readers left, stopping refresh loop");
                break;
            }
            if let Err(e) = self.refresh().await {
                warn!("Scheduled refresh failed: {}", e);
            }
        }
    }
}
