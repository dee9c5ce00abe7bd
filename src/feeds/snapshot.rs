//! Defines the set of upstream feeds and the immutable snapshot one refresh cycle produces.

use crate::types::forecast::Forecast;
use crate::types::tide::{parse_tide_days, TideDay};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// One of the independently published JSON feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feed {
    /// Daily forecast with current temperature and the day list.
    Forecast,
    /// Five-day tide tables.
    Tide,
    /// Coastal station reports.
    Coastal,
    /// Shipping forecast.
    Shipping,
}

impl Feed {
    pub const ALL: [Feed; 4] = [Feed::Forecast, Feed::Tide, Feed::Coastal, Feed::Shipping];

    /// Key under which the feed appears in a snapshot.
    pub fn name(&self) -> &'static str {
        match self {
            Feed::Forecast => "forecast",
            Feed::Tide => "tide",
            Feed::Coastal => "coastal",
            Feed::Shipping => "shipping",
        }
    }
}

/// Allows formatting a `Feed` using its snapshot key.
///
/// ```
/// use jersey_weather::Feed;
///
/// assert_eq!(Feed::Tide.to_string(), "tide");
/// ```
impl fmt::Display for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The last successfully decoded payload of one feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedEntry {
    pub payload: Value,
    /// When the cycle that fetched this payload completed.
    pub fetched_at: DateTime<Utc>,
}

/// The consolidated result of a refresh cycle.
///
/// A feed is present once it has been fetched and decoded successfully at least
/// once. When a later cycle fails for that feed, the previous payload is carried
/// over and the feed is reported by [`FeedSnapshot::stale_feeds`].
///
/// Snapshots are never modified after they are published; each cycle builds a new
/// one and replaces the old one wholesale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedSnapshot {
    entries: BTreeMap<Feed, FeedEntry>,
    refreshed_at: Option<DateTime<Utc>>,
}

impl FeedSnapshot {
    /// Builds the successor of `self` from the payloads fetched in one cycle.
    pub(crate) fn merged(&self, fetched: Vec<(Feed, Value)>, at: DateTime<Utc>) -> FeedSnapshot {
        let mut entries = self.entries.clone();
        for (feed, payload) in fetched {
            entries.insert(
                feed,
                FeedEntry {
                    payload,
                    fetched_at: at,
                },
            );
        }
        FeedSnapshot {
            entries,
            refreshed_at: Some(at),
        }
    }

    /// `true` until the first successful cycle.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// When the last successful cycle completed.
    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.refreshed_at
    }

    pub fn contains(&self, feed: Feed) -> bool {
        self.entries.contains_key(&feed)
    }

    /// The raw JSON payload of a feed.
    pub fn get(&self, feed: Feed) -> Option<&Value> {
        self.entries.get(&feed).map(|entry| &entry.payload)
    }

    pub fn entry(&self, feed: Feed) -> Option<&FeedEntry> {
        self.entries.get(&feed)
    }

    /// Feeds with a payload, in [`Feed`] order.
    pub fn feeds(&self) -> impl Iterator<Item = Feed> + '_ {
        self.entries.keys().copied()
    }

    /// Feeds whose payload was carried over because the latest cycle failed for them.
    pub fn stale_feeds(&self) -> Vec<Feed> {
        self.entries
            .iter()
            .filter(|(_, entry)| Some(entry.fetched_at) != self.refreshed_at)
            .map(|(feed, _)| *feed)
            .collect()
    }

    /// The forecast feed, decoded. `None` if it was never fetched.
    pub fn forecast(&self) -> Option<Forecast> {
        self.get(Feed::Forecast).map(Forecast::from_value)
    }

    /// The tide feed, decoded. Empty if it was never fetched.
    pub fn tides(&self) -> Vec<TideDay> {
        self.get(Feed::Tide)
            .map(parse_tide_days)
            .unwrap_or_default()
    }
}
