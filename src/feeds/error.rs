use crate::feeds::snapshot::Feed;
use std::time::Duration;
use thiserror::Error;

/// Why a single endpoint produced no usable payload.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Request for {url} did not complete within {after:?}")]
    Timeout { url: String, after: Duration },

    #[error("Failed to decode JSON from {url}")]
    JsonDecode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A refresh cycle in which no feed could be fetched.
#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("All {} feeds failed to refresh", .failures.len())]
    AllFeedsFailed { failures: Vec<(Feed, FetchError)> },
}
