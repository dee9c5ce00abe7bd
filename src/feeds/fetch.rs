//! The HTTP seam shared by the feed coordinator, the radar compositor and the
//! still-image fetcher.

use crate::feeds::error::FetchError;
use log::debug;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Retrieves the body of an HTTP GET request.
///
/// Implemented for [`reqwest::Client`]; tests substitute in-memory implementations.
/// Non-2xx responses must be reported as [`FetchError::HttpStatus`].
pub trait HttpFetch {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send;
}

impl HttpFetch for reqwest::Client {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        debug!("Requesting {}", url);
        let response = self
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::NetworkRequest(url.to_string(), e))?;

        let status = response.status();
        if !status.is_success() {
            debug!("HTTP error for {}: {}", url, status);
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::NetworkRequest(url.to_string(), e))?;
        Ok(body.to_vec())
    }
}

impl<T> HttpFetch for Arc<T>
where
    T: HttpFetch + Send + Sync + ?Sized,
{
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send {
        (**self).fetch(url)
    }
}

/// Roughly 30 years; stands in for deadlines that do not fit in an [`Instant`].
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// The instant `budget` from now, saturating for budgets too large to represent.
pub(crate) fn deadline_after(budget: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(budget)
        .or_else(|| now.checked_add(FAR_FUTURE))
        .unwrap_or(now)
}

/// Runs one fetch, abandoning it when `deadline` passes.
///
/// `budget` is only used to describe the timeout in the returned error.
pub(crate) async fn fetch_before<F>(
    fetcher: &F,
    url: &str,
    deadline: Instant,
    budget: Duration,
) -> Result<Vec<u8>, FetchError>
where
    F: HttpFetch + ?Sized,
{
    match tokio::time::timeout_at(deadline, fetcher.fetch(url)).await {
        Ok(result) => result,
        Err(_) => Err(FetchError::Timeout {
            url: url.to_string(),
            after: budget,
        }),
    }
}
