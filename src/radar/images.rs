//! On-demand still images with a last-good fallback.

use crate::config::Config;
use crate::config::Endpoints;
use crate::feeds::fetch::{deadline_after, fetch_before, HttpFetch};
use crate::radar::error::StillImageError;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// The still images published alongside the feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarineImage {
    /// Latest frame of the radar sequence.
    Radar,
    Satellite,
    WindWaves,
    SeaStateAm,
    SeaStatePm,
}

impl MarineImage {
    pub const ALL: [MarineImage; 5] = [
        MarineImage::Radar,
        MarineImage::Satellite,
        MarineImage::WindWaves,
        MarineImage::SeaStateAm,
        MarineImage::SeaStatePm,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MarineImage::Radar => "radar",
            MarineImage::Satellite => "satellite",
            MarineImage::WindWaves => "wind_waves",
            MarineImage::SeaStateAm => "sea_state_am",
            MarineImage::SeaStatePm => "sea_state_pm",
        }
    }
}

impl fmt::Display for MarineImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fetches still images on demand.
///
/// When a fetch fails, the bytes from the last successful fetch of the same image
/// are returned instead, so a transient outage does not blank an image that was
/// already shown.
pub struct ImageFetcher<F = reqwest::Client> {
    fetcher: F,
    endpoints: Endpoints,
    request_timeout: Duration,
    last_good: Mutex<HashMap<MarineImage, Arc<Vec<u8>>>>,
}

impl<F: HttpFetch> ImageFetcher<F> {
    pub fn new(fetcher: F, config: &Config) -> Self {
        Self {
            fetcher,
            endpoints: config.endpoints.clone(),
            request_timeout: config.request_timeout,
            last_good: Mutex::new(HashMap::new()),
        }
    }

    /// The current bytes of `image`, as served (JPEG or PNG depending on the image).
    ///
    /// # Errors
    ///
    /// * [`StillImageError::InvalidUrl`] if the radar frame template has no `{index}`.
    /// * [`StillImageError::Unavailable`] if the fetch failed and the image was never
    ///   fetched successfully before.
    pub async fn fetch(&self, image: MarineImage) -> Result<Arc<Vec<u8>>, StillImageError> {
        let url = self
            .endpoints
            .image_url(image)
            .map_err(|source| StillImageError::InvalidUrl { image, source })?;
        let deadline = deadline_after(self.request_timeout);
        let result = fetch_before(&self.fetcher, &url, deadline, self.request_timeout).await;

        let mut last_good = self.last_good.lock().await;
        match result {
            Ok(bytes) => {
                debug!("Fetched {} image ({} bytes)", image, bytes.len());
                let bytes = Arc::new(bytes);
                last_good.insert(image, bytes.clone());
                Ok(bytes)
            }
            Err(source) => match last_good.get(&image) {
                Some(bytes) => {
                    warn!("Failed to fetch {} image, serving previous copy: {}", image, source);
                    Ok(bytes.clone())
                }
                None => Err(StillImageError::Unavailable { image, source }),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feeds::error::FetchError;
    use crate::feeds::fetch::testing::{Reply, ScriptedFetcher};
    use crate::radar::error::RadarError;

    fn config() -> Config {
        Config::builder()
            .request_timeout(Duration::from_millis(100))
            .endpoints(
                Endpoints::builder()
                    .satellite("http://test/satellite.jpg")
                    .radar_frame_template("http://test/radar{index}.jpg")
                    .build(),
            )
            .build()
    }

    #[tokio::test]
    async fn test_falls_back_to_last_good_copy() {
        let fetcher = ScriptedFetcher::default();
        fetcher.reply("http://test/satellite.jpg", Reply::Body(vec![1, 2, 3]));
        let images = ImageFetcher::new(fetcher.clone(), &config());

        let first = images.fetch(MarineImage::Satellite).await.expect("fetched");
        assert_eq!(*first, vec![1, 2, 3]);

        fetcher.reply("http://test/satellite.jpg", Reply::Hang);
        let second = images.fetch(MarineImage::Satellite).await.expect("cached");
        assert!(Arc::ptr_eq(&first, &second));

        fetcher.reply("http://test/satellite.jpg", Reply::Body(vec![4]));
        let third = images.fetch(MarineImage::Satellite).await.expect("fetched");
        assert_eq!(*third, vec![4]);
    }

    #[tokio::test]
    async fn test_radar_still_needs_placeholder() {
        let fetcher = ScriptedFetcher::default();
        let config = Config::builder()
            .request_timeout(Duration::MAX)
            .endpoints(
                Endpoints::builder()
                    .radar_frame_template("http://test/radar.jpg")
                    .build(),
            )
            .build();
        let images = ImageFetcher::new(fetcher.clone(), &config);

        assert!(matches!(
            images.fetch(MarineImage::Radar).await,
            Err(StillImageError::InvalidUrl {
                image: MarineImage::Radar,
                source: RadarError::InvalidTemplate(_),
            })
        ));
        assert!(fetcher.requests().is_empty());
    }

    #[tokio::test]
    async fn test_unavailable_without_previous_copy() {
        let fetcher = ScriptedFetcher::default();
        fetcher.reply("http://test/satellite.jpg", Reply::Body(vec![1]));
        let images = ImageFetcher::new(fetcher.clone(), &config());

        // The satellite copy must not leak into another image.
        images.fetch(MarineImage::Satellite).await.expect("fetched");
        match images.fetch(MarineImage::Radar).await {
            Err(StillImageError::Unavailable { image, source }) => {
                assert_eq!(image, MarineImage::Radar);
                assert!(matches!(source, FetchError::HttpStatus { .. }));
            }
            other => panic!("expected the radar still to be unavailable, got {other:?}"),
        }
        assert_eq!(
            fetcher.requests(),
            vec!["http://test/satellite.jpg", "http://test/radar10.jpg"]
        );
    }
}
