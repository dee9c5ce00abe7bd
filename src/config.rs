//! Refresh timing and upstream URLs.
//!
//! Everything has a default pointing at the public Jersey Met feeds, so most
//! callers only use [`Config::default`]. Both structs deserialize with missing
//! fields filled from the defaults, and durations are given in whole seconds.

use crate::feeds::snapshot::Feed;
use crate::radar::error::RadarError;
use crate::radar::images::MarineImage;
use crate::radar::{frame_url, RADAR_FRAME_COUNT};
use bon::Builder;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const FORECAST_URL: &str =
    "https://prodgojweatherstorage.blob.core.windows.net/data/jerseyForecast.json";
pub const TIDE_URL: &str =
    "https://prodgojweatherstorage.blob.core.windows.net/data/JerseyTide5Day.json";
pub const COASTAL_REPORTS_URL: &str =
    "https://prodgojweatherstorage.blob.core.windows.net/data/CoastalReports.json";
pub const SHIPPING_FORECAST_URL: &str =
    "https://prodgojweatherstorage.blob.core.windows.net/data/Shipping.json";

/// Radar frame URL; `{index}` is replaced by the two-digit frame number.
pub const RADAR_FRAME_TEMPLATE: &str =
    "https://sojpublicdata.blob.core.windows.net/jerseymet/Radar{index}.JPG";
pub const SATELLITE_IMAGE_URL: &str =
    "https://sojpublicdata.blob.core.windows.net/jerseymet/Satellite10.JPG";
pub const WIND_WAVES_IMAGE_URL: &str =
    "https://sojpublicdata.blob.core.windows.net/jerseymet/Wind%20Waves%202018%2049.png";
pub const SEA_STATE_AM_IMAGE_URL: &str =
    "https://sojpublicdata.blob.core.windows.net/jerseymet/Sea%20State/Sea%20State%20AM.png";
pub const SEA_STATE_PM_IMAGE_URL: &str =
    "https://sojpublicdata.blob.core.windows.net/jerseymet/Sea%20State/Sea%20State%20PM.png";

pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_secs(15 * 60);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Upstream URLs.
///
/// ```
/// use jersey_weather::Endpoints;
///
/// let endpoints = Endpoints::builder()
///     .forecast("http://localhost:8080/forecast.json")
///     .build();
/// assert_eq!(endpoints.forecast, "http://localhost:8080/forecast.json");
/// assert!(endpoints.radar_frame_template.contains("{index}"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[serde(default)]
pub struct Endpoints {
    #[builder(into, default = FORECAST_URL.to_string())]
    pub forecast: String,
    #[builder(into, default = TIDE_URL.to_string())]
    pub tide: String,
    #[builder(into, default = COASTAL_REPORTS_URL.to_string())]
    pub coastal: String,
    #[builder(into, default = SHIPPING_FORECAST_URL.to_string())]
    pub shipping: String,
    #[builder(into, default = RADAR_FRAME_TEMPLATE.to_string())]
    pub radar_frame_template: String,
    #[builder(into, default = SATELLITE_IMAGE_URL.to_string())]
    pub satellite: String,
    #[builder(into, default = WIND_WAVES_IMAGE_URL.to_string())]
    pub wind_waves: String,
    #[builder(into, default = SEA_STATE_AM_IMAGE_URL.to_string())]
    pub sea_state_am: String,
    #[builder(into, default = SEA_STATE_PM_IMAGE_URL.to_string())]
    pub sea_state_pm: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Endpoints::builder().build()
    }
}

impl Endpoints {
    pub fn feed_url(&self, feed: Feed) -> &str {
        match feed {
            Feed::Forecast => &self.forecast,
            Feed::Tide => &self.tide,
            Feed::Coastal => &self.coastal,
            Feed::Shipping => &self.shipping,
        }
    }

    /// URL of a still image. The latest radar still is the last frame of the sequence.
    ///
    /// # Errors
    ///
    /// [`RadarError::InvalidTemplate`] for the radar still if the frame template has
    /// no `{index}` placeholder.
    pub fn image_url(&self, image: MarineImage) -> Result<String, RadarError> {
        Ok(match image {
            MarineImage::Radar => frame_url(&self.radar_frame_template, RADAR_FRAME_COUNT)?,
            MarineImage::Satellite => self.satellite.clone(),
            MarineImage::WindWaves => self.wind_waves.clone(),
            MarineImage::SeaStateAm => self.sea_state_am.clone(),
            MarineImage::SeaStatePm => self.sea_state_pm.clone(),
        })
    }
}

/// Client configuration.
///
/// ```
/// use jersey_weather::Config;
/// use std::time::Duration;
///
/// let config = Config::builder()
///     .update_interval(Duration::from_secs(600))
///     .build();
/// assert_eq!(config.request_timeout, Duration::from_secs(30));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[serde(default)]
pub struct Config {
    /// Time between two refresh cycles. Zero falls back to [`DEFAULT_UPDATE_INTERVAL`].
    #[builder(default = DEFAULT_UPDATE_INTERVAL)]
    #[serde(with = "seconds")]
    pub update_interval: Duration,
    /// Upper bound on one refresh cycle, and on one radar animation request.
    /// Values too large to represent as a deadline mean "no practical limit".
    #[builder(default = DEFAULT_REQUEST_TIMEOUT)]
    #[serde(with = "seconds")]
    pub request_timeout: Duration,
    #[builder(default)]
    pub endpoints: Endpoints,
}

impl Default for Config {
    fn default() -> Self {
        Config::builder().build()
    }
}

mod seconds {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
