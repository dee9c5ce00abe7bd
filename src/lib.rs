pub mod classify;
mod config;
mod error;
mod feeds;
mod jersey_weather;
pub mod normalize;
pub mod radar;
mod types;

pub use config::*;
pub use error::JerseyWeatherError;
pub use jersey_weather::*;

pub use feeds::coordinator::{FeedCoordinator, SnapshotReader};
pub use feeds::error::{FetchError, RefreshError};
pub use feeds::fetch::HttpFetch;
pub use feeds::snapshot::{Feed, FeedEntry, FeedSnapshot};

pub use radar::error::{RadarError, StillImageError};
pub use radar::images::{ImageFetcher, MarineImage};
pub use radar::{RadarAnimation, RadarCompositor};

pub use types::condition::{CanonicalCondition, UnknownCondition};
pub use types::forecast::{DayPeriod, Forecast, ForecastDay, RainProbabilities};
pub use types::observation::{daily_forecast, CurrentConditions, DailyForecast, DEFAULT_FORECAST_DAYS};
pub use types::tide::{parse_tide_days, TideDay, TideEvent, TideKind};
