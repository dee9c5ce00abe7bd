//! The client tying the periodic feed refresh, the derived observations and the
//! on-demand images together.

use crate::config::Config;
use crate::error::JerseyWeatherError;
use crate::feeds::coordinator::{FeedCoordinator, SnapshotReader};
use crate::feeds::fetch::HttpFetch;
use crate::feeds::snapshot::FeedSnapshot;
use crate::radar::images::{ImageFetcher, MarineImage};
use crate::radar::{RadarAnimation, RadarCompositor};
use crate::types::observation::{daily_forecast, CurrentConditions, DailyForecast, DEFAULT_FORECAST_DAYS};
use crate::types::tide::TideDay;
use bon::bon;
use chrono::{Local, Timelike};
use log::info;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Client for the Jersey Met feeds.
///
/// Construction runs a first refresh and then keeps the feeds up to date in a
/// background task, every [`Config::update_interval`]. All read methods work on the
/// latest published [`FeedSnapshot`] and never block on the network, except
/// [`JerseyWeather::radar_animation`] and [`JerseyWeather::image`], which fetch on demand.
///
/// Dropping the client stops the background task.
///
/// # Examples
///
/// ```no_run
/// # use jersey_weather::{JerseyWeather, JerseyWeatherError};
/// # #[tokio::main]
/// # async fn main() -> Result<(), JerseyWeatherError> {
/// let client = JerseyWeather::new().await?;
///
/// if let Some(now) = client.current_conditions() {
///     println!("{} at {:?}°C", now.condition, now.temperature_c);
/// }
/// for day in client.forecast().days(3).call() {
///     println!("{:?}: {}", day.label, day.condition);
/// }
/// # Ok(())
/// # }
/// ```
pub struct JerseyWeather<F = reqwest::Client> {
    reader: SnapshotReader,
    compositor: RadarCompositor<F>,
    images: ImageFetcher<F>,
    refresh_task: JoinHandle<()>,
}

impl JerseyWeather<reqwest::Client> {
    /// Creates a client for the public feeds with the default [`Config`].
    ///
    /// # Errors
    ///
    /// Fails if not a single feed could be fetched in the initial refresh.
    pub async fn new() -> Result<Self, JerseyWeatherError> {
        Self::with_config(Config::default()).await
    }

    /// Creates a client with custom timing or endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`JerseyWeatherError::HttpClient`] if the HTTP client cannot be built,
    /// or [`JerseyWeatherError::Refresh`] if the initial refresh fails for every feed.
    pub async fn with_config(config: Config) -> Result<Self, JerseyWeatherError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(JerseyWeatherError::HttpClient)?;
        Self::with_fetcher(config, client).await
    }
}

#[bon]
impl<F> JerseyWeather<F>
where
    F: HttpFetch + Clone + Send + Sync + 'static,
{
    /// Creates a client on top of any [`HttpFetch`] implementation.
    ///
    /// # Errors
    ///
    /// Returns [`JerseyWeatherError::Refresh`] if the initial refresh fails for every feed.
    pub async fn with_fetcher(config: Config, fetcher: F) -> Result<Self, JerseyWeatherError> {
        let mut coordinator = FeedCoordinator::new(fetcher.clone(), &config);
        let snapshot = coordinator.refresh().await?;
        info!(
            "Initial refresh complete, {} feeds available",
            snapshot.feeds().count()
        );

        let reader = coordinator.subscribe();
        let refresh_task = tokio::spawn(coordinator.run());

        Ok(Self {
            reader,
            compositor: RadarCompositor::new(fetcher.clone(), &config),
            images: ImageFetcher::new(fetcher, &config),
            refresh_task,
        })
    }

    /// The latest published snapshot.
    pub fn snapshot(&self) -> Arc<FeedSnapshot> {
        self.reader.current()
    }

    /// A handle that can wait for future snapshots.
    pub fn subscribe(&self) -> SnapshotReader {
        self.reader.clone()
    }

    /// Current conditions for the local time of day.
    ///
    /// `None` if the forecast feed has never been fetched or has no days.
    pub fn current_conditions(&self) -> Option<CurrentConditions> {
        self.current_conditions_at(Local::now().hour())
    }

    /// Current conditions as they would be reported at local `hour` (0-23).
    pub fn current_conditions_at(&self, hour: u32) -> Option<CurrentConditions> {
        let forecast = self.snapshot().forecast()?;
        CurrentConditions::from_forecast(&forecast, hour)
    }

    /// The forecast for the coming days, today excluded.
    ///
    /// * `.days(usize)`: Optional. Maximum number of days. Defaults to 5.
    #[builder]
    pub fn forecast(&self, days: Option<usize>) -> Vec<DailyForecast> {
        let days = days.unwrap_or(DEFAULT_FORECAST_DAYS);
        self.snapshot()
            .forecast()
            .map(|forecast| daily_forecast(&forecast, days))
            .unwrap_or_default()
    }

    /// All days of the tide feed.
    pub fn tides(&self) -> Vec<TideDay> {
        self.snapshot().tides()
    }

    /// Today's tides: the first day of the tide feed.
    pub fn today_tides(&self) -> Option<TideDay> {
        self.tides().into_iter().next()
    }

    /// Fetches the radar sequence and composites it into a looping GIF.
    ///
    /// # Errors
    ///
    /// Returns [`JerseyWeatherError::Radar`] when no frame could be used.
    pub async fn radar_animation(&self) -> Result<RadarAnimation, JerseyWeatherError> {
        Ok(self.compositor.composite().await?)
    }

    /// Fetches a still image, falling back to the last good copy.
    ///
    /// # Errors
    ///
    /// Returns [`JerseyWeatherError::StillImage`] if the image was never fetched successfully.
    pub async fn image(&self, image: MarineImage) -> Result<Arc<Vec<u8>>, JerseyWeatherError> {
        Ok(self.images.fetch(image).await?)
    }
}

impl<F> Drop for JerseyWeather<F> {
    fn drop(&mut self) {
        self.refresh_task.abort();
    }
}
