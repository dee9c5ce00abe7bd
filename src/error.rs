use crate::feeds::error::{FetchError, RefreshError};
use crate::radar::error::{RadarError, StillImageError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JerseyWeatherError {
    #[error(transparent)]
    Refresh(#[from] RefreshError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Radar(#[from] RadarError),

    #[error(transparent)]
    StillImage(#[from] StillImageError),

    #[error("Failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),
}
