use crate::feeds::error::FetchError;
use crate::radar::images::MarineImage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RadarError {
    #[error("Radar frame template {0:?} has no {{index}} placeholder")]
    InvalidTemplate(String),

    #[error("None of the {attempted} radar frames could be fetched and decoded")]
    NoFrames { attempted: usize },

    #[error("Failed to encode radar animation")]
    Encode(#[from] image::ImageError),

    #[error("Compositing task failed")]
    TaskJoin(#[from] tokio::task::JoinError),
}

#[derive(Debug, Error)]
pub enum StillImageError {
    #[error("No valid URL for the {image} image")]
    InvalidUrl {
        image: MarineImage,
        #[source]
        source: RadarError,
    },

    #[error("No {image} image available")]
    Unavailable {
        image: MarineImage,
        #[source]
        source: FetchError,
    },
}
