use crate::config::Config;
use crate::feeds::fetch::{deadline_after, fetch_before, HttpFetch};
use crate::radar::error::RadarError;
use futures_util::future::join_all;
use image::codecs::gif::{GifEncoder, Repeat};
use image::imageops::FilterType;
use image::{Delay, Frame, RgbaImage};
use log::{error, info, warn};
use std::time::Duration;

/// Number of frames in the published radar sequence.
pub const RADAR_FRAME_COUNT: usize = 10;

/// Display time of each frame in the animation.
pub const FRAME_DELAY: Duration = Duration::from_millis(500);

const INDEX_PLACEHOLDER: &str = "{index}";

/// Builds the URL of frame `index` (one-based), substituting its two-digit number
/// for `{index}`.
pub fn frame_url(template: &str, index: usize) -> Result<String, RadarError> {
    if !template.contains(INDEX_PLACEHOLDER) {
        return Err(RadarError::InvalidTemplate(template.to_string()));
    }
    Ok(template.replace(INDEX_PLACEHOLDER, &format!("{index:02}")))
}

/// Builds the URLs of frames `1..=count`, substituting the two-digit frame number
/// for `{index}`.
///
/// ```
/// use jersey_weather::radar::frame_urls;
///
/// let urls = frame_urls("https://example.com/Radar{index}.JPG", 3).unwrap();
/// assert_eq!(urls[0], "https://example.com/Radar01.JPG");
/// assert_eq!(urls[2], "https://example.com/Radar03.JPG");
/// ```
pub fn frame_urls(template: &str, count: usize) -> Result<Vec<String>, RadarError> {
    (1..=count).map(|index| frame_url(template, index)).collect()
}

/// A looping GIF assembled from the frames that could be retrieved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadarAnimation {
    /// The encoded GIF.
    pub gif: Vec<u8>,
    /// One-based indices of the frames it contains, ascending.
    pub frame_indices: Vec<usize>,
}

impl RadarAnimation {
    pub fn frame_count(&self) -> usize {
        self.frame_indices.len()
    }
}

/// Turns the radar frame sequence into an animation, one request at a time.
///
/// Each call fetches all frames again; nothing is cached between calls.
pub struct RadarCompositor<F = reqwest::Client> {
    fetcher: F,
    template: String,
    request_timeout: Duration,
}

impl<F: HttpFetch> RadarCompositor<F> {
    pub fn new(fetcher: F, config: &Config) -> Self {
        Self {
            fetcher,
            template: config.endpoints.radar_frame_template.clone(),
            request_timeout: config.request_timeout,
        }
    }

    /// Fetches every frame concurrently and encodes the ones that decode into a GIF.
    ///
    /// Frames keep their sequence order regardless of which fetch finished first.
    /// A frame that fails to fetch, misses the request deadline or fails to decode
    /// is left out.
    ///
    /// # Errors
    ///
    /// * [`RadarError::InvalidTemplate`] if the frame template has no `{index}`.
    /// * [`RadarError::NoFrames`] if not a single frame could be used.
    pub async fn composite(&self) -> Result<RadarAnimation, RadarError> {
        let urls = frame_urls(&self.template, RADAR_FRAME_COUNT)?;
        let deadline = deadline_after(self.request_timeout);

        let results = join_all(urls.iter().map(|url| {
            fetch_before(&self.fetcher, url, deadline, self.request_timeout)
        }))
        .await;

        let fetched: Vec<(usize, Vec<u8>)> = results
            .into_iter()
            .enumerate()
            .filter_map(|(position, result)| match result {
                Ok(bytes) => Some((position + 1, bytes)),
                Err(e) => {
                    warn!("Radar frame {} unavailable: {}", position + 1, e);
                    None
                }
            })
            .collect();

        let animation = tokio::task::spawn_blocking(move || assemble(fetched)).await??;
        info!(
            "Composited radar animation from {} frames ({} bytes)",
            animation.frame_count(),
            animation.gif.len()
        );
        Ok(animation)
    }
}

/// Decodes the fetched frames and encodes them, in the given order, as a looping GIF.
///
/// The first decoded frame fixes the canvas size; later frames of another size are
/// scaled to it.
fn assemble(fetched: Vec<(usize, Vec<u8>)>) -> Result<RadarAnimation, RadarError> {
    let mut frame_indices = Vec::with_capacity(fetched.len());
    let mut frames: Vec<RgbaImage> = Vec::with_capacity(fetched.len());
    for (index, bytes) in fetched {
        match image::load_from_memory(&bytes) {
            Ok(decoded) => {
                frame_indices.push(index);
                frames.push(decoded.to_rgba8());
            }
            Err(e) => warn!("Radar frame {} could not be decoded: {}", index, e),
        }
    }

    let Some((width, height)) = frames.first().map(|base| base.dimensions()) else {
        error!("No radar frames available");
        return Err(RadarError::NoFrames {
            attempted: RADAR_FRAME_COUNT,
        });
    };

    let delay = Delay::from_saturating_duration(FRAME_DELAY);
    let mut gif = Vec::new();
    {
        let mut encoder = GifEncoder::new_with_speed(&mut gif, 10);
        encoder.set_repeat(Repeat::Infinite)?;
        encoder.encode_frames(frames.into_iter().map(|buffer| {
            let buffer = if buffer.dimensions() == (width, height) {
                buffer
            } else {
                image::imageops::resize(&buffer, width, height, FilterType::Triangle)
            };
            Frame::from_parts(buffer, 0, 0, delay)
        }))?;
    }

    Ok(RadarAnimation { gif, frame_indices })
}
