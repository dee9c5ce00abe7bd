use jersey_weather::{Config, JerseyWeatherError, RadarCompositor};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let output = env::args().nth(1).unwrap_or_else(|| "radar.gif".to_string());

    let config = Config::default();
    let client = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()
        .map_err(JerseyWeatherError::HttpClient)?;
    let compositor = RadarCompositor::new(client, &config);

    let animation = compositor.composite().await?;
    tokio::fs::write(&output, &animation.gif).await?;
    println!(
        "Wrote {} ({} frames: {:?})",
        output,
        animation.frame_count(),
        animation.frame_indices
    );

    Ok(())
}
