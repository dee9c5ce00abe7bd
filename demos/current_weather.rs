use jersey_weather::{JerseyWeather, JerseyWeatherError};

#[tokio::main]
async fn main() -> Result<(), JerseyWeatherError> {
    env_logger::init();
    let client = JerseyWeather::new().await?;

    let snapshot = client.snapshot();
    if !snapshot.stale_feeds().is_empty() {
        println!("Stale feeds: {:?}", snapshot.stale_feeds());
    }

    if let Some(now) = client.current_conditions() {
        println!("{:#?}", now);
    }

    for day in client.forecast().days(3).call() {
        println!(
            "{:<10} {:<16} {:?}..{:?}°C rain {:?}%",
            day.label.unwrap_or_default(),
            day.condition,
            day.temperature_min,
            day.temperature_max,
            day.precipitation_probability
        );
    }

    if let Some(tides) = client.today_tides() {
        println!("Tides for {}", tides.date.unwrap_or_default());
        for event in tides.events {
            println!("  {:?} {:?} {:?}m", event.time, event.kind, event.height_m);
        }
    }

    Ok(())
}
