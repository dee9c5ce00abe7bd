//! Derived values read by presentation code: the current conditions and the
//! daily forecast list.

use crate::classify::{classify_current, classify_day};
use crate::types::condition::CanonicalCondition;
use crate::types::forecast::{Forecast, RainProbabilities};
use serde::Serialize;

/// Number of future days in the daily forecast unless a caller asks otherwise.
pub const DEFAULT_FORECAST_DAYS: usize = 5;

/// The live conditions, taken from the feed root and today's forecast entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentConditions {
    /// Classified with the day/night correction for the hour it was built at.
    pub condition: CanonicalCondition,
    pub temperature_c: Option<f64>,
    pub temperature_f: Option<f64>,
    pub issue_time: Option<String>,
    pub forecast_date: Option<String>,
    pub summary: Option<String>,
    pub wind_direction: Option<String>,
    /// Omitted when the direction is not a known compass point.
    pub wind_bearing: Option<f64>,
    pub wind_speed_kmh: Option<f64>,
    pub wind_speed_mph: Option<f64>,
    pub wind_speed_knots: Option<f64>,
    pub wind_speed_text: Option<String>,
    pub uv_index: Option<f64>,
    /// Highest of the three period probabilities, missing periods counting as 0.
    pub rain_probability: u8,
    pub rain_probabilities: RainProbabilities,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
}

impl CurrentConditions {
    /// Builds the current conditions for the given local hour (0-23).
    ///
    /// Returns `None` when the forecast has no day list, as there is nothing to
    /// describe today with.
    pub fn from_forecast(forecast: &Forecast, hour: u32) -> Option<Self> {
        let today = forecast.today()?;
        Some(Self {
            condition: classify_current(today, hour),
            temperature_c: forecast.current_temperature(),
            temperature_f: forecast.current_temperature_fahrenheit(),
            issue_time: forecast.issue_time(),
            forecast_date: forecast.forecast_date(),
            summary: today.summary(),
            wind_direction: today.wind_direction(),
            wind_bearing: today.wind_bearing(),
            wind_speed_kmh: today.wind_speed_kmh(),
            wind_speed_mph: today.wind_speed_mph(),
            wind_speed_knots: today.wind_speed_knots(),
            wind_speed_text: today.wind_speed_text(),
            uv_index: today.uv_index(),
            rain_probability: today.max_rain_probability(),
            rain_probabilities: today.rain_probabilities(),
            sunrise: today.sunrise(),
            sunset: today.sunset(),
        })
    }
}

/// One future day of the forecast.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyForecast {
    /// Day label as published.
    pub label: Option<String>,
    pub condition: CanonicalCondition,
    pub temperature_max: Option<f64>,
    pub temperature_min: Option<f64>,
    pub wind_speed_kmh: Option<f64>,
    pub wind_bearing: Option<f64>,
    /// Afternoon rain probability.
    pub precipitation_probability: Option<u8>,
}

/// Builds the forecast for the days after today, at most `days` of them.
pub fn daily_forecast(forecast: &Forecast, days: usize) -> Vec<DailyForecast> {
    forecast
        .days()
        .iter()
        .skip(1)
        .take(days)
        .map(|day| DailyForecast {
            label: day.day_name(),
            condition: classify_day(day),
            temperature_max: day.max_temperature(),
            temperature_min: day.min_temperature(),
            wind_speed_kmh: day.wind_speed_kmh(),
            wind_bearing: day.wind_bearing(),
            precipitation_probability: day.rain_probabilities().afternoon,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn feed() -> Value {
        json!({
            "currentTemprature": "16°C",
            "currentTempratureFahrenheit": "61°F",
            "issuetime": "05:30",
            "forecastDay": [
                {
                    "dayName": "Today",
                    "dayIcon": "a.svg",
                    "windDirection": "NE",
                    "windSpeedKM": "19",
                    "rainProbMorning": "5",
                    "rainProbAfternoon": "20",
                    "summary": "Sunny"
                },
                { "dayName": "Tuesday", "dayIcon": "h.svg", "maxTemp": "17°C", "minTemp": "11°C", "rainProbAfternoon": "70" },
                { "dayName": "Wednesday", "summary": "Sunny, isolated thunderstorms", "windDirection": "calm" },
                { "dayName": "Thursday" },
                { "dayName": "Friday" },
                { "dayName": "Saturday" },
                { "dayName": "Sunday" }
            ]
        })
    }

    #[test]
    fn test_current_conditions_daytime() {
        let forecast = Forecast::from_value(&feed());
        let current = CurrentConditions::from_forecast(&forecast, 12).expect("today present");

        assert_eq!(current.condition, CanonicalCondition::Sunny);
        assert_eq!(current.temperature_c, Some(16.0));
        assert_eq!(current.temperature_f, Some(61.0));
        assert_eq!(current.issue_time.as_deref(), Some("05:30"));
        assert_eq!(current.wind_bearing, Some(45.0));
        assert_eq!(current.wind_speed_kmh, Some(19.0));
        assert_eq!(current.rain_probability, 20);
        assert_eq!(current.rain_probabilities.evening, None);
    }

    #[test]
    fn test_current_conditions_at_night() {
        let forecast = Forecast::from_value(&feed());
        let current = CurrentConditions::from_forecast(&forecast, 23).expect("today present");
        assert_eq!(current.condition, CanonicalCondition::ClearNight);
    }

    #[test]
    fn test_current_conditions_without_days() {
        let forecast = Forecast::from_value(&json!({ "currentTemprature": "16°C" }));
        assert!(CurrentConditions::from_forecast(&forecast, 12).is_none());
    }

    #[test]
    fn test_daily_forecast_skips_today_and_limits() {
        let forecast = Forecast::from_value(&feed());
        let days = daily_forecast(&forecast, DEFAULT_FORECAST_DAYS);

        assert_eq!(days.len(), 5);
        assert_eq!(days[0].label.as_deref(), Some("Tuesday"));
        assert_eq!(days[4].label.as_deref(), Some("Saturday"));

        assert_eq!(days[0].condition, CanonicalCondition::Rainy);
        assert_eq!(days[0].temperature_max, Some(17.0));
        assert_eq!(days[0].temperature_min, Some(11.0));
        assert_eq!(days[0].precipitation_probability, Some(70));

        assert_eq!(days[1].condition, CanonicalCondition::LightningRainy);
        assert_eq!(days[1].wind_bearing, None);

        assert_eq!(days[2].condition, CanonicalCondition::Sunny);
        assert_eq!(days[2].temperature_max, None);

        assert_eq!(daily_forecast(&forecast, 2).len(), 2);
        assert!(daily_forecast(&Forecast::default(), 5).is_empty());
    }

    #[test]
    fn test_serializes_condition_codes() {
        let forecast = Forecast::from_value(&feed());
        let days = daily_forecast(&forecast, 2);
        let encoded = serde_json::to_value(&days).expect("serializable");
        assert_eq!(encoded[1]["condition"], json!("lightning-rainy"));
    }
}
