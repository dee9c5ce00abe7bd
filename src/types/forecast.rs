//! Typed views over the forecast feed.
//!
//! The forecast feed is a single JSON object carrying the current temperature, a
//! few issue timestamps and a chronologically ordered `forecastDay` list whose
//! first element is always today. Neither level has a reliable schema, so both
//! types keep the raw fields and expose normalized accessors instead of relying
//! on a strict `Deserialize` impl.

use crate::normalize::{
    compass_bearing, first_number, first_text, optional_number, optional_percent,
    percent_or_zero, text, RawFields,
};
use serde::Serialize;
use serde_json::Value;

const DAY_NAME_FIELDS: &[&str] = &["dayName", "day", "date"];
const TOOLTIP_FIELDS: &[&str] = &["dayToolTip", "iconToolTip", "toolTip", "tooltip"];
const WIND_SPEED_KMH_FIELDS: &[&str] = &[
    "windSpeedKM",
    "windSpeedKmMorning",
    "windSpeedKmAfternoon",
    "windSpeedKmEvening",
];
const WIND_FORCE_FIELDS: &[&str] = &["windForce", "beaufort", "windSpeedForce"];
const MORNING_DESCRIPTION_FIELDS: &[&str] = &["morningDescripiton", "morningDescription"];
const AFTERNOON_DESCRIPTION_FIELDS: &[&str] = &["afternoonDescripiton", "afternoonDescription"];
const NIGHT_DESCRIPTION_FIELDS: &[&str] = &["nightDescripiton", "nightDescription"];
const MORNING_TEMP_FIELDS: &[&str] = &["morningTemp", "tempMorning"];
const AFTERNOON_TEMP_FIELDS: &[&str] = &["afternoonTemp", "tempAfternoon"];
const NIGHT_TEMP_FIELDS: &[&str] = &["nightTemp", "tempNight"];

fn object_fields(value: &Value) -> RawFields {
    match value {
        Value::Object(map) => map.clone(),
        _ => RawFields::new(),
    }
}

/// Part of the day a forecast value refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayPeriod {
    Morning,
    Afternoon,
    /// Reported as "evening" for rain probabilities and "night" for descriptions.
    Night,
}

/// Rain probability per period, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RainProbabilities {
    pub morning: Option<u8>,
    pub afternoon: Option<u8>,
    pub evening: Option<u8>,
}

/// The decoded forecast feed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forecast {
    fields: RawFields,
    days: Vec<ForecastDay>,
}

impl Forecast {
    /// Builds a forecast from the raw feed payload. Never fails: a payload of the
    /// wrong shape simply yields a forecast with no values and no days.
    pub fn from_value(value: &Value) -> Self {
        let fields = object_fields(value);
        let days = match fields.get("forecastDay") {
            Some(Value::Array(days)) => days.iter().map(ForecastDay::from_value).collect(),
            _ => Vec::new(),
        };
        Self { fields, days }
    }

    /// The day list, index 0 being today.
    pub fn days(&self) -> &[ForecastDay] {
        &self.days
    }

    pub fn today(&self) -> Option<&ForecastDay> {
        self.days.first()
    }

    /// Current temperature in °C (the feed spells the key `currentTemprature`).
    pub fn current_temperature(&self) -> Option<f64> {
        optional_number(&self.fields, "currentTemprature")
            .or_else(|| optional_number(&self.fields, "currentTemperature"))
    }

    /// Current temperature in °F.
    pub fn current_temperature_fahrenheit(&self) -> Option<f64> {
        optional_number(&self.fields, "currentTempratureFahrenheit")
            .or_else(|| optional_number(&self.fields, "currentTemperatureFahrenheit"))
    }

    pub fn issue_time(&self) -> Option<String> {
        first_text(&self.fields, &["issuetime", "issueTime"])
    }

    pub fn forecast_date(&self) -> Option<String> {
        text(&self.fields, "forecastDate")
    }

    pub fn cache_time(&self) -> Option<String> {
        text(&self.fields, "cacheTime")
    }

    /// The raw fields of the feed root.
    pub fn fields(&self) -> &RawFields {
        &self.fields
    }
}

/// One element of the forecast feed's day list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastDay {
    fields: RawFields,
}

impl ForecastDay {
    pub fn from_value(value: &Value) -> Self {
        Self {
            fields: object_fields(value),
        }
    }

    pub fn from_fields(fields: RawFields) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &RawFields {
        &self.fields
    }

    /// Day label as published (e.g. `"Monday"`).
    pub fn day_name(&self) -> Option<String> {
        first_text(&self.fields, DAY_NAME_FIELDS)
    }

    pub fn min_temperature(&self) -> Option<f64> {
        optional_number(&self.fields, "minTemp")
    }

    pub fn max_temperature(&self) -> Option<f64> {
        optional_number(&self.fields, "maxTemp")
    }

    pub fn period_temperature(&self, period: DayPeriod) -> Option<f64> {
        let names = match period {
            DayPeriod::Morning => MORNING_TEMP_FIELDS,
            DayPeriod::Afternoon => AFTERNOON_TEMP_FIELDS,
            DayPeriod::Night => NIGHT_TEMP_FIELDS,
        };
        first_number(&self.fields, names)
    }

    /// Compass abbreviation of the wind direction, e.g. `"SW"`.
    pub fn wind_direction(&self) -> Option<String> {
        text(&self.fields, "windDirection")
    }

    /// Wind direction as a bearing in degrees; `None` for unknown directions.
    pub fn wind_bearing(&self) -> Option<f64> {
        self.wind_direction()
            .and_then(|direction| compass_bearing(&direction))
    }

    /// Wind speed in km/h, trying the daily value first and then each period.
    pub fn wind_speed_kmh(&self) -> Option<f64> {
        first_number(&self.fields, WIND_SPEED_KMH_FIELDS)
    }

    pub fn wind_speed_mph(&self) -> Option<f64> {
        optional_number(&self.fields, "windSpeedMPH")
    }

    pub fn wind_speed_knots(&self) -> Option<f64> {
        optional_number(&self.fields, "windSpeedKnots")
    }

    /// Free-text wind speed, e.g. `"Force 4"`.
    pub fn wind_speed_text(&self) -> Option<String> {
        text(&self.fields, "windSpeed")
    }

    /// Beaufort force.
    pub fn wind_force(&self) -> Option<f64> {
        first_number(&self.fields, WIND_FORCE_FIELDS)
    }

    pub fn uv_index(&self) -> Option<f64> {
        optional_number(&self.fields, "uvIndex")
    }

    pub fn rain_probabilities(&self) -> RainProbabilities {
        RainProbabilities {
            morning: optional_percent(&self.fields, "rainProbMorning"),
            afternoon: optional_percent(&self.fields, "rainProbAfternoon"),
            evening: optional_percent(&self.fields, "rainProbEvening"),
        }
    }

    /// Highest rain probability of the day. Missing periods count as `0`.
    pub fn max_rain_probability(&self) -> u8 {
        ["rainProbMorning", "rainProbAfternoon", "rainProbEvening"]
            .into_iter()
            .map(|name| percent_or_zero(&self.fields, name))
            .max()
            .unwrap_or(0)
    }

    pub fn summary(&self) -> Option<String> {
        text(&self.fields, "summary")
    }

    pub fn description(&self, period: DayPeriod) -> Option<String> {
        let names = match period {
            DayPeriod::Morning => MORNING_DESCRIPTION_FIELDS,
            DayPeriod::Afternoon => AFTERNOON_DESCRIPTION_FIELDS,
            DayPeriod::Night => NIGHT_DESCRIPTION_FIELDS,
        };
        first_text(&self.fields, names)
    }

    /// Summary followed by the morning, afternoon and night descriptions, skipping missing ones.
    pub fn descriptions(&self) -> Vec<String> {
        std::iter::once(self.summary())
            .chain(
                [DayPeriod::Morning, DayPeriod::Afternoon, DayPeriod::Night]
                    .into_iter()
                    .map(|period| self.description(period)),
            )
            .flatten()
            .collect()
    }

    /// Icon file name, e.g. `"h.svg"`.
    pub fn icon(&self) -> Option<String> {
        text(&self.fields, "dayIcon")
    }

    pub fn tooltip(&self) -> Option<String> {
        first_text(&self.fields, TOOLTIP_FIELDS)
    }

    pub fn sunrise(&self) -> Option<String> {
        text(&self.fields, "sunRise")
    }

    pub fn sunset(&self) -> Option<String> {
        text(&self.fields, "sunSet")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_feed() -> Value {
        json!({
            "currentTemprature": "18.2°C",
            "currentTempratureFahrenheit": "64.8°F",
            "issuetime": "06:00",
            "forecastDate": "Monday 14 July",
            "forecastDay": [
                {
                    "dayName": "Today",
                    "minTemp": "12°C",
                    "maxTemp": "19°C",
                    "windDirection": "SW",
                    "windSpeedKM": "24",
                    "windSpeedMPH": 15,
                    "windSpeed": "Force 4",
                    "uvIndex": "5",
                    "rainProbMorning": "10",
                    "rainProbAfternoon": 40,
                    "rainProbEvening": "",
                    "summary": "Sunny spells, showers later",
                    "morningDescripiton": "Bright start",
                    "afternoonDescription": "Scattered showers",
                    "dayIcon": "d.svg",
                    "sunRise": "05:20",
                    "sunSet": "21:15"
                },
                { "dayName": "Tuesday", "maxTemp": "" },
                "not an object"
            ]
        })
    }

    #[test]
    fn test_forecast_root_fields() {
        let forecast = Forecast::from_value(&sample_feed());
        assert_eq!(forecast.current_temperature(), Some(18.2));
        assert_eq!(forecast.current_temperature_fahrenheit(), Some(64.8));
        assert_eq!(forecast.issue_time().as_deref(), Some("06:00"));
        assert_eq!(forecast.forecast_date().as_deref(), Some("Monday 14 July"));
        assert_eq!(forecast.cache_time(), None);
        assert_eq!(forecast.days().len(), 3);
        assert_eq!(forecast.today().and_then(|d| d.day_name()).as_deref(), Some("Today"));
    }

    #[test]
    fn test_forecast_of_wrong_shape_is_empty() {
        let forecast = Forecast::from_value(&json!([1, 2, 3]));
        assert!(forecast.days().is_empty());
        assert_eq!(forecast.current_temperature(), None);

        let no_days = Forecast::from_value(&json!({ "forecastDay": "soon" }));
        assert!(no_days.today().is_none());
    }

    #[test]
    fn test_day_accessors() {
        let forecast = Forecast::from_value(&sample_feed());
        let today = forecast.today().expect("today");

        assert_eq!(today.min_temperature(), Some(12.0));
        assert_eq!(today.max_temperature(), Some(19.0));
        assert_eq!(today.wind_direction().as_deref(), Some("SW"));
        assert_eq!(today.wind_bearing(), Some(225.0));
        assert_eq!(today.wind_speed_kmh(), Some(24.0));
        assert_eq!(today.wind_speed_mph(), Some(15.0));
        assert_eq!(today.wind_speed_knots(), None);
        assert_eq!(today.wind_speed_text().as_deref(), Some("Force 4"));
        assert_eq!(today.uv_index(), Some(5.0));
        assert_eq!(today.icon().as_deref(), Some("d.svg"));
        assert_eq!(today.sunrise().as_deref(), Some("05:20"));
        assert_eq!(today.sunset().as_deref(), Some("21:15"));
    }

    #[test]
    fn test_rain_probabilities() {
        let forecast = Forecast::from_value(&sample_feed());
        let today = forecast.today().expect("today");
        assert_eq!(
            today.rain_probabilities(),
            RainProbabilities {
                morning: Some(10),
                afternoon: Some(40),
                evening: None,
            }
        );
        assert_eq!(today.max_rain_probability(), 40);
        assert_eq!(ForecastDay::default().max_rain_probability(), 0);
    }

    #[test]
    fn test_descriptions_accept_both_spellings() {
        let forecast = Forecast::from_value(&sample_feed());
        let today = forecast.today().expect("today");
        assert_eq!(
            today.descriptions(),
            vec![
                "Sunny spells, showers later".to_string(),
                "Bright start".to_string(),
                "Scattered showers".to_string(),
            ]
        );
        assert_eq!(today.description(DayPeriod::Night), None);
    }

    #[test]
    fn test_missing_keys_degrade_to_none() {
        let forecast = Forecast::from_value(&sample_feed());
        let tuesday = &forecast.days()[1];
        assert_eq!(tuesday.max_temperature(), None);
        assert_eq!(tuesday.wind_bearing(), None);
        assert_eq!(tuesday.period_temperature(DayPeriod::Morning), None);
        assert!(tuesday.descriptions().is_empty());

        let junk = &forecast.days()[2];
        assert_eq!(junk.day_name(), None);
        assert!(junk.fields().is_empty());
    }
}
