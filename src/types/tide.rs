//! Tide feed model: a list of days, each with a formatted date and its tide events.

use crate::normalize::{first_number, text, RawFields};
use serde::Serialize;
use serde_json::Value;

/// Whether a tide event is a high or a low water.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TideKind {
    High,
    Low,
}

impl TideKind {
    /// Parses the feed's `highLow` flag (`"High"`, `"low"`, `"HW"`, ...).
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim().to_ascii_lowercase();
        if raw.starts_with('h') {
            Some(TideKind::High)
        } else if raw.starts_with('l') {
            Some(TideKind::Low)
        } else {
            None
        }
    }
}

/// One high or low water.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TideEvent {
    /// Local time as published, e.g. `"06:42"`.
    pub time: Option<String>,
    pub kind: Option<TideKind>,
    pub height_m: Option<f64>,
    pub height_ft: Option<f64>,
}

/// The tide events of one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TideDay {
    /// Date as formatted by the feed.
    pub date: Option<String>,
    pub events: Vec<TideEvent>,
}

impl TideEvent {
    fn from_fields(fields: &RawFields) -> Self {
        Self {
            time: text(fields, "Time"),
            kind: text(fields, "highLow").and_then(|raw| TideKind::parse(&raw)),
            height_m: first_number(fields, &["Height", "HeightInMetres"]),
            height_ft: first_number(fields, &["HeightinFeet", "HeightInFeet"]),
        }
    }
}

impl TideDay {
    fn from_fields(fields: &RawFields) -> Self {
        let events = match fields.get("TideTimes") {
            Some(Value::Array(events)) => events
                .iter()
                .filter_map(Value::as_object)
                .map(TideEvent::from_fields)
                .collect(),
            _ => Vec::new(),
        };
        Self {
            date: text(fields, "formattedDate"),
            events,
        }
    }
}

/// Parses the tide feed payload. Entries that are not objects are skipped; a
/// payload that is not an array yields no days.
pub fn parse_tide_days(value: &Value) -> Vec<TideDay> {
    match value {
        Value::Array(days) => days
            .iter()
            .filter_map(Value::as_object)
            .map(TideDay::from_fields)
            .collect(),
        _ => Vec::new(),
    }
}
