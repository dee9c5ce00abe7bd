//! Conversion of loosely typed feed values into numbers and strings.
//!
//! The upstream feeds mix JSON numbers with unit-suffixed strings (`"18.2°C"`,
//! `"12"`, `"45%"`), leave keys out freely and spell some of them two ways.
//! Every function in this module is total: whatever shape the input has, the
//! result is either a value or the documented default for that field.

use serde_json::{Map, Value};

/// The raw key/value object of a single feed record (a forecast day, a tide event, ...).
pub type RawFields = Map<String, Value>;

/// The 16 compass points in clockwise order starting at north.
const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

const COMPASS_STEP_DEGREES: f64 = 22.5;

/// Parses the leading numeral of a unit-suffixed string.
///
/// Surrounding whitespace is ignored and everything after the numeric prefix is
/// treated as the unit and dropped.
///
/// # Examples
///
/// ```
/// use jersey_weather::normalize::parse_unit_number;
///
/// assert_eq!(parse_unit_number("18.2°C"), Some(18.2));
/// assert_eq!(parse_unit_number(" -3°C "), Some(-3.0));
/// assert_eq!(parse_unit_number("64°F"), Some(64.0));
/// assert_eq!(parse_unit_number(""), None);
/// assert_eq!(parse_unit_number("n/a"), None);
/// ```
pub fn parse_unit_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let end = trimmed
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || (i == 0 && (c == '-' || c == '+'))))
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());
    trimmed[..end]
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Reads a JSON value as a number, accepting both JSON numbers and unit-suffixed strings.
pub fn parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(raw) => parse_unit_number(raw),
        _ => None,
    }
}

/// `null` and blank strings count as missing.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(raw) => !raw.trim().is_empty(),
        _ => true,
    }
}

/// Returns the value stored under `name` if it is present and non-empty.
pub fn field<'a>(fields: &'a RawFields, name: &str) -> Option<&'a Value> {
    fields.get(name).filter(|value| is_present(value))
}

/// Returns the first present, non-empty value among `names`, tried in order.
pub fn first_present<'a>(fields: &'a RawFields, names: &[&str]) -> Option<&'a Value> {
    names.iter().find_map(|name| field(fields, name))
}

/// Evaluates `accessors` in order and returns the first value one of them produces.
///
/// This is the general form of [`first_present`] for fields whose candidates are
/// not plain key lookups (e.g. a value that has to be derived from two keys).
pub fn resolve<T>(fields: &RawFields, accessors: &[fn(&RawFields) -> Option<T>]) -> Option<T> {
    accessors.iter().find_map(|accessor| accessor(fields))
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(raw) => Some(raw.trim().to_string()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

/// Reads a display string. Numbers are rendered as text; objects and arrays yield `None`.
pub fn text(fields: &RawFields, name: &str) -> Option<String> {
    field(fields, name).and_then(value_text)
}

/// Like [`text`], trying each candidate key in order.
pub fn first_text(fields: &RawFields, names: &[&str]) -> Option<String> {
    first_present(fields, names).and_then(value_text)
}

/// Reads a display number: missing, empty or unparseable input yields `None`.
pub fn optional_number(fields: &RawFields, name: &str) -> Option<f64> {
    field(fields, name).and_then(parse_number)
}

/// Reads the first present candidate as a number; `None` if absent or unparseable.
pub fn first_number(fields: &RawFields, names: &[&str]) -> Option<f64> {
    first_present(fields, names).and_then(parse_number)
}

/// Reads a number that feeds an aggregate: missing or unparseable input counts as `0`.
pub fn number_or_zero(fields: &RawFields, name: &str) -> f64 {
    optional_number(fields, name).unwrap_or(0.0)
}

/// Reads a percentage, clamped to `0..=100`. Missing or unparseable input counts as `0`.
pub fn percent_or_zero(fields: &RawFields, name: &str) -> u8 {
    number_or_zero(fields, name).round().clamp(0.0, 100.0) as u8
}

/// Reads an optional percentage, clamped to `0..=100`.
pub fn optional_percent(fields: &RawFields, name: &str) -> Option<u8> {
    optional_number(fields, name).map(|value| value.round().clamp(0.0, 100.0) as u8)
}

/// Maps a 16-point compass abbreviation (`"N"`, `"NNE"`, ... `"NNW"`) to a bearing in degrees.
///
/// Matching ignores case and surrounding whitespace. Anything else yields `None`.
///
/// # Examples
///
/// ```
/// use jersey_weather::normalize::compass_bearing;
///
/// assert_eq!(compass_bearing("N"), Some(0.0));
/// assert_eq!(compass_bearing("sw"), Some(225.0));
/// assert_eq!(compass_bearing("Variable"), None);
/// ```
pub fn compass_bearing(direction: &str) -> Option<f64> {
    let direction = direction.trim();
    COMPASS_POINTS
        .iter()
        .position(|point| point.eq_ignore_ascii_case(direction))
        .map(|index| index as f64 * COMPASS_STEP_DEGREES)
}
