use crate::classify::tables::{ICON_CONDITIONS, KEYWORD_CONDITIONS, TOOLTIP_CONDITIONS};
use crate::types::condition::CanonicalCondition;
use crate::types::forecast::ForecastDay;

/// First hour (inclusive) of the daytime window.
pub const DAY_START_HOUR: u32 = 6;
/// First hour (inclusive) of the night window.
pub const NIGHT_START_HOUR: u32 = 20;

/// The three raw signals a forecast day carries about its weather.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConditionSignals {
    pub icon: Option<String>,
    pub tooltip: Option<String>,
    /// Summary and per-period descriptions, in that order.
    pub descriptions: Vec<String>,
}

impl ConditionSignals {
    pub fn from_day(day: &ForecastDay) -> Self {
        Self {
            icon: day.icon(),
            tooltip: day.tooltip(),
            descriptions: day.descriptions(),
        }
    }

    /// All descriptions joined into one lowercase string.
    fn description_text(&self) -> String {
        self.descriptions.join(" ").to_lowercase()
    }
}

/// One stage of the classification chain.
type Tier = fn(&ConditionSignals) -> Option<CanonicalCondition>;

/// Chain for the live slice: the first keyword (longest first) wins.
const CURRENT_TIERS: [Tier; 3] = [by_icon, by_tooltip, by_first_keyword];

/// Chain for forecast days: every keyword hit counts and the most severe wins.
const DAY_TIERS: [Tier; 3] = [by_icon, by_tooltip, by_most_severe_keyword];

fn by_icon(signals: &ConditionSignals) -> Option<CanonicalCondition> {
    signals.icon.as_deref().and_then(icon_condition)
}

fn by_tooltip(signals: &ConditionSignals) -> Option<CanonicalCondition> {
    signals.tooltip.as_deref().and_then(tooltip_condition)
}

fn by_first_keyword(signals: &ConditionSignals) -> Option<CanonicalCondition> {
    keyword_condition(&signals.description_text())
}

fn by_most_severe_keyword(signals: &ConditionSignals) -> Option<CanonicalCondition> {
    most_severe(keyword_hits(&signals.description_text()))
}

fn run_chain(tiers: &[Tier], signals: &ConditionSignals) -> Option<CanonicalCondition> {
    tiers.iter().find_map(|tier| tier(signals))
}

/// Looks an icon file name up in the icon table.
pub fn icon_condition(icon: &str) -> Option<CanonicalCondition> {
    let icon = icon.trim();
    ICON_CONDITIONS
        .iter()
        .find(|(known, _)| *known == icon)
        .map(|(_, condition)| *condition)
}

/// Looks a tooltip phrase up in the tooltip table.
pub fn tooltip_condition(tooltip: &str) -> Option<CanonicalCondition> {
    let tooltip = tooltip.trim();
    TOOLTIP_CONDITIONS
        .iter()
        .find(|(known, _)| *known == tooltip)
        .map(|(_, condition)| *condition)
}

/// Returns the condition of the first keyword found in `text`, longest keywords first.
pub fn keyword_condition(text: &str) -> Option<CanonicalCondition> {
    let text = text.to_lowercase();
    KEYWORD_CONDITIONS
        .iter()
        .find(|(keyword, _)| text.contains(keyword))
        .map(|(_, condition)| *condition)
}

/// Returns the condition of every keyword found in `text`, in keyword-table order.
pub fn keyword_hits(text: &str) -> Vec<CanonicalCondition> {
    let text = text.to_lowercase();
    KEYWORD_CONDITIONS
        .iter()
        .filter(|(keyword, _)| text.contains(keyword))
        .map(|(_, condition)| *condition)
        .collect()
}

/// Picks the highest-severity candidate. On equal severity the earlier candidate wins.
pub fn most_severe(
    candidates: impl IntoIterator<Item = CanonicalCondition>,
) -> Option<CanonicalCondition> {
    candidates.into_iter().reduce(|best, candidate| {
        if candidate.severity() > best.severity() {
            candidate
        } else {
            best
        }
    })
}

/// Whether a local hour falls in the night window (before 06:00 or from 20:00).
pub fn is_night(hour: u32) -> bool {
    !(DAY_START_HOUR..NIGHT_START_HOUR).contains(&hour)
}

/// The condition used when no signal resolves: clear night at night, sunny otherwise.
pub fn time_of_day_default(hour: u32) -> CanonicalCondition {
    if is_night(hour) {
        CanonicalCondition::ClearNight
    } else {
        CanonicalCondition::Sunny
    }
}

/// Turns `Sunny` into `ClearNight` during the night window. Other conditions pass through.
pub fn adjust_for_night(condition: CanonicalCondition, hour: u32) -> CanonicalCondition {
    match condition {
        CanonicalCondition::Sunny if is_night(hour) => CanonicalCondition::ClearNight,
        other => other,
    }
}

/// Classifies raw signals for the live slice at the given local hour.
pub fn classify_current_signals(signals: &ConditionSignals, hour: u32) -> CanonicalCondition {
    match run_chain(&CURRENT_TIERS, signals) {
        Some(condition) => adjust_for_night(condition, hour),
        None => time_of_day_default(hour),
    }
}

/// Classifies raw signals for a forecast day. Falls back to `Sunny`.
pub fn classify_day_signals(signals: &ConditionSignals) -> CanonicalCondition {
    run_chain(&DAY_TIERS, signals).unwrap_or(CanonicalCondition::Sunny)
}

/// Resolves the current condition from today's forecast and the current local hour.
///
/// Tries the icon table, then the tooltip table, then the first matching keyword
/// in the concatenated descriptions. A resolved `Sunny` becomes `ClearNight` at
/// night; if nothing resolves, the time-of-day default applies.
///
/// # Examples
///
/// ```
/// use jersey_weather::classify::classify_current;
/// use jersey_weather::{CanonicalCondition, ForecastDay};
/// use serde_json::json;
///
/// let today = ForecastDay::from_value(&json!({ "summary": "Sunny and warm" }));
/// assert_eq!(classify_current(&today, 13), CanonicalCondition::Sunny);
/// assert_eq!(classify_current(&today, 22), CanonicalCondition::ClearNight);
/// ```
pub fn classify_current(day: &ForecastDay, hour: u32) -> CanonicalCondition {
    classify_current_signals(&ConditionSignals::from_day(day), hour)
}

/// Resolves one representative condition for a forecast day.
///
/// Icon and tooltip are tried first. Otherwise every keyword in the summary and
/// period descriptions is a candidate and the most severe one is chosen, so a day
/// mentioning both sunshine and thunder is reported by the thunder. No day/night
/// correction is applied.
pub fn classify_day(day: &ForecastDay) -> CanonicalCondition {
    classify_day_signals(&ConditionSignals::from_day(day))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::condition::CanonicalCondition::*;
    use serde_json::json;

    fn signals(icon: Option<&str>, tooltip: Option<&str>, descriptions: &[&str]) -> ConditionSignals {
        ConditionSignals {
            icon: icon.map(String::from),
            tooltip: tooltip.map(String::from),
            descriptions: descriptions.iter().map(|d| d.to_string()).collect(),
        }
    }

    #[test]
    fn test_icon_table() {
        let cases = [
            ("a.svg", Sunny),
            ("c.svg", ClearNight),
            ("g.svg", Fog),
            ("i.svg", Pouring),
            ("j.svg", LightningRainy),
            ("l.svg", SnowyRainy),
        ];
        for (icon, expected) in cases {
            assert_eq!(icon_condition(icon), Some(expected), "icon {icon}");
        }
        assert_eq!(icon_condition("z.svg"), None);
        assert_eq!(icon_condition(""), None);
    }

    #[test]
    fn test_tooltip_table_is_exact() {
        assert_eq!(tooltip_condition("Sunny periods"), Some(PartlyCloudy));
        assert_eq!(tooltip_condition(" Heavy rain "), Some(Pouring));
        assert_eq!(tooltip_condition("Thunder"), Some(Lightning));
        assert_eq!(tooltip_condition("heavy rain"), None);
        assert_eq!(tooltip_condition("Rain later"), None);
    }

    #[test]
    fn test_keyword_prefers_longer_keywords() {
        assert_eq!(keyword_condition("Risk of lightning"), Some(Lightning));
        assert_eq!(keyword_condition("Thunderstorms"), Some(LightningRainy));
        assert_eq!(keyword_condition("Sunny, thunder later"), Some(LightningRainy));
        assert_eq!(keyword_condition("Overcast, some drizzle"), Some(Cloudy));
        assert_eq!(keyword_condition("Snow showers"), Some(Rainy));
        assert_eq!(keyword_condition("nothing to report"), None);
    }

    #[test]
    fn test_most_severe() {
        assert_eq!(most_severe([Sunny, LightningRainy, Rainy]), Some(LightningRainy));
        assert_eq!(most_severe([Hail, Snowy]), Some(Snowy));
        assert_eq!(most_severe([ClearNight, Sunny]), Some(ClearNight));
        assert_eq!(most_severe([]), None);
        assert_eq!(most_severe(keyword_hits("sunny then thunder")), Some(LightningRainy));
    }

    #[test]
    fn test_night_window() {
        for hour in [0, 3, 5, 20, 22, 23] {
            assert!(is_night(hour), "hour {hour}");
        }
        for hour in [6, 12, 13, 19] {
            assert!(!is_night(hour), "hour {hour}");
        }
    }

    #[test]
    fn test_chain_order() {
        // Icon beats tooltip beats keywords.
        let all = signals(Some("e.svg"), Some("Sunny"), &["Heavy thunder"]);
        assert_eq!(classify_current_signals(&all, 12), Cloudy);

        let no_icon = signals(Some("unknown.svg"), Some("Mist"), &["Heavy thunder"]);
        assert_eq!(classify_current_signals(&no_icon, 12), Fog);

        let keywords_only = signals(None, Some("Something new"), &["Light showers"]);
        assert_eq!(classify_current_signals(&keywords_only, 12), Rainy);
    }

    #[test]
    fn test_current_day_night_override() {
        let sunny = signals(Some("a.svg"), None, &[]);
        assert_eq!(classify_current_signals(&sunny, 13), Sunny);
        assert_eq!(classify_current_signals(&sunny, 22), ClearNight);
        assert_eq!(classify_current_signals(&sunny, 5), ClearNight);

        let cloudy = signals(Some("e.svg"), None, &[]);
        assert_eq!(classify_current_signals(&cloudy, 22), Cloudy);
    }

    #[test]
    fn test_current_fallback_by_hour() {
        let empty = ConditionSignals::default();
        assert_eq!(classify_current_signals(&empty, 13), Sunny);
        assert_eq!(classify_current_signals(&empty, 20), ClearNight);
        assert_eq!(classify_current_signals(&empty, 2), ClearNight);
        assert_eq!(classify_current_signals(&empty, 6), Sunny);
    }

    #[test]
    fn test_day_uses_severity_tie_break() {
        let mixed = signals(None, None, &["Sunny morning", "Cloudy", "Thunder overnight"]);
        assert_eq!(classify_day_signals(&mixed), LightningRainy);

        let snow_and_hail = signals(None, None, &["Hail", "Snow later"]);
        assert_eq!(classify_day_signals(&snow_and_hail), Snowy);

        assert_eq!(classify_day_signals(&ConditionSignals::default()), Sunny);
    }

    #[test]
    fn test_day_keeps_sunny_regardless_of_hour() {
        let sunny = signals(Some("a.svg"), None, &[]);
        assert_eq!(classify_day_signals(&sunny), Sunny);
    }

    #[test]
    fn test_classify_from_forecast_day() {
        let day = ForecastDay::from_value(&json!({
            "dayIcon": "",
            "dayToolTip": "Unlisted phrase",
            "summary": "Bright but breezy",
            "morningDescripiton": "Sunny spells",
            "nightDescripiton": "Thunderstorms possible",
        }));
        assert_eq!(classify_current(&day, 14), LightningRainy);
        assert_eq!(classify_day(&day), LightningRainy);

        assert_eq!(classify_current(&ForecastDay::default(), 23), ClearNight);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let input = signals(None, None, &["Mist then rain, perhaps sleet"]);
        let first = classify_current_signals(&input, 9);
        for _ in 0..100 {
            assert_eq!(classify_current_signals(&input, 9), first);
        }
        assert_eq!(first, SnowyRainy);
    }
}
