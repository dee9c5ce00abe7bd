//! Lookup tables mapping each upstream signal onto a [`CanonicalCondition`].

use crate::types::condition::CanonicalCondition;
use crate::types::condition::CanonicalCondition::*;

/// Icon file name published in `dayIcon` → condition.
pub const ICON_CONDITIONS: &[(&str, CanonicalCondition)] = &[
    ("a.svg", Sunny),
    ("b.svg", PartlyCloudy),
    ("c.svg", ClearNight),
    ("d.svg", PartlyCloudy),
    ("e.svg", Cloudy),
    ("f.svg", Cloudy),
    ("g.svg", Fog),
    ("h.svg", Rainy),
    ("i.svg", Pouring),
    ("j.svg", LightningRainy),
    ("k.svg", Snowy),
    ("l.svg", SnowyRainy),
];

/// Icon tooltip phrase → condition. Matched exactly after trimming.
pub const TOOLTIP_CONDITIONS: &[(&str, CanonicalCondition)] = &[
    ("Clear", ClearNight),
    ("Fine", ClearNight),
    ("Sunny", Sunny),
    ("Sunny periods", PartlyCloudy),
    ("Mainly sunny", PartlyCloudy),
    ("Sunshine and showers", Rainy),
    ("Cloudy", Cloudy),
    ("Fair", ClearNight),
    ("Fog", Fog),
    ("Mist", Fog),
    ("Hazy sunshine", PartlyCloudy),
    ("Sunny intervals", PartlyCloudy),
    ("Bright", PartlyCloudy),
    ("Light rain", Rainy),
    ("Showers", Rainy),
    ("Heavy rain", Pouring),
    ("Drizzle", Rainy),
    ("Rain", Rainy),
    ("Snow", Snowy),
    ("Sleet", SnowyRainy),
    ("Thunderstorm", LightningRainy),
    ("Thunder", Lightning),
];

/// Lowercase keyword → condition, ordered by descending keyword length so longer,
/// more specific keywords are tried first. Keywords of equal length are ordered
/// by descending severity.
pub const KEYWORD_CONDITIONS: &[(&str, CanonicalCondition)] = &[
    ("lightning", Lightning),
    ("overcast", Cloudy),
    ("thunder", LightningRainy),
    ("drizzle", Rainy),
    ("shower", Rainy),
    ("storm", LightningRainy),
    ("sleet", SnowyRainy),
    ("cloud", Cloudy),
    ("sunny", Sunny),
    ("clear", ClearNight),
    ("snow", Snowy),
    ("hail", Hail),
    ("rain", Rainy),
    ("mist", Fog),
    ("fine", ClearNight),
    ("fog", Fog),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keywords_ordered_by_length_then_severity() {
        for pair in KEYWORD_CONDITIONS.windows(2) {
            let (first, first_condition) = pair[0];
            let (second, second_condition) = pair[1];
            assert!(
                first.len() > second.len()
                    || (first.len() == second.len()
                        && first_condition.severity() >= second_condition.severity()),
                "'{first}' must precede '{second}'"
            );
        }
    }

    #[test]
    fn test_keywords_are_lowercase_and_unique() {
        let mut seen = HashSet::new();
        for (keyword, _) in KEYWORD_CONDITIONS {
            assert_eq!(*keyword, keyword.to_lowercase());
            assert!(seen.insert(*keyword), "duplicate keyword '{keyword}'");
        }
    }

    #[test]
    fn test_tables_have_unique_keys() {
        let icons: HashSet<_> = ICON_CONDITIONS.iter().map(|(icon, _)| *icon).collect();
        assert_eq!(icons.len(), ICON_CONDITIONS.len());
        let tooltips: HashSet<_> = TOOLTIP_CONDITIONS.iter().map(|(t, _)| *t).collect();
        assert_eq!(tooltips.len(), TOOLTIP_CONDITIONS.len());
    }
}
