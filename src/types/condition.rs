//! Defines the `CanonicalCondition` enum, the fixed set of weather-state codes every
//! upstream signal (icon, tooltip text, free-text description) is mapped onto.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A canonical weather condition.
///
/// The string form of each variant (see [`CanonicalCondition::as_str`]) is the code
/// published to consumers, e.g. `"partlycloudy"` or `"lightning-rainy"`.
///
/// Conditions are never stored; they are derived from a forecast day every time
/// they are requested (see [`crate::classify`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalCondition {
    /// Clear sky during the day.
    Sunny,
    /// Some cloud, sunny spells.
    PartlyCloudy,
    /// Clear sky at night.
    ClearNight,
    /// Cloudy or overcast.
    Cloudy,
    /// Fog or mist.
    Fog,
    /// Rain, showers or drizzle.
    Rainy,
    /// Heavy rain.
    Pouring,
    /// Thunderstorm with rain.
    LightningRainy,
    /// Thunder or lightning without notable rain.
    Lightning,
    /// Snow.
    Snowy,
    /// Sleet, a mix of rain and snow.
    SnowyRainy,
    /// Hail.
    Hail,
}

impl CanonicalCondition {
    /// Every condition, in declaration order.
    pub const ALL: [CanonicalCondition; 12] = [
        CanonicalCondition::Sunny,
        CanonicalCondition::PartlyCloudy,
        CanonicalCondition::ClearNight,
        CanonicalCondition::Cloudy,
        CanonicalCondition::Fog,
        CanonicalCondition::Rainy,
        CanonicalCondition::Pouring,
        CanonicalCondition::LightningRainy,
        CanonicalCondition::Lightning,
        CanonicalCondition::Snowy,
        CanonicalCondition::SnowyRainy,
        CanonicalCondition::Hail,
    ];

    /// The published condition code.
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalCondition::Sunny => "sunny",
            CanonicalCondition::PartlyCloudy => "partlycloudy",
            CanonicalCondition::ClearNight => "clear-night",
            CanonicalCondition::Cloudy => "cloudy",
            CanonicalCondition::Fog => "fog",
            CanonicalCondition::Rainy => "rainy",
            CanonicalCondition::Pouring => "pouring",
            CanonicalCondition::LightningRainy => "lightning-rainy",
            CanonicalCondition::Lightning => "lightning",
            CanonicalCondition::Snowy => "snowy",
            CanonicalCondition::SnowyRainy => "snowy-rainy",
            CanonicalCondition::Hail => "hail",
        }
    }

    /// Severity rank used to pick the worst of several candidate conditions.
    ///
    /// Higher is worse. `Sunny` and `ClearNight` share the lowest rank;
    /// `Lightning` sits directly below `LightningRainy`.
    ///
    /// ```
    /// use jersey_weather::CanonicalCondition;
    ///
    /// assert!(CanonicalCondition::Pouring.severity() > CanonicalCondition::Rainy.severity());
    /// assert_eq!(
    ///     CanonicalCondition::Sunny.severity(),
    ///     CanonicalCondition::ClearNight.severity()
    /// );
    /// ```
    pub fn severity(&self) -> u8 {
        match self {
            CanonicalCondition::LightningRainy => 11,
            CanonicalCondition::Lightning => 10,
            CanonicalCondition::Pouring => 9,
            CanonicalCondition::SnowyRainy => 8,
            CanonicalCondition::Snowy => 7,
            CanonicalCondition::Hail => 6,
            CanonicalCondition::Rainy => 5,
            CanonicalCondition::Fog => 4,
            CanonicalCondition::Cloudy => 3,
            CanonicalCondition::PartlyCloudy => 2,
            CanonicalCondition::Sunny | CanonicalCondition::ClearNight => 1,
        }
    }
}

impl fmt::Display for CanonicalCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serializes as the published condition code.
impl Serialize for CanonicalCondition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Returned when a string is not one of the published condition codes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown condition code '{0}'")]
pub struct UnknownCondition(pub String);

impl FromStr for CanonicalCondition {
    type Err = UnknownCondition;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        CanonicalCondition::ALL
            .into_iter()
            .find(|condition| condition.as_str() == code)
            .ok_or_else(|| UnknownCondition(code.to_string()))
    }
}
