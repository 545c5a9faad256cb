//! Trip requests and traveller preferences.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, FixedOffset};
use serde::{Deserialize, Serialize};

/// How much the traveller wants to spend during the layover.
///
/// Ordered from cheapest to most expensive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Budget {
    Low,
    #[default]
    Medium,
    High,
}

/// How busy the traveller wants the layover to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pace {
    Relaxed,
    #[default]
    Moderate,
    Packed,
}

/// Error returned when parsing an unknown budget or pace keyword.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value:?}")]
pub struct UnknownKeyword {
    kind: &'static str,
    value: String,
}

impl FromStr for Budget {
    type Err = UnknownKeyword;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Budget::Low),
            "medium" | "" => Ok(Budget::Medium),
            "high" => Ok(Budget::High),
            _ => Err(UnknownKeyword {
                kind: "budget",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for Pace {
    type Err = UnknownKeyword;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "relaxed" => Ok(Pace::Relaxed),
            "moderate" | "" => Ok(Pace::Moderate),
            "packed" => Ok(Pace::Packed),
            _ => Err(UnknownKeyword {
                kind: "pace",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Budget::Low => "low",
            Budget::Medium => "medium",
            Budget::High => "high",
        })
    }
}

impl fmt::Display for Pace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Pace::Relaxed => "relaxed",
            Pace::Moderate => "moderate",
            Pace::Packed => "packed",
        })
    }
}

/// Personal preferences that shape the recommendations.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Preferences {
    /// Free-form interest tags, e.g. "food", "museums".
    #[serde(default)]
    pub interests: Vec<String>,

    #[serde(default)]
    pub budget: Budget,

    #[serde(default)]
    pub pace: Pace,

    /// Anything else the traveller wants the planner to know.
    #[serde(default)]
    pub notes: Option<String>,
}

impl Preferences {
    /// Split a comma-separated interest list into normalised tags.
    pub fn parse_interests(input: &str) -> Vec<String> {
        input
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Whether any interest tag equals or contains `tag`.
    pub fn has_interest(&self, tag: &str) -> bool {
        self.interests
            .iter()
            .any(|i| i.eq_ignore_ascii_case(tag) || i.to_lowercase().contains(tag))
    }
}

/// A multi-leg trip with a layover in the middle.
///
/// The inbound leg runs from `origin` to `layover_city`; the outbound leg
/// leaves `layover_city` for `destination`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripRequest {
    pub origin: String,
    pub layover_city: String,
    pub destination: String,
    pub inbound_departure: DateTime<FixedOffset>,
    pub layover_arrival: DateTime<FixedOffset>,
    pub outbound_departure: DateTime<FixedOffset>,
    pub preferences: Preferences,
}

impl TripRequest {
    /// Time between landing and the outbound departure.
    pub fn layover_duration(&self) -> Duration {
        self.outbound_departure
            .signed_duration_since(self.layover_arrival)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parse_timestamp;

    #[test]
    fn parse_budget_and_pace() {
        assert_eq!("LOW".parse::<Budget>(), Ok(Budget::Low));
        assert_eq!("".parse::<Budget>(), Ok(Budget::Medium));
        assert_eq!(" packed ".parse::<Pace>(), Ok(Pace::Packed));
        assert!("lavish".parse::<Budget>().is_err());
        assert_eq!(
            "sprint".parse::<Pace>().unwrap_err().to_string(),
            "unknown pace: \"sprint\""
        );
    }

    #[test]
    fn interests_are_split_and_normalised() {
        let tags = Preferences::parse_interests(" Food, museums ,, Street Art ");
        assert_eq!(tags, vec!["food", "museums", "street art"]);
        assert!(Preferences::parse_interests("  ").is_empty());
    }

    #[test]
    fn has_interest_matches_substrings() {
        let prefs = Preferences {
            interests: vec!["street food".to_string(), "Museums".to_string()],
            ..Default::default()
        };
        assert!(prefs.has_interest("food"));
        assert!(prefs.has_interest("museums"));
        assert!(!prefs.has_interest("shopping"));
    }

    #[test]
    fn preferences_deserialize_with_defaults() {
        let prefs: Preferences = serde_json::from_str("{}").unwrap();
        assert_eq!(prefs, Preferences::default());

        let prefs: Preferences =
            serde_json::from_str(r#"{"interests":["food"],"budget":"high","pace":"relaxed"}"#)
                .unwrap();
        assert_eq!(prefs.budget, Budget::High);
        assert_eq!(prefs.pace, Pace::Relaxed);
    }

    #[test]
    fn layover_duration() {
        let trip = TripRequest {
            origin: "London".to_string(),
            layover_city: "Hong Kong".to_string(),
            destination: "Sydney".to_string(),
            inbound_departure: parse_timestamp("2024-03-15T21:00:00+00:00").unwrap(),
            layover_arrival: parse_timestamp("2024-03-16T17:00:00+08:00").unwrap(),
            outbound_departure: parse_timestamp("2024-03-16T23:30:00+08:00").unwrap(),
            preferences: Preferences::default(),
        };
        assert_eq!(trip.layover_duration(), Duration::minutes(390));
    }
}
