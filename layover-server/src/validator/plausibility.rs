//! Travel-time plausibility.
//!
//! Catches gross data-entry mistakes (wrong day, swapped times, wrong time
//! zone) by checking the average speed a journey implies. The windows are
//! deliberately wide and do not try to infer the mode of transport.

use chrono::{DateTime, FixedOffset};

use crate::domain::elapsed_hours;

/// Message for journeys that end before they start.
pub const ARRIVAL_BEFORE_DEPARTURE: &str = "Arrival must be after departure";

/// Message for journeys whose implied speed is outside the window.
pub const UNREALISTIC_TRAVEL_TIME: &str =
    "Journey appears to exceed realistic travel times; check departure/arrival times";

/// Journeys shorter than this are "short".
const SHORT_LIMIT_KM: f64 = 50.0;

/// Journeys shorter than this (and not short) are "medium".
const MEDIUM_LIMIT_KM: f64 = 500.0;

/// Walking pace.
const WALKING_MIN_KMH: f64 = 3.0;

/// Slowest plausible ground transport.
const GROUND_MIN_KMH: f64 = 30.0;

/// Fastest plausible subsonic aircraft.
const AIR_MAX_KMH: f64 = 1000.0;

/// Distance band, which selects the plausible speed window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceBand {
    /// Under 50 km: walking or local transport.
    Short,
    /// 50 to 500 km: ground transport or regional flights.
    Medium,
    /// 500 km and over: long-haul ground or air.
    Long,
}

impl DistanceBand {
    pub fn for_distance(distance_km: f64) -> Self {
        if distance_km < SHORT_LIMIT_KM {
            DistanceBand::Short
        } else if distance_km < MEDIUM_LIMIT_KM {
            DistanceBand::Medium
        } else {
            DistanceBand::Long
        }
    }

    /// Inclusive speed window in km/h; `None` means no upper bound.
    pub fn speed_window(self) -> (f64, Option<f64>) {
        match self {
            DistanceBand::Short => (WALKING_MIN_KMH, None),
            DistanceBand::Medium | DistanceBand::Long => (GROUND_MIN_KMH, Some(AIR_MAX_KMH)),
        }
    }

    pub fn admits(self, speed_kmh: f64) -> bool {
        let (min, max) = self.speed_window();
        speed_kmh >= min && max.is_none_or(|max| speed_kmh <= max)
    }
}

/// Why a journey's timing was rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ImplausibleJourney {
    /// Elapsed time is zero or negative
    #[error("Arrival must be after departure")]
    NonPositiveElapsed,

    /// Implied speed is outside the band's window
    #[error(
        "Journey appears to exceed realistic travel times; check departure/arrival times"
    )]
    UnrealisticSpeed { speed_kmh: f64, band: DistanceBand },
}

/// A journey's implied average speed, once accepted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelSpeed {
    pub speed_kmh: f64,
    pub band: DistanceBand,
}

/// Check that covering `distance_km` between the two instants is possible.
///
/// Elapsed time is checked before any division, so a zero or negative span
/// always yields [`ImplausibleJourney::NonPositiveElapsed`].
pub fn check_travel_time(
    distance_km: f64,
    departure: DateTime<FixedOffset>,
    arrival: DateTime<FixedOffset>,
) -> Result<TravelSpeed, ImplausibleJourney> {
    if arrival <= departure {
        return Err(ImplausibleJourney::NonPositiveElapsed);
    }

    let hours = elapsed_hours(departure, arrival);
    check_speed(distance_km, hours)
}

/// Check a distance against an elapsed time in hours.
pub fn check_speed(distance_km: f64, elapsed_hours: f64) -> Result<TravelSpeed, ImplausibleJourney> {
    if elapsed_hours <= 0.0 {
        return Err(ImplausibleJourney::NonPositiveElapsed);
    }

    let speed_kmh = distance_km / elapsed_hours;
    let band = DistanceBand::for_distance(distance_km);

    if band.admits(speed_kmh) {
        Ok(TravelSpeed { speed_kmh, band })
    } else {
        Err(ImplausibleJourney::UnrealisticSpeed { speed_kmh, band })
    }
}
