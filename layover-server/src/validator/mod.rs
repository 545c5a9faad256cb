//! Journey and location validation.
//!
//! Guards against data-entry mistakes before anything is sent to the
//! recommender: place names must resolve, and the claimed departure and
//! arrival times must be physically possible for the distance between
//! them.

mod distance;
mod journey;
mod plausibility;
mod resolver;

pub use distance::{EARTH_RADIUS_KM, haversine_km};
pub use journey::JourneyValidator;
pub use plausibility::{
    ARRIVAL_BEFORE_DEPARTURE, DistanceBand, ImplausibleJourney, TravelSpeed,
    UNREALISTIC_TRAVEL_TIME, check_speed, check_travel_time,
};
pub use resolver::{EMPTY_LOCATION, LocationResolver, not_found_message};
