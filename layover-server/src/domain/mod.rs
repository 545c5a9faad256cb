//! Domain types for the layover planner.
//!
//! This module contains the core domain model types: places, journey
//! queries and their validation outcomes, trip requests and the plans
//! generated for them. Types enforce their invariants at construction
//! time, so code that receives them can trust their validity.

mod error;
mod location;
mod plan;
mod time;
mod trip;
mod validation;

pub use error::DomainError;
pub use location::{Coordinates, LocationQuery, ResolvedLocation};
pub(crate) use location::full_name as location_full_name;
pub use plan::{
    ChatMessage, ChatRole, PlanSource, Refinement, TimelineEntry, TransitOption, TransitPlan,
};
pub use time::{TimestampError, elapsed_hours, format_duration, now, parse_timestamp};
pub use trip::{Budget, Pace, Preferences, TripRequest, UnknownKeyword};
pub use validation::{JourneyQuery, JourneyValidationResult, ValidationResult};
