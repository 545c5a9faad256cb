//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{
    JourneyQuery, Preferences, TransitPlan, TripRequest, parse_timestamp,
};
use crate::sessions::SessionId;

/// Request to validate a single place name.
#[derive(Debug, Deserialize)]
pub struct LocationRequest {
    pub location: String,
}

/// Request to validate a journey leg.
#[derive(Debug, Deserialize)]
pub struct JourneyRequest {
    pub from: String,
    pub to: String,
    /// RFC 3339, or naive `YYYY-MM-DDTHH:MM[:SS]` read as UTC
    pub departure: String,
    pub arrival: String,
}

impl JourneyRequest {
    pub fn into_query(self) -> Result<JourneyQuery, String> {
        let departure = parse_field("departure", &self.departure)?;
        let arrival = parse_field("arrival", &self.arrival)?;
        Ok(JourneyQuery::new(self.from, self.to, departure, arrival))
    }
}

/// JSON request to plan a layover.
#[derive(Debug, Deserialize)]
pub struct PlanRequest {
    pub origin: String,
    pub layover_city: String,
    pub destination: String,
    pub inbound_departure: String,
    pub layover_arrival: String,
    pub outbound_departure: String,
    #[serde(default)]
    pub preferences: Preferences,
}

impl PlanRequest {
    pub fn into_trip(self) -> Result<TripRequest, String> {
        Ok(TripRequest {
            inbound_departure: parse_field("inbound_departure", &self.inbound_departure)?,
            layover_arrival: parse_field("layover_arrival", &self.layover_arrival)?,
            outbound_departure: parse_field("outbound_departure", &self.outbound_departure)?,
            origin: self.origin,
            layover_city: self.layover_city,
            destination: self.destination,
            preferences: self.preferences,
        })
    }
}

/// The trip form on the index page.
///
/// Every field is a plain string so a rejected form can be shown again
/// exactly as typed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlanForm {
    pub origin: String,
    pub layover_city: String,
    pub destination: String,
    pub inbound_departure: String,
    pub layover_arrival: String,
    pub outbound_departure: String,
    /// Comma-separated
    pub interests: String,
    pub budget: String,
    pub pace: String,
    pub notes: String,
}

impl PlanForm {
    pub fn to_trip(&self) -> Result<TripRequest, String> {
        let budget = self.budget.parse().map_err(|e| format!("Budget: {e}"))?;
        let pace = self.pace.parse().map_err(|e| format!("Pace: {e}"))?;
        let notes = Some(self.notes.trim().to_string()).filter(|n| !n.is_empty());

        Ok(TripRequest {
            origin: self.origin.clone(),
            layover_city: self.layover_city.clone(),
            destination: self.destination.clone(),
            inbound_departure: parse_field("Inbound departure", &self.inbound_departure)?,
            layover_arrival: parse_field("Layover arrival", &self.layover_arrival)?,
            outbound_departure: parse_field("Outbound departure", &self.outbound_departure)?,
            preferences: Preferences {
                interests: Preferences::parse_interests(&self.interests),
                budget,
                pace,
                notes,
            },
        })
    }
}

/// Response after a plan is created.
#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub session_id: SessionId,
    /// Inbound leg, great-circle
    pub distance_km: f64,
    pub layover_minutes: i64,
    pub plan: TransitPlan,
}

/// Follow-up chat message.
#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub plan: TransitPlan,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn parse_field(
    label: &str,
    value: &str,
) -> Result<chrono::DateTime<chrono::FixedOffset>, String> {
    if value.trim().is_empty() {
        return Err(format!("{label} is required"));
    }
    parse_timestamp(value).map_err(|e| format!("{label}: {e}"))
}
