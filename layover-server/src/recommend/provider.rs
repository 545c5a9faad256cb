//! The recommender seam.

use async_trait::async_trait;
use chrono::Duration;

use crate::domain::{ChatMessage, Refinement, ResolvedLocation, TransitPlan, TripRequest};

use super::error::RecommendError;

/// Everything a recommender knows about the layover.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanContext {
    pub trip: TripRequest,
    /// The layover city as resolved by the validator.
    pub layover: ResolvedLocation,
}

impl PlanContext {
    pub fn new(trip: TripRequest, layover: ResolvedLocation) -> Self {
        Self { trip, layover }
    }

    pub fn layover_duration(&self) -> Duration {
        self.trip.layover_duration()
    }
}

/// Produces and refines transit plans.
#[async_trait]
pub trait Recommender: Send + Sync {
    /// Recommend ways to spend the layover.
    async fn recommend(&self, context: &PlanContext) -> Result<TransitPlan, RecommendError>;

    /// Revise `current` in response to a follow-up message.
    ///
    /// `history` holds the earlier chat turns, oldest first, not including
    /// `message`.
    async fn refine(
        &self,
        context: &PlanContext,
        current: &TransitPlan,
        history: &[ChatMessage],
        message: &str,
    ) -> Result<Refinement, RecommendError>;
}
