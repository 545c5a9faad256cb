//! Layover planning.
//!
//! Ties the journey validator, the recommender and the session store
//! together: a trip goes in, a ranked plan and a session id come out.

mod service;

pub use service::{
    ChatOutcome, EMPTY_MESSAGE, OUTBOUND_BEFORE_ARRIVAL, PlanError, PlanOutcome, PlanningService,
};
