//! Planning sessions.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use serde::{Serialize, Serializer};
use uuid::Uuid;

use crate::domain::{ChatMessage, Refinement, ResolvedLocation, TransitPlan, TripRequest};
use crate::recommend::PlanContext;

use super::error::SessionError;

/// Opaque session identifier.
///
/// ```
/// use layover_server::sessions::SessionId;
///
/// let id = SessionId::generate();
/// let parsed: SessionId = id.to_string().parse().unwrap();
/// assert_eq!(id, parsed);
/// assert!("not-a-session".parse::<SessionId>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    /// A fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl FromStr for SessionId {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| SessionError::InvalidId(s.to_string()))
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Serialize for SessionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

/// A trip, its plan and the follow-up conversation about it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub id: SessionId,
    pub trip: TripRequest,
    pub layover: ResolvedLocation,
    pub plan: TransitPlan,
    pub messages: Vec<ChatMessage>,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

impl Session {
    /// Start a session for a freshly generated plan.
    pub fn new(context: PlanContext, plan: TransitPlan, at: DateTime<FixedOffset>) -> Self {
        Self {
            id: SessionId::generate(),
            trip: context.trip,
            layover: context.layover,
            plan,
            messages: Vec::new(),
            created_at: at,
            updated_at: at,
        }
    }

    /// The recommender's view of this session.
    pub fn context(&self) -> PlanContext {
        PlanContext::new(self.trip.clone(), self.layover.clone())
    }

    /// Apply a partial update.
    pub fn apply(&mut self, update: SessionUpdate) {
        self.messages.extend(update.messages);
        if let Some(plan) = update.plan {
            self.plan = plan;
        }
        self.updated_at = update.at;
    }
}

/// Changes to a stored session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionUpdate {
    /// Replacement plan, if any.
    pub plan: Option<TransitPlan>,
    /// Messages to append, oldest first.
    pub messages: Vec<ChatMessage>,
    pub at: DateTime<FixedOffset>,
}

impl SessionUpdate {
    /// One chat exchange: the user's message, the reply and the revised plan.
    pub fn exchange(message: &str, refinement: Refinement, at: DateTime<FixedOffset>) -> Self {
        Self {
            plan: Some(refinement.plan),
            messages: vec![
                ChatMessage::user(message, at),
                ChatMessage::assistant(refinement.reply, at),
            ],
            at,
        }
    }
}
