//! The planning flow.
//!
//! Validates the inbound leg, asks the recommender for a plan and opens a
//! session for follow-up chat.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{
    JourneyQuery, JourneyValidationResult, Refinement, TransitPlan, TripRequest,
    format_duration, now,
};
use crate::recommend::{PlanContext, RecommendError, Recommender};
use crate::sessions::{Session, SessionError, SessionId, SessionStore, SessionUpdate};
use crate::validator::JourneyValidator;

/// Message when the outbound flight leaves before the inbound one lands.
pub const OUTBOUND_BEFORE_ARRIVAL: &str = "Outbound departure must be after the layover arrival";

/// Message for blank chat input.
pub const EMPTY_MESSAGE: &str = "Please enter a message";

/// Error from planning or chat.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// The trip failed validation; the message is shown to the traveller
    #[error("{0}")]
    InvalidTrip(String),

    /// Chat message was blank
    #[error("Please enter a message")]
    EmptyMessage,

    /// No recommender could produce a plan
    #[error("could not generate recommendations: {0}")]
    Recommend(#[from] RecommendError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// A newly planned trip.
#[derive(Debug, Clone)]
pub struct PlanOutcome {
    pub session: Session,
    /// Great-circle length of the inbound leg.
    pub distance_km: f64,
}

impl PlanOutcome {
    pub fn layover_minutes(&self) -> i64 {
        self.session.trip.layover_duration().num_minutes()
    }
}

/// The outcome of one chat turn.
#[derive(Debug, Clone)]
pub struct ChatOutcome {
    pub reply: String,
    /// The session after the exchange was recorded.
    pub session: Session,
}

/// Plans layovers and handles follow-up chat.
#[derive(Clone)]
pub struct PlanningService {
    validator: JourneyValidator,
    recommender: Arc<dyn Recommender>,
    fallback: Option<Arc<dyn Recommender>>,
    sessions: Arc<dyn SessionStore>,
}

impl PlanningService {
    pub fn new(
        validator: JourneyValidator,
        recommender: Arc<dyn Recommender>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            validator,
            recommender,
            fallback: None,
            sessions,
        }
    }

    /// Use `fallback` whenever the primary recommender fails.
    pub fn with_fallback(mut self, fallback: Arc<dyn Recommender>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn validator(&self) -> &JourneyValidator {
        &self.validator
    }

    /// Validate a trip, generate a plan and open a session for it.
    pub async fn plan(&self, trip: TripRequest) -> Result<PlanOutcome, PlanError> {
        check_fields(&trip)?;

        let inbound = JourneyQuery::new(
            trip.origin.clone(),
            trip.layover_city.clone(),
            trip.inbound_departure,
            trip.layover_arrival,
        );
        let (layover, distance_km) = match self.validator.validate_journey(&inbound).await {
            JourneyValidationResult::Valid {
                to, distance_km, ..
            } => (to, distance_km),
            JourneyValidationResult::Invalid { error, .. } => {
                return Err(PlanError::InvalidTrip(error));
            }
        };

        if trip.outbound_departure <= trip.layover_arrival {
            return Err(PlanError::InvalidTrip(OUTBOUND_BEFORE_ARRIVAL.to_string()));
        }

        let context = PlanContext::new(trip, layover);
        let plan = self.recommend(&context).await?;

        let session = Session::new(context, plan, now());
        self.sessions.create(session.clone()).await;

        info!(
            "Planned {} layover in {} (session {})",
            format_duration(session.trip.layover_duration()),
            session.layover.name(),
            session.id
        );

        Ok(PlanOutcome {
            session,
            distance_km,
        })
    }

    /// Fetch a session.
    pub async fn session(&self, id: SessionId) -> Result<Session, PlanError> {
        Ok(self.sessions.get(id).await?)
    }

    /// Refine a session's plan in response to a chat message.
    pub async fn chat(&self, id: SessionId, message: &str) -> Result<ChatOutcome, PlanError> {
        let session = self.sessions.get(id).await?;

        let message = message.trim();
        if message.is_empty() {
            return Err(PlanError::EmptyMessage);
        }

        let refinement = self.refine(&session, message).await?;
        let reply = refinement.reply.clone();

        let session = self
            .sessions
            .update(id, SessionUpdate::exchange(message, refinement, now()))
            .await?;

        Ok(ChatOutcome { reply, session })
    }

    async fn recommend(&self, context: &PlanContext) -> Result<TransitPlan, PlanError> {
        match self.recommender.recommend(context).await {
            Ok(plan) => Ok(plan),
            Err(e) => match &self.fallback {
                Some(fallback) => {
                    warn!("Recommender failed, using fallback: {}", e);
                    Ok(fallback.recommend(context).await?)
                }
                None => Err(e.into()),
            },
        }
    }

    async fn refine(&self, session: &Session, message: &str) -> Result<Refinement, PlanError> {
        let context = session.context();
        let (current, history) = (&session.plan, &session.messages);
        match self
            .recommender
            .refine(&context, current, history, message)
            .await
        {
            Ok(refinement) => Ok(refinement),
            Err(e) => match &self.fallback {
                Some(fallback) => {
                    warn!("Recommender failed to refine, using fallback: {}", e);
                    Ok(fallback.refine(&context, current, history, message).await?)
                }
                None => Err(e.into()),
            },
        }
    }
}

/// Checks that need no lookups.
fn check_fields(trip: &TripRequest) -> Result<(), PlanError> {
    if trip.destination.trim().is_empty() {
        return Err(PlanError::InvalidTrip(
            "Please enter a final destination".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::domain::{ChatMessage, ChatRole, PlanSource, Preferences, parse_timestamp};
    use crate::geocoding::StaticGeocoder;
    use crate::recommend::MockRecommender;
    use crate::sessions::MokaSessionStore;
    use crate::validator::{LocationResolver, UNREALISTIC_TRAVEL_TIME};

    /// Recommender whose every call fails.
    struct Offline;

    #[async_trait]
    impl Recommender for Offline {
        async fn recommend(&self, _: &PlanContext) -> Result<TransitPlan, RecommendError> {
            Err(RecommendError::RateLimited)
        }

        async fn refine(
            &self,
            _: &PlanContext,
            _: &TransitPlan,
            _: &[ChatMessage],
            _: &str,
        ) -> Result<Refinement, RecommendError> {
            Err(RecommendError::RateLimited)
        }
    }

    fn service(recommender: Arc<dyn Recommender>) -> PlanningService {
        let validator =
            JourneyValidator::new(LocationResolver::new(Arc::new(StaticGeocoder::disabled())));
        PlanningService::new(
            validator,
            recommender,
            Arc::new(MokaSessionStore::default()),
        )
    }

    fn trip() -> TripRequest {
        TripRequest {
            origin: "London".to_string(),
            layover_city: "Hong Kong".to_string(),
            destination: "Sydney".to_string(),
            inbound_departure: parse_timestamp("2024-03-15T21:00:00+00:00").unwrap(),
            layover_arrival: parse_timestamp("2024-03-16T17:00:00+08:00").unwrap(),
            outbound_departure: parse_timestamp("2024-03-16T23:30:00+08:00").unwrap(),
            preferences: Preferences::default(),
        }
    }

    #[tokio::test]
    async fn plan_creates_session() {
        let service = service(Arc::new(MockRecommender::new()));
        let outcome = service.plan(trip()).await.unwrap();

        assert_eq!(outcome.layover_minutes(), 390);
        assert!(outcome.distance_km > 9000.0);
        assert_eq!(outcome.session.layover.name(), "Hong Kong");
        assert_eq!(outcome.session.plan.source, PlanSource::Mock);

        let stored = service.session(outcome.session.id).await.unwrap();
        assert_eq!(stored, outcome.session);
    }

    #[tokio::test]
    async fn implausible_inbound_leg_is_rejected() {
        let service = service(Arc::new(MockRecommender::new()));
        let mut trip = trip();
        trip.layover_arrival = parse_timestamp("2024-03-15T23:00:00+00:00").unwrap();
        trip.outbound_departure = parse_timestamp("2024-03-16T06:00:00+00:00").unwrap();

        match service.plan(trip).await {
            Err(PlanError::InvalidTrip(message)) => assert_eq!(message, UNREALISTIC_TRAVEL_TIME),
            other => panic!("expected invalid trip, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unknown_layover_city_is_prefixed() {
        let service = service(Arc::new(MockRecommender::new()));
        let mut trip = trip();
        trip.layover_city = "Zzqxw123".to_string();

        let err = service.plan(trip).await.unwrap_err();
        assert!(err.to_string().starts_with("Arrival location: "));
    }

    #[tokio::test]
    async fn outbound_must_follow_arrival() {
        let service = service(Arc::new(MockRecommender::new()));
        let mut trip = trip();
        trip.outbound_departure = trip.layover_arrival;

        let err = service.plan(trip).await.unwrap_err();
        assert_eq!(err.to_string(), OUTBOUND_BEFORE_ARRIVAL);
    }

    #[tokio::test]
    async fn blank_destination_is_rejected() {
        let service = service(Arc::new(MockRecommender::new()));
        let mut trip = trip();
        trip.destination = "  ".to_string();

        assert!(matches!(
            service.plan(trip).await,
            Err(PlanError::InvalidTrip(_))
        ));
    }

    #[tokio::test]
    async fn failing_recommender_without_fallback_errors() {
        let service = service(Arc::new(Offline));
        let err = service.plan(trip()).await.unwrap_err();
        assert!(matches!(err, PlanError::Recommend(RecommendError::RateLimited)));
    }

    #[tokio::test]
    async fn failing_recommender_uses_fallback() {
        let service = service(Arc::new(Offline)).with_fallback(Arc::new(MockRecommender::new()));
        let outcome = service.plan(trip()).await.unwrap();
        assert_eq!(outcome.session.plan.source, PlanSource::Mock);

        let chat = service
            .chat(outcome.session.id, "somewhere cheap")
            .await
            .unwrap();
        assert!(chat.reply.starts_with("Updated the plan"));
    }

    #[tokio::test]
    async fn chat_records_exchange() {
        let service = service(Arc::new(MockRecommender::new()));
        let id = service.plan(trip()).await.unwrap().session.id;

        let outcome = service.chat(id, "  I want to relax  ").await.unwrap();
        assert_eq!(outcome.reply, "Updated the plan: slowed the pace.");

        let stored = service.session(id).await.unwrap();
        let roles: Vec<ChatRole> = stored.messages.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![ChatRole::User, ChatRole::Assistant]);
        assert_eq!(stored.messages[0].content, "I want to relax");
        assert_eq!(stored.plan, outcome.session.plan);
    }

    #[tokio::test]
    async fn chat_rejects_blank_message() {
        let service = service(Arc::new(MockRecommender::new()));
        let id = service.plan(trip()).await.unwrap().session.id;

        let err = service.chat(id, "   ").await.unwrap_err();
        assert!(matches!(err, PlanError::EmptyMessage));
        assert_eq!(err.to_string(), EMPTY_MESSAGE);
        assert!(service.session(id).await.unwrap().messages.is_empty());
    }

    #[tokio::test]
    async fn chat_on_unknown_session() {
        let service = service(Arc::new(MockRecommender::new()));
        let id = SessionId::generate();
        assert!(matches!(
            service.chat(id, "hello").await,
            Err(PlanError::Session(SessionError::NotFound(_)))
        ));
    }
}
