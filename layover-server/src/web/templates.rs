//! Askama templates for the web frontend.

use askama::Template;

use crate::domain::{ChatRole, PlanSource, TransitOption, format_duration};
use crate::sessions::Session;

use super::dto::PlanForm;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with the trip form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub form: PlanForm,
    pub error: Option<String>,
}

/// A session's plan and chat.
#[derive(Template)]
#[template(path = "plan.html")]
pub struct PlanTemplate {
    pub session: SessionView,
    pub error: Option<String>,
}

/// Error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
    pub details: Option<String>,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Session view model for templates.
#[derive(Debug, Clone)]
pub struct SessionView {
    pub id: String,
    pub origin: String,
    pub layover_city: String,
    pub destination: String,
    pub arrival: String,
    pub departure: String,
    pub layover_duration: String,
    pub summary: String,
    pub from_mock: bool,
    pub options: Vec<OptionView>,
    pub timeline: Vec<TimelineView>,
    pub messages: Vec<MessageView>,
}

impl SessionView {
    pub fn from_session(session: &Session) -> Self {
        let trip = &session.trip;
        let offset = *trip.layover_arrival.offset();

        Self {
            id: session.id.to_string(),
            origin: trip.origin.clone(),
            layover_city: session.layover.full_name().to_string(),
            destination: trip.destination.clone(),
            arrival: trip.layover_arrival.format("%a %-d %b, %H:%M").to_string(),
            // Both ends in the layover city's clock
            departure: trip
                .outbound_departure
                .with_timezone(&offset)
                .format("%a %-d %b, %H:%M")
                .to_string(),
            layover_duration: format_duration(trip.layover_duration()),
            summary: session.plan.summary.clone(),
            from_mock: session.plan.source == PlanSource::Mock,
            options: session.plan.options.iter().map(OptionView::from_option).collect(),
            timeline: session
                .plan
                .timeline
                .iter()
                .map(|e| TimelineView {
                    time: e.time.clone(),
                    activity: e.activity.clone(),
                })
                .collect(),
            messages: session
                .messages
                .iter()
                .map(|m| MessageView {
                    is_user: m.role == ChatRole::User,
                    content: m.content.clone(),
                })
                .collect(),
        }
    }
}

/// A ranked option.
#[derive(Debug, Clone)]
pub struct OptionView {
    pub rank: u8,
    pub title: String,
    pub description: String,
    pub duration: String,
    pub estimated_cost: String,
    pub tags: Vec<String>,
    pub leaves_airport: bool,
}

impl OptionView {
    pub fn from_option(option: &TransitOption) -> Self {
        Self {
            rank: option.rank,
            title: option.title.clone(),
            description: option.description.clone(),
            duration: format_duration(chrono::Duration::minutes(option.duration_mins)),
            estimated_cost: option.estimated_cost.clone(),
            tags: option.tags.clone(),
            leaves_airport: option.leaves_airport(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TimelineView {
    pub time: String,
    pub activity: String,
}

#[derive(Debug, Clone)]
pub struct MessageView {
    pub is_user: bool,
    pub content: String,
}
