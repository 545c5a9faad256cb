//! Prompt construction for the language model.

use crate::domain::{ChatMessage, ChatRole, TransitPlan, format_duration};

use super::provider::PlanContext;
use super::types::WireMessage;

/// Shape of the JSON plan the model must answer with.
const PLAN_SCHEMA: &str = r#"{
  "summary": "one or two sentences",
  "options": [
    {
      "title": "short name",
      "description": "what to do and how to get there",
      "duration_mins": 180,
      "estimated_cost": "local currency range",
      "tags": ["food", "airport"]
    }
  ],
  "timeline": [
    {"time": "HH:MM", "activity": "what happens"}
  ]
}"#;

const SYSTEM_PROMPT: &str = "You are a travel assistant that plans airport layovers. \
Recommend between two and four ways to spend the layover, best first. \
Be realistic about immigration, transit and security times: \
allow at least 90 minutes after landing before leaving the airport and be back \
two hours before the outbound departure. Tag options that stay inside the \
airport with \"airport\". Use local clock times at the layover city. \
Answer with JSON only, no prose and no code fences.";

/// Build the messages for a first recommendation.
pub fn plan_messages(context: &PlanContext) -> Vec<WireMessage> {
    vec![
        WireMessage::system(format!("{SYSTEM_PROMPT}\n\nSchema:\n{PLAN_SCHEMA}")),
        WireMessage::user(describe_trip(context)),
    ]
}

/// Build the messages for a refinement.
///
/// The earlier conversation is replayed in order, then the current plan and
/// the new request.
pub fn refine_messages(
    context: &PlanContext,
    current: &TransitPlan,
    history: &[ChatMessage],
    message: &str,
) -> Vec<WireMessage> {
    let mut messages = vec![
        WireMessage::system(format!(
            "{SYSTEM_PROMPT}\n\nWhen the traveller asks for changes, answer with \
             {{\"reply\": \"what you changed\", \"plan\": <plan>}} where <plan> follows:\n{PLAN_SCHEMA}"
        )),
        WireMessage::user(describe_trip(context)),
    ];

    messages.extend(history.iter().map(|m| match m.role {
        ChatRole::User => WireMessage::user(m.content.clone()),
        ChatRole::Assistant => WireMessage::assistant(m.content.clone()),
    }));

    let plan_json = serde_json::to_string(current).unwrap_or_default();
    messages.push(WireMessage::user(format!(
        "Current plan:\n{plan_json}\n\nRequest: {message}"
    )));
    messages
}

/// Plain-text description of the trip.
fn describe_trip(context: &PlanContext) -> String {
    let trip = &context.trip;
    let prefs = &trip.preferences;

    let mut text = format!(
        "Trip: {} -> {} -> {}.\n\
         Layover city: {} ({:.4}, {:.4}).\n\
         Landing at {}; outbound flight departs {} (layover {}).\n\
         Budget: {}. Pace: {}.",
        trip.origin,
        context.layover.full_name(),
        trip.destination,
        context.layover.full_name(),
        context.layover.latitude(),
        context.layover.longitude(),
        trip.layover_arrival.format("%Y-%m-%d %H:%M %:z"),
        trip.outbound_departure.format("%Y-%m-%d %H:%M %:z"),
        format_duration(context.layover_duration()),
        prefs.budget,
        prefs.pace,
    );

    if !prefs.interests.is_empty() {
        text.push_str(&format!("\nInterests: {}.", prefs.interests.join(", ")));
    }
    if let Some(notes) = prefs.notes.as_deref().filter(|n| !n.trim().is_empty()) {
        text.push_str(&format!("\nNotes: {}", notes.trim()));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Coordinates, PlanSource, Preferences, ResolvedLocation, TripRequest, parse_timestamp,
    };

    fn context() -> PlanContext {
        let trip = TripRequest {
            origin: "London".to_string(),
            layover_city: "Hong Kong".to_string(),
            destination: "Sydney".to_string(),
            inbound_departure: parse_timestamp("2024-03-15T21:00:00+00:00").unwrap(),
            layover_arrival: parse_timestamp("2024-03-16T17:00:00+08:00").unwrap(),
            outbound_departure: parse_timestamp("2024-03-16T23:30:00+08:00").unwrap(),
            preferences: Preferences {
                interests: vec!["food".to_string(), "markets".to_string()],
                notes: Some("  travelling with a toddler ".to_string()),
                ..Default::default()
            },
        };
        let layover = ResolvedLocation::new(
            "Hong Kong",
            Coordinates::new(22.3193, 114.1694).unwrap(),
            "Hong Kong",
            None,
        );
        PlanContext::new(trip, layover)
    }

    #[test]
    fn plan_prompt_describes_trip() {
        let messages = plan_messages(&context());
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert!(messages[0].content.contains("JSON only"));

        let user = &messages[1].content;
        assert!(user.contains("London"));
        assert!(user.contains("Sydney"));
        assert!(user.contains("6h 30m"));
        assert!(user.contains("Interests: food, markets."));
        assert!(user.contains("Notes: travelling with a toddler"));
        assert!(user.contains("2024-03-16 17:00 +08:00"));
    }

    #[test]
    fn refine_prompt_replays_history() {
        let at = parse_timestamp("2024-03-16T10:00:00Z").unwrap();
        let history = vec![
            ChatMessage::user("less walking", at),
            ChatMessage::assistant("Swapped the walk for a tram ride.", at),
        ];
        let plan = TransitPlan {
            summary: "Evening in Hong Kong".to_string(),
            options: vec![],
            timeline: vec![],
            source: PlanSource::Llm,
        };

        let messages = refine_messages(&context(), &plan, &history, "somewhere cheaper");
        let roles: Vec<&str> = messages.iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, vec!["system", "user", "user", "assistant", "user"]);

        let last = &messages.last().unwrap().content;
        assert!(last.contains("Evening in Hong Kong"));
        assert!(last.ends_with("Request: somewhere cheaper"));
    }
}
