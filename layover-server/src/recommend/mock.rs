//! Mock recommender for running without a language model.
//!
//! Builds plans from a fixed activity catalogue, scored against the
//! traveller's preferences. Output is deterministic for a given trip, which
//! also makes it the recommender used in tests.

use async_trait::async_trait;
use chrono::{DateTime, Duration, FixedOffset};

use crate::domain::{
    Budget, ChatMessage, Pace, PlanSource, Preferences, Refinement, TimelineEntry,
    TransitOption, TransitPlan, format_duration,
};

use super::error::RecommendError;
use super::parse::MAX_OPTIONS;
use super::provider::{PlanContext, Recommender};

/// Time from landing until the traveller can leave the airport.
pub const ARRIVAL_PROCESSING_MINS: i64 = 90;

/// How long before departure the traveller must be back at the airport.
pub const RETURN_BUFFER_MINS: i64 = 120;

const GENERIC_REPLY: &str = "I've kept the current plan. Ask for cheaper, more relaxed, \
food or culture-focused options and I'll rework it.";

/// A catalogue entry before ranking.
struct Activity {
    option: TransitOption,
    cost: Budget,
    pace: Pace,
}

impl Activity {
    fn new(
        title: String,
        description: String,
        duration_mins: i64,
        estimated_cost: &str,
        tags: &[&str],
        cost: Budget,
        pace: Pace,
    ) -> Self {
        Self {
            option: TransitOption {
                rank: 0,
                title,
                description,
                duration_mins,
                estimated_cost: estimated_cost.to_string(),
                tags: tags.iter().map(|t| t.to_string()).collect(),
            },
            cost,
            pace,
        }
    }

    fn score(&self, prefs: &Preferences) -> usize {
        let interests = self
            .option
            .tags
            .iter()
            .filter(|t| prefs.has_interest(t))
            .count();
        let budget = usize::from(self.cost <= prefs.budget);
        let pace = usize::from(self.pace == prefs.pace);
        interests * 2 + budget + pace
    }
}

/// Activities that fit in `usable_mins` of free time in `city`.
fn catalogue(city: &str, usable_mins: i64) -> Vec<Activity> {
    let mut activities = Vec::new();

    if usable_mins >= 240 {
        activities.push(Activity::new(
            format!("{city} local food tour"),
            format!("Head into {city} for street food and a market or two. Transit there and back included."),
            180,
            "US$40-80",
            &["food", "markets", "local"],
            Budget::Medium,
            Pace::Moderate,
        ));
        activities.push(Activity::new(
            format!("{city} museum visit"),
            format!("Spend a couple of hours at one of {city}'s major museums, then return by train or taxi."),
            180,
            "US$20-40 including transit",
            &["museums", "culture", "history"],
            Budget::Medium,
            Pace::Moderate,
        ));
    }

    if usable_mins >= 120 {
        activities.push(Activity::new(
            format!("{city} city-centre highlights walk"),
            format!("Take public transport to central {city} and walk its best-known streets and sights."),
            120,
            "Transit fare only, about US$10-20",
            &["sightseeing", "walking", "architecture"],
            Budget::Low,
            Pace::Moderate,
        ));
    }

    if usable_mins >= 480 {
        activities.push(Activity::new(
            "Day hotel and evening outing".to_string(),
            format!("Book a day room near the airport to sleep and shower, then spend the evening in {city}."),
            420,
            "US$120-250",
            &["rest", "hotel", "nightlife"],
            Budget::High,
            Pace::Relaxed,
        ));
    }

    activities.push(Activity::new(
        "Terminal dining and shopping".to_string(),
        "Stay airside and try the terminal's restaurants and shops.".to_string(),
        90,
        "US$15-30",
        &["airport", "food", "shopping"],
        Budget::Low,
        Pace::Moderate,
    ));
    activities.push(Activity::new(
        "Airport lounge rest".to_string(),
        "Relax in a lounge with a shower, food and quiet space.".to_string(),
        120,
        "Free with lounge access, otherwise about US$40-60",
        &["airport", "rest"],
        Budget::Medium,
        Pace::Relaxed,
    ));

    activities
}

/// Deterministic catalogue-based recommender.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockRecommender;

impl MockRecommender {
    pub fn new() -> Self {
        Self
    }

    /// Build a plan for the trip using `prefs` in place of the trip's own.
    pub fn generate(&self, context: &PlanContext, prefs: &Preferences) -> TransitPlan {
        let city = context.layover.name();
        let layover = context.layover_duration();
        let usable = usable_minutes(layover);

        let mut scored: Vec<(usize, TransitOption)> = catalogue(city, usable)
            .into_iter()
            .map(|a| (a.score(prefs), a.option))
            .collect();
        // Stable, so equal scores keep catalogue order
        scored.sort_by_key(|(score, _)| std::cmp::Reverse(*score));

        let mut plan = TransitPlan {
            summary: summary(city, layover, usable, prefs),
            options: scored
                .into_iter()
                .take(MAX_OPTIONS)
                .map(|(_, o)| o)
                .collect(),
            timeline: Vec::new(),
            source: PlanSource::Mock,
        };
        plan.rerank();
        plan.timeline = timeline(context, plan.top_option());
        plan
    }
}

#[async_trait]
impl Recommender for MockRecommender {
    async fn recommend(&self, context: &PlanContext) -> Result<TransitPlan, RecommendError> {
        Ok(self.generate(context, &context.trip.preferences))
    }

    async fn refine(
        &self,
        context: &PlanContext,
        current: &TransitPlan,
        history: &[ChatMessage],
        message: &str,
    ) -> Result<Refinement, RecommendError> {
        // Earlier requests still apply, so replay them before this one
        let mut prefs = context.trip.preferences.clone();
        for earlier in history.iter().filter(|m| m.is_user()) {
            apply_keywords(&earlier.content, &mut prefs);
        }
        let changes = apply_keywords(message, &mut prefs);

        if changes.is_empty() {
            return Ok(Refinement {
                reply: GENERIC_REPLY.to_string(),
                plan: current.clone(),
            });
        }

        Ok(Refinement {
            reply: format!("Updated the plan: {}.", changes.join("; ")),
            plan: self.generate(context, &prefs),
        })
    }
}

/// Free time once arrival processing and the return buffer are taken out.
pub fn usable_minutes(layover: Duration) -> i64 {
    layover.num_minutes() - ARRIVAL_PROCESSING_MINS - RETURN_BUFFER_MINS
}

fn summary(city: &str, layover: Duration, usable: i64, prefs: &Preferences) -> String {
    if usable < 120 {
        return format!(
            "A {} layover in {} is too short to leave the airport comfortably, \
             so these options keep you airside.",
            format_duration(layover),
            city
        );
    }

    let interests = if prefs.interests.is_empty() {
        "general sightseeing".to_string()
    } else {
        prefs.interests.join(", ")
    };
    format!(
        "A {} layover in {} leaves about {} to explore. Options are ranked for {}, \
         a {} budget and a {} pace.",
        format_duration(layover),
        city,
        format_duration(Duration::minutes(usable)),
        interests,
        prefs.budget,
        prefs.pace
    )
}

/// Schedule around the top option, in the layover city's clock time.
fn timeline(context: &PlanContext, top: Option<&TransitOption>) -> Vec<TimelineEntry> {
    let trip = &context.trip;
    let city = context.layover.name();
    let arrival = trip.layover_arrival;
    let departure = trip.outbound_departure;
    let offset = *arrival.offset();

    let mut steps: Vec<(DateTime<FixedOffset>, String)> = vec![(arrival, format!("Land in {city}"))];

    match top {
        Some(option) if option.leaves_airport() => {
            steps.push((
                arrival + Duration::minutes(30),
                "Clear immigration and collect any bags".to_string(),
            ));
            steps.push((
                arrival + Duration::minutes(ARRIVAL_PROCESSING_MINS),
                option.title.clone(),
            ));
            steps.push((
                departure - Duration::minutes(RETURN_BUFFER_MINS),
                "Back at the airport for check-in and security".to_string(),
            ));
        }
        Some(option) => {
            steps.push((
                arrival + Duration::minutes(30),
                "Transfer airside to the departures area".to_string(),
            ));
            steps.push((arrival + Duration::minutes(60), option.title.clone()));
            steps.push((
                departure - Duration::minutes(45),
                "Head to the departure gate".to_string(),
            ));
        }
        None => {}
    }

    // Very short connections squeeze out the middle steps
    steps.retain(|(at, _)| *at >= arrival && *at < departure);
    steps.sort_by_key(|(at, _)| *at);
    steps.push((departure, format!("Flight to {} departs", trip.destination)));

    steps
        .into_iter()
        .map(|(at, activity)| TimelineEntry {
            time: at.with_timezone(&offset).format("%H:%M").to_string(),
            activity,
        })
        .collect()
}

/// Adjust `prefs` for the keywords in `message`; returns what changed.
fn apply_keywords(message: &str, prefs: &mut Preferences) -> Vec<&'static str> {
    let words: Vec<String> = message
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect();
    let any = |pred: fn(&str) -> bool| words.iter().any(|w| pred(w));

    let mut changes = Vec::new();

    if any(|w| w.starts_with("cheap") || w == "budget" || w == "inexpensive") {
        prefs.budget = Budget::Low;
        changes.push("kept costs low");
    }
    if any(|w| w.starts_with("relax") || w == "rest" || w == "restful" || w == "tired") {
        prefs.pace = Pace::Relaxed;
        changes.push("slowed the pace");
    }
    if any(|w| w == "food" || w == "foodie" || w == "eat" || w == "eating") {
        add_interest(prefs, "food");
        changes.push("put food first");
    }
    if any(|w| w.starts_with("museum") || w.starts_with("cultur")) {
        add_interest(prefs, "museums");
        add_interest(prefs, "culture");
        changes.push("focused on museums and culture");
    }

    changes
}

fn add_interest(prefs: &mut Preferences, tag: &str) {
    if !prefs.has_interest(tag) {
        prefs.interests.push(tag.to_string());
    }
}
