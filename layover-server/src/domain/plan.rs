//! Transit recommendations and follow-up chat.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Where a plan came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanSource {
    /// Generated by the language model.
    Llm,
    /// Generated locally because no model is configured.
    Mock,
}

/// One ranked way to spend the layover.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitOption {
    /// 1 is the best match.
    pub rank: u8,
    pub title: String,
    pub description: String,
    /// Time the option takes, door to door from the airport.
    pub duration_mins: i64,
    /// Free-form cost estimate, e.g. "HK$150-300".
    pub estimated_cost: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl TransitOption {
    /// Whether the option involves leaving the airport.
    pub fn leaves_airport(&self) -> bool {
        !self.tags.iter().any(|t| t == "airport")
    }
}

/// A single step of the suggested schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// Local clock time as shown to the traveller, e.g. "14:30".
    pub time: String,
    pub activity: String,
}

/// A complete set of recommendations for one layover.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitPlan {
    pub summary: String,
    pub options: Vec<TransitOption>,
    pub timeline: Vec<TimelineEntry>,
    pub source: PlanSource,
}

impl TransitPlan {
    /// Re-number options 1..n in their current order.
    pub fn rerank(&mut self) {
        for (i, option) in self.options.iter_mut().enumerate() {
            option.rank = u8::try_from(i + 1).unwrap_or(u8::MAX);
        }
    }

    /// The best-ranked option, if any.
    pub fn top_option(&self) -> Option<&TransitOption> {
        self.options.iter().min_by_key(|o| o.rank)
    }
}

/// Who wrote a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// A follow-up chat turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    pub sent_at: DateTime<FixedOffset>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>, sent_at: DateTime<FixedOffset>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
            sent_at,
        }
    }

    pub fn assistant(content: impl Into<String>, sent_at: DateTime<FixedOffset>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
            sent_at,
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == ChatRole::User
    }
}

/// The recommender's answer to a follow-up message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Refinement {
    /// Conversational reply shown in the chat.
    pub reply: String,
    /// The revised plan (unchanged if the message needed no revision).
    pub plan: TransitPlan,
}
