//! Transit recommendations.
//!
//! A [`Recommender`] turns a validated trip into a ranked [`TransitPlan`]
//! and revises it in follow-up chat. [`LlmClient`] asks a language model;
//! [`MockRecommender`] works offline from a fixed catalogue.
//!
//! [`TransitPlan`]: crate::domain::TransitPlan

mod client;
mod error;
mod mock;
mod parse;
mod prompt;
mod provider;
mod types;

pub use client::{LlmClient, LlmConfig};
pub use error::RecommendError;
pub use mock::{ARRIVAL_PROCESSING_MINS, MockRecommender, RETURN_BUFFER_MINS, usable_minutes};
pub use parse::{MAX_OPTIONS, extract_json, parse_plan, parse_refinement};
pub use prompt::{plan_messages, refine_messages};
pub use provider::{PlanContext, Recommender};
pub use types::{ChatCompletionRequest, ChatCompletionResponse, WireMessage};
