//! Turning model replies into plans.
//!
//! Models are asked for bare JSON but often wrap it in prose or code
//! fences, so the outermost object is cut out before parsing.

use serde::Deserialize;

use crate::domain::{PlanSource, Refinement, TimelineEntry, TransitOption, TransitPlan};

use super::error::RecommendError;

/// Most options kept from a reply.
pub const MAX_OPTIONS: usize = 4;

#[derive(Debug, Deserialize)]
struct PlanReply {
    #[serde(default)]
    summary: String,
    #[serde(default)]
    options: Vec<OptionReply>,
    #[serde(default)]
    timeline: Vec<TimelineEntry>,
}

#[derive(Debug, Deserialize)]
struct OptionReply {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default, alias = "duration_minutes")]
    duration_mins: i64,
    #[serde(default)]
    estimated_cost: String,
    #[serde(default)]
    tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RefineReply {
    reply: String,
    #[serde(default)]
    plan: Option<PlanReply>,
}

/// The outermost `{...}` span of `content`, if any.
///
/// ```
/// use layover_server::recommend::extract_json;
///
/// assert_eq!(extract_json("```json\n{\"a\": 1}\n```"), Some("{\"a\": 1}"));
/// assert_eq!(extract_json("no json here"), None);
/// ```
pub fn extract_json(content: &str) -> Option<&str> {
    let start = content.find('{')?;
    let end = content.rfind('}')?;
    (end > start).then(|| &content[start..=end])
}

/// Parse a first recommendation.
pub fn parse_plan(content: &str) -> Result<TransitPlan, RecommendError> {
    let reply: PlanReply = parse_json(content)?;
    into_plan(reply)
}

/// Parse a refinement; a reply without a plan keeps `current`.
pub fn parse_refinement(
    content: &str,
    current: &TransitPlan,
) -> Result<Refinement, RecommendError> {
    let reply: RefineReply = parse_json(content)?;

    let plan = match reply.plan {
        Some(plan) if !plan.options.is_empty() => into_plan(plan)?,
        _ => current.clone(),
    };

    Ok(Refinement {
        reply: reply.reply,
        plan,
    })
}

fn parse_json<'de, T: Deserialize<'de>>(content: &'de str) -> Result<T, RecommendError> {
    let json = extract_json(content).ok_or_else(|| RecommendError::Json {
        message: "reply contains no JSON object".to_string(),
        body: Some(content.chars().take(500).collect()),
    })?;

    serde_json::from_str(json).map_err(|e| RecommendError::Json {
        message: e.to_string(),
        body: Some(json.chars().take(500).collect()),
    })
}

fn into_plan(reply: PlanReply) -> Result<TransitPlan, RecommendError> {
    if reply.options.is_empty() {
        return Err(RecommendError::EmptyReply);
    }

    let options = reply
        .options
        .into_iter()
        .take(MAX_OPTIONS)
        .map(|o| TransitOption {
            rank: 0,
            title: o.title,
            description: o.description,
            duration_mins: o.duration_mins.max(0),
            estimated_cost: o.estimated_cost,
            tags: o.tags.into_iter().map(|t| t.to_lowercase()).collect(),
        })
        .collect();

    let mut plan = TransitPlan {
        summary: reply.summary,
        options,
        timeline: reply.timeline,
        source: PlanSource::Llm,
    };
    plan.rerank();
    Ok(plan)
}
