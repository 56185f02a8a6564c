//! Request and response records for the speedrun operations.
//!
//! All records are plain values that live for a single request. Field names
//! serialize in camelCase to match the HTTP API.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// analyzeDocs
// ---------------------------------------------------------------------------

/// Input for `analyzeDocs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeDocsInput {
    /// Documentation URL to summarize.
    pub url: String,
}

/// Structured summary of a documentation site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocsInsight {
    /// One or two sentences describing what the docs cover.
    pub summary: String,
    /// Concepts worth learning before the speedrun.
    pub key_concepts: Vec<String>,
    /// Areas to focus the episode narrative on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_focus_areas: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// generateSpeedrunPlan
// ---------------------------------------------------------------------------

/// Input for `generateSpeedrunPlan`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeedrunPlanInput {
    /// Name of the devtool or product being featured.
    pub product_name: String,
    /// Primary stack for the episode (e.g., "Next.js + TypeScript").
    pub stack: String,
    /// Summary from `analyzeDocs` to weave into the plan.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_summary: Option<String>,
    /// Key concepts surfaced by `analyzeDocs`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_concepts: Option<Vec<String>>,
    /// Focus areas pulled from `analyzeDocs`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_focus_areas: Option<Vec<String>>,
}

/// An ordered speedrun outline. Always holds between 4 and 6 steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeedrunPlan {
    pub steps: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// ---------------------------------------------------------------------------
// clipOutline
// ---------------------------------------------------------------------------

/// Input for `clipOutline`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipOutlineInput {
    /// Name of the product the clip references.
    pub product_name: String,
    /// Primary win achieved during the session.
    pub main_win: String,
    /// Key pain point the product solves.
    pub main_pain: String,
    /// Steps from the speedrun plan to reference in clips.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_steps: Option<Vec<String>>,
    /// Docs insight to echo inside clip descriptions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_summary: Option<String>,
}

/// A short-form clip hook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipIdea {
    pub title: String,
    pub hook: String,
    pub description: String,
}

/// Output of `clipOutline`: at most five ideas with distinct titles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipOutline {
    pub clips: Vec<ClipIdea>,
}

// ---------------------------------------------------------------------------
// orchestrateSpeedrunWorkflow
// ---------------------------------------------------------------------------

/// Input for the full docs → plan → clips chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeedrunWorkflowInput {
    pub url: String,
    pub product_name: String,
    pub stack: String,
    pub main_win: String,
    pub main_pain: String,
}

/// Aggregate of the three stage outputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowResult {
    pub docs: DocsInsight,
    pub plan: SpeedrunPlan,
    pub clips: ClipOutline,
}

// ---------------------------------------------------------------------------
// greet
// ---------------------------------------------------------------------------

/// Input for `greet`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GreetInput {
    pub name: String,
}

/// Output of `greet`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Greeting {
    pub message: String,
}
