//! Speedrun plan generation.
//!
//! A plan starts from the first template whose matcher accepts the input
//! (declaration order decides ties), weaves in steps derived from the docs
//! insight, and is clamped to between [`MIN_STEPS`] and [`MAX_STEPS`] steps.

use tracing::{debug, instrument};

use speedrun_shared::{SpeedrunPlan, SpeedrunPlanInput};

use crate::text::ellipsize;

/// Fewest steps a plan may contain.
pub const MIN_STEPS: usize = 4;

/// Most steps a plan may contain.
pub const MAX_STEPS: usize = 6;

/// Doc summaries quoted inside a step are cut to this many characters.
const SUMMARY_EXCERPT_LEN: usize = 140;

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

/// A canned step list guarded by a matcher over the input.
pub struct Template {
    pub id: &'static str,
    matcher: fn(&SpeedrunPlanInput) -> bool,
    pub steps: &'static [&'static str],
    pub notes: Option<&'static str>,
}

/// Templates in precedence order; the first match wins.
pub const TEMPLATES: &[Template] = &[
    Template {
        id: "nextjs",
        matcher: is_nextjs,
        steps: &[
            "Skim product launch notes + App Router recommendations",
            "Create Next.js (TypeScript) project with Turbopack dev server",
            "Model data/contracts and scaffold API route or server action",
            "Embed the product SDK inside a Route Handler + UI surface",
            "Ship stretch goal: streaming UI or deploy to Vercel preview",
        ],
        notes: Some("Lean on Next.js App Router conventions and Vercel preview deploys."),
    },
    Template {
        id: "node-cli",
        matcher: is_node,
        steps: &[
            "Review product CLI/server quickstart & auth setup",
            "Initialize Node project with tsx + dotenv",
            "Stand up minimal HTTP endpoint or CLI command",
            "Demonstrate one hero workflow end-to-end",
            "Add observability or config tweak as stretch goal",
        ],
        notes: Some("Favor tsx + nodemon for quick iterations; capture logs for narration."),
    },
    Template {
        id: "xmcp",
        matcher: is_xmcp,
        steps: &[
            "Scan XMCP docs & sample MCP servers",
            "Bootstrap create-xmcp-app with HTTP transport",
            "Define schema-driven tool handlers for the key workflow",
            "Run through a mock MCP invocation with captured output",
            "Add extra tool or resource plus README polish",
        ],
        notes: Some("Highlight schema-driven tooling and how AI clients call MCP endpoints."),
    },
];

fn is_nextjs(input: &SpeedrunPlanInput) -> bool {
    input.stack.to_lowercase().contains("next")
}

fn is_node(input: &SpeedrunPlanInput) -> bool {
    let stack = input.stack.to_lowercase();
    stack.contains("node") || stack.contains("express")
}

fn is_xmcp(input: &SpeedrunPlanInput) -> bool {
    input.product_name.to_lowercase().contains("xmcp")
}

/// Pick the first template whose matcher accepts `input`.
pub fn select_template(input: &SpeedrunPlanInput) -> Option<&'static Template> {
    TEMPLATES.iter().find(|template| (template.matcher)(input))
}

/// Generic steps used when no template matches and as clamp filler.
fn baseline_steps(input: &SpeedrunPlanInput) -> Vec<String> {
    let product = &input.product_name;
    let stack = &input.stack;
    vec![
        format!("Scan {product} docs, quickstart, and release notes"),
        format!("Bootstrap a {stack} sandbox with linting + env ready"),
        format!("Ship the simplest {product} hello-world integration"),
        format!("Highlight one signature {product} capability end-to-end"),
        "Add a stretch goal, test, or deployment polish".to_string(),
    ]
}

// ---------------------------------------------------------------------------
// Plan assembly
// ---------------------------------------------------------------------------

/// Build a speedrun plan for `input`.
#[instrument(skip_all, fields(product = %input.product_name, stack = %input.stack))]
pub fn generate_speedrun_plan(input: &SpeedrunPlanInput) -> SpeedrunPlan {
    let template = select_template(input);
    debug!(template = template.map_or("generic", |t| t.id), "plan template selected");

    let base = match template {
        Some(template) => template.steps.iter().map(|s| s.to_string()).collect(),
        None => baseline_steps(input),
    };

    let candidates = weave_doc_insights(base, &doc_context_steps(input));
    let steps = clamp_steps(input, candidates);
    let notes = build_notes(input, template.and_then(|t| t.notes));

    SpeedrunPlan { steps, notes }
}

/// Up to three steps derived from the docs insight.
fn doc_context_steps(input: &SpeedrunPlanInput) -> Vec<String> {
    let mut steps = Vec::new();

    if let Some(summary) = &input.doc_summary {
        steps.push(format!(
            "Narrate the doc takeaway: {}",
            ellipsize(summary, SUMMARY_EXCERPT_LEN)
        ));
    }

    if let Some(concepts) = non_empty(&input.key_concepts) {
        let highlights = concepts.iter().take(2).cloned().collect::<Vec<_>>().join(", ");
        steps.push(format!(
            "Thread in the key concepts ({highlights}) while building."
        ));
    }

    if let Some(focus) = non_empty(&input.suggested_focus_areas).and_then(|areas| areas.first()) {
        steps.push(format!(
            "Call out why {focus} matters before the demo outro."
        ));
    }

    steps
}

/// First insight goes to the front; insight `i > 0` lands at `min(2 + i, len)`.
fn weave_doc_insights(mut steps: Vec<String>, insights: &[String]) -> Vec<String> {
    for (index, insight) in insights.iter().enumerate() {
        let at = if index == 0 {
            0
        } else {
            (2 + index).min(steps.len())
        };
        steps.insert(at, insight.clone());
    }
    steps
}

/// Drop blank steps, pad from the baseline up to [`MIN_STEPS`], cut to [`MAX_STEPS`].
fn clamp_steps(input: &SpeedrunPlanInput, candidates: Vec<String>) -> Vec<String> {
    let mut steps: Vec<String> = candidates
        .into_iter()
        .map(|step| step.trim().to_string())
        .filter(|step| !step.is_empty())
        .collect();

    let mut filler = baseline_steps(input).into_iter();
    while steps.len() < MIN_STEPS {
        match filler.next() {
            Some(step) => steps.push(step),
            None => break,
        }
    }

    steps.truncate(MAX_STEPS);
    steps
}

fn build_notes(input: &SpeedrunPlanInput, template_notes: Option<&str>) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();

    if let Some(notes) = template_notes {
        parts.push(notes.to_string());
    }
    if let Some(concepts) = non_empty(&input.key_concepts) {
        let listed = concepts.iter().take(3).cloned().collect::<Vec<_>>().join(", ");
        parts.push(format!("Hit the docs concepts: {listed}."));
    }
    if let Some(areas) = non_empty(&input.suggested_focus_areas) {
        let listed = areas.iter().take(2).cloned().collect::<Vec<_>>().join(" & ");
        parts.push(format!("Keep the narrative focused on {listed}."));
    }

    (!parts.is_empty()).then(|| parts.join(" "))
}

fn non_empty(list: &Option<Vec<String>>) -> Option<&Vec<String>> {
    list.as_ref().filter(|items| !items.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(product: &str, stack: &str) -> SpeedrunPlanInput {
        SpeedrunPlanInput {
            product_name: product.into(),
            stack: stack.into(),
            ..Default::default()
        }
    }

    fn with_docs(mut input: SpeedrunPlanInput) -> SpeedrunPlanInput {
        input.doc_summary = Some("Acme docs explain tokens.".into());
        input.key_concepts = Some(vec!["Tokens".into(), "Scopes".into(), "Webhooks".into(), "Quotas".into()]);
        input.suggested_focus_areas = Some(vec!["Webhook retries".into(), "Scopes".into(), "Limits".into()]);
        input
    }

    fn template_id(input: &SpeedrunPlanInput) -> &'static str {
        select_template(input).map_or("generic", |t| t.id)
    }

    #[test]
    fn template_precedence_is_declaration_order() {
        assert_eq!(template_id(&input("Acme", "Next.js + Node")), "nextjs");
        assert_eq!(template_id(&input("XMCP", "Express API")), "node-cli");
        assert_eq!(template_id(&input("xmcp server", "Rust")), "xmcp");
        assert_eq!(template_id(&input("Acme", "Go + htmx")), "generic");
    }

    #[test]
    fn template_steps_without_docs() {
        let plan = generate_speedrun_plan(&input(
            "Supabase Studio",
            "Next.js App Router + TypeScript + Vercel Preview + Supabase local dev",
        ));
        assert_eq!(plan.steps.len(), 5);
        assert_eq!(plan.steps[0], "Skim product launch notes + App Router recommendations");
        assert_eq!(
            plan.notes.as_deref(),
            Some("Lean on Next.js App Router conventions and Vercel preview deploys.")
        );
    }

    #[test]
    fn generic_plan_uses_baseline_and_has_no_notes() {
        let plan = generate_speedrun_plan(&input("Acme", "Go"));
        assert_eq!(plan.steps.len(), 5);
        assert_eq!(plan.steps[0], "Scan Acme docs, quickstart, and release notes");
        assert_eq!(plan.steps[1], "Bootstrap a Go sandbox with linting + env ready");
        assert!(plan.notes.is_none());
    }

    #[test]
    fn doc_insights_are_woven_and_clamped() {
        let plan = generate_speedrun_plan(&with_docs(input("Acme", "Go")));
        assert_eq!(plan.steps.len(), MAX_STEPS);
        assert_eq!(plan.steps[0], "Narrate the doc takeaway: Acme docs explain tokens.");
        assert_eq!(plan.steps[1], "Scan Acme docs, quickstart, and release notes");
        assert_eq!(plan.steps[2], "Bootstrap a Go sandbox with linting + env ready");
        assert_eq!(plan.steps[3], "Thread in the key concepts (Tokens, Scopes) while building.");
        assert_eq!(plan.steps[4], "Call out why Webhook retries matters before the demo outro.");
        assert_eq!(plan.steps[5], "Ship the simplest Acme hello-world integration");
    }

    #[test]
    fn notes_combine_template_concepts_and_focus() {
        let plan = generate_speedrun_plan(&with_docs(input("Acme", "express")));
        assert_eq!(
            plan.notes.as_deref(),
            Some(
                "Favor tsx + nodemon for quick iterations; capture logs for narration. \
                 Hit the docs concepts: Tokens, Scopes, Webhooks. \
                 Keep the narrative focused on Webhook retries & Scopes."
            )
        );
    }

    #[test]
    fn generic_notes_skip_missing_parts() {
        let mut plan_input = input("Acme", "Go");
        plan_input.suggested_focus_areas = Some(vec!["Limits".into()]);
        let plan = generate_speedrun_plan(&plan_input);
        assert_eq!(plan.notes.as_deref(), Some("Keep the narrative focused on Limits."));
    }

    #[test]
    fn long_summary_is_ellipsized() {
        let mut plan_input = input("Acme", "Go");
        plan_input.doc_summary = Some("x".repeat(400));
        let plan = generate_speedrun_plan(&plan_input);
        let first = &plan.steps[0];
        assert!(first.ends_with("..."));
        assert_eq!(first.len(), "Narrate the doc takeaway: ".len() + 140);
    }

    #[test]
    fn single_insight_still_inserts_at_front() {
        let mut plan_input = input("Acme", "Next.js");
        plan_input.suggested_focus_areas = Some(vec!["Caching".into()]);
        let plan = generate_speedrun_plan(&plan_input);
        assert_eq!(plan.steps[0], "Call out why Caching matters before the demo outro.");
        assert_eq!(plan.steps.len(), 6);
    }

    #[test]
    fn clamp_pads_short_lists_from_baseline() {
        let plan_input = input("Acme", "Go");
        let steps = clamp_steps(&plan_input, vec!["  only step ".into(), "   ".into()]);
        assert_eq!(steps.len(), MIN_STEPS);
        assert_eq!(steps[0], "only step");
        assert_eq!(steps[1], "Scan Acme docs, quickstart, and release notes");

        let steps = clamp_steps(&plan_input, Vec::new());
        assert_eq!(steps.len(), MIN_STEPS);
    }

    #[test]
    fn weave_positions_follow_insert_rule() {
        let base: Vec<String> = vec!["a".into(), "b".into()];
        let insights: Vec<String> = vec!["i0".into(), "i1".into(), "i2".into()];
        let woven = weave_doc_insights(base, &insights);
        assert_eq!(woven, ["i0", "a", "b", "i1", "i2"]);
    }

    #[test]
    fn step_count_always_within_bounds() {
        let stacks = ["Next.js", "node", "Rust", "Express + Next", ""];
        for stack in stacks {
            for plan_input in [input("xmcp", stack), with_docs(input("Acme", stack))] {
                let plan = generate_speedrun_plan(&plan_input);
                assert!((MIN_STEPS..=MAX_STEPS).contains(&plan.steps.len()), "{stack}");
            }
        }
    }
}
