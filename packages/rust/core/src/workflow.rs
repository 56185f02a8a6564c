//! The docs → plan → clips chain.
//!
//! [`run_chain`] owns the data threading between stages. It runs over any
//! [`SpeedrunStages`] implementation: [`LocalStages`] calls the generators
//! in-process, while the HTTP client implements the same trait over the
//! individual endpoints. A failing stage aborts the chain; there are no
//! partial results.

use std::future::Future;

use tracing::{info, instrument};

use speedrun_shared::{
    AnalyzeDocsInput, ClipOutline, ClipOutlineInput, DocsInsight, Result, SpeedrunPlan,
    SpeedrunPlanInput, SpeedrunWorkflowInput, WorkflowResult,
};

use crate::clips::clip_outline;
use crate::docs::{DocsAnalyzer, DocsSource, StaticDocsSource};
use crate::plan::generate_speedrun_plan;

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

/// Progress callback for reporting chain status.
pub trait ProgressReporter: Send + Sync {
    /// Called when a stage starts.
    fn phase(&self, name: &str);
    /// Called when the whole chain completes.
    fn done(&self, result: &WorkflowResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn done(&self, _result: &WorkflowResult) {}
}

// ---------------------------------------------------------------------------
// Stages
// ---------------------------------------------------------------------------

/// The three operations the chain is built from.
pub trait SpeedrunStages: Send + Sync {
    fn analyze_docs(
        &self,
        input: &AnalyzeDocsInput,
    ) -> impl Future<Output = Result<DocsInsight>> + Send;

    fn generate_plan(
        &self,
        input: &SpeedrunPlanInput,
    ) -> impl Future<Output = Result<SpeedrunPlan>> + Send;

    fn outline_clips(
        &self,
        input: &ClipOutlineInput,
    ) -> impl Future<Output = Result<ClipOutline>> + Send;
}

/// In-process stages backed by a [`DocsAnalyzer`].
#[derive(Debug, Clone, Default)]
pub struct LocalStages<S = StaticDocsSource> {
    docs: DocsAnalyzer<S>,
}

impl<S: DocsSource> LocalStages<S> {
    pub fn new(source: S) -> Self {
        Self {
            docs: DocsAnalyzer::new(source),
        }
    }
}

impl LocalStages {
    /// Stages over the built-in docs table.
    pub fn builtin() -> Self {
        Self::new(StaticDocsSource)
    }
}

impl<S: DocsSource> SpeedrunStages for LocalStages<S> {
    async fn analyze_docs(&self, input: &AnalyzeDocsInput) -> Result<DocsInsight> {
        self.docs.analyze(input).await
    }

    async fn generate_plan(&self, input: &SpeedrunPlanInput) -> Result<SpeedrunPlan> {
        Ok(generate_speedrun_plan(input))
    }

    async fn outline_clips(&self, input: &ClipOutlineInput) -> Result<ClipOutline> {
        Ok(clip_outline(input))
    }
}

// ---------------------------------------------------------------------------
// Chain
// ---------------------------------------------------------------------------

/// Run docs → plan → clips, threading each stage's output into the next.
#[instrument(skip_all, fields(url = %input.url, product = %input.product_name))]
pub async fn run_chain<T: SpeedrunStages>(
    stages: &T,
    input: &SpeedrunWorkflowInput,
    progress: &dyn ProgressReporter,
) -> Result<WorkflowResult> {
    progress.phase("Analyzing docs");
    let docs = stages
        .analyze_docs(&AnalyzeDocsInput {
            url: input.url.clone(),
        })
        .await?;

    progress.phase("Generating speedrun plan");
    let plan = stages
        .generate_plan(&SpeedrunPlanInput {
            product_name: input.product_name.clone(),
            stack: input.stack.clone(),
            doc_summary: Some(docs.summary.clone()),
            key_concepts: Some(docs.key_concepts.clone()),
            suggested_focus_areas: docs.suggested_focus_areas.clone(),
        })
        .await?;

    progress.phase("Outlining clips");
    let clips = stages
        .outline_clips(&ClipOutlineInput {
            product_name: input.product_name.clone(),
            main_win: input.main_win.clone(),
            main_pain: input.main_pain.clone(),
            plan_steps: Some(plan.steps.clone()),
            doc_summary: Some(docs.summary.clone()),
        })
        .await?;

    let result = WorkflowResult { docs, plan, clips };
    info!(
        steps = result.plan.steps.len(),
        clips = result.clips.clips.len(),
        "speedrun workflow complete"
    );
    progress.done(&result);
    Ok(result)
}

/// Run the chain in-process with the built-in docs table.
pub async fn orchestrate_speedrun_workflow(input: &SpeedrunWorkflowInput) -> Result<WorkflowResult> {
    run_chain(&LocalStages::builtin(), input, &SilentProgress).await
}
