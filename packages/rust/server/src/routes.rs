//! `/api` routes. Every POST body is validated before any generation runs.

use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;

use speedrun_core::{LocalStages, SilentProgress, SpeedrunStages, greet, run_chain, tool_catalog};
use speedrun_shared::{
    AnalyzeDocsInput, ClipOutline, ClipOutlineInput, DocsInsight, GreetInput, Greeting,
    SpeedrunPlan, SpeedrunPlanInput, SpeedrunWorkflowInput, ValidatedRequest, ValidationErrors,
    WorkflowResult,
};

use crate::error::ApiError;

/// Shared handler state.
#[derive(Clone, Default)]
pub struct AppState {
    stages: Arc<LocalStages>,
}

/// Build the `/api` router.
pub fn api_router() -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/tools", get(tools))
        .route("/api/greet", post(greet_handler))
        .route("/api/speedrun-plan", post(speedrun_plan))
        .route("/api/clip-outline", post(clip_outline))
        .route("/api/analyze-docs", post(analyze_docs))
        .route("/api/workflow", post(workflow))
        .with_state(AppState::default())
}

/// Validate a JSON body into a typed input.
fn validated<T: ValidatedRequest>(
    body: Result<Json<Value>, JsonRejection>,
) -> Result<T, ApiError> {
    match body {
        Ok(Json(value)) => Ok(T::from_json(&value)?),
        Err(rejection) => {
            let mut errors = ValidationErrors::default();
            errors.add_form(rejection.body_text());
            Err(errors.into())
        }
    }
}

async fn health() -> Json<Value> {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn tools() -> Json<Value> {
    Json(serde_json::json!({ "tools": tool_catalog() }))
}

async fn greet_handler(
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Greeting>, ApiError> {
    let input: GreetInput = validated(body)?;
    Ok(Json(greet(&input)))
}

async fn speedrun_plan(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SpeedrunPlan>, ApiError> {
    let input: SpeedrunPlanInput = validated(body)?;
    Ok(Json(state.stages.generate_plan(&input).await?))
}

async fn clip_outline(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ClipOutline>, ApiError> {
    let input: ClipOutlineInput = validated(body)?;
    Ok(Json(state.stages.outline_clips(&input).await?))
}

async fn analyze_docs(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<DocsInsight>, ApiError> {
    let input: AnalyzeDocsInput = validated(body)?;
    Ok(Json(state.stages.analyze_docs(&input).await?))
}

async fn workflow(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<WorkflowResult>, ApiError> {
    let input: SpeedrunWorkflowInput = validated(body)?;
    let result = run_chain(state.stages.as_ref(), &input, &SilentProgress).await?;
    Ok(Json(result))
}
