//! HTTP client for a running speedrun server.
//!
//! [`SpeedrunClient`] calls the individual `/api` endpoints and implements
//! [`SpeedrunStages`] over them. [`SpeedrunClient::run_workflow`] prefers the
//! server-side `/api/workflow` endpoint and, when the server reports it as
//! missing (HTTP 404), runs the same chain itself through the three stage
//! endpoints.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

use speedrun_core::{ProgressReporter, SpeedrunStages, run_chain};
use speedrun_shared::{
    AnalyzeDocsInput, ClientConfig, ClipOutline, ClipOutlineInput, DocsInsight, GreetInput,
    Greeting, Result, SpeedrunError, SpeedrunPlan, SpeedrunPlanInput, SpeedrunWorkflowInput,
    WorkflowResult,
};

/// User-Agent string for API requests.
const USER_AGENT: &str = concat!("SpeedrunOrchestrator/", env!("CARGO_PKG_VERSION"));

pub const GREET_PATH: &str = "/api/greet";
pub const PLAN_PATH: &str = "/api/speedrun-plan";
pub const CLIP_OUTLINE_PATH: &str = "/api/clip-outline";
pub const ANALYZE_DOCS_PATH: &str = "/api/analyze-docs";
pub const WORKFLOW_PATH: &str = "/api/workflow";

/// JSON client for the speedrun HTTP API.
#[derive(Debug, Clone)]
pub struct SpeedrunClient {
    http: Client,
    base_url: String,
}

impl SpeedrunClient {
    /// Build a client from the `[client]` config section.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Url::parse(&config.base_url).map_err(|e| {
            SpeedrunError::config(format!("invalid base_url '{}': {e}", config.base_url))
        })?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SpeedrunError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn greet(&self, input: &GreetInput) -> Result<Greeting> {
        self.post_json(GREET_PATH, input).await
    }

    /// Run the workflow on the server, falling back to client-side chaining on 404.
    #[instrument(skip_all, fields(base_url = %self.base_url))]
    pub async fn run_workflow(
        &self,
        input: &SpeedrunWorkflowInput,
        progress: &dyn ProgressReporter,
    ) -> Result<WorkflowResult> {
        match self.post_json(WORKFLOW_PATH, input).await {
            Ok(result) => {
                progress.done(&result);
                Ok(result)
            }
            Err(err) if err.is_not_found() => {
                warn!("workflow endpoint missing, falling back to client orchestration");
                run_chain(self, input, progress).await
            }
            Err(err) => Err(err),
        }
    }

    async fn post_json<I, O>(&self, path: &str, payload: &I) -> Result<O>
    where
        I: Serialize + Sync + ?Sized,
        O: DeserializeOwned,
    {
        let url = format!("{}{path}", self.base_url);
        debug!(%url, "POST");

        let response = self
            .http
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| SpeedrunError::Network(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SpeedrunError::Http {
                status: status.as_u16(),
                message: error_message(status.as_u16(), &body),
            });
        }

        response
            .json::<O>()
            .await
            .map_err(|e| SpeedrunError::Network(format!("{url}: failed to decode response: {e}")))
    }
}

impl SpeedrunStages for SpeedrunClient {
    async fn analyze_docs(&self, input: &AnalyzeDocsInput) -> Result<DocsInsight> {
        self.post_json(ANALYZE_DOCS_PATH, input).await
    }

    async fn generate_plan(&self, input: &SpeedrunPlanInput) -> Result<SpeedrunPlan> {
        self.post_json(PLAN_PATH, input).await
    }

    async fn outline_clips(&self, input: &ClipOutlineInput) -> Result<ClipOutline> {
        self.post_json(CLIP_OUTLINE_PATH, input).await
    }
}

/// Prefer a JSON `error` field, then the raw body, then a generic status message.
fn error_message(status: u16, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = json.get("error").and_then(|e| e.as_str()) {
            if !message.is_empty() {
                return message.to_string();
            }
        }
        return format!("Request failed (HTTP {status})");
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("Request failed (HTTP {status})")
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use speedrun_core::{SilentProgress, clip_outline, generate_speedrun_plan};
    use speedrun_core::docs::lookup_known;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(server: &MockServer) -> SpeedrunClient {
        SpeedrunClient::new(&ClientConfig {
            base_url: server.uri(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    fn episode() -> SpeedrunWorkflowInput {
        SpeedrunWorkflowInput {
            url: "https://xmcp.dev/docs".into(),
            product_name: "XMCP Launch Episode".into(),
            stack: "Next.js App Router + TypeScript + MCP server over HTTP".into(),
            main_win: "Shipped a schema-first MCP server with a hero tool in record time.".into(),
            main_pain: "Context-starved demos that ignore what the docs recommend.".into(),
        }
    }

    #[test]
    fn error_message_prefers_json_error() {
        assert_eq!(error_message(500, r#"{"error":"boom"}"#), "boom");
        assert_eq!(error_message(404, "  Cannot POST /api/workflow \n"), "Cannot POST /api/workflow");
        assert_eq!(error_message(502, ""), "Request failed (HTTP 502)");
        assert_eq!(error_message(400, r#"{"details":{}}"#), "Request failed (HTTP 400)");
    }

    #[test]
    fn invalid_base_url_is_a_config_error() {
        let err = SpeedrunClient::new(&ClientConfig {
            base_url: "not a url".into(),
            timeout_secs: 5,
        })
        .unwrap_err();
        assert!(matches!(err, SpeedrunError::Config { .. }));
    }

    #[tokio::test]
    async fn workflow_endpoint_is_used_when_present() {
        let server = MockServer::start().await;
        let expected = speedrun_core::orchestrate_speedrun_workflow(&episode()).await.unwrap();

        Mock::given(method("POST"))
            .and(path(WORKFLOW_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(&expected))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(ANALYZE_DOCS_PATH))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let result = client_for(&server)
            .run_workflow(&episode(), &SilentProgress)
            .await
            .unwrap();
        assert_eq!(result, expected);
    }

    #[tokio::test]
    async fn missing_workflow_endpoint_falls_back_to_stages() {
        let server = MockServer::start().await;
        let input = episode();

        let docs = lookup_known(&input.url).unwrap();
        let plan = generate_speedrun_plan(&SpeedrunPlanInput {
            product_name: input.product_name.clone(),
            stack: input.stack.clone(),
            doc_summary: Some(docs.summary.clone()),
            key_concepts: Some(docs.key_concepts.clone()),
            suggested_focus_areas: docs.suggested_focus_areas.clone(),
        });
        let clips = clip_outline(&ClipOutlineInput {
            product_name: input.product_name.clone(),
            main_win: input.main_win.clone(),
            main_pain: input.main_pain.clone(),
            plan_steps: Some(plan.steps.clone()),
            doc_summary: Some(docs.summary.clone()),
        });

        Mock::given(method("POST"))
            .and(path(WORKFLOW_PATH))
            .respond_with(ResponseTemplate::new(404).set_body_string("Cannot POST /api/workflow"))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(ANALYZE_DOCS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(&docs))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(PLAN_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(&plan))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(CLIP_OUTLINE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(&clips))
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server)
            .run_workflow(&input, &SilentProgress)
            .await
            .unwrap();
        assert_eq!(result.docs, docs);
        assert_eq!(result.plan, plan);
        assert_eq!(result.clips, clips);

        // The plan request carries the docs insight; the clip request carries the plan steps.
        let requests = server.received_requests().await.unwrap();
        let plan_request = requests
            .iter()
            .find(|r| r.url.path() == PLAN_PATH)
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&plan_request.body).unwrap();
        assert_eq!(body["docSummary"], docs.summary.as_str());
        assert_eq!(body["keyConcepts"].as_array().map(Vec::len), Some(5));

        let clip_request = requests
            .iter()
            .find(|r| r.url.path() == CLIP_OUTLINE_PATH)
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&clip_request.body).unwrap();
        assert_eq!(body["planSteps"].as_array().map(Vec::len), Some(plan.steps.len()));
    }

    #[tokio::test]
    async fn server_errors_do_not_trigger_fallback() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(WORKFLOW_PATH))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(serde_json::json!({ "error": "boom" })),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(ANALYZE_DOCS_PATH))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .run_workflow(&episode(), &SilentProgress)
            .await
            .unwrap_err();
        match err {
            SpeedrunError::Http { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("expected Http error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn failing_stage_aborts_fallback_chain() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(WORKFLOW_PATH))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(ANALYZE_DOCS_PATH))
            .respond_with(ResponseTemplate::new(400).set_body_json(
                serde_json::json!({ "error": "Invalid input", "details": {} }),
            ))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(PLAN_PATH))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .run_workflow(&episode(), &SilentProgress)
            .await
            .unwrap_err();
        assert!(matches!(err, SpeedrunError::Http { status: 400, .. }));
        assert_eq!(err.to_string(), "Invalid input");
    }
}
