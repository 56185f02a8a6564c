//! CLI command definitions, routing, and tracing setup.

use std::time::Duration;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use serde_json::{Value, json};
use speedrun_client::SpeedrunClient;
use speedrun_core::{
    LocalStages, ProgressReporter, analyze_docs, clip_outline, generate_speedrun_plan, greet,
    run_chain, tool_catalog,
};
use speedrun_shared::{
    AnalyzeDocsInput, AppConfig, ClipOutlineInput, GreetInput, SpeedrunPlanInput,
    SpeedrunWorkflowInput, ValidatedRequest, WorkflowResult, init_config, load_config,
};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Speedrun Orchestrator: docs in, episode plan and clip hooks out.
#[derive(Parser)]
#[command(
    name = "speedrun",
    version,
    about = "Plan devtool speedrun episodes from a docs URL and outline short-form clips.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Serve the JSON API and the static UI.
    Serve {
        /// Interface to bind.
        #[arg(long, env = "UI_HOST")]
        host: Option<String>,

        /// Port to bind.
        #[arg(long, env = "UI_PORT")]
        port: Option<u16>,

        /// Directory with the static UI.
        #[arg(long)]
        static_dir: Option<String>,
    },

    /// Summarize a docs page into key concepts and focus areas.
    Docs {
        /// Documentation URL.
        url: String,
    },

    /// Generate a speedrun plan for a product and stack.
    Plan {
        #[arg(long)]
        product: String,

        #[arg(long)]
        stack: String,

        /// Docs summary to weave into the plan.
        #[arg(long)]
        doc_summary: Option<String>,

        /// Key concept from the docs (repeatable).
        #[arg(long = "concept")]
        concepts: Vec<String>,

        /// Focus area from the docs (repeatable).
        #[arg(long = "focus")]
        focus_areas: Vec<String>,
    },

    /// Outline short-form clips for an episode.
    Clips {
        #[arg(long)]
        product: String,

        /// The episode's main win.
        #[arg(long)]
        win: String,

        /// The pain the episode resolves.
        #[arg(long)]
        pain: String,

        /// Plan step (repeatable).
        #[arg(long = "step")]
        steps: Vec<String>,

        #[arg(long)]
        doc_summary: Option<String>,
    },

    /// Run docs, plan, and clips as one workflow.
    Workflow {
        #[arg(long)]
        url: String,

        #[arg(long)]
        product: String,

        #[arg(long)]
        stack: String,

        #[arg(long)]
        win: String,

        #[arg(long)]
        pain: String,

        /// Run against a server instead of in-process.
        #[arg(long)]
        remote: bool,

        /// Server base URL (implies --remote; defaults to the config value).
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Say hello.
    Greet {
        name: String,
    },

    /// List the exposed tools and their hints.
    Tools,

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "speedrun=info,tower_http=info",
        1 => "speedrun=debug,tower_http=debug",
        _ => "speedrun=trace,tower_http=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // Logs go to stderr so JSON results on stdout stay pipeable.
    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Serve {
            host,
            port,
            static_dir,
        } => cmd_serve(host, port, static_dir).await,
        Command::Docs { url } => cmd_docs(&url).await,
        Command::Plan {
            product,
            stack,
            doc_summary,
            concepts,
            focus_areas,
        } => cmd_plan(json!({
            "productName": product,
            "stack": stack,
            "docSummary": doc_summary,
            "keyConcepts": optional_list(concepts),
            "suggestedFocusAreas": optional_list(focus_areas),
        })),
        Command::Clips {
            product,
            win,
            pain,
            steps,
            doc_summary,
        } => cmd_clips(json!({
            "productName": product,
            "mainWin": win,
            "mainPain": pain,
            "planSteps": optional_list(steps),
            "docSummary": doc_summary,
        })),
        Command::Workflow {
            url,
            product,
            stack,
            win,
            pain,
            remote,
            base_url,
        } => {
            let body = json!({
                "url": url,
                "productName": product,
                "stack": stack,
                "mainWin": win,
                "mainPain": pain,
            });
            if remote || base_url.is_some() {
                cmd_workflow_remote(body, base_url).await
            } else {
                cmd_workflow_local(body).await
            }
        }
        Command::Greet { name } => {
            let input: GreetInput = parse_input(json!({ "name": name }))?;
            print_json(&greet(&input))
        }
        Command::Tools => print_json(&tool_catalog()),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

/// Validate an argument bundle the same way the HTTP API validates bodies.
fn parse_input<T: ValidatedRequest>(body: Value) -> Result<T> {
    T::from_json(&body).map_err(|errors| eyre!("invalid input: {errors}"))
}

/// Unset repeatable flags mean "not provided", not an empty list.
fn optional_list(items: Vec<String>) -> Value {
    if items.is_empty() {
        Value::Null
    } else {
        json!(items)
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_serve(
    host: Option<String>,
    port: Option<u16>,
    static_dir: Option<String>,
) -> Result<()> {
    let mut server = load_config()?.server;
    if let Some(host) = host {
        server.host = host;
    }
    if let Some(port) = port {
        server.port = port;
    }
    if static_dir.is_some() {
        server.static_dir = static_dir;
    }

    info!(host = %server.host, port = server.port, "starting speedrun server");
    speedrun_server::run_server(&server).await?;
    Ok(())
}

async fn cmd_docs(url: &str) -> Result<()> {
    let input: AnalyzeDocsInput = parse_input(json!({ "url": url }))?;
    let insight = analyze_docs(&input).await?;
    print_json(&insight)
}

fn cmd_plan(body: Value) -> Result<()> {
    let input: SpeedrunPlanInput = parse_input(body)?;
    print_json(&generate_speedrun_plan(&input))
}

fn cmd_clips(body: Value) -> Result<()> {
    let input: ClipOutlineInput = parse_input(body)?;
    print_json(&clip_outline(&input))
}

async fn cmd_workflow_local(body: Value) -> Result<()> {
    let input: SpeedrunWorkflowInput = parse_input(body)?;
    info!(url = %input.url, product = %input.product_name, "running workflow locally");

    let reporter = CliProgress::new();
    let result = run_chain(&LocalStages::builtin(), &input, &reporter).await;
    reporter.finish(&result);
    print_json(&result?)
}

async fn cmd_workflow_remote(body: Value, base_url: Option<String>) -> Result<()> {
    let input: SpeedrunWorkflowInput = parse_input(body)?;

    let mut client_config = load_config()?.client;
    if let Some(base_url) = base_url {
        client_config.base_url = base_url;
    }
    let client = SpeedrunClient::new(&client_config)?;
    info!(base_url = client.base_url(), "running workflow against server");

    let reporter = CliProgress::new();
    let result = client.run_workflow(&input, &reporter).await;
    reporter.finish(&result);
    print_json(&result?)
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// Spinner that shows the current workflow phase.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(style);
        spinner.enable_steady_tick(Duration::from_millis(80));
        Self { spinner }
    }

    /// `done` only fires on success; clear the spinner on failure too.
    fn finish<T, E>(&self, result: &std::result::Result<T, E>) {
        if result.is_err() {
            self.spinner.finish_and_clear();
        }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(format!("{name}..."));
    }

    fn done(&self, result: &WorkflowResult) {
        self.spinner.finish_and_clear();
        info!(
            steps = result.plan.steps.len(),
            clips = result.clips.clips.len(),
            "workflow finished"
        );
    }
}
