//! Shared types, error model, validation, and configuration for the speedrun orchestrator.
//!
//! This crate is the foundation depended on by all other speedrun crates.
//! It provides:
//! - [`SpeedrunError`]: the unified error type
//! - Request/response records ([`DocsInsight`], [`SpeedrunPlan`], [`ClipIdea`], [`WorkflowResult`])
//! - Request validation ([`ValidatedRequest`], [`ValidationErrors`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;
pub mod validate;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, ClientConfig, ServerConfig, config_dir, config_file_path, init_config, load_config,
    load_config_from,
};
pub use error::{Result, SpeedrunError};
pub use types::{
    AnalyzeDocsInput, ClipIdea, ClipOutline, ClipOutlineInput, DocsInsight, GreetInput, Greeting,
    SpeedrunPlan, SpeedrunPlanInput, SpeedrunWorkflowInput, WorkflowResult,
};
pub use validate::{ValidatedRequest, ValidationErrors};
