//! Generation logic for speedrun episodes.
//!
//! This crate ties the three stateless stages together into the
//! docs → plan → clips workflow:
//! - [`docs`]: static docs lookup with a hostname-based fallback
//! - [`plan`]: template-driven speedrun outlines
//! - [`clips`]: short-form clip hooks
//! - [`workflow`]: the shared stage chain used by the server and the client

pub mod clips;
pub mod docs;
pub mod plan;
pub mod tools;
pub mod workflow;

mod text;

pub use clips::clip_outline;
pub use docs::{DocsAnalyzer, DocsSource, StaticDocsSource, analyze_docs};
pub use plan::generate_speedrun_plan;
pub use tools::{ToolAnnotations, ToolMetadata, greet, tool_catalog};
pub use workflow::{
    LocalStages, ProgressReporter, SilentProgress, SpeedrunStages, orchestrate_speedrun_workflow,
    run_chain,
};
