//! Tool metadata for the exposed operations, plus the trivial `greet` tool.

use serde::Serialize;

use speedrun_shared::{GreetInput, Greeting};

/// Behavioral hints advertised to tool clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolAnnotations {
    pub title: &'static str,
    pub read_only_hint: bool,
    pub destructive_hint: bool,
    pub idempotent_hint: bool,
}

/// Name, description, and hints for one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolMetadata {
    pub name: &'static str,
    pub description: &'static str,
    pub annotations: ToolAnnotations,
}

const fn read_only(title: &'static str) -> ToolAnnotations {
    ToolAnnotations {
        title,
        read_only_hint: true,
        destructive_hint: false,
        idempotent_hint: true,
    }
}

static CATALOG: [ToolMetadata; 5] = [
    ToolMetadata {
        name: "greet",
        description: "Greet the user by name.",
        annotations: read_only("Greet the user"),
    },
    ToolMetadata {
        name: "generateSpeedrunPlan",
        description: "Create a 30\u{2013}45 minute devtool speedrun outline anchored to the chosen stack.",
        annotations: read_only("Generate speedrun plan"),
    },
    ToolMetadata {
        name: "clipOutline",
        description: "Suggest short-form clip hooks derived from a devtool session.",
        annotations: read_only("Outline short-form clips"),
    },
    ToolMetadata {
        name: "analyzeDocs",
        description: "Summarize a docs page and extract the core concepts to study.",
        annotations: read_only("Analyze docs"),
    },
    ToolMetadata {
        name: "orchestrateSpeedrunWorkflow",
        description: "Run analyzeDocs \u{2192} generateSpeedrunPlan \u{2192} clipOutline with shared context.",
        annotations: read_only("Orchestrate workflow"),
    },
];

/// Metadata for every exposed operation, in registration order.
pub fn tool_catalog() -> &'static [ToolMetadata] {
    &CATALOG
}

/// Greet `input.name` as `Hello, <name>!`.
pub fn greet(input: &GreetInput) -> Greeting {
    Greeting {
        message: format!("Hello, {}!", input.name),
    }
}
