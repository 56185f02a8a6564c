//! Docs analysis: map a documentation URL to a [`DocsInsight`].
//!
//! Known documentation sites resolve from a static table (canonical URL plus
//! aliases). Anything else gets a generic insight built from the URL's
//! hostname. The [`DocsSource`] trait is the seam for a future fetcher; a
//! source returns `Ok(None)` when it has nothing, which triggers the fallback.

use std::collections::HashMap;
use std::future::Future;
use std::sync::LazyLock;

use tracing::{debug, instrument};
use url::Url;

use speedrun_shared::{AnalyzeDocsInput, DocsInsight, Result};

/// Label used when the URL has no usable hostname.
const UNKNOWN_HOST_LABEL: &str = "the product";

const FALLBACK_KEY_CONCEPTS: [&str; 5] = [
    "Core primitives / nouns",
    "Authentication & authorization",
    "Quickstart or getting-started flow",
    "Integration or SDK usage",
    "Notable constraints / quotas",
];

const FALLBACK_FOCUS_AREAS: [&str; 3] = [
    "Identify one flagship workflow worth demoing",
    "Capture terminology to narrate on-camera",
    "Note any setup blockers (auth keys, CLI install)",
];

// ---------------------------------------------------------------------------
// Known docs table
// ---------------------------------------------------------------------------

/// A pre-authored insight for a documentation site.
struct KnownDocs {
    url: &'static str,
    aliases: &'static [&'static str],
    summary: &'static str,
    key_concepts: &'static [&'static str],
    focus_areas: &'static [&'static str],
}

impl KnownDocs {
    fn insight(&self) -> DocsInsight {
        DocsInsight {
            summary: self.summary.to_string(),
            key_concepts: to_owned_list(self.key_concepts),
            suggested_focus_areas: Some(to_owned_list(self.focus_areas)),
        }
    }
}

const KNOWN_DOCS: &[KnownDocs] = &[
    KnownDocs {
        url: "https://xmcp.dev/docs",
        aliases: &["https://xmcp.dev/docs/", "https://docs.xmcp.dev"],
        summary: "XMCP describes how to build Model Context Protocol servers with schema-first tools, prompts, and resources.",
        key_concepts: &[
            "XMCP structured project layout",
            "Tools/prompts/resources auto-discovery",
            "Transport adapters (HTTP & STDIO)",
            "Zod-driven schemas",
            "MCP server lifecycle",
        ],
        focus_areas: &[
            "How tools are exported and annotated",
            "Transport configuration for clients",
            "Using schemas to strongly-type handlers",
        ],
    },
    KnownDocs {
        url: "https://supabase.com/docs",
        aliases: &["https://docs.supabase.com"],
        summary: "Supabase delivers a hosted Postgres stack with auth, storage, realtime, and edge functions accessible via REST, GraphQL, and client SDKs.",
        key_concepts: &[
            "Postgres + Row Level Security",
            "Auth providers & policies",
            "Edge Functions",
            "Realtime channels",
            "Storage buckets",
        ],
        focus_areas: &[
            "Quickstart for the target stack",
            "Policy authoring workflow",
            "Realtime broadcast demos",
        ],
    },
    KnownDocs {
        url: "https://vercel.com/docs",
        aliases: &[],
        summary: "Vercel's docs cover deployment workflows for frontend frameworks, edge/serverless runtimes, and platform integrations.",
        key_concepts: &[
            "Project configuration (vercel.json)",
            "Edge Functions and regions",
            "Environment variables and secrets",
            "CI/CD previews",
            "Integrations & analytics",
        ],
        focus_areas: &[
            "Framework-specific quickstarts",
            "Preview deployments process",
            "Edge vs. serverless runtimes",
        ],
    },
];

/// Canonical URLs and aliases, built once and never written again.
static LOOKUP: LazyLock<HashMap<&'static str, &'static KnownDocs>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    for docs in KNOWN_DOCS {
        map.insert(docs.url, docs);
        for alias in docs.aliases {
            map.insert(*alias, docs);
        }
    }
    map
});

/// Look up a pre-authored insight by exact URL, then with one trailing slash removed.
pub fn lookup_known(url: &str) -> Option<DocsInsight> {
    LOOKUP
        .get(url)
        .or_else(|| url.strip_suffix('/').and_then(|trimmed| LOOKUP.get(trimmed)))
        .map(|docs| docs.insight())
}

/// Build a generic insight that names the URL's hostname.
pub fn generic_fallback(url: &str) -> DocsInsight {
    let host = host_label(url);
    DocsInsight {
        summary: format!(
            "Documentation for {host} likely covers setup, authentication, feature primitives, and integration recipes. Use it to capture the vocabulary you need before the speedrun."
        ),
        key_concepts: to_owned_list(&FALLBACK_KEY_CONCEPTS),
        suggested_focus_areas: Some(to_owned_list(&FALLBACK_FOCUS_AREAS)),
    }
}

fn host_label(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
        .filter(|host| !host.is_empty())
        .map(|host| host.strip_prefix("www.").map(str::to_string).unwrap_or(host))
        .unwrap_or_else(|| UNKNOWN_HOST_LABEL.to_string())
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ---------------------------------------------------------------------------
// DocsSource seam
// ---------------------------------------------------------------------------

/// Where docs insights come from before the generic fallback applies.
pub trait DocsSource: Send + Sync {
    /// Resolve an insight for `url`, or `Ok(None)` to use the fallback.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Option<DocsInsight>>> + Send;
}

/// The built-in source: the static table, no network access.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticDocsSource;

impl DocsSource for StaticDocsSource {
    async fn fetch(&self, url: &str) -> Result<Option<DocsInsight>> {
        Ok(lookup_known(url))
    }
}

/// Resolves docs insights from a [`DocsSource`], falling back to a generic insight.
#[derive(Debug, Clone, Default)]
pub struct DocsAnalyzer<S = StaticDocsSource> {
    source: S,
}

impl<S: DocsSource> DocsAnalyzer<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Analyze the documentation at `input.url`.
    ///
    /// Errors only when the source itself fails; an unknown URL is not an error.
    #[instrument(skip_all, fields(url = %input.url))]
    pub async fn analyze(&self, input: &AnalyzeDocsInput) -> Result<DocsInsight> {
        match self.source.fetch(&input.url).await? {
            Some(insight) => {
                debug!("docs insight resolved from source");
                Ok(insight)
            }
            None => {
                debug!("no docs insight found, using generic fallback");
                Ok(generic_fallback(&input.url))
            }
        }
    }
}

/// Analyze docs with the built-in static source.
pub async fn analyze_docs(input: &AnalyzeDocsInput) -> Result<DocsInsight> {
    DocsAnalyzer::new(StaticDocsSource).analyze(input).await
}

#[cfg(test)]
mod tests {
    use speedrun_shared::SpeedrunError;

    use super::*;

    fn input(url: &str) -> AnalyzeDocsInput {
        AnalyzeDocsInput { url: url.into() }
    }

    #[tokio::test]
    async fn known_url_returns_authored_insight() {
        let insight = analyze_docs(&input("https://xmcp.dev/docs")).await.unwrap();
        assert!(insight.summary.starts_with("XMCP describes how to build Model Context Protocol servers"));
        assert_eq!(insight.key_concepts.len(), 5);
        assert_eq!(insight.suggested_focus_areas.as_ref().map(Vec::len), Some(3));
    }

    #[tokio::test]
    async fn aliases_resolve_to_the_same_insight() {
        let canonical = analyze_docs(&input("https://supabase.com/docs")).await.unwrap();
        let alias = analyze_docs(&input("https://docs.supabase.com")).await.unwrap();
        assert_eq!(canonical, alias);

        let xmcp = analyze_docs(&input("https://xmcp.dev/docs")).await.unwrap();
        assert_eq!(analyze_docs(&input("https://docs.xmcp.dev")).await.unwrap(), xmcp);
        assert_eq!(analyze_docs(&input("https://xmcp.dev/docs/")).await.unwrap(), xmcp);
    }

    #[test]
    fn trailing_slash_is_stripped_once() {
        assert!(lookup_known("https://vercel.com/docs/").is_some());
        assert!(lookup_known("https://docs.supabase.com/").is_some());
        assert!(lookup_known("https://vercel.com/docs//").is_none());
    }

    #[tokio::test]
    async fn unknown_url_falls_back_to_hostname() {
        let insight = analyze_docs(&input("https://www.example.com/guide")).await.unwrap();
        assert!(insight.summary.starts_with("Documentation for example.com likely covers"));
        assert_eq!(insight.key_concepts.len(), 5);
        assert_eq!(insight.key_concepts[0], "Core primitives / nouns");
        assert_eq!(insight.suggested_focus_areas.as_ref().map(Vec::len), Some(3));
    }

    #[test]
    fn only_a_leading_www_is_removed() {
        let insight = generic_fallback("https://docs.www.example.com");
        assert!(insight.summary.contains("docs.www.example.com"));
    }

    #[test]
    fn unparseable_url_uses_default_label() {
        let insight = generic_fallback("not a url");
        assert!(insight.summary.starts_with("Documentation for the product likely covers"));
    }

    struct FailingSource;

    impl DocsSource for FailingSource {
        async fn fetch(&self, _url: &str) -> Result<Option<DocsInsight>> {
            Err(SpeedrunError::internal("docs backend unavailable"))
        }
    }

    #[tokio::test]
    async fn source_errors_propagate() {
        let analyzer = DocsAnalyzer::new(FailingSource);
        let err = analyzer.analyze(&input("https://xmcp.dev/docs")).await.unwrap_err();
        assert_eq!(err.to_string(), "docs backend unavailable");
    }
}
