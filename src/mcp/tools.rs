/// MCP Tool handlers for truthverify.
///
/// 1. verify_claim – verify a single factual statement
/// 2. verify_url   – extract and verify the key claims of an article
use crate::gemini::ModelClient;
use crate::geo::Coordinates;
use crate::mcp::server::McpContext;
use crate::render::sources::dedupe;
use crate::verifier::{Mode, Verification};
use rmcp::handler::server::ServerHandler;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::{ErrorData as McpError, handler::server::tool::ToolRouter, model::*, tool, tool_router};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

// ── Parameter structs ────────────────────────────────────────────────

#[derive(Deserialize, JsonSchema)]
struct VerifyClaimParams {
    /// The statement to fact-check
    claim: String,
    /// Latitude used to bias location-dependent claims (requires longitude)
    latitude: Option<f64>,
    /// Longitude used to bias location-dependent claims (requires latitude)
    longitude: Option<f64>,
}

#[derive(Deserialize, JsonSchema)]
struct VerifyUrlParams {
    /// Article URL whose key claims should be verified
    url: String,
    /// Latitude used to bias location-dependent claims (requires longitude)
    latitude: Option<f64>,
    /// Longitude used to bias location-dependent claims (requires latitude)
    longitude: Option<f64>,
}

// ── Response helpers ─────────────────────────────────────────────────

fn json_result(value: serde_json::Value) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&value).unwrap_or_default(),
    )]))
}

fn error_result(msg: &str) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::error(vec![Content::text(msg.to_string())]))
}

/// Both coordinates or neither.
fn location(latitude: Option<f64>, longitude: Option<f64>) -> Result<Option<Coordinates>, String> {
    match (latitude, longitude) {
        (None, None) => Ok(None),
        (Some(lat), Some(lng)) => Coordinates::new(lat, lng)
            .map(Some)
            .map_err(|e| e.to_string()),
        _ => Err("latitude and longitude must be given together".to_string()),
    }
}

/// Tool output: the verdicts plus the deduplicated citation list.
fn verification_json(verification: &Verification) -> serde_json::Value {
    let sources: Vec<serde_json::Value> = dedupe(&verification.sources)
        .into_iter()
        .filter_map(|chunk| {
            Some(serde_json::json!({
                "uri": chunk.uri()?,
                "title": chunk.title()?,
            }))
        })
        .collect();

    serde_json::json!({
        "mode": verification.mode,
        "input": verification.input,
        "generated_at": verification.generated_at.to_rfc3339(),
        "results": verification.results,
        "sources": sources,
    })
}

// ── Tool implementations ─────────────────────────────────────────────

pub struct AppTools<C> {
    pub ctx: McpContext<C>,
    pub tool_router: ToolRouter<Self>,
}

impl<C> Clone for AppTools<C> {
    fn clone(&self) -> Self {
        Self {
            ctx: self.ctx.clone(),
            tool_router: self.tool_router.clone(),
        }
    }
}

impl<C: ModelClient + 'static> ServerHandler for AppTools<C> {}

impl<C: ModelClient + 'static> AppTools<C> {
    async fn run(
        &self,
        mode: Mode,
        input: &str,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<CallToolResult, McpError> {
        let location = match location(latitude, longitude) {
            Ok(l) => l,
            Err(msg) => return error_result(&msg),
        };
        info!("MCP verify ({mode}), location: {}", location.is_some());

        match self.ctx.verifier.verify(mode, input, location).await {
            Ok(verification) => json_result(verification_json(&verification)),
            Err(e) => error_result(&e.user_message()),
        }
    }
}

#[tool_router]
impl<C: ModelClient + 'static> AppTools<C> {
    pub fn new(ctx: McpContext<C>) -> Self {
        Self {
            ctx,
            tool_router: Self::tool_router(),
        }
    }

    // ── Tool 1: verify_claim ────────────────────────────────────────

    #[tool(
        description = "Fact-check a statement with a search-grounded model. Returns the overall verdict, a 0-100 confidence score, per-sub-claim analysis, definitive sources with bias/sentiment/tone, and every source consulted."
    )]
    async fn verify_claim(
        &self,
        params: Parameters<VerifyClaimParams>,
    ) -> Result<CallToolResult, McpError> {
        let p = params.0;
        if p.claim.trim().is_empty() {
            return error_result("claim is required");
        }
        self.run(Mode::Text, &p.claim, p.latitude, p.longitude).await
    }

    // ── Tool 2: verify_url ──────────────────────────────────────────

    #[tool(
        description = "Read the article at a URL, extract its key factual claims and verify each one. Returns one analysis per claim plus every source consulted."
    )]
    async fn verify_url(
        &self,
        params: Parameters<VerifyUrlParams>,
    ) -> Result<CallToolResult, McpError> {
        let p = params.0;
        if p.url.trim().is_empty() {
            return error_result("url is required");
        }
        self.run(Mode::Url, &p.url, p.latitude, p.longitude).await
    }
}
