/// MCP Server setup using `rmcp` with stdio transport.
///
/// Provides `McpContext` (shared state) and `McpServer` (startup logic).
use crate::mcp::tools::AppTools;
use anyhow::{Context, Result};
use rmcp::{ServiceExt, handler::server::router::Router, transport::io::stdio};
use std::sync::Arc;
use tracing::info;

use crate::{config::Config, gemini::ModelClient, verifier::Verifier};

/// Shared application context available to all tool handlers.
pub struct McpContext<C> {
    pub verifier: Arc<Verifier<C>>,
    pub config: Arc<Config>,
}

impl<C> Clone for McpContext<C> {
    fn clone(&self) -> Self {
        Self {
            verifier: Arc::clone(&self.verifier),
            config: Arc::clone(&self.config),
        }
    }
}

/// MCP Server wrapping the context and serving via stdio.
pub struct McpServer<C> {
    pub ctx: McpContext<C>,
}

impl<C: ModelClient + 'static> McpServer<C> {
    pub fn new(ctx: McpContext<C>) -> Self {
        Self { ctx }
    }

    /// Start the MCP server on stdio transport (blocks until the client disconnects).
    pub async fn start(self) -> Result<()> {
        info!("Starting MCP server on stdio (model: {})", self.ctx.config.model);
        let (stdin, stdout) = stdio();

        let app_tools = AppTools::new(self.ctx.clone());
        let router = Router::new(app_tools.clone()).with_tools(app_tools.tool_router.clone());

        let service = router
            .serve((stdin, stdout))
            .await
            .context("MCP Server encountered an error during stdio transport")?;
        service
            .waiting()
            .await
            .context("MCP Server terminated abnormally")?;

        Ok(())
    }
}
