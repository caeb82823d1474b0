/// Browser front-end served with axum.
///
/// `GET /` shows the input form, `POST /verify` runs one verification and
/// re-renders the page with the result cards (or the error message).
pub mod handlers;
pub mod page;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::{get, post};
use tracing::info;

use crate::config::Config;
use crate::gemini::ModelClient;
use crate::verifier::Verifier;

/// Shared state available to all handlers.
pub struct WebContext<C> {
    pub verifier: Arc<Verifier<C>>,
    pub config: Arc<Config>,
}

impl<C> Clone for WebContext<C> {
    fn clone(&self) -> Self {
        Self {
            verifier: Arc::clone(&self.verifier),
            config: Arc::clone(&self.config),
        }
    }
}

/// HTTP server wrapping the context.
pub struct WebServer<C> {
    pub ctx: WebContext<C>,
}

impl<C: ModelClient + 'static> WebServer<C> {
    pub fn new(ctx: WebContext<C>) -> Self {
        Self { ctx }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(handlers::index::<C>))
            .route("/verify", post(handlers::verify::<C>))
            .route("/health", get(handlers::health))
            .with_state(self.ctx.clone())
    }

    /// Serve on `addr` until Ctrl-C.
    pub async fn start(self, addr: &str) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;
        info!("Web front-end listening on http://{addr}");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                info!("Shutting down web front-end");
            })
            .await
            .context("web server encountered an error")?;

        Ok(())
    }
}
