//! HTTP API serving session messages
//!
//! `GET /api/projects/{project_id}/sessions[?limit=N]` lists a project's sessions,
//! each with its `messages` field filled from the Claude Code transcript.

pub mod error;
pub mod routes;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::get;
use tracing::info;

pub use error::ApiError;
pub use routes::{MessagesQuery, health, list_sessions};

use crate::config::ServiceConfig;
use crate::service::SessionMessagesService;
use crate::store::SessionStore;

/// Shared request state
#[derive(Clone)]
pub struct AppState {
    pub service: SessionMessagesService,
    pub store: Arc<dyn SessionStore>,
    pub max_limit: usize,
}

impl AppState {
    pub fn new(config: &ServiceConfig, store: Arc<dyn SessionStore>) -> Self {
        Self {
            service: SessionMessagesService::from_config(config),
            store,
            max_limit: config.max_limit,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/projects/{project_id}/sessions", get(list_sessions))
        .with_state(state)
}

/// Bind and serve until Ctrl-C
pub async fn serve(config: &ServiceConfig, store: Arc<dyn SessionStore>) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;
    info!(addr = %config.bind, root = %config.projects_root.display(), "Session API listening");

    axum::serve(listener, router(AppState::new(config, store)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down session API");
    }
}
