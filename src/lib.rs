//! Chat Portal — server-side front door for the chat application.

pub mod api;
pub mod config;
pub mod error;
pub mod forms;
pub mod guard;
pub mod pages;

use std::sync::Arc;

use axum::Router;

use crate::api::ApiClient;
use crate::config::PortalConfig;
use crate::error::Result;
use crate::guard::{GuardLayerState, UserDirectory};
use crate::pages::{AppState, portal_routes};

/// Build the full portal application from configuration.
///
/// Fails on a route classification that does not partition cleanly.
pub fn build_app(config: PortalConfig) -> Result<Router> {
    let api = ApiClient::new(config.api_base_url.clone());
    let users: Arc<dyn UserDirectory> = Arc::new(api.clone());
    let guard = GuardLayerState::from_config(&config.guard, Some(users))?;

    let state = AppState {
        api,
        config: Arc::new(config),
    };
    Ok(portal_routes(state, guard))
}

/// Bind the configured port and serve until the process is stopped.
pub async fn serve(config: PortalConfig) -> Result<()> {
    let port = config.port;
    let app = build_app(config)?;

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    tracing::info!(port, "Chat portal started");
    axum::serve(listener, app).await?;
    Ok(())
}
