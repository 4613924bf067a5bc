//! HTTP transport
//!
//! Exposes the validator over HTTP. Each submodule handles one group of
//! endpoints.

pub mod error;
pub mod health;
pub mod pipeline;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::dsl::validation::Validator;

/// Shared state handed to every handler.
#[derive(Clone, Default)]
pub struct AppState {
    pub validator: Arc<Validator>,
}

/// Create the router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/validate", post(pipeline::validate_pipeline))
        .route("/schema", get(pipeline::pipeline_schema))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(addr: &str) -> std::io::Result<()> {
    let app = create_router(AppState::default());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await
}
