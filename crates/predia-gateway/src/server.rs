// SPDX-FileCopyrightText: 2026 Predia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    routing::{get, patch},
    Router,
};
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use predia_config::model::GatewayConfig;
use predia_core::{Authorizer, PrediaError};
use predia_notify::NotificationService;
use predia_state::BotStateStore;

use crate::auth::AuthConfig;
use crate::handlers;
use crate::sse;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// The process-wide bot state store (owns the broadcaster).
    pub store: Arc<BotStateStore>,
    /// Notification read service.
    pub notifications: Arc<NotificationService>,
    /// Bot credential configuration.
    pub auth: AuthConfig,
    /// Dashboard authorization collaborator.
    pub authorizer: Arc<dyn Authorizer>,
    /// Process start time for uptime reporting.
    pub start_time: Instant,
}

/// Build the gateway router.
///
/// Routes:
/// - `GET /health` (public)
/// - `GET|POST /v1/bot/status` (bot credential)
/// - `GET /v1/bot/stream` (admin only, SSE)
/// - `GET|POST /v1/notificaciones`, `PATCH /v1/notificaciones/{id}` (session)
pub fn build_router(state: GatewayState) -> Router {
    Router::new()
        .route("/health", get(handlers::get_health))
        .route(
            "/v1/bot/status",
            get(handlers::get_bot_status).post(handlers::post_bot_status),
        )
        .route("/v1/bot/stream", get(sse::bot_stream))
        .route(
            "/v1/notificaciones",
            get(handlers::get_notificaciones).post(handlers::post_notificaciones),
        )
        .route(
            "/v1/notificaciones/{id}",
            patch(handlers::patch_notificacion),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the gateway HTTP server.
///
/// Binds to the configured host:port and serves until `cancel` fires, then
/// shuts down gracefully. Streaming connections end when their clients are
/// dropped with the server.
pub async fn start_server(
    config: &GatewayConfig,
    state: GatewayState,
    cancel: CancellationToken,
) -> Result<(), PrediaError> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| PrediaError::Channel {
            message: format!("failed to bind gateway to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("gateway listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await
        .map_err(|e| PrediaError::Channel {
            message: format!("gateway server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    Ok(())
}
