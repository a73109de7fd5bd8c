// SPDX-FileCopyrightText: 2026 Predia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `predia serve` command implementation.
//!
//! Wires the whole service together: SQLite-backed notification storage,
//! the bot state store with its broadcaster, the token authorizer, and the
//! axum gateway. Supports graceful shutdown via signal handlers.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use predia_config::model::PrediaConfig;
use predia_core::{NotificationStore, PrediaError};
use predia_gateway::{start_server, AuthConfig, GatewayState, StaticTokenAuthorizer};
use predia_notify::NotificationService;
use predia_state::{BotStateStore, StateBroadcaster};
use predia_storage::SqliteNotificationStore;

use crate::shutdown;

/// Runs the `predia serve` command.
pub async fn run_serve(config: PrediaConfig) -> Result<(), PrediaError> {
    init_tracing(&config.service.log_level);

    info!(name = config.service.name.as_str(), "starting predia serve");

    // Initialize storage (opens the DB and runs migrations).
    let storage = Arc::new(SqliteNotificationStore::new(config.storage.clone()));
    storage.initialize().await?;
    info!(
        path = config.storage.database_path.as_str(),
        "notification storage ready"
    );

    // Bot state store and its fan-out. Constructed here, passed by handle:
    // state lives for the process and is lost on restart by design.
    let broadcaster = Arc::new(StateBroadcaster::new());
    let store = Arc::new(BotStateStore::new(broadcaster));

    let notifications = Arc::new(NotificationService::new(
        storage as Arc<dyn NotificationStore>,
    ));

    let authorizer = Arc::new(StaticTokenAuthorizer::new(
        config.auth.session_token.clone(),
        config.auth.admin_token.clone(),
    ));

    if config.bot.api_key.is_none() {
        warn!("bot.api_key not configured -- inbound state updates will be rejected");
    }
    if config.auth.admin_token.is_none() {
        warn!("auth.admin_token not configured -- the bot stream will be unreachable");
    }

    let state = GatewayState {
        store,
        notifications,
        auth: AuthConfig {
            bot_api_key: config.bot.api_key.clone(),
        },
        authorizer,
        start_time: Instant::now(),
    };

    // Install signal handler and serve until it fires.
    let cancel = shutdown::install_signal_handler();
    start_server(&config.gateway, state, cancel).await?;

    info!("predia serve shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("predia={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
