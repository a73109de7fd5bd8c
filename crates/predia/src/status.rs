// SPDX-FileCopyrightText: 2026 Predia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `predia status` command implementation.
//!
//! Queries a running server's bot status endpoint and prints the snapshot.

use predia_config::model::PrediaConfig;
use predia_core::{BotState, PrediaError};

/// Runs the `predia status` command.
pub async fn run_status(config: &PrediaConfig) -> Result<(), PrediaError> {
    let url = format!(
        "http://{}:{}/v1/bot/status",
        config.gateway.host, config.gateway.port
    );

    let client = reqwest::Client::new();
    let mut request = client.get(&url);
    if let Some(api_key) = &config.bot.api_key {
        request = request.header("x-api-key", api_key);
    }

    let response = request.send().await.map_err(|e| PrediaError::Channel {
        message: format!("status request to {url} failed: {e}"),
        source: Some(Box::new(e)),
    })?;

    if !response.status().is_success() {
        return Err(PrediaError::Channel {
            message: format!("status endpoint returned {}", response.status()),
            source: None,
        });
    }

    let state: BotState = response.json().await.map_err(|e| PrediaError::Channel {
        message: format!("status response was not valid JSON: {e}"),
        source: Some(Box::new(e)),
    })?;

    println!(
        "bot: {}",
        if state.connected {
            "connected"
        } else {
            "disconnected"
        }
    );
    println!(
        "phone: {}",
        state.phone_number.as_deref().unwrap_or("-")
    );
    println!(
        "pairing code: {}",
        if state.qr.is_some() { "pending" } else { "none" }
    );
    if let Some(error) = &state.error {
        println!("last error: {error}");
    }
    println!("last update: {}", state.last_update.to_rfc3339());

    Ok(())
}
