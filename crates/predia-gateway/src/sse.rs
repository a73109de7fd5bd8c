// SPDX-FileCopyrightText: 2026 Predia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Server-Sent Events streaming of bot state to the dashboard.
//!
//! Per connection: one admin check at open, an immediate snapshot frame so
//! a late joiner is never left without data, then one frame per state
//! change, with comment heartbeats every 30 seconds to survive idle
//! timeouts in intermediaries.
//!
//! Frame format:
//! ```text
//! data: {"connected":false,"qr":"ABC123","phoneNumber":null,...}
//!
//! : heartbeat
//! ```
//!
//! Cleanup is carried by the subscription guard inside the stream: any way
//! the connection ends -- client disconnect, write failure, server
//! shutdown -- drops the stream, which unregisters the listener exactly
//! once and stops the heartbeat with it.

use std::convert::Infallible;
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use futures::stream::{self, Stream, StreamExt};

use predia_core::BotState;
use predia_state::StateSubscription;

use crate::auth::bearer_token;
use crate::server::GatewayState;

/// Keep-alive cadence for open streams.
pub const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(30);

/// GET /v1/bot/stream
///
/// Only administrators may watch the bot; the privilege is checked once
/// here and never re-checked for the connection's lifetime.
pub async fn bot_stream(State(state): State<GatewayState>, headers: HeaderMap) -> Response {
    if !state.authorizer.verify_admin(bearer_token(&headers)).await {
        return (StatusCode::FORBIDDEN, "Forbidden").into_response();
    }

    // Subscribe before snapshotting: an update landing in between is
    // delivered twice (harmless), never lost.
    let subscription = state.store.broadcaster().subscribe();
    let snapshot = state.store.snapshot();

    Sse::new(state_frames(snapshot, subscription))
        .keep_alive(
            KeepAlive::new()
                .interval(HEARTBEAT_INTERVAL)
                .text("heartbeat"),
        )
        .into_response()
}

/// The frame sequence for one connection: snapshot first, then live.
fn state_frames(
    initial: BotState,
    subscription: StateSubscription,
) -> impl Stream<Item = Result<Event, Infallible>> {
    let live = stream::unfold(subscription, |mut subscription| async move {
        subscription
            .recv()
            .await
            .map(|state| (state_event(&state), subscription))
    });

    stream::once(async move { state_event(&initial) }).chain(live)
}

fn state_event(state: &BotState) -> Result<Event, Infallible> {
    match serde_json::to_string(state) {
        Ok(json) => Ok(Event::default().data(json)),
        Err(e) => {
            // A frame that cannot be serialized degrades to a comment so
            // the stream itself survives.
            tracing::warn!(error = %e, "failed to serialize state frame");
            Ok(Event::default().comment("state serialization failed"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use predia_core::BotStateUpdate;
    use predia_state::{BotStateStore, StateBroadcaster};

    fn harness() -> (Arc<StateBroadcaster>, BotStateStore) {
        let broadcaster = Arc::new(StateBroadcaster::new());
        let store = BotStateStore::new(Arc::clone(&broadcaster));
        (broadcaster, store)
    }

    #[tokio::test]
    async fn snapshot_frame_arrives_before_any_update() {
        let (broadcaster, store) = harness();
        let stream = state_frames(store.snapshot(), broadcaster.subscribe());
        let mut stream = Box::pin(stream);

        let first = tokio::time::timeout(Duration::from_millis(100), stream.next()).await;
        assert!(
            first.expect("initial frame must not wait for an update").is_some()
        );
    }

    #[tokio::test]
    async fn updates_flow_after_the_snapshot() {
        let (broadcaster, store) = harness();
        let mut stream = Box::pin(state_frames(store.snapshot(), broadcaster.subscribe()));

        // Consume the snapshot frame.
        stream.next().await.expect("snapshot frame");

        store.update(BotStateUpdate {
            connected: Some(true),
            ..BotStateUpdate::default()
        });
        let second = tokio::time::timeout(Duration::from_millis(100), stream.next()).await;
        assert!(second.expect("update frame should arrive").is_some());
    }

    #[tokio::test]
    async fn dropping_the_stream_unregisters_the_listener() {
        let (broadcaster, store) = harness();
        let stream = state_frames(store.snapshot(), broadcaster.subscribe());
        assert_eq!(broadcaster.subscriber_count(), 1);

        drop(stream);
        assert_eq!(
            broadcaster.subscriber_count(),
            0,
            "listener must not outlive its stream"
        );
    }
}
