// SPDX-FileCopyrightText: 2026 Predia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fan-out of bot state snapshots to an unbounded set of subscribers.
//!
//! Each subscriber owns a [`StateSubscription`]: an unbounded channel
//! receiver plus a guard that removes the registry entry on drop. Delivery
//! is fire-and-forget -- a subscriber whose receiver is gone is logged and
//! skipped, never blocking the publisher or the other subscribers.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::mpsc;
use uuid::Uuid;

use predia_core::BotState;

/// Registry of active state listeners.
///
/// Registration and removal are O(1); broadcast visits every currently
/// registered listener in unspecified order. Snapshots arrive at any
/// single subscriber in publish order; no ordering is promised across
/// subscribers.
#[derive(Default)]
pub struct StateBroadcaster {
    subscribers: DashMap<Uuid, mpsc::UnboundedSender<BotState>>,
}

impl StateBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new listener and hand back its subscription.
    ///
    /// The subscription unregisters itself when dropped, so a listener
    /// that goes away can never be left dangling in the registry.
    pub fn subscribe(self: &Arc<Self>) -> StateSubscription {
        let id = Uuid::new_v4();
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.insert(id, tx);
        tracing::debug!(subscriber = %id, "state listener registered");
        StateSubscription {
            id,
            rx,
            broadcaster: Arc::clone(self),
        }
    }

    /// Remove a listener. Removing an unknown id is a no-op.
    pub fn unsubscribe(&self, id: Uuid) {
        if self.subscribers.remove(&id).is_some() {
            tracing::debug!(subscriber = %id, "state listener removed");
        }
    }

    /// Push `state` to every registered listener.
    ///
    /// Sends are non-blocking: the snapshot lands in each subscriber's
    /// queue before this returns. A failed send (receiver already gone)
    /// is logged and does not affect the remaining listeners or the
    /// caller.
    pub fn broadcast(&self, state: &BotState) {
        for entry in self.subscribers.iter() {
            if entry.value().send(state.clone()).is_err() {
                tracing::warn!(
                    subscriber = %entry.key(),
                    "state listener unreachable, skipping"
                );
            }
        }
    }

    /// Number of currently registered listeners.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

/// One listener's handle onto the broadcaster.
///
/// Owned by exactly one streaming connection. Dropping it removes the
/// registry entry; dropping twice is impossible and removal of an
/// already-removed id is harmless, so every disconnect path -- normal
/// close, write failure, cancellation -- converges on the same cleanup.
pub struct StateSubscription {
    id: Uuid,
    rx: mpsc::UnboundedReceiver<BotState>,
    broadcaster: Arc<StateBroadcaster>,
}

impl StateSubscription {
    /// This subscription's registry id.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Receive the next snapshot, or `None` if the sender side is gone.
    pub async fn recv(&mut self) -> Option<BotState> {
        self.rx.recv().await
    }

    /// Non-blocking receive, for tests and draining.
    pub fn try_recv(&mut self) -> Option<BotState> {
        self.rx.try_recv().ok()
    }
}

impl Drop for StateSubscription {
    fn drop(&mut self) {
        self.broadcaster.unsubscribe(self.id);
    }
}
