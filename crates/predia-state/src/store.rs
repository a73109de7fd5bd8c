// SPDX-FileCopyrightText: 2026 Predia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process-wide store for the external bot's connection state.
//!
//! The store owns the only mutable [`BotState`] in the process. Callers
//! get copies via [`snapshot`](BotStateStore::snapshot) and mutate only
//! through the merge-based [`update`](BotStateStore::update). State is
//! not persisted; losing it on restart is an accepted trade-off.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;

use predia_core::{BotState, BotStateUpdate};

use crate::broadcast::StateBroadcaster;

/// The single source of truth for bot connection state.
///
/// The merge, the `last_update` stamp, and the fan-out all run inside one
/// mutex-guarded critical section, so no subscriber can observe a
/// half-applied update -- in particular, never `connected == true` with a
/// stale pairing code when the same call cleared it.
pub struct BotStateStore {
    state: Mutex<BotState>,
    broadcaster: Arc<StateBroadcaster>,
}

impl BotStateStore {
    /// Create a store with disconnected defaults, wired to `broadcaster`.
    pub fn new(broadcaster: Arc<StateBroadcaster>) -> Self {
        Self {
            state: Mutex::new(BotState::default()),
            broadcaster,
        }
    }

    /// The broadcaster this store publishes to.
    pub fn broadcaster(&self) -> &Arc<StateBroadcaster> {
        &self.broadcaster
    }

    /// An immutable copy of the current state.
    pub fn snapshot(&self) -> BotState {
        self.lock().clone()
    }

    /// Merge `update` over the current state and fan out the result.
    ///
    /// Fields absent from `update` keep their previous values; explicit
    /// nulls clear. `last_update` is always overwritten with the current
    /// time. Every listener registered at the time of the call has the
    /// new snapshot in its queue before this returns, whatever the health
    /// of the individual listeners.
    pub fn update(&self, update: BotStateUpdate) -> BotState {
        let mut state = self.lock();

        if let Some(connected) = update.connected {
            state.connected = connected;
        }
        if let Some(qr) = update.qr {
            state.qr = qr;
        }
        if let Some(phone_number) = update.phone_number {
            state.phone_number = phone_number;
        }
        if let Some(error) = update.error {
            state.error = error;
        }
        state.last_update = Utc::now();

        let snapshot = state.clone();
        // Broadcast before releasing the lock: updates are serialized and
        // every subscriber sees them in the same order.
        self.broadcaster.broadcast(&snapshot);
        snapshot
    }

    /// Drop a now-invalid pairing code, e.g. after a successful pairing.
    pub fn clear_qr(&self) -> BotState {
        self.update(BotStateUpdate {
            qr: Some(None),
            ..BotStateUpdate::default()
        })
    }

    fn lock(&self) -> MutexGuard<'_, BotState> {
        // A panic while holding the lock leaves the state merely stale,
        // not torn, so poisoning is recoverable.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> BotStateStore {
        BotStateStore::new(Arc::new(StateBroadcaster::new()))
    }

    #[test]
    fn starts_disconnected_with_empty_fields() {
        let store = store();
        let state = store.snapshot();
        assert!(!state.connected);
        assert!(state.qr.is_none());
        assert!(state.phone_number.is_none());
        assert!(state.error.is_none());
    }

    #[test]
    fn update_merges_and_preserves_absent_fields() {
        let store = store();
        store.update(BotStateUpdate {
            qr: Some(Some("ABC123".into())),
            ..BotStateUpdate::default()
        });
        let after = store.update(BotStateUpdate {
            connected: Some(true),
            ..BotStateUpdate::default()
        });

        assert!(after.connected);
        assert_eq!(after.qr.as_deref(), Some("ABC123"), "absent qr preserved");
    }

    #[test]
    fn explicit_null_clears_field() {
        let store = store();
        store.update(BotStateUpdate {
            qr: Some(Some("ABC123".into())),
            error: Some(Some("timeout".into())),
            ..BotStateUpdate::default()
        });
        let after = store.update(BotStateUpdate {
            connected: Some(true),
            qr: Some(None),
            error: Some(None),
            ..BotStateUpdate::default()
        });

        assert!(after.connected);
        assert!(after.qr.is_none(), "explicit null must clear qr atomically");
        assert!(after.error.is_none());
    }

    #[test]
    fn last_update_is_monotonically_non_decreasing() {
        let store = store();
        let mut previous = store.snapshot().last_update;
        for i in 0..10 {
            let state = store.update(BotStateUpdate {
                connected: Some(i % 2 == 0),
                ..BotStateUpdate::default()
            });
            assert!(state.last_update >= previous);
            previous = state.last_update;
        }
    }

    #[test]
    fn snapshot_is_a_copy_not_a_live_reference() {
        let store = store();
        let mut copy = store.snapshot();
        copy.connected = true;
        copy.qr = Some("TAMPERED".into());

        let fresh = store.snapshot();
        assert!(!fresh.connected);
        assert!(fresh.qr.is_none());
    }

    #[test]
    fn clear_qr_only_touches_qr() {
        let store = store();
        store.update(BotStateUpdate {
            connected: Some(true),
            phone_number: Some(Some("+51999".into())),
            qr: Some(Some("STALE".into())),
            ..BotStateUpdate::default()
        });

        let after = store.clear_qr();
        assert!(after.qr.is_none());
        assert!(after.connected);
        assert_eq!(after.phone_number.as_deref(), Some("+51999"));
    }
}
