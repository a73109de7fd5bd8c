// SPDX-FileCopyrightText: 2026 Predia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the store → broadcaster fan-out path.

use std::sync::Arc;

use predia_core::BotStateUpdate;
use predia_state::{BotStateStore, StateBroadcaster};

fn harness() -> (Arc<StateBroadcaster>, BotStateStore) {
    let broadcaster = Arc::new(StateBroadcaster::new());
    let store = BotStateStore::new(Arc::clone(&broadcaster));
    (broadcaster, store)
}

/// One update delivers exactly one identical snapshot to every subscriber,
/// and the snapshot is already queued when `update` returns.
#[tokio::test]
async fn single_update_fans_out_to_all_subscribers() {
    let (broadcaster, store) = harness();

    let mut subs: Vec<_> = (0..5).map(|_| broadcaster.subscribe()).collect();

    let published = store.update(BotStateUpdate {
        connected: Some(false),
        qr: Some(Some("ABC123".into())),
        ..BotStateUpdate::default()
    });

    for sub in &mut subs {
        let frame = sub.try_recv().expect("frame queued before update returned");
        assert_eq!(frame, published);
        assert!(sub.try_recv().is_none(), "exactly one frame per update");
    }
}

/// A subscriber registered after an update only sees later updates.
#[tokio::test]
async fn late_subscriber_misses_earlier_updates() {
    let (broadcaster, store) = harness();

    store.update(BotStateUpdate {
        qr: Some(Some("EARLY".into())),
        ..BotStateUpdate::default()
    });

    let mut late = broadcaster.subscribe();
    assert!(late.try_recv().is_none());

    store.update(BotStateUpdate {
        qr: Some(Some("LATE".into())),
        ..BotStateUpdate::default()
    });
    assert_eq!(late.try_recv().unwrap().qr.as_deref(), Some("LATE"));
}

/// The update caller is unaffected by unhealthy subscribers, and a
/// subscriber registered after the broken one is still served.
#[tokio::test]
async fn unhealthy_subscriber_is_isolated() {
    let (broadcaster, store) = harness();

    // Simulate a listener that failed mid-stream: its subscription has
    // been dropped but the broadcast keeps going.
    let first = broadcaster.subscribe();
    drop(first);

    let mut second = broadcaster.subscribe();

    let published = store.update(BotStateUpdate {
        connected: Some(true),
        ..BotStateUpdate::default()
    });

    assert_eq!(second.try_recv().expect("second still served"), published);
}

/// The end-to-end scenario: the bot reports a fresh pairing code and two
/// connected dashboard streams each receive that exact snapshot next.
#[tokio::test]
async fn pairing_code_reaches_two_streams() {
    let (broadcaster, store) = harness();

    let mut stream_a = broadcaster.subscribe();
    let mut stream_b = broadcaster.subscribe();

    store.update(BotStateUpdate {
        connected: Some(false),
        qr: Some(Some("ABC123".into())),
        ..BotStateUpdate::default()
    });

    for sub in [&mut stream_a, &mut stream_b] {
        let frame = sub.recv().await.expect("frame delivered");
        assert!(!frame.connected);
        assert_eq!(frame.qr.as_deref(), Some("ABC123"));
        assert!(frame.phone_number.is_none());
        assert!(frame.error.is_none());
    }
}

/// Dropping a subscription mid-traffic removes it without disturbing others.
#[tokio::test]
async fn drop_during_traffic_leaves_no_dangling_listener() {
    let (broadcaster, store) = harness();

    let keep = broadcaster.subscribe();
    let transient = broadcaster.subscribe();
    assert_eq!(broadcaster.subscriber_count(), 2);

    store.update(BotStateUpdate {
        connected: Some(true),
        ..BotStateUpdate::default()
    });
    drop(transient);
    assert_eq!(broadcaster.subscriber_count(), 1);

    store.update(BotStateUpdate {
        connected: Some(false),
        ..BotStateUpdate::default()
    });
    assert_eq!(broadcaster.subscriber_count(), 1);
    drop(keep);
    assert_eq!(broadcaster.subscriber_count(), 0);
}
