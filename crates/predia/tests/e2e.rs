// SPDX-FileCopyrightText: 2026 Predia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests for the assembled service: real SQLite storage, real
//! state store, real router. Each test gets an isolated temp database.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use futures::StreamExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::util::ServiceExt;

use predia_config::model::StorageConfig;
use predia_core::types::NotificacionDbRecord;
use predia_core::NotificationStore;
use predia_gateway::{build_router, AuthConfig, GatewayState, StaticTokenAuthorizer};
use predia_notify::NotificationService;
use predia_state::{BotStateStore, StateBroadcaster};
use predia_storage::SqliteNotificationStore;

const BOT_KEY: &str = "bot-key-0123456789abcdef";
const SESSION: &str = "session-token";
const ADMIN: &str = "admin-token";

struct Harness {
    _dir: TempDir,
    state: GatewayState,
    storage: Arc<SqliteNotificationStore>,
    store: Arc<BotStateStore>,
}

async fn harness() -> Harness {
    let dir = TempDir::new().expect("tempdir");
    let storage = Arc::new(SqliteNotificationStore::new(StorageConfig {
        database_path: dir.path().join("e2e.db").display().to_string(),
        wal_mode: true,
    }));
    storage.initialize().await.expect("initialize storage");

    let broadcaster = Arc::new(StateBroadcaster::new());
    let store = Arc::new(BotStateStore::new(broadcaster));

    let state = GatewayState {
        store: Arc::clone(&store),
        notifications: Arc::new(NotificationService::new(
            Arc::clone(&storage) as Arc<dyn NotificationStore>
        )),
        auth: AuthConfig {
            bot_api_key: Some(BOT_KEY.into()),
        },
        authorizer: Arc::new(StaticTokenAuthorizer::new(
            Some(SESSION.into()),
            Some(ADMIN.into()),
        )),
        start_time: Instant::now(),
    };

    Harness {
        _dir: dir,
        state,
        storage,
        store,
    }
}

fn record(id: &str, tipo: Option<&str>, created_at: &str) -> NotificacionDbRecord {
    NotificacionDbRecord {
        id: id.into(),
        tipo: tipo.map(Into::into),
        titulo: format!("titulo {id}"),
        mensaje: "mensaje".into(),
        leida: None,
        data: None,
        created_at: created_at.into(),
        updated_at: None,
    }
}

async fn body_json(response: axum::response::Response) -> Value {
    let mut stream = response.into_body().into_data_stream();
    let mut bytes = Vec::new();
    while let Some(chunk) = stream.next().await {
        bytes.extend_from_slice(&chunk.expect("body chunk"));
    }
    serde_json::from_slice(&bytes).expect("JSON body")
}

async fn next_frame(
    body: &mut (impl futures::Stream<Item = Result<axum::body::Bytes, axum::Error>> + Unpin),
) -> String {
    let chunk = tokio::time::timeout(Duration::from_secs(1), body.next())
        .await
        .expect("frame within deadline")
        .expect("stream open")
        .expect("chunk");
    String::from_utf8_lossy(&chunk).into_owned()
}

#[tokio::test]
async fn notification_read_path_over_real_storage() {
    let h = harness().await;

    let mut urgent = record("urgente-1", Some("reserva"), "2026-03-01T12:00:00Z");
    urgent.data = Some(json!({"prioridad": "urgente", "lote_id": "l-4"}));
    h.storage.insert(&urgent).await.unwrap();
    h.storage
        .insert(&record("basura-1", Some("tipo_inventado"), "2026-03-01T11:00:00Z"))
        .await
        .unwrap();
    let mut read_row = record("leida-1", Some("evento"), "2026-03-01T10:00:00Z");
    read_row.leida = Some(true);
    h.storage.insert(&read_row).await.unwrap();

    let request = Request::builder()
        .uri("/v1/notificaciones")
        .header("authorization", format!("Bearer {SESSION}"))
        .body(Body::empty())
        .unwrap();
    let response = build_router(h.state.clone()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["unreadCount"], 2);

    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 3, "newest first, all three rows");
    assert_eq!(data[0]["id"], "urgente-1");
    assert_eq!(data[0]["prioridad"], "urgente");
    assert_eq!(data[1]["tipo"], "sistema", "unknown tipo normalized");
    assert_eq!(data[1]["prioridad"], "media");
    assert_eq!(data[2]["leida"], true);
}

#[tokio::test]
async fn mark_all_read_persists() {
    let h = harness().await;
    h.storage
        .insert(&record("a", None, "2026-03-01T10:00:00Z"))
        .await
        .unwrap();
    h.storage
        .insert(&record("b", None, "2026-03-01T11:00:00Z"))
        .await
        .unwrap();

    let request = Request::builder()
        .method("POST")
        .uri("/v1/notificaciones")
        .header("authorization", format!("Bearer {SESSION}"))
        .header("content-type", "application/json")
        .body(Body::from(json!({"action": "mark_all_read"}).to_string()))
        .unwrap();
    let response = build_router(h.state.clone()).oneshot(request).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["markedCount"], 2);

    assert_eq!(h.storage.unread_count().await.unwrap(), 0);
}

#[tokio::test]
async fn bot_report_reaches_two_dashboard_streams() {
    let h = harness().await;

    // Two admin dashboards connect.
    let mut streams = Vec::new();
    for _ in 0..2 {
        let request = Request::builder()
            .uri("/v1/bot/stream")
            .header("authorization", format!("Bearer {ADMIN}"))
            .body(Body::empty())
            .unwrap();
        let response = build_router(h.state.clone()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let mut body = response.into_body().into_data_stream();
        // Swallow the initial snapshot frame.
        let first = next_frame(&mut body).await;
        assert!(first.contains("\"connected\":false"));
        streams.push(body);
    }
    assert_eq!(h.store.broadcaster().subscriber_count(), 2);

    // The bot reports a fresh pairing code.
    let request = Request::builder()
        .method("POST")
        .uri("/v1/bot/status")
        .header("x-api-key", BOT_KEY)
        .header("content-type", "application/json")
        .body(Body::from(
            json!({"connected": false, "qr": "ABC123"}).to_string(),
        ))
        .unwrap();
    let response = build_router(h.state.clone()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Both dashboards see the same snapshot as their next frame.
    for body in &mut streams {
        let frame = next_frame(body).await;
        assert!(frame.contains("\"qr\":\"ABC123\""), "got: {frame}");
        assert!(frame.contains("\"connected\":false"));
        assert!(frame.contains("\"phoneNumber\":null"));
        assert!(frame.contains("\"error\":null"));
    }

    // Both disconnect; no listener survives.
    drop(streams);
    assert_eq!(h.store.broadcaster().subscriber_count(), 0);
}

#[tokio::test]
async fn default_configuration_is_valid() {
    let config = predia_config::load_and_validate_str("").expect("defaults should validate");
    assert_eq!(config.service.name, "predia");
    assert_eq!(config.gateway.port, 4600);
}
