// SPDX-FileCopyrightText: 2026 Predia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tolerant resolution of inbound push payloads, and construction of
//! outbound ones.
//!
//! A push payload may be absent, malformed JSON, or valid JSON with any
//! subset of the expected fields. Each field resolves independently: a
//! bad `renotify` never costs the caller its `title`.

use serde::Serialize;
use serde_json::Value;

use predia_core::NotificacionTipo;

/// Title used when the payload carries none.
pub const DEFAULT_TITLE: &str = "Nueva notificación";
/// Icon shown when the payload carries none.
pub const DEFAULT_ICON: &str = "/icons/icon-192x192.png";
/// Badge shown when the payload carries none.
pub const DEFAULT_BADGE: &str = "/icons/badge-72x72.png";
/// Where a click lands when the payload names no URL.
pub const DEFAULT_URL: &str = "/dashboard";

/// A fully resolved push notification, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PushNotification {
    pub title: String,
    pub body: String,
    pub icon: String,
    pub badge: String,
    pub tag: Option<String>,
    pub renotify: bool,
    pub data: Option<Value>,
}

impl Default for PushNotification {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            body: String::new(),
            icon: DEFAULT_ICON.to_string(),
            badge: DEFAULT_BADGE.to_string(),
            tag: None,
            renotify: false,
            data: None,
        }
    }
}

/// Resolve an inbound payload into a displayable notification.
///
/// Structured decode first; when the bytes are not a JSON object, the raw
/// text becomes the body under the generic title. Never fails.
pub fn resolve_payload(raw: Option<&[u8]>) -> PushNotification {
    let Some(bytes) = raw.filter(|b| !b.is_empty()) else {
        return PushNotification::default();
    };

    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(fields)) => {
            let string_or = |key: &str, fallback: &str| {
                fields
                    .get(key)
                    .and_then(Value::as_str)
                    .unwrap_or(fallback)
                    .to_string()
            };

            PushNotification {
                title: string_or("title", DEFAULT_TITLE),
                body: string_or("body", ""),
                icon: string_or("icon", DEFAULT_ICON),
                badge: string_or("badge", DEFAULT_BADGE),
                tag: fields.get("tag").and_then(Value::as_str).map(Into::into),
                renotify: fields
                    .get("renotify")
                    .and_then(Value::as_bool)
                    .unwrap_or(false),
                data: fields.get("data").cloned(),
            }
        }
        _ => {
            tracing::debug!("push payload is not a JSON object, using text fallback");
            PushNotification {
                body: String::from_utf8_lossy(bytes).into_owned(),
                ..PushNotification::default()
            }
        }
    }
}

/// Build the outbound payload for a stored notification.
///
/// Stamps `data.url` (falling back to [`DEFAULT_URL`]), `data.tipo`, and
/// `data.created_at` so the click handler can route without a round-trip.
pub fn build_payload(
    titulo: &str,
    mensaje: &str,
    tipo: NotificacionTipo,
    data: Option<Value>,
    url: Option<&str>,
    created_at: &str,
) -> Value {
    let mut base = match data {
        Some(Value::Object(map)) => map,
        _ => serde_json::Map::new(),
    };

    if let Some(url) = url {
        base.entry("url").or_insert_with(|| url.into());
    }
    base.entry("url").or_insert_with(|| DEFAULT_URL.into());
    base.insert("tipo".into(), Value::String(tipo.to_string()));
    base.insert("created_at".into(), Value::String(created_at.into()));

    serde_json::json!({
        "title": titulo,
        "body": mensaje,
        "data": Value::Object(base),
    })
}
