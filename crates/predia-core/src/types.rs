// SPDX-FileCopyrightText: 2026 Predia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Predia realtime service.
//!
//! Wire formats follow the dashboard's conventions: bot state and
//! notification items serialize camelCase, the `tipo`/`prioridad`
//! enumerations serialize as snake_case Spanish strings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// Connection state of the external WhatsApp automation bot, mirrored
/// in-process for real-time display on the dashboard.
///
/// Created once at startup with disconnected defaults, mutated only through
/// the state store, and lost on restart. `last_update` is stamped by the
/// store on every mutation and never supplied by callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotState {
    /// Whether the bot currently holds a live session.
    pub connected: bool,
    /// Pending pairing code; present only while awaiting authentication.
    pub qr: Option<String>,
    /// Identifying phone number once connected.
    pub phone_number: Option<String>,
    /// Time of the last mutation.
    pub last_update: DateTime<Utc>,
    /// Last reported error, if any.
    pub error: Option<String>,
}

impl Default for BotState {
    fn default() -> Self {
        Self {
            connected: false,
            qr: None,
            phone_number: None,
            last_update: Utc::now(),
            error: None,
        }
    }
}

impl BotState {
    /// Whether the observable state differs from `previous`.
    ///
    /// Used to suppress log noise from per-heartbeat status reports: `qr`
    /// is compared by presence only (a refreshed pairing code is not a
    /// transition), and `last_update` is ignored entirely.
    pub fn differs_from(&self, previous: &BotState) -> bool {
        self.connected != previous.connected
            || self.phone_number != previous.phone_number
            || self.qr.is_some() != previous.qr.is_some()
            || self.error != previous.error
    }
}

/// A partial update to [`BotState`], as reported by the bot process.
///
/// Every field is optional: absent fields are preserved from the previous
/// state. The nullable fields use double-`Option` so that an explicit
/// `"qr": null` (clear the code) is distinguished from the key being
/// absent (keep the current code).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotStateUpdate {
    #[serde(default)]
    pub connected: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub qr: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub phone_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub error: Option<Option<String>>,
}

/// Deserialize a present-but-possibly-null field into `Some(Option<T>)`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// The closed set of notification categories the dashboard understands.
///
/// Anything else found in persisted rows normalizes to [`Sistema`](Self::Sistema).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr, Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificacionTipo {
    Evento,
    Recordatorio,
    Sistema,
    Venta,
    Reserva,
    Cliente,
    Proyecto,
    Lote,
    LeadAsignado,
}

impl NotificacionTipo {
    /// The wire-format string for this variant.
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Notification priority, derived from the opaque `data` payload.
///
/// Unrecognized or missing input normalizes to [`Media`](Self::Media).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr, Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Prioridad {
    Baja,
    Media,
    Alta,
    Urgente,
}

/// A raw notification row as persisted, before normalization.
///
/// Loosely typed on purpose: rows written by retried or partially-failed
/// inserts may carry null `tipo`/`leida`/`data`, and the normalizer must
/// tolerate all of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificacionDbRecord {
    pub id: String,
    pub tipo: Option<String>,
    pub titulo: String,
    pub mensaje: String,
    pub leida: Option<bool>,
    pub data: Option<serde_json::Value>,
    pub created_at: String,
    pub updated_at: Option<String>,
}

/// A normalized notification as served to the dashboard.
///
/// Every field is concrete: `tipo` and `prioridad` are members of their
/// closed enumerations and `leida` is never null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificacionItem {
    pub id: String,
    pub tipo: NotificacionTipo,
    pub titulo: String,
    pub mensaje: String,
    pub leida: bool,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    pub prioridad: Prioridad,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Filters for the notification read path.
#[derive(Debug, Clone, Default)]
pub struct NotificacionFilter {
    /// Only records created strictly after this RFC 3339 timestamp.
    pub since: Option<String>,
    /// Only unread records.
    pub unread_only: bool,
}
