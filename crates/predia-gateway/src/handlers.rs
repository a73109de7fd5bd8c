// SPDX-FileCopyrightText: 2026 Predia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway REST API.
//!
//! Handles the bot status endpoints and the dashboard notification reads.
//! Response messages match what the dashboard already expects.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use predia_core::types::{BotStateUpdate, NotificacionFilter, NotificacionItem};

use crate::auth::{bearer_token, verify_bot_credential};
use crate::server::GatewayState;

/// Response body for bot status updates.
#[derive(Debug, Serialize)]
pub struct StatusUpdateResponse {
    pub success: bool,
    pub message: String,
}

/// Query parameters for GET /v1/notificaciones.
#[derive(Debug, Deserialize)]
pub struct NotificacionesQuery {
    /// Only notifications created strictly after this RFC 3339 timestamp.
    #[serde(default)]
    pub since: Option<String>,
    /// Only unread notifications.
    #[serde(default)]
    pub unread: Option<bool>,
}

/// Response body for GET /v1/notificaciones.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificacionesResponse {
    pub data: Vec<NotificacionItem>,
    pub unread_count: u64,
}

/// Request body for POST /v1/notificaciones.
#[derive(Debug, Deserialize)]
pub struct NotificacionesAction {
    pub action: String,
}

/// Response body for the mark-all-read action.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkAllReadResponse {
    pub success: bool,
    pub marked_count: u64,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// GET /health
///
/// Public liveness endpoint.
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// GET /v1/bot/status
///
/// Returns the current bot state snapshot (for debugging). Same credential
/// as the POST: this is bot/operator surface, not dashboard surface.
pub async fn get_bot_status(State(state): State<GatewayState>, headers: HeaderMap) -> Response {
    match verify_bot_credential(&headers, state.auth.bot_api_key.as_deref()) {
        Ok(()) => Json(state.store.snapshot()).into_response(),
        Err(status) => bot_credential_error(status),
    }
}

/// POST /v1/bot/status
///
/// Receives state updates from the WhatsApp bot: QR codes, connection
/// transitions, errors. The body is a partial state object; a malformed
/// body is treated as an empty update rather than rejected, so a flaky bot
/// never wedges on a hard failure.
pub async fn post_bot_status(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if let Err(status) = verify_bot_credential(&headers, state.auth.bot_api_key.as_deref()) {
        return bot_credential_error(status);
    }

    let update: BotStateUpdate = serde_json::from_slice(&body).unwrap_or_default();
    let connected_with_null_qr =
        update.connected == Some(true) && matches!(update.qr, Some(None));

    let previous = state.store.snapshot();
    let mut applied = state.store.update(update);

    // Defensive double-clear after a successful pairing; harmless when the
    // code is already gone.
    if connected_with_null_qr {
        applied = state.store.clear_qr();
    }

    // Only log transitions, not every heartbeat report.
    if applied.differs_from(&previous) {
        tracing::info!(
            connected = applied.connected,
            has_qr = applied.qr.is_some(),
            phone = applied.phone_number.as_deref().unwrap_or("-"),
            "bot state updated"
        );
    }

    Json(StatusUpdateResponse {
        success: true,
        message: "Estado actualizado".to_string(),
    })
    .into_response()
}

fn bot_credential_error(status: StatusCode) -> Response {
    let message = match status {
        StatusCode::INTERNAL_SERVER_ERROR => "Server misconfiguration",
        _ => "Unauthorized",
    };
    error_response(status, message)
}

/// GET /v1/notificaciones
///
/// Returns the normalized, deduplicated notification list plus the unread
/// count, newest first, capped at 100 records.
pub async fn get_notificaciones(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    Query(query): Query<NotificacionesQuery>,
) -> Response {
    if !state.authorizer.verify_session(bearer_token(&headers)).await {
        return error_response(StatusCode::UNAUTHORIZED, "No autenticado");
    }

    let filter = NotificacionFilter {
        since: query.since,
        unread_only: query.unread.unwrap_or(false),
    };

    match state.notifications.list(&filter).await {
        Ok(listing) => Json(NotificacionesResponse {
            data: listing.data,
            unread_count: listing.unread_count,
        })
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to read notifications");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error interno del servidor",
            )
        }
    }
}

/// POST /v1/notificaciones
///
/// Actions over the whole list. Currently only `mark_all_read`.
pub async fn post_notificaciones(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    Json(body): Json<NotificacionesAction>,
) -> Response {
    if !state.authorizer.verify_session(bearer_token(&headers)).await {
        return error_response(StatusCode::UNAUTHORIZED, "No autenticado");
    }

    if body.action != "mark_all_read" {
        return error_response(StatusCode::BAD_REQUEST, "Acción no válida");
    }

    match state.notifications.mark_all_read().await {
        Ok(marked_count) => Json(MarkAllReadResponse {
            success: true,
            marked_count,
        })
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to mark notifications read");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error interno del servidor",
            )
        }
    }
}

/// PATCH /v1/notificaciones/{id}
///
/// Marks one notification as read.
pub async fn patch_notificacion(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if !state.authorizer.verify_session(bearer_token(&headers)).await {
        return error_response(StatusCode::UNAUTHORIZED, "No autenticado");
    }

    match state.notifications.mark_read(&id).await {
        Ok(true) => Json(StatusUpdateResponse {
            success: true,
            message: "Notificación actualizada".to_string(),
        })
        .into_response(),
        Ok(false) => error_response(StatusCode::NOT_FOUND, "Notificación no encontrada"),
        Err(e) => {
            tracing::error!(error = %e, id = id.as_str(), "failed to mark notification read");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error interno del servidor",
            )
        }
    }
}
