// SPDX-FileCopyrightText: 2026 Predia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential checks for the gateway.
//!
//! Two independent populations call in:
//! 1. The external bot, presenting a pre-shared key (`x-api-key` header or
//!    `Authorization: Bearer`) on state updates.
//! 2. Dashboard users, whose session/admin standing is answered by an
//!    [`Authorizer`].
//!
//! All checks are fail-closed: an unconfigured secret rejects everyone.

use async_trait::async_trait;
use axum::http::{HeaderMap, StatusCode};

use predia_core::Authorizer;

/// Bot credential configuration for the gateway.
#[derive(Clone)]
pub struct AuthConfig {
    /// Expected bot api key. `None` rejects every inbound update.
    pub bot_api_key: Option<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field(
                "bot_api_key",
                &self.bot_api_key.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}

/// Extract a bearer token from the Authorization header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

/// The credential the bot presented, from `x-api-key` or the bearer header.
fn presented_bot_key<'h>(headers: &'h HeaderMap) -> Option<&'h str> {
    headers
        .get("x-api-key")
        .and_then(|v| v.to_str().ok())
        .or_else(|| bearer_token(headers))
}

/// Validate the bot's pre-shared credential.
///
/// Returns 500 when the server has no key configured (misconfiguration,
/// not the caller's fault) and 401 on a missing or mismatched credential.
/// State is never touched on rejection.
pub fn verify_bot_credential(
    headers: &HeaderMap,
    expected: Option<&str>,
) -> Result<(), StatusCode> {
    let Some(expected) = expected else {
        tracing::error!("bot api key not configured -- rejecting state update");
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    };

    match presented_bot_key(headers) {
        Some(presented) if presented == expected => Ok(()),
        _ => {
            tracing::warn!("invalid bot api key");
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}

/// Token-comparison [`Authorizer`] backed by the gateway config.
///
/// The admin token also counts as a valid session, so an administrator
/// does not need two credentials.
pub struct StaticTokenAuthorizer {
    session_token: Option<String>,
    admin_token: Option<String>,
}

impl StaticTokenAuthorizer {
    pub fn new(session_token: Option<String>, admin_token: Option<String>) -> Self {
        Self {
            session_token,
            admin_token,
        }
    }
}

#[async_trait]
impl Authorizer for StaticTokenAuthorizer {
    async fn verify_session(&self, token: Option<&str>) -> bool {
        let Some(token) = token else {
            return false;
        };
        self.session_token.as_deref() == Some(token)
            || self.admin_token.as_deref() == Some(token)
    }

    async fn verify_admin(&self, token: Option<&str>) -> bool {
        match (token, self.admin_token.as_deref()) {
            (Some(token), Some(expected)) => token == expected,
            _ => false,
        }
    }
}
