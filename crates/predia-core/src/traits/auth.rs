// SPDX-FileCopyrightText: 2026 Predia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authorization seam for the gateway.
//!
//! The CRM's session system is an external collaborator: the gateway only
//! needs two yes/no answers from it. Implementations must be fail-closed --
//! when no credential backend is configured, every check answers `false`.

use async_trait::async_trait;

/// Answers authorization questions for dashboard callers.
#[async_trait]
pub trait Authorizer: Send + Sync {
    /// Whether `token` identifies any signed-in dashboard user.
    async fn verify_session(&self, token: Option<&str>) -> bool;

    /// Whether `token` carries elevated (administrative) privilege.
    ///
    /// Checked once when a streaming connection opens; there is no
    /// revocation path for the lifetime of an already-open stream.
    async fn verify_admin(&self, token: Option<&str>) -> bool;
}
