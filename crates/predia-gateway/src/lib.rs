// SPDX-FileCopyrightText: 2026 Predia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Predia realtime service.
//!
//! Three surfaces share one axum router: the external bot reports state,
//! administrators watch it live over SSE, and dashboard sessions read
//! their notification list.

pub mod auth;
pub mod handlers;
pub mod server;
pub mod sse;

pub use auth::{AuthConfig, StaticTokenAuthorizer};
pub use server::{build_router, start_server, GatewayState};
