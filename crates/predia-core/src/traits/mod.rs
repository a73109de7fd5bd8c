// SPDX-FileCopyrightText: 2026 Predia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter traits implemented by the concrete storage and auth backends.

pub mod auth;
pub mod storage;

pub use auth::Authorizer;
pub use storage::NotificationStore;
