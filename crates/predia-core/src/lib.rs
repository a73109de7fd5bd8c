// SPDX-FileCopyrightText: 2026 Predia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Predia realtime notification service.
//!
//! This crate provides the error type, domain types, and the adapter
//! traits (storage, authorization) implemented elsewhere in the workspace.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::PrediaError;
pub use traits::{Authorizer, NotificationStore};
pub use types::{
    BotState, BotStateUpdate, NotificacionDbRecord, NotificacionFilter, NotificacionItem,
    NotificacionTipo, Prioridad,
};
