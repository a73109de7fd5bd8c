// SPDX-FileCopyrightText: 2026 Predia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain model types for storage entities.
//!
//! The canonical types are defined in `predia-core::types` for use across
//! the trait boundary. This module re-exports them for convenience within
//! the storage crate.

pub use predia_core::types::{NotificacionDbRecord, NotificacionFilter};
