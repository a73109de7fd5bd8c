// SPDX-FileCopyrightText: 2026 Predia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-process bot state store and snapshot fan-out.
//!
//! [`BotStateStore`] holds the single mutable [`predia_core::BotState`];
//! [`StateBroadcaster`] pushes every fresh snapshot to all registered
//! [`StateSubscription`]s. Construct one broadcaster and one store at
//! startup and pass them by handle -- there is no hidden global.

pub mod broadcast;
pub mod store;

pub use broadcast::{StateBroadcaster, StateSubscription};
pub use store::BotStateStore;
