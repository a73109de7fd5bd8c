// SPDX-FileCopyrightText: 2026 Predia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence for the Predia realtime service.
//!
//! One serialized connection (tokio-rusqlite), WAL journal mode, and
//! refinery-embedded migrations. Implements
//! [`predia_core::NotificationStore`] over the `notificacion` table.

pub mod adapter;
pub mod database;
pub mod migrations;
pub mod models;
pub mod queries;

pub use adapter::SqliteNotificationStore;
pub use database::Database;
