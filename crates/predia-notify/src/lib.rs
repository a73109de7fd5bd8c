// SPDX-FileCopyrightText: 2026 Predia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notification normalization, deduplication, and the read-path service.
//!
//! Rows come out of storage loosely typed; [`normalize_notifications`]
//! makes them strict, [`dedupe_notifications`] removes repeats, and
//! [`NotificationService`] composes the two over a [`predia_core::NotificationStore`].

pub mod dedupe;
pub mod normalize;
pub mod service;

pub use dedupe::{dedupe_notifications, Dedupable};
pub use normalize::{normalize_notifications, normalize_record};
pub use service::{NotificationListing, NotificationService, MAX_NOTIFICATIONS};
