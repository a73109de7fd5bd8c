// SPDX-FileCopyrightText: 2026 Predia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Browser push payload handling for the Predia realtime service.
//!
//! Independent of the in-process broadcaster: payloads may be absent or
//! malformed and every field degrades to a documented default on its own.

pub mod click;
pub mod payload;

pub use click::{click_target, route_click, ClickOutcome, ClientWindow};
pub use payload::{
    build_payload, resolve_payload, PushNotification, DEFAULT_BADGE, DEFAULT_ICON, DEFAULT_TITLE,
    DEFAULT_URL,
};
