// SPDX-FileCopyrightText: 2026 Predia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Click routing for displayed push notifications.
//!
//! A click lands on exactly one surface: the first existing client window
//! when there is one, otherwise a single new window at the notification's
//! target URL.

use serde_json::Value;

use crate::payload::{PushNotification, DEFAULT_URL};

/// An open dashboard surface the click handler can route to.
pub trait ClientWindow {
    /// Bring this window to the foreground.
    fn focus(&mut self);
    /// Hand the notification's payload to the window.
    fn deliver(&mut self, data: &Value);
}

/// Where a click on `notification` navigates when no window is open.
pub fn click_target(notification: &PushNotification) -> String {
    notification
        .data
        .as_ref()
        .and_then(|data| data.get("url"))
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_URL)
        .to_string()
}

/// What the click handler did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// An existing window was focused (and given the payload).
    Focused,
    /// A new window was opened at this URL.
    Opened(String),
}

/// Route a click: focus the first existing window, else open a new one.
pub fn route_click<W: ClientWindow>(
    windows: &mut [W],
    notification: &PushNotification,
) -> ClickOutcome {
    match windows.first_mut() {
        Some(window) => {
            window.focus();
            if let Some(data) = &notification.data {
                window.deliver(data);
            }
            ClickOutcome::Focused
        }
        None => ClickOutcome::Opened(click_target(notification)),
    }
}
