// SPDX-License-Identifier: GPL-3.0-only

//! User-facing notifications
//!
//! The session emits short success/error messages after captures, saves,
//! loads and downloads. Rendering them is up to whoever owns the sink.

use std::fmt;
use tracing::{error, info};

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Error,
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Receiver of notifications
pub trait NotificationSink {
    fn notify(&mut self, notification: Notification);
}

/// Forwards notifications to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn notify(&mut self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => info!(message = %notification.message, "Notification"),
            NotificationKind::Error => error!(message = %notification.message, "Notification"),
        }
    }
}

/// Keeps every notification for later inspection
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    received: Vec<Notification>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn received(&self) -> &[Notification] {
        &self.received
    }

    pub fn last(&self) -> Option<&Notification> {
        self.received.last()
    }

    /// Remove and return everything received so far
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.received)
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&mut self, notification: Notification) {
        self.received.push(notification);
    }
}
