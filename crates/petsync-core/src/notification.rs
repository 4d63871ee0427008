//! Transient user-facing notifications (toasts).

use serde::{Deserialize, Serialize};
use strum::Display;
use uuid::Uuid;

/// Default time a notification stays visible.
pub const DEFAULT_AUTO_CLOSE_MS: u64 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub level: NotificationLevel,
    pub message: String,
    /// Milliseconds before the notification closes itself.
    pub auto_close_ms: u64,
    /// RFC3339 creation time.
    pub created_at: String,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            level,
            message: message.into(),
            auto_close_ms: DEFAULT_AUTO_CLOSE_MS,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, message)
    }

    pub fn with_auto_close(mut self, millis: u64) -> Self {
        self.auto_close_ms = millis;
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }
}

/// Sink for notifications raised by coordinators.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}
