//! Channel-backed notification delivery.

use petsync_core::notification::{Notification, Notifier};
use std::time::Duration;
use tokio::sync::mpsc;

/// Times a notification to close when the front-end navigates away.
pub(crate) fn before_navigation(notification: Notification, delay: Duration) -> Notification {
    let millis = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
    notification.with_auto_close(millis)
}

/// [`Notifier`] that forwards every notification to an unbounded channel.
#[derive(Debug, Clone)]
pub struct NotificationCenter {
    sender: mpsc::UnboundedSender<Notification>,
}

impl NotificationCenter {
    /// Creates the center together with the receiving end for the front-end.
    pub fn channel() -> (Self, NotificationReceiver) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, NotificationReceiver { receiver })
    }
}

impl Notifier for NotificationCenter {
    fn notify(&self, notification: Notification) {
        tracing::debug!(
            level = %notification.level,
            message = %notification.message,
            "[Notification] Raised"
        );
        // Nobody listening is not an error
        let _ = self.sender.send(notification);
    }
}

/// Receiving end of a [`NotificationCenter`].
#[derive(Debug)]
pub struct NotificationReceiver {
    receiver: mpsc::UnboundedReceiver<Notification>,
}

impl NotificationReceiver {
    /// Waits for the next notification. `None` once every sender is gone.
    pub async fn recv(&mut self) -> Option<Notification> {
        self.receiver.recv().await
    }

    /// Takes everything queued so far without waiting.
    pub fn drain(&mut self) -> Vec<Notification> {
        let mut pending = Vec::new();
        while let Ok(notification) = self.receiver.try_recv() {
            pending.push(notification);
        }
        pending
    }
}
