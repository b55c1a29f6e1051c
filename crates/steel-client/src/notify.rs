//! # Notification Surface
//!
//! Fire-and-forget user notifications for classified API failures.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Notification Flow                                   │
//! │                                                                         │
//! │  Transport classifies a failure                                        │
//! │       │                                                                 │
//! │       ├── RequestOptions.silent? ──► skip (caller handles it)          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Notifier::notify(title, message, category, auto-dismiss)              │
//! │       │                                                                 │
//! │       ├── LogNotifier      → tracing::warn (default, headless)         │
//! │       └── ChannelNotifier  → mpsc queue a UI drains into toasts        │
//! │                                                                         │
//! │  No return value is consumed: a dropped receiver loses the             │
//! │  notification, never the request.                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::warn;

use crate::error::{ApiError, ErrorCategory};

/// How long a notification stays on screen before auto-dismissing.
pub const NOTIFY_AUTO_DISMISS: Duration = Duration::from_secs(3);

/// A single user notification.
#[derive(Debug, Clone)]
pub struct Notification {
    /// Short heading, e.g. "Error".
    pub title: String,

    /// Human-readable body text.
    pub message: String,

    /// The failure category that produced this notification.
    pub category: ErrorCategory,

    /// Auto-dismiss timeout for the rendering surface.
    pub auto_dismiss: Duration,
}

impl Notification {
    /// Builds the standard error notification for a classified failure.
    pub fn error(err: &ApiError) -> Self {
        Notification {
            title: "Error".to_string(),
            message: err.user_message(),
            category: err.category(),
            auto_dismiss: NOTIFY_AUTO_DISMISS,
        }
    }
}

/// Receives notifications from the transport's error path.
///
/// Implementations must not block and must not fail: notifying is strictly
/// best-effort.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Default notifier: writes the notification to the log.
///
/// Suits headless use (tests, CLI tools, services without a toast surface).
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        warn!(
            category = ?notification.category,
            title = %notification.title,
            "{}",
            notification.message
        );
    }
}

/// Queue-backed notifier for hosts with a real notification surface.
///
/// The transport pushes; the UI side drains the receiver and renders
/// auto-dismissing toasts. If the receiver is gone, notifications are
/// silently dropped.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    /// Creates the notifier and the receiving end for the UI to drain.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ChannelNotifier { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        // Fire-and-forget: a closed channel just drops the notification
        let _ = self.tx.send(notification);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_notification_shape() {
        let err = ApiError::from_status(404, "products/9", None);
        let n = Notification::error(&err);

        assert_eq!(n.title, "Error");
        assert_eq!(n.message, "Data tidak ditemukan");
        assert_eq!(n.category, ErrorCategory::NotFound);
        assert_eq!(n.auto_dismiss, NOTIFY_AUTO_DISMISS);
    }

    #[tokio::test]
    async fn test_channel_notifier_delivers() {
        let (notifier, mut rx) = ChannelNotifier::new();

        notifier.notify(Notification::error(&ApiError::ServerError(500)));

        let n = rx.recv().await.unwrap();
        assert_eq!(n.category, ErrorCategory::ServerError);
        assert_eq!(n.message, "Server Error. Coba lagi nanti.");
    }

    #[test]
    fn test_channel_notifier_tolerates_dropped_receiver() {
        let (notifier, rx) = ChannelNotifier::new();
        drop(rx);

        // Must not panic or error
        notifier.notify(Notification::error(&ApiError::Other("x".to_string())));
    }
}
