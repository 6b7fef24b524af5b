//! A single auto-dismissing notification slot.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

/// How long a notification stays up unless dismissed.
pub const DEFAULT_DISMISS_AFTER: Duration = Duration::from_secs(3);

/// Visual kind of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

/// A visible notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    #[serde(skip)]
    id: u64,
    pub message: String,
    pub kind: NotificationKind,
}

impl Notification {
    /// Handle that can dismiss this notification.
    pub fn handle(&self) -> NotificationHandle {
        NotificationHandle(self.id)
    }
}

/// Identifies one shown notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationHandle(u64);

#[derive(Debug, Default)]
struct Slot {
    next_id: u64,
    current: Option<Notification>,
    timer: Option<JoinHandle<()>>,
}

impl Slot {
    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

/// One notification at a time for a page.
///
/// Showing a message replaces whatever is up and cancels its timer. Each
/// message is taken down after the dismiss delay, or earlier by
/// [`NotificationChannel::dismiss`]. A timer only ever clears the message
/// it was started for.
///
/// Timers run on the ambient tokio runtime. Outside a runtime a message
/// stays up until it is dismissed or replaced.
#[derive(Debug, Clone)]
pub struct NotificationChannel {
    slot: Arc<Mutex<Slot>>,
    dismiss_after: Duration,
}

impl Default for NotificationChannel {
    fn default() -> Self {
        Self::new(DEFAULT_DISMISS_AFTER)
    }
}

impl NotificationChannel {
    pub fn new(dismiss_after: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot::default())),
            dismiss_after,
        }
    }

    /// Show a message, replacing the current one.
    pub fn show(&self, message: impl Into<String>, kind: NotificationKind) -> NotificationHandle {
        let mut slot = self.lock();
        slot.cancel_timer();

        slot.next_id += 1;
        let id = slot.next_id;
        let notification = Notification {
            id,
            message: message.into(),
            kind,
        };
        tracing::debug!(id, kind = ?kind, message = %notification.message, "notification shown");
        slot.current = Some(notification);

        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                let weak = Arc::downgrade(&self.slot);
                let delay = self.dismiss_after;
                slot.timer = Some(runtime.spawn(async move {
                    tokio::time::sleep(delay).await;
                    if let Some(slot) = weak.upgrade() {
                        let mut slot = slot.lock().unwrap_or_else(PoisonError::into_inner);
                        if slot.current.as_ref().map(|n| n.id) == Some(id) {
                            slot.current = None;
                            slot.timer = None;
                            tracing::debug!(id, "notification expired");
                        }
                    }
                }));
            }
            Err(_) => {
                tracing::warn!(id, "no async runtime; notification will not auto-dismiss");
            }
        }

        NotificationHandle(id)
    }

    /// Show a success message.
    pub fn success(&self, message: impl Into<String>) -> NotificationHandle {
        self.show(message, NotificationKind::Success)
    }

    /// Show an error message.
    pub fn error(&self, message: impl Into<String>) -> NotificationHandle {
        self.show(message, NotificationKind::Error)
    }

    /// Take down the notification behind `handle` and cancel its timer.
    ///
    /// Returns `false` if that notification is no longer showing.
    pub fn dismiss(&self, handle: NotificationHandle) -> bool {
        let mut slot = self.lock();
        if slot.current.as_ref().map(|n| n.id) != Some(handle.0) {
            return false;
        }
        slot.current = None;
        slot.cancel_timer();
        tracing::debug!(id = handle.0, "notification dismissed");
        true
    }

    /// The notification currently showing.
    pub fn current(&self) -> Option<Notification> {
        self.lock().current.clone()
    }

    /// Configured dismiss delay.
    pub fn dismiss_after(&self) -> Duration {
        self.dismiss_after
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    fn message(channel: &NotificationChannel) -> Option<String> {
        channel.current().map(|n| n.message)
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_dismiss_after_delay() {
        let channel = NotificationChannel::default();
        channel.success("Added to cart");

        sleep(Duration::from_millis(2_900)).await;
        assert_eq!(message(&channel).as_deref(), Some("Added to cart"));

        sleep(Duration::from_millis(200)).await;
        tokio::task::yield_now().await;
        assert!(channel.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_explicit_dismiss_cancels_timer() {
        let channel = NotificationChannel::default();
        let first = channel.success("first");

        sleep(Duration::from_millis(500)).await;
        assert!(channel.dismiss(first));
        assert!(channel.current().is_none());

        // Shown at t=2s; the first timer would have fired at t=3s.
        sleep(Duration::from_millis(1_500)).await;
        channel.error("second");

        sleep(Duration::from_millis(1_500)).await;
        tokio::task::yield_now().await;
        assert_eq!(message(&channel).as_deref(), Some("second"));

        sleep(Duration::from_millis(2_000)).await;
        tokio::task::yield_now().await;
        assert!(channel.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_show_replaces_current() {
        let channel = NotificationChannel::new(Duration::from_secs(3));
        let first = channel.success("first");
        sleep(Duration::from_secs(2)).await;
        channel.error("second");

        let current = channel.current().unwrap();
        assert_eq!(current.message, "second");
        assert_eq!(current.kind, NotificationKind::Error);

        // Replaced handles no longer dismiss anything.
        assert!(!channel.dismiss(first));
        assert!(channel.current().is_some());

        // Past the first timer's deadline, the replacement is still up.
        sleep(Duration::from_millis(1_500)).await;
        tokio::task::yield_now().await;
        assert_eq!(message(&channel).as_deref(), Some("second"));
    }

    #[test]
    fn test_without_runtime_stays_until_dismissed() {
        let channel = NotificationChannel::default();
        let handle = channel.success("sticky");
        assert_eq!(channel.current().map(|n| n.handle()), Some(handle));
        assert!(channel.dismiss(handle));
        assert!(!channel.dismiss(handle));
    }
}
