//! Short-lived toast notifications.

mod channel;

pub use channel::{
    Notification, NotificationChannel, NotificationHandle, NotificationKind,
    DEFAULT_DISMISS_AFTER,
};
