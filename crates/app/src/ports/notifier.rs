//! Notifier port: fan-out of device notifications.

use smarthub_domain::notification::Notification;

/// Delivers a device notification to every interested party.
///
/// Delivery is synchronous: when `broadcast` returns, every recipient has
/// seen the notification.
pub trait Notifier: Send + Sync {
    fn broadcast(&self, notification: Notification);
}
