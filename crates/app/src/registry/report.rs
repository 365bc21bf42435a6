//! Read-only views produced by the registry for display and export.

use serde::Serialize;

use smarthub_domain::device::{DeviceKind, DeviceStatus, SmartDevice};
use smarthub_domain::id::{DeviceId, SubscriberId};
use smarthub_domain::notification::Notification;
use smarthub_domain::subscriber::Subscriber;
use smarthub_domain::time::display;

/// Shown in place of a status for devices that never reported one.
pub const NO_STATUS: &str = "N/A";

/// One row of the device listing.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceReport {
    pub id: DeviceId,
    pub name: String,
    pub kind: DeviceKind,
    pub status: Option<DeviceStatus>,
}

impl DeviceReport {
    /// Status text, or [`NO_STATUS`] if none was ever set.
    #[must_use]
    pub fn status_text(&self) -> &str {
        self.status.as_ref().map_or(NO_STATUS, |s| s.text.as_str())
    }

    /// `(<time>) <status>`, or [`NO_STATUS`].
    #[must_use]
    pub fn status_line(&self) -> String {
        match &self.status {
            Some(status) => format!("({}) {}", display(&status.updated_at), status.text),
            None => NO_STATUS.to_string(),
        }
    }
}

/// One entry of the subscriber listing.
#[derive(Debug, Clone, Serialize)]
pub struct SubscriberReport {
    pub id: SubscriberId,
    pub name: String,
    pub contact_info: Option<String>,
    pub subscriptions: Vec<DeviceId>,
    pub notifications: Vec<Notification>,
}

/// Everything the registry knows, in insertion order.
#[derive(Debug, Clone, Serialize)]
pub struct RegistrySnapshot {
    pub devices: Vec<SmartDevice>,
    pub subscribers: Vec<Subscriber>,
    pub events: Vec<Notification>,
}
