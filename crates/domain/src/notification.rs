//! Notification: an immutable record of something a device reported.
//!
//! Devices produce notifications when their state changes. The registry keeps
//! every one of them; subscribers keep the ones from devices they follow,
//! matched on [`Notification::source`] rather than on the device id.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::{DeviceId, DeviceRef};
use crate::time::{Timestamp, display, now};

/// A message emitted by a device, stamped with the time it was raised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub timestamp: Timestamp,
    /// The device instance that raised it.
    pub source: DeviceRef,
    pub device_id: DeviceId,
    pub device_name: String,
    pub message: String,
}

impl Notification {
    /// Create a notification stamped with the current time.
    #[must_use]
    pub fn new(
        source: DeviceRef,
        device_id: DeviceId,
        device_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::at(now(), source, device_id, device_name, message)
    }

    /// Create a notification with an explicit timestamp.
    #[must_use]
    pub fn at(
        timestamp: Timestamp,
        source: DeviceRef,
        device_id: DeviceId,
        device_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            source,
            device_id,
            device_name: device_name.into(),
            message: message.into(),
        }
    }
}

/// Renders as `<timestamp> | <device name>: <message>`.
impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {}: {}",
            display(&self.timestamp),
            self.device_name,
            self.message
        )
    }
}
