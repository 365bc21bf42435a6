//! Shared, mutex-guarded device wired to a [`Notifier`].

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use smarthub_domain::device::{Device, DeviceCommand, DeviceKind, DeviceStatus, SmartDevice};
use smarthub_domain::error::HubError;
use smarthub_domain::id::{DeviceId, DeviceRef};
use smarthub_domain::notification::Notification;

use crate::ports::Notifier;

/// Cheaply cloneable reference to a device.
///
/// Two handles are equal only if they point at the same device, so the
/// registry tracks devices by reference rather than by id. Each handle gets
/// its own [`DeviceRef`], which stamps every notification it sends.
///
/// The notifier is held weakly: a registry owns its devices, not the other
/// way round.
#[derive(Clone)]
pub struct DeviceHandle {
    inner: Arc<DeviceCell>,
}

struct DeviceCell {
    source: DeviceRef,
    id: DeviceId,
    name: String,
    kind: DeviceKind,
    device: Mutex<SmartDevice>,
    notifier: Weak<dyn Notifier>,
}

impl DeviceHandle {
    /// Wrap `device` and route its notifications to `notifier`.
    pub fn new<N>(device: impl Into<SmartDevice>, notifier: &Arc<N>) -> Self
    where
        N: Notifier + 'static,
    {
        let device = device.into();
        let notifier: Weak<N> = Arc::downgrade(notifier);
        let notifier: Weak<dyn Notifier> = notifier;
        Self {
            inner: Arc::new(DeviceCell {
                source: DeviceRef::unique(),
                id: device.id(),
                name: device.name().to_string(),
                kind: device.kind(),
                device: Mutex::new(device),
                notifier,
            }),
        }
    }

    /// Identity of this device instance, shared by all clones of the handle.
    #[must_use]
    pub fn source(&self) -> DeviceRef {
        self.inner.source
    }

    #[must_use]
    pub fn id(&self) -> DeviceId {
        self.inner.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    #[must_use]
    pub fn kind(&self) -> DeviceKind {
        self.inner.kind
    }

    #[must_use]
    pub fn status(&self) -> Option<DeviceStatus> {
        self.lock().status().cloned()
    }

    /// Copy of the device's current state.
    #[must_use]
    pub fn snapshot(&self) -> SmartDevice {
        self.lock().clone()
    }

    /// Run `command` and broadcast the resulting message, if any.
    ///
    /// Returns whether a notification was sent. The device lock is released
    /// before broadcasting.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::UnsupportedCommand`] if `command` is meant for a
    /// different kind of device.
    #[tracing::instrument(skip(self), fields(device = %self.inner.name))]
    pub fn apply(&self, command: DeviceCommand) -> Result<bool, HubError> {
        let message = self.lock().apply(command)?;
        match message {
            Some(message) => {
                self.notify(message);
                Ok(true)
            }
            None => {
                tracing::debug!("change below notification threshold");
                Ok(false)
            }
        }
    }

    /// Ask the notifier to broadcast `message`, stamped with the current time
    /// and this device's name.
    pub fn notify(&self, message: impl Into<String>) {
        let notification = Notification::new(
            self.inner.source,
            self.inner.id,
            self.inner.name.clone(),
            message,
        );
        match self.inner.notifier.upgrade() {
            Some(notifier) => notifier.broadcast(notification),
            None => tracing::warn!(
                device = %self.inner.name,
                message = %notification.message,
                "notifier dropped, notification discarded"
            ),
        }
    }

    /// Whether both handles point at the same device.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    fn lock(&self) -> MutexGuard<'_, SmartDevice> {
        self.inner
            .device
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl PartialEq for DeviceHandle {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for DeviceHandle {}

impl fmt::Debug for DeviceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceHandle")
            .field("id", &self.inner.id)
            .field("name", &self.inner.name)
            .field("kind", &self.inner.kind)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smarthub_domain::device::{Light, NotifyPolicy, Thermostat};

    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<Notification>>,
    }

    impl RecordingNotifier {
        fn messages(&self) -> Vec<String> {
            self.sent
                .lock()
                .unwrap()
                .iter()
                .map(|n| n.message.clone())
                .collect()
        }
    }

    impl Notifier for RecordingNotifier {
        fn broadcast(&self, notification: Notification) {
            self.sent.lock().unwrap().push(notification);
        }
    }

    #[test]
    fn should_broadcast_message_after_command() {
        let notifier = Arc::new(RecordingNotifier::default());
        let lamp = DeviceHandle::new(Light::new(DeviceId::new(1), "Lamp"), &notifier);

        let sent = lamp.apply(DeviceCommand::ToggleOnOff).unwrap();

        assert!(sent);
        assert_eq!(notifier.messages(), vec!["Turned on"]);
        let recorded = notifier.sent.lock().unwrap()[0].clone();
        assert_eq!(recorded.source, lamp.source());
        assert_eq!(recorded.device_id, DeviceId::new(1));
        assert_eq!(recorded.device_name, "Lamp");
    }

    #[test]
    fn should_not_broadcast_when_policy_suppresses_change() {
        let notifier = Arc::new(RecordingNotifier::default());
        let thermo = DeviceHandle::new(
            Thermostat::new(DeviceId::new(3), "Thermo").with_policy(NotifyPolicy::default_threshold()),
            &notifier,
        );

        let sent = thermo.apply(DeviceCommand::SetTemperature(4.0)).unwrap();

        assert!(!sent);
        assert!(notifier.messages().is_empty());
        assert_eq!(thermo.status().unwrap().text, "Set at 4 degrees, Standby");
    }

    #[test]
    fn should_leave_notifier_untouched_when_command_is_unsupported() {
        let notifier = Arc::new(RecordingNotifier::default());
        let lamp = DeviceHandle::new(Light::new(DeviceId::new(1), "Lamp"), &notifier);

        let result = lamp.apply(DeviceCommand::SetMode("Heat".into()));

        assert!(result.is_err());
        assert!(notifier.messages().is_empty());
    }

    #[test]
    fn should_discard_notification_when_notifier_is_gone() {
        let notifier = Arc::new(RecordingNotifier::default());
        let lamp = DeviceHandle::new(Light::new(DeviceId::new(1), "Lamp"), &notifier);
        drop(notifier);

        let sent = lamp.apply(DeviceCommand::ToggleOnOff).unwrap();

        assert!(sent);
        assert_eq!(lamp.status().unwrap().text, "On");
    }

    #[test]
    fn should_compare_by_reference_not_by_id() {
        let notifier = Arc::new(RecordingNotifier::default());
        let a = DeviceHandle::new(Light::new(DeviceId::new(1), "Lamp"), &notifier);
        let b = DeviceHandle::new(Light::new(DeviceId::new(1), "Lamp"), &notifier);

        assert_eq!(a, a.clone());
        assert_eq!(a.source(), a.clone().source());
        assert_ne!(a, b);
        assert_ne!(a.source(), b.source());
    }
}
