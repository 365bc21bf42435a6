//! Registry: the mediator between devices and subscribers.
//!
//! The registry keeps every registered device and subscriber in insertion
//! order, plus a global event log. It is the [`Notifier`] that devices
//! broadcast through: each broadcast lands in the global log unconditionally
//! and is then offered to every subscriber, which keeps it only if it follows
//! the source device. The two logs are independent, so removing a subscriber
//! never edits the global log and vice versa.
//!
//! The registry is constructed explicitly and shared as `Arc<Registry>`.

mod report;

pub use report::{DeviceReport, NO_STATUS, RegistrySnapshot, SubscriberReport};

use std::sync::{Mutex, MutexGuard, PoisonError};

use smarthub_domain::event_log::{EventLog, Retention};
use smarthub_domain::id::{DeviceId, SubscriberId};
use smarthub_domain::notification::Notification;

use crate::device_handle::DeviceHandle;
use crate::ports::Notifier;
use crate::subscriber_handle::SubscriberHandle;

/// Holds all devices, all subscribers, and the global event log.
///
/// One mutex guards the three collections. It is never held while a device
/// or subscriber is locked: handle lists are cloned out first.
#[derive(Debug, Default)]
pub struct Registry {
    state: Mutex<RegistryState>,
}

#[derive(Debug, Default)]
struct RegistryState {
    devices: Vec<DeviceHandle>,
    subscribers: Vec<SubscriberHandle>,
    event_log: EventLog<Notification>,
}

impl Registry {
    /// Create an empty registry whose global log follows `retention`.
    #[must_use]
    pub fn new(retention: Retention) -> Self {
        Self {
            state: Mutex::new(RegistryState {
                devices: Vec::new(),
                subscribers: Vec::new(),
                event_log: EventLog::new(retention),
            }),
        }
    }

    /// Register a device. Registering the same device twice lists it twice.
    pub fn add_device(&self, device: DeviceHandle) {
        tracing::info!(device = %device.name(), id = %device.id(), "device added to the system");
        self.lock().devices.push(device);
    }

    /// Unregister the first entry that is `device` itself.
    ///
    /// Returns `false` (and changes nothing) if it was not registered.
    pub fn remove_device(&self, device: &DeviceHandle) -> bool {
        let removed = remove_first(&mut self.lock().devices, device);
        if removed {
            tracing::info!(device = %device.name(), "device removed from the system");
        }
        removed
    }

    /// Id, name and status of every device, in registration order.
    #[must_use]
    pub fn list_devices(&self) -> Vec<DeviceReport> {
        self.devices()
            .into_iter()
            .map(|device| DeviceReport {
                id: device.id(),
                name: device.name().to_string(),
                kind: device.kind(),
                status: device.status(),
            })
            .collect()
    }

    /// First registered device with `id`.
    #[must_use]
    pub fn find_device(&self, id: DeviceId) -> Option<DeviceHandle> {
        self.lock().devices.iter().find(|d| d.id() == id).cloned()
    }

    #[must_use]
    pub fn device_count(&self) -> usize {
        self.lock().devices.len()
    }

    /// Register a subscriber. Registering the same subscriber twice makes it
    /// receive each broadcast twice.
    pub fn add_observer(&self, subscriber: SubscriberHandle) {
        tracing::info!(subscriber = %subscriber.name(), id = %subscriber.id(), "added as an observer");
        self.lock().subscribers.push(subscriber);
    }

    /// Unregister the first entry that is `subscriber` itself.
    ///
    /// The subscriber keeps its log and subscriptions.
    pub fn remove_observer(&self, subscriber: &SubscriberHandle) -> bool {
        let removed = remove_first(&mut self.lock().subscribers, subscriber);
        if removed {
            tracing::info!(subscriber = %subscriber.name(), "removed as an observer");
        }
        removed
    }

    /// Every subscriber with its subscriptions and full notification log.
    #[must_use]
    pub fn list_observers(&self) -> Vec<SubscriberReport> {
        self.observers()
            .into_iter()
            .map(|handle| {
                let subscriber = handle.snapshot();
                SubscriberReport {
                    id: subscriber.id,
                    name: subscriber.name.clone(),
                    contact_info: subscriber.contact_info.clone(),
                    subscriptions: subscriber.subscriptions().collect(),
                    notifications: subscriber.history().to_vec(),
                }
            })
            .collect()
    }

    /// First registered subscriber with `id`.
    #[must_use]
    pub fn find_observer(&self, id: SubscriberId) -> Option<SubscriberHandle> {
        self.lock().subscribers.iter().find(|s| s.id() == id).cloned()
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.lock().subscribers.len()
    }

    /// Every broadcast so far, oldest-first, regardless of subscriptions.
    #[must_use]
    pub fn event_history(&self) -> Vec<Notification> {
        self.lock().event_log.to_vec()
    }

    /// Serializable copy of the whole registry.
    #[must_use]
    pub fn snapshot(&self) -> RegistrySnapshot {
        let (devices, subscribers, events) = {
            let state = self.lock();
            (
                state.devices.clone(),
                state.subscribers.clone(),
                state.event_log.to_vec(),
            )
        };
        RegistrySnapshot {
            devices: devices.iter().map(DeviceHandle::snapshot).collect(),
            subscribers: subscribers.iter().map(SubscriberHandle::snapshot).collect(),
            events,
        }
    }

    fn devices(&self) -> Vec<DeviceHandle> {
        self.lock().devices.clone()
    }

    fn observers(&self) -> Vec<SubscriberHandle> {
        self.lock().subscribers.clone()
    }

    fn lock(&self) -> MutexGuard<'_, RegistryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Notifier for Registry {
    fn broadcast(&self, notification: Notification) {
        let subscribers = {
            let mut state = self.lock();
            state.event_log.push(notification.clone());
            state.subscribers.clone()
        };

        let delivered = subscribers
            .iter()
            .filter(|subscriber| subscriber.receive(&notification))
            .count();

        tracing::debug!(
            device = %notification.device_name,
            message = %notification.message,
            delivered,
            "notification broadcast"
        );
    }
}

fn remove_first<T: PartialEq>(items: &mut Vec<T>, target: &T) -> bool {
    match items.iter().position(|item| item == target) {
        Some(index) => {
            items.remove(index);
            true
        }
        None => false,
    }
}
