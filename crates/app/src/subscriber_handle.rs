//! Shared, mutex-guarded subscriber.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use smarthub_domain::id::{DeviceId, SubscriberId};
use smarthub_domain::notification::Notification;
use smarthub_domain::subscriber::Subscriber;

use crate::device_handle::DeviceHandle;

/// Cheaply cloneable reference to a [`Subscriber`].
///
/// The caller and the registry share the same subscriber, so removing it from
/// the registry leaves its log and subscriptions as they were.
#[derive(Clone)]
pub struct SubscriberHandle {
    inner: Arc<SubscriberCell>,
}

struct SubscriberCell {
    id: SubscriberId,
    name: String,
    subscriber: Mutex<Subscriber>,
}

impl SubscriberHandle {
    #[must_use]
    pub fn new(subscriber: Subscriber) -> Self {
        Self {
            inner: Arc::new(SubscriberCell {
                id: subscriber.id,
                name: subscriber.name.clone(),
                subscriber: Mutex::new(subscriber),
            }),
        }
    }

    #[must_use]
    pub fn id(&self) -> SubscriberId {
        self.inner.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Follow `device`. Returns `false` if it was already followed.
    ///
    /// Only `device` itself is followed, not other devices sharing its id.
    pub fn subscribe(&self, device: &DeviceHandle) -> bool {
        let added = self.lock().subscribe(device.source(), device.id());
        if added {
            tracing::info!(subscriber = %self.inner.name, device = %device.name(), "subscribed");
        }
        added
    }

    /// Stop following `device`. Returns `false` if it was not followed.
    pub fn unsubscribe(&self, device: &DeviceHandle) -> bool {
        let removed = self.lock().unsubscribe(device.source());
        if removed {
            tracing::info!(subscriber = %self.inner.name, device = %device.name(), "unsubscribed");
        }
        removed
    }

    /// Stop following every device registered as `device_id`, including ones
    /// no longer in the registry.
    pub fn unsubscribe_device_id(&self, device_id: DeviceId) -> bool {
        let removed = self.lock().unsubscribe_device_id(device_id);
        if removed {
            tracing::info!(subscriber = %self.inner.name, device = %device_id, "unsubscribed");
        }
        removed
    }

    #[must_use]
    pub fn is_subscribed(&self, device: &DeviceHandle) -> bool {
        self.lock().is_subscribed(device.source())
    }

    #[must_use]
    pub fn contact_info(&self) -> Option<String> {
        self.lock().contact_info.clone()
    }

    /// Replace the contact details; `None` clears them.
    pub fn set_contact_info(&self, contact_info: Option<String>) {
        self.lock().contact_info = contact_info;
    }

    /// Keep `notification` if its source is followed; returns whether it was kept.
    pub fn receive(&self, notification: &Notification) -> bool {
        self.lock().receive(notification)
    }

    /// Received notifications, oldest-first.
    #[must_use]
    pub fn history(&self) -> Vec<Notification> {
        self.lock().history().to_vec()
    }

    /// Copy of the subscriber's current state.
    #[must_use]
    pub fn snapshot(&self) -> Subscriber {
        self.lock().clone()
    }

    /// Whether both handles point at the same subscriber.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    fn lock(&self) -> MutexGuard<'_, Subscriber> {
        self.inner
            .subscriber
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl From<Subscriber> for SubscriberHandle {
    fn from(subscriber: Subscriber) -> Self {
        Self::new(subscriber)
    }
}

impl PartialEq for SubscriberHandle {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for SubscriberHandle {}

impl fmt::Debug for SubscriberHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriberHandle")
            .field("id", &self.inner.id)
            .field("name", &self.inner.name)
            .finish_non_exhaustive()
    }
}
