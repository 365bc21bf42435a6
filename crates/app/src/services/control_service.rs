//! Control service: the operations an operator performs by numeric id.

use std::sync::Arc;

use smarthub_domain::device::{DeviceCommand, SmartDevice};
use smarthub_domain::error::{HubError, NotFoundError};
use smarthub_domain::event_log::Retention;
use smarthub_domain::id::{DeviceId, SubscriberId};
use smarthub_domain::subscriber::Subscriber;

use crate::device_handle::DeviceHandle;
use crate::registry::Registry;
use crate::subscriber_handle::SubscriberHandle;

/// Resolves ids against the registry and applies the requested change.
#[derive(Debug, Clone)]
pub struct ControlService {
    registry: Arc<Registry>,
    subscriber_retention: Retention,
}

impl ControlService {
    /// Create a service over `registry`. New subscribers get a notification
    /// log following `subscriber_retention`.
    #[must_use]
    pub fn new(registry: Arc<Registry>, subscriber_retention: Retention) -> Self {
        Self {
            registry,
            subscriber_retention,
        }
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Wire `device` to the registry and register it.
    pub fn add_device(&self, device: impl Into<SmartDevice>) -> DeviceHandle {
        let handle = DeviceHandle::new(device, &self.registry);
        self.registry.add_device(handle.clone());
        handle
    }

    /// Send `command` to the device with `id`.
    ///
    /// Returns whether a notification was broadcast.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::NotFound`] when no device has `id`, or
    /// [`HubError::UnsupportedCommand`] when the device is of another kind.
    #[tracing::instrument(skip(self))]
    pub fn control(&self, id: DeviceId, command: DeviceCommand) -> Result<bool, HubError> {
        self.device(id)?.apply(command)
    }

    /// Unregister the device with `id` and hand it back.
    ///
    /// The global log and subscriber logs keep what it already reported.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::NotFound`] when no device has `id`.
    pub fn remove_device(&self, id: DeviceId) -> Result<DeviceHandle, HubError> {
        let handle = self.device(id)?;
        self.registry.remove_device(&handle);
        Ok(handle)
    }

    /// Create a subscriber and register it as an observer.
    pub fn add_subscriber(&self, id: SubscriberId, name: impl Into<String>) -> SubscriberHandle {
        let handle = SubscriberHandle::new(Subscriber::with_retention(
            id,
            name,
            self.subscriber_retention,
        ));
        self.registry.add_observer(handle.clone());
        handle
    }

    /// Unregister the subscriber with `id` and hand it back.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::NotFound`] when no subscriber has `id`.
    pub fn remove_subscriber(&self, id: SubscriberId) -> Result<SubscriberHandle, HubError> {
        let handle = self.subscriber(id)?;
        self.registry.remove_observer(&handle);
        Ok(handle)
    }

    /// Make subscriber `subscriber_id` follow device `device_id`.
    ///
    /// Returns `false` if it already did.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::NotFound`] when either id is unknown.
    pub fn subscribe(
        &self,
        subscriber_id: SubscriberId,
        device_id: DeviceId,
    ) -> Result<bool, HubError> {
        let subscriber = self.subscriber(subscriber_id)?;
        let device = self.device(device_id)?;
        Ok(subscriber.subscribe(&device))
    }

    /// Make subscriber `subscriber_id` stop following `device_id`.
    ///
    /// The registered device with that id is dropped first. If the subscriber
    /// did not follow it, every followed device registered under `device_id`
    /// is dropped instead, so devices no longer in the registry can still be
    /// unfollowed.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::NotFound`] when the subscriber is unknown.
    pub fn unsubscribe(
        &self,
        subscriber_id: SubscriberId,
        device_id: DeviceId,
    ) -> Result<bool, HubError> {
        let subscriber = self.subscriber(subscriber_id)?;
        let removed = self
            .registry
            .find_device(device_id)
            .is_some_and(|device| subscriber.unsubscribe(&device));
        Ok(removed || subscriber.unsubscribe_device_id(device_id))
    }

    /// Look up a registered device by id.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::NotFound`] when no device has `id`.
    pub fn device(&self, id: DeviceId) -> Result<DeviceHandle, HubError> {
        self.registry.find_device(id).ok_or_else(|| {
            NotFoundError {
                entity: "Device",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// Look up a registered subscriber by id.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::NotFound`] when no subscriber has `id`.
    pub fn subscriber(&self, id: SubscriberId) -> Result<SubscriberHandle, HubError> {
        self.registry.find_observer(id).ok_or_else(|| {
            NotFoundError {
                entity: "Subscriber",
                id: id.to_string(),
            }
            .into()
        })
    }
}
