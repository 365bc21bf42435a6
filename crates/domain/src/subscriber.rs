//! Subscriber: a passive sink that opts into notifications from devices.
//!
//! A subscription names one device instance ([`DeviceRef`]) together with the
//! id it was registered under. Filtering uses the instance only, so two
//! devices that happen to share an id never leak into each other's followers.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::event_log::{EventLog, Retention};
use crate::id::{DeviceId, DeviceRef, SubscriberId};
use crate::notification::Notification;

/// One followed device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Subscription {
    pub source: DeviceRef,
    pub device_id: DeviceId,
}

/// A user who follows a set of devices and keeps a private log of what they
/// reported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscriber {
    pub id: SubscriberId,
    pub name: String,
    /// How to reach the user (e-mail, phone), if they gave one.
    pub contact_info: Option<String>,
    subscriptions: BTreeSet<Subscription>,
    notifications: EventLog<Notification>,
}

impl Subscriber {
    /// Create a subscriber with no subscriptions and an unbounded log.
    #[must_use]
    pub fn new(id: SubscriberId, name: impl Into<String>) -> Self {
        Self::with_retention(id, name, Retention::Unbounded)
    }

    /// Create a subscriber whose notification log follows `retention`.
    #[must_use]
    pub fn with_retention(id: SubscriberId, name: impl Into<String>, retention: Retention) -> Self {
        Self {
            id,
            name: name.into(),
            contact_info: None,
            subscriptions: BTreeSet::new(),
            notifications: EventLog::new(retention),
        }
    }

    /// Follow the device instance `source`, registered as `device_id`.
    ///
    /// Returns `false` if it was already followed.
    pub fn subscribe(&mut self, source: DeviceRef, device_id: DeviceId) -> bool {
        self.subscriptions.insert(Subscription { source, device_id })
    }

    /// Stop following the device instance `source`.
    ///
    /// Returns `false` if it was not followed.
    pub fn unsubscribe(&mut self, source: DeviceRef) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.source != source);
        self.subscriptions.len() != before
    }

    /// Stop following every device registered as `device_id`.
    ///
    /// Used when the device itself can no longer be looked up. Returns
    /// `false` if none was followed.
    pub fn unsubscribe_device_id(&mut self, device_id: DeviceId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.device_id != device_id);
        self.subscriptions.len() != before
    }

    #[must_use]
    pub fn is_subscribed(&self, source: DeviceRef) -> bool {
        self.subscriptions.iter().any(|s| s.source == source)
    }

    /// Ids of the followed devices, oldest device instance first.
    pub fn subscriptions(&self) -> impl Iterator<Item = DeviceId> + '_ {
        self.subscriptions.iter().map(|s| s.device_id)
    }

    /// Keep `notification` if its source device is followed.
    ///
    /// Returns whether it was kept. Notifications from other devices are
    /// dropped without touching any state.
    pub fn receive(&mut self, notification: &Notification) -> bool {
        if !self.is_subscribed(notification.source) {
            return false;
        }
        self.notifications.push(notification.clone());
        true
    }

    /// Received notifications, oldest-first.
    #[must_use]
    pub fn history(&self) -> &EventLog<Notification> {
        &self.notifications
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification(source: DeviceRef, id: u32, message: &str) -> Notification {
        Notification::new(source, DeviceId::new(id), "Lamp", message)
    }

    #[test]
    fn should_keep_notification_when_subscribed() {
        let lamp = DeviceRef::unique();
        let mut alice = Subscriber::new(SubscriberId::new(1), "Alice");
        alice.subscribe(lamp, DeviceId::new(1));

        assert!(alice.receive(&notification(lamp, 1, "Turned on")));
        assert_eq!(alice.history().len(), 1);
    }

    #[test]
    fn should_discard_notification_when_not_subscribed() {
        let mut alice = Subscriber::new(SubscriberId::new(1), "Alice");
        alice.subscribe(DeviceRef::unique(), DeviceId::new(2));

        assert!(!alice.receive(&notification(DeviceRef::unique(), 1, "Turned on")));
        assert!(alice.history().is_empty());
    }

    #[test]
    fn should_discard_notification_from_other_device_with_same_id() {
        let kitchen = DeviceRef::unique();
        let garage = DeviceRef::unique();
        let mut alice = Subscriber::new(SubscriberId::new(1), "Alice");
        alice.subscribe(kitchen, DeviceId::new(1));

        assert!(!alice.receive(&notification(garage, 1, "Turned on")));
        assert!(alice.receive(&notification(kitchen, 1, "Turned on")));
        assert_eq!(alice.history().len(), 1);
    }

    #[test]
    fn should_dedupe_repeated_subscriptions() {
        let lamp = DeviceRef::unique();
        let mut alice = Subscriber::new(SubscriberId::new(1), "Alice");
        assert!(alice.subscribe(lamp, DeviceId::new(1)));
        assert!(!alice.subscribe(lamp, DeviceId::new(1)));

        alice.receive(&notification(lamp, 1, "Turned on"));
        assert_eq!(alice.history().len(), 1);
        assert_eq!(alice.subscriptions().count(), 1);
    }

    #[test]
    fn should_stop_receiving_after_unsubscribe() {
        let lamp = DeviceRef::unique();
        let mut alice = Subscriber::new(SubscriberId::new(1), "Alice");
        alice.subscribe(lamp, DeviceId::new(1));
        alice.receive(&notification(lamp, 1, "Turned on"));

        assert!(alice.unsubscribe(lamp));
        assert!(!alice.unsubscribe(lamp));
        alice.receive(&notification(lamp, 1, "Turned off"));

        assert_eq!(alice.history().len(), 1);
    }

    #[test]
    fn should_drop_every_subscription_registered_under_an_id() {
        let mut alice = Subscriber::new(SubscriberId::new(1), "Alice");
        alice.subscribe(DeviceRef::unique(), DeviceId::new(1));
        alice.subscribe(DeviceRef::unique(), DeviceId::new(1));
        alice.subscribe(DeviceRef::unique(), DeviceId::new(2));

        assert!(alice.unsubscribe_device_id(DeviceId::new(1)));
        assert!(!alice.unsubscribe_device_id(DeviceId::new(1)));
        assert_eq!(alice.subscriptions().collect::<Vec<_>>(), [DeviceId::new(2)]);
    }

    #[test]
    fn should_bound_history_when_retention_is_bounded() {
        let lamp = DeviceRef::unique();
        let mut bob = Subscriber::with_retention(SubscriberId::new(2), "Bob", Retention::Bounded(2));
        bob.subscribe(lamp, DeviceId::new(1));
        for msg in ["a", "b", "c"] {
            bob.receive(&notification(lamp, 1, msg));
        }

        let messages: Vec<_> = bob.history().iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["b", "c"]);
    }
}
