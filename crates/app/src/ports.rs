//! Port definitions: traits that connect devices to whoever delivers their
//! notifications.
//!
//! Devices depend on the narrow [`Notifier`] capability instead of the whole
//! registry, so they can be exercised against a test double.

pub mod notifier;

pub use notifier::Notifier;
