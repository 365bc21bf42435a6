//! # smarthub-app
//!
//! Application layer: the registry, shared handles, and **port definitions**.
//!
//! ## Responsibilities
//! - Define the [`ports::Notifier`] port devices broadcast through
//! - Provide the [`registry::Registry`]: devices, subscribers, global event log
//! - Provide [`device_handle::DeviceHandle`] and
//!   [`subscriber_handle::SubscriberHandle`], the shared references the
//!   registry and its callers hold
//! - Provide id-based use-cases in [`services::control_service`]
//!
//! ## Dependency rule
//! Depends on `smarthub-domain` only. Never imports adapter crates.
//! Adapters depend on *this* crate, not the reverse.

pub mod device_handle;
pub mod ports;
pub mod registry;
pub mod services;
pub mod subscriber_handle;
