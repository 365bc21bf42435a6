//! # smarthub-domain
//!
//! Pure domain model for the smarthub notification system.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Devices** (lights, security cameras, thermostats) and the
//!   commands they accept
//! - Define **Subscribers** (users who follow devices and keep a private log)
//! - Define **Notifications** (timestamped messages raised by devices)
//! - Provide the append-only [`event_log::EventLog`] with its retention policy
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or IO crates.
//! Delivering notifications is expressed as a port in the `app` crate.

pub mod error;
pub mod id;
pub mod time;

pub mod device;
pub mod event_log;
pub mod notification;
pub mod subscriber;
