//! Device: a controllable thing with identity and a human-readable status.
//!
//! Each variant is a concrete struct ([`Light`], [`SecurityCamera`],
//! [`Thermostat`]) sharing a [`DeviceCore`] and the [`Device`] trait.
//! [`SmartDevice`] wraps them so mixed collections can be stored and
//! commanded uniformly.
//!
//! Mutators never fail and never validate input. They return the message a
//! device wants broadcast, or `None` when its notification policy stays
//! quiet; delivering that message is the application layer's job.

mod camera;
mod command;
mod light;
mod thermostat;

pub use camera::SecurityCamera;
pub use command::DeviceCommand;
pub use light::Light;
pub use thermostat::{NotifyPolicy, Thermostat};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::HubError;
use crate::id::DeviceId;
use crate::time::{Timestamp, now};

/// Discriminant for the device variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    Light,
    SecurityCamera,
    Thermostat,
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => f.write_str("light"),
            Self::SecurityCamera => f.write_str("security camera"),
            Self::Thermostat => f.write_str("thermostat"),
        }
    }
}

/// Last reported status together with the moment it was set.
///
/// Bundling the two makes "a status time exists only if a status exists"
/// impossible to violate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceStatus {
    pub text: String,
    pub updated_at: Timestamp,
}

/// State shared by every device variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceCore {
    id: DeviceId,
    name: String,
    status: Option<DeviceStatus>,
}

impl DeviceCore {
    #[must_use]
    pub fn new(id: DeviceId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            status: None,
        }
    }
}

/// Capabilities every device exposes.
pub trait Device {
    fn core(&self) -> &DeviceCore;

    fn core_mut(&mut self) -> &mut DeviceCore;

    fn kind(&self) -> DeviceKind;

    fn id(&self) -> DeviceId {
        self.core().id
    }

    fn name(&self) -> &str {
        &self.core().name
    }

    fn status(&self) -> Option<&DeviceStatus> {
        self.core().status.as_ref()
    }

    /// Replace the status text and stamp it with the current time.
    fn set_status(&mut self, text: String) {
        self.core_mut().status = Some(DeviceStatus {
            text,
            updated_at: now(),
        });
    }
}

/// Wrapper enum for the concrete device types.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SmartDevice {
    Light(Light),
    SecurityCamera(SecurityCamera),
    Thermostat(Thermostat),
}

impl SmartDevice {
    /// Run `command` against this device.
    ///
    /// Returns the notification message when one is due.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::UnsupportedCommand`] when `command` targets a
    /// different kind of device. The device is left untouched in that case.
    pub fn apply(&mut self, command: DeviceCommand) -> Result<Option<String>, HubError> {
        let name = command.name();
        let message = match (self, command) {
            (Self::Light(d), DeviceCommand::SetBrightness(level)) => Some(d.set_brightness(level)),
            (Self::Light(d), DeviceCommand::SetColour(colour)) => Some(d.set_colour(colour)),
            (Self::Light(d), DeviceCommand::ToggleOnOff) => Some(d.toggle_on_off()),
            (Self::SecurityCamera(d), DeviceCommand::SetResolution(res)) => {
                Some(d.set_resolution(res))
            }
            (Self::SecurityCamera(d), DeviceCommand::ToggleRecording) => Some(d.toggle_recording()),
            (Self::Thermostat(d), DeviceCommand::SetTemperature(t)) => d.set_temperature(t),
            (Self::Thermostat(d), DeviceCommand::SetHumidity(h)) => d.set_humidity(h),
            (Self::Thermostat(d), DeviceCommand::SetMode(mode)) => Some(d.set_mode(mode)),
            (device, _) => {
                return Err(HubError::UnsupportedCommand {
                    device: device.kind(),
                    command: name,
                });
            }
        };
        Ok(message)
    }
}

impl Device for SmartDevice {
    fn core(&self) -> &DeviceCore {
        match self {
            Self::Light(d) => d.core(),
            Self::SecurityCamera(d) => d.core(),
            Self::Thermostat(d) => d.core(),
        }
    }

    fn core_mut(&mut self) -> &mut DeviceCore {
        match self {
            Self::Light(d) => d.core_mut(),
            Self::SecurityCamera(d) => d.core_mut(),
            Self::Thermostat(d) => d.core_mut(),
        }
    }

    fn kind(&self) -> DeviceKind {
        match self {
            Self::Light(_) => DeviceKind::Light,
            Self::SecurityCamera(_) => DeviceKind::SecurityCamera,
            Self::Thermostat(_) => DeviceKind::Thermostat,
        }
    }
}

impl From<Light> for SmartDevice {
    fn from(d: Light) -> Self {
        Self::Light(d)
    }
}

impl From<SecurityCamera> for SmartDevice {
    fn from(d: SecurityCamera) -> Self {
        Self::SecurityCamera(d)
    }
}

impl From<Thermostat> for SmartDevice {
    fn from(d: Thermostat) -> Self {
        Self::Thermostat(d)
    }
}
