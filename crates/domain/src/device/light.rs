//! Light: brightness, colour and an on/off switch.

use serde::{Deserialize, Serialize};

use super::{Device, DeviceCore, DeviceKind};
use crate::id::DeviceId;

/// A dimmable, coloured light.
///
/// Starts switched off at brightness `0` in white, with status `"Off"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Light {
    #[serde(flatten)]
    core: DeviceCore,
    brightness: i32,
    colour: String,
    is_on: bool,
}

impl Light {
    #[must_use]
    pub fn new(id: DeviceId, name: impl Into<String>) -> Self {
        let mut light = Self {
            core: DeviceCore::new(id, name),
            brightness: 0,
            colour: "White".to_string(),
            is_on: false,
        };
        light.set_status("Off".to_string());
        light
    }

    #[must_use]
    pub fn brightness(&self) -> i32 {
        self.brightness
    }

    #[must_use]
    pub fn colour(&self) -> &str {
        &self.colour
    }

    #[must_use]
    pub fn is_on(&self) -> bool {
        self.is_on
    }

    /// Any integer is accepted; nothing clamps it to `0..=100`.
    pub fn set_brightness(&mut self, level: i32) -> String {
        self.brightness = level;
        self.set_status(format!("Brightness set to {level}"));
        format!("Brightness set to {level}")
    }

    pub fn set_colour(&mut self, colour: String) -> String {
        let message = format!("Colour changed to {colour}");
        self.set_status(format!("Colour set to {colour}"));
        self.colour = colour;
        message
    }

    pub fn toggle_on_off(&mut self) -> String {
        self.is_on = !self.is_on;
        if self.is_on {
            self.set_status("On".to_string());
            "Turned on".to_string()
        } else {
            self.set_status("Off".to_string());
            "Turned off".to_string()
        }
    }
}

impl Device for Light {
    fn core(&self) -> &DeviceCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut DeviceCore {
        &mut self.core
    }

    fn kind(&self) -> DeviceKind {
        DeviceKind::Light
    }
}
