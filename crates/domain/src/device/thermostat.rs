//! Thermostat: temperature, humidity and operating mode.

use serde::{Deserialize, Serialize};

use super::{Device, DeviceCore, DeviceKind};
use crate::id::DeviceId;

/// When a thermostat raises a notification for a reading change.
///
/// Mode changes always notify, whatever the policy.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "lowercase")]
pub enum NotifyPolicy {
    /// Every temperature or humidity change notifies.
    #[default]
    Always,
    /// Only changes whose absolute size reaches the threshold notify.
    Threshold { temperature: f32, humidity: f32 },
}

impl NotifyPolicy {
    pub const DEFAULT_TEMPERATURE_THRESHOLD: f32 = 10.0;
    pub const DEFAULT_HUMIDITY_THRESHOLD: f32 = 25.0;

    /// Threshold policy with the stock limits (10 degrees, 25%).
    #[must_use]
    pub fn default_threshold() -> Self {
        Self::Threshold {
            temperature: Self::DEFAULT_TEMPERATURE_THRESHOLD,
            humidity: Self::DEFAULT_HUMIDITY_THRESHOLD,
        }
    }
}

/// A climate controller.
///
/// Starts at 0 degrees, 0% humidity, in `"Standby"`, without a status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thermostat {
    #[serde(flatten)]
    core: DeviceCore,
    temperature: f32,
    humidity: f32,
    mode: String,
    policy: NotifyPolicy,
}

impl Thermostat {
    #[must_use]
    pub fn new(id: DeviceId, name: impl Into<String>) -> Self {
        Self {
            core: DeviceCore::new(id, name),
            temperature: 0.0,
            humidity: 0.0,
            mode: "Standby".to_string(),
            policy: NotifyPolicy::Always,
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: NotifyPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    #[must_use]
    pub fn humidity(&self) -> f32 {
        self.humidity
    }

    #[must_use]
    pub fn mode(&self) -> &str {
        &self.mode
    }

    #[must_use]
    pub fn policy(&self) -> NotifyPolicy {
        self.policy
    }

    pub fn set_temperature(&mut self, temperature: f32) -> Option<String> {
        let delta = (self.temperature - temperature).abs();
        self.temperature = temperature;
        self.set_status(format!("Set at {temperature} degrees, {}", self.mode));

        match self.policy {
            NotifyPolicy::Always => Some(format!("Temperature set to {temperature} degrees")),
            NotifyPolicy::Threshold { temperature: limit, .. } => (delta >= limit)
                .then(|| format!("Temperature changed by {limit} or more degrees")),
        }
    }

    pub fn set_humidity(&mut self, humidity: f32) -> Option<String> {
        let delta = (self.humidity - humidity).abs();
        self.humidity = humidity;
        self.set_status(format!("Humidity at {humidity}%"));

        match self.policy {
            NotifyPolicy::Always => Some(format!("Humidity set to {humidity}%")),
            NotifyPolicy::Threshold { humidity: limit, .. } => {
                (delta >= limit).then(|| format!("Humidity changed by {limit}% or more"))
            }
        }
    }

    pub fn set_mode(&mut self, mode: String) -> String {
        self.set_status(format!("Set at {} degrees, {mode}", self.temperature));
        let message = format!("Mode changed to {mode}");
        self.mode = mode;
        message
    }
}

impl Device for Thermostat {
    fn core(&self) -> &DeviceCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut DeviceCore {
        &mut self.core
    }

    fn kind(&self) -> DeviceKind {
        DeviceKind::Thermostat
    }
}
