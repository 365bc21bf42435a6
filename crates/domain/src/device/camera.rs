//! Security camera: resolution and a recording switch.

use serde::{Deserialize, Serialize};

use super::{Device, DeviceCore, DeviceKind};
use crate::id::DeviceId;

const FEED_PLACEHOLDER: &str = "Camera feed data...";

/// A camera that can be told to start or stop recording.
///
/// Cameras start idle and without a status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityCamera {
    #[serde(flatten)]
    core: DeviceCore,
    resolution: String,
    is_recording: bool,
}

impl SecurityCamera {
    #[must_use]
    pub fn new(id: DeviceId, name: impl Into<String>, resolution: impl Into<String>) -> Self {
        Self {
            core: DeviceCore::new(id, name),
            resolution: resolution.into(),
            is_recording: false,
        }
    }

    #[must_use]
    pub fn resolution(&self) -> &str {
        &self.resolution
    }

    #[must_use]
    pub fn is_recording(&self) -> bool {
        self.is_recording
    }

    /// Current video feed. Simulated cameras only return a placeholder.
    #[must_use]
    pub fn feed(&self) -> &'static str {
        FEED_PLACEHOLDER
    }

    /// The resolution string is free-form.
    pub fn set_resolution(&mut self, resolution: String) -> String {
        let message = format!("Resolution changed to {resolution}");
        if self.is_recording {
            self.set_status(format!("Recording with {resolution} resolution"));
        } else {
            self.set_status(format!("Resolution set to {resolution}"));
        }
        self.resolution = resolution;
        message
    }

    pub fn toggle_recording(&mut self) -> String {
        self.is_recording = !self.is_recording;
        if self.is_recording {
            self.set_status(format!("Recording with {} resolution", self.resolution));
            "Recording started".to_string()
        } else {
            self.set_status("Not recording".to_string());
            "Security camera disabled".to_string()
        }
    }
}

impl Device for SecurityCamera {
    fn core(&self) -> &DeviceCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut DeviceCore {
        &mut self.core
    }

    fn kind(&self) -> DeviceKind {
        DeviceKind::SecurityCamera
    }
}
