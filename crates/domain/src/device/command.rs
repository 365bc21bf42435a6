//! Device commands: one variant per controllable operation.

/// An operation a caller can ask a device to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCommand {
    SetBrightness(i32),
    SetColour(String),
    ToggleOnOff,
    SetResolution(String),
    ToggleRecording,
    SetTemperature(f32),
    SetHumidity(f32),
    SetMode(String),
}

impl DeviceCommand {
    /// Stable `snake_case` name, used in logs and errors.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetBrightness(_) => "set_brightness",
            Self::SetColour(_) => "set_colour",
            Self::ToggleOnOff => "toggle_on_off",
            Self::SetResolution(_) => "set_resolution",
            Self::ToggleRecording => "toggle_recording",
            Self::SetTemperature(_) => "set_temperature",
            Self::SetHumidity(_) => "set_humidity",
            Self::SetMode(_) => "set_mode",
        }
    }
}
