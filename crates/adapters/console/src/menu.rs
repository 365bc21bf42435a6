//! Menu options and their textual form.

use std::str::FromStr;

use smarthub_domain::device::DeviceKind;

use crate::error::ConsoleError;

/// Top-level menu entries, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ListDevices,
    ControlDevice,
    ListSubscribers,
    AddSubscriber,
    RemoveSubscriber,
    Subscribe,
    Unsubscribe,
    EventLog,
    Snapshot,
    RemoveDevice,
    Exit,
}

impl MenuChoice {
    pub const ALL: [Self; 11] = [
        Self::ListDevices,
        Self::ControlDevice,
        Self::ListSubscribers,
        Self::AddSubscriber,
        Self::RemoveSubscriber,
        Self::Subscribe,
        Self::Unsubscribe,
        Self::EventLog,
        Self::Snapshot,
        Self::RemoveDevice,
        Self::Exit,
    ];

    /// The key the operator types to pick this entry.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::ListDevices => "1",
            Self::ControlDevice => "2",
            Self::ListSubscribers => "3",
            Self::AddSubscriber => "4",
            Self::RemoveSubscriber => "5",
            Self::Subscribe => "6",
            Self::Unsubscribe => "7",
            Self::EventLog => "8",
            Self::Snapshot => "9",
            Self::RemoveDevice => "10",
            Self::Exit => "0",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::ListDevices => "List devices",
            Self::ControlDevice => "Control a device",
            Self::ListSubscribers => "List subscribers",
            Self::AddSubscriber => "Add subscriber",
            Self::RemoveSubscriber => "Remove subscriber",
            Self::Subscribe => "Subscribe to a device",
            Self::Unsubscribe => "Unsubscribe from a device",
            Self::EventLog => "View event log",
            Self::Snapshot => "Show system snapshot (JSON)",
            Self::RemoveDevice => "Remove device",
            Self::Exit => "Exit",
        }
    }
}

impl FromStr for MenuChoice {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        Self::ALL
            .into_iter()
            .find(|choice| choice.key() == input)
            .ok_or_else(|| ConsoleError::UnknownChoice(input.to_string()))
    }
}

/// Variant-specific operations offered after a device is picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceAction {
    ToggleOnOff,
    SetBrightness,
    SetColour,
    ToggleRecording,
    SetResolution,
    ViewFeed,
    SetTemperature,
    SetHumidity,
    SetMode,
}

impl DeviceAction {
    /// Actions available for `kind`, numbered from 1 in this order.
    #[must_use]
    pub fn for_kind(kind: DeviceKind) -> &'static [Self] {
        match kind {
            DeviceKind::Light => &[Self::ToggleOnOff, Self::SetBrightness, Self::SetColour],
            DeviceKind::SecurityCamera => {
                &[Self::ToggleRecording, Self::SetResolution, Self::ViewFeed]
            }
            DeviceKind::Thermostat => &[Self::SetTemperature, Self::SetHumidity, Self::SetMode],
        }
    }

    /// Pick the action numbered `input` from the menu for `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::UnknownChoice`] if `input` is not one of the
    /// listed numbers.
    pub fn select(kind: DeviceKind, input: &str) -> Result<Self, ConsoleError> {
        let input = input.trim();
        input
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|index| Self::for_kind(kind).get(index).copied())
            .ok_or_else(|| ConsoleError::UnknownChoice(input.to_string()))
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::ToggleOnOff => "Toggle on/off",
            Self::SetBrightness => "Set brightness",
            Self::SetColour => "Set colour",
            Self::ToggleRecording => "Toggle recording",
            Self::SetResolution => "Set resolution",
            Self::ViewFeed => "View feed",
            Self::SetTemperature => "Set temperature",
            Self::SetHumidity => "Set humidity",
            Self::SetMode => "Set mode",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_every_menu_key() {
        for choice in MenuChoice::ALL {
            let parsed: MenuChoice = choice.key().parse().unwrap();
            assert_eq!(parsed, choice);
        }
    }

    #[test]
    fn should_trim_whitespace_around_choice() {
        assert_eq!(" 8\n".parse::<MenuChoice>().unwrap(), MenuChoice::EventLog);
        assert_eq!("10\n".parse::<MenuChoice>().unwrap(), MenuChoice::RemoveDevice);
    }

    #[test]
    fn should_reject_unknown_choice() {
        assert!(matches!(
            "12".parse::<MenuChoice>(),
            Err(ConsoleError::UnknownChoice(ref s)) if s == "12"
        ));
        assert!("x".parse::<MenuChoice>().is_err());
        assert!("01".parse::<MenuChoice>().is_err());
    }

    #[test]
    fn should_select_action_by_position_for_kind() {
        assert_eq!(
            DeviceAction::select(DeviceKind::Light, "2").unwrap(),
            DeviceAction::SetBrightness
        );
        assert_eq!(
            DeviceAction::select(DeviceKind::SecurityCamera, "3").unwrap(),
            DeviceAction::ViewFeed
        );
        assert_eq!(
            DeviceAction::select(DeviceKind::Thermostat, "1").unwrap(),
            DeviceAction::SetTemperature
        );
    }

    #[test]
    fn should_reject_out_of_range_action() {
        assert!(DeviceAction::select(DeviceKind::Light, "0").is_err());
        assert!(DeviceAction::select(DeviceKind::Light, "4").is_err());
        assert!(DeviceAction::select(DeviceKind::Light, "on").is_err());
    }
}
