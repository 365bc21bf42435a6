//! Stock household and a scripted walkthrough of the notification flow.

use std::io::{self, Write};
use std::time::Duration;

use smarthub_adapter_console::render;
use smarthub_app::services::control_service::ControlService;
use smarthub_domain::device::{DeviceCommand, Light, NotifyPolicy, SecurityCamera, Thermostat};
use smarthub_domain::error::HubError;
use smarthub_domain::id::{DeviceId, SubscriberId};

pub const LAMP: DeviceId = DeviceId::new(1);
pub const CAMERA: DeviceId = DeviceId::new(2);
pub const THERMOSTAT: DeviceId = DeviceId::new(3);
pub const ALICE: SubscriberId = SubscriberId::new(1);
pub const BOB: SubscriberId = SubscriberId::new(2);

/// Register the three stock devices and two subscribers.
pub fn seed(service: &ControlService, policy: NotifyPolicy) {
    service.add_device(Light::new(LAMP, "Lamp"));
    service.add_device(SecurityCamera::new(CAMERA, "Front Door Camera", "1080p"));
    service.add_device(Thermostat::new(THERMOSTAT, "Thermo").with_policy(policy));
    service.add_subscriber(ALICE, "Alice");
    service.add_subscriber(BOB, "Bob");
    tracing::info!(
        devices = service.registry().device_count(),
        subscribers = service.registry().observer_count(),
        "seeded demo household"
    );
}

enum Step {
    Subscribe(SubscriberId, DeviceId),
    Control(DeviceId, DeviceCommand),
    Remove(SubscriberId),
}

fn script() -> Vec<Step> {
    vec![
        Step::Subscribe(ALICE, LAMP),
        Step::Subscribe(BOB, CAMERA),
        Step::Subscribe(ALICE, CAMERA),
        Step::Control(LAMP, DeviceCommand::ToggleOnOff),
        Step::Control(LAMP, DeviceCommand::SetBrightness(70)),
        Step::Control(CAMERA, DeviceCommand::ToggleRecording),
        Step::Control(THERMOSTAT, DeviceCommand::SetTemperature(22.0)),
        Step::Control(THERMOSTAT, DeviceCommand::SetMode("Heat".to_string())),
        Step::Remove(BOB),
        Step::Control(CAMERA, DeviceCommand::ToggleRecording),
    ]
}

/// Play the scripted walkthrough against a seeded `service`, pausing `pace`
/// between steps, then print devices, subscribers and the event log to `out`.
///
/// # Errors
///
/// Returns [`DemoError::Hub`] if the household was not seeded, or
/// [`DemoError::Io`] if writing to `out` fails.
pub async fn run(
    service: &ControlService,
    pace: Duration,
    out: &mut impl Write,
) -> Result<(), DemoError> {
    for step in script() {
        match step {
            Step::Subscribe(subscriber, device) => {
                service.subscribe(subscriber, device)?;
                writeln!(out, "subscriber {subscriber} follows device {device}")?;
            }
            Step::Control(device, command) => {
                let label = command.name();
                let notified = service.control(device, command)?;
                let status = service
                    .device(device)?
                    .status()
                    .map_or_else(|| "N/A".to_string(), |s| s.text);
                writeln!(out, "device {device} <- {label}: {status}")?;
                if !notified {
                    writeln!(out, "    (no notification sent)")?;
                }
            }
            Step::Remove(subscriber) => {
                let handle = service.remove_subscriber(subscriber)?;
                writeln!(out, "{} stops observing", handle.name())?;
            }
        }
        if !pace.is_zero() {
            tokio::time::sleep(pace).await;
        }
    }

    let registry = service.registry();
    writeln!(out, "\n--- Devices ---")?;
    render::devices(out, &registry.list_devices())?;
    writeln!(out, "\n--- Subscribers ---")?;
    render::subscribers(out, &registry.list_observers())?;
    writeln!(out, "\n--- Event log ---")?;
    render::events(out, &registry.event_history())?;
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error(transparent)]
    Hub(#[from] HubError),
    #[error("failed to write demo output")]
    Io(#[from] io::Error),
}
