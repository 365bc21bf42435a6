//! # smarthub-adapter-console
//!
//! Line-oriented console menu over the smarthub registry.
//!
//! The [`Console`] reads one answer per line from any [`BufRead`] and writes
//! prompts and reports to any [`Write`], so the same code drives a terminal
//! and in-memory test buffers. Malformed input and unknown ids are reported
//! and the menu carries on; closing the input ends the session.
//!
//! ## Dependency rule
//!
//! Depends on `smarthub-app` and `smarthub-domain` only.

pub mod error;
pub mod menu;
pub mod render;

use std::io::{BufRead, Write};
use std::str::FromStr;
use std::sync::Arc;

use smarthub_app::services::control_service::ControlService;
use smarthub_domain::device::{DeviceCommand, SmartDevice};
use smarthub_domain::id::{DeviceId, SubscriberId};

pub use error::ConsoleError;
pub use menu::{DeviceAction, MenuChoice};

enum Flow {
    Continue,
    Exit,
}

/// Interactive menu bound to an input and an output stream.
pub struct Console<R, W> {
    service: ControlService,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(service: ControlService, input: R, output: W) -> Self {
        Self {
            service,
            input,
            output,
        }
    }

    /// Give back the output stream, e.g. to inspect what was written.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Show the menu and serve choices until the operator exits or the input
    /// closes.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Io`] if the streams fail. Every other error is
    /// reported on the output and the menu continues.
    pub fn run(&mut self) -> Result<(), ConsoleError> {
        loop {
            self.print_menu()?;
            let outcome = self
                .prompt("Select an option")
                .and_then(|line| line.parse::<MenuChoice>())
                .and_then(|choice| self.dispatch(choice));

            match outcome {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => {
                    writeln!(self.output, "Goodbye.")?;
                    return Ok(());
                }
                Err(ConsoleError::UnexpectedEof) => {
                    tracing::debug!("console input closed");
                    return Ok(());
                }
                Err(err) if err.is_recoverable() => {
                    tracing::debug!(error = %err, "rejected console input");
                    writeln!(self.output, "Error: {err}")?;
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn dispatch(&mut self, choice: MenuChoice) -> Result<Flow, ConsoleError> {
        let registry = Arc::clone(self.service.registry());
        match choice {
            MenuChoice::ListDevices => {
                render::devices(&mut self.output, &registry.list_devices())?;
            }
            MenuChoice::ControlDevice => self.control_device()?,
            MenuChoice::ListSubscribers => {
                render::subscribers(&mut self.output, &registry.list_observers())?;
            }
            MenuChoice::AddSubscriber => self.add_subscriber()?,
            MenuChoice::RemoveSubscriber => self.remove_subscriber()?,
            MenuChoice::Subscribe => self.subscribe()?,
            MenuChoice::Unsubscribe => self.unsubscribe()?,
            MenuChoice::EventLog => {
                render::events(&mut self.output, &registry.event_history())?;
            }
            MenuChoice::Snapshot => {
                let json = serde_json::to_string_pretty(&registry.snapshot())?;
                writeln!(self.output, "{json}")?;
            }
            MenuChoice::RemoveDevice => self.remove_device()?,
            MenuChoice::Exit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }

    fn control_device(&mut self) -> Result<(), ConsoleError> {
        let id: DeviceId = self.prompt_number("Device id")?;
        let device = self.service.device(id)?;

        writeln!(self.output, "{} [{}]", device.name(), device.kind())?;
        for (index, action) in DeviceAction::for_kind(device.kind()).iter().enumerate() {
            writeln!(self.output, "  {}. {}", index + 1, action.label())?;
        }
        let action = DeviceAction::select(device.kind(), &self.prompt("Action")?)?;

        let command = match action {
            DeviceAction::ToggleOnOff => DeviceCommand::ToggleOnOff,
            DeviceAction::SetBrightness => {
                DeviceCommand::SetBrightness(self.prompt_number("Brightness (0-100)")?)
            }
            DeviceAction::SetColour => DeviceCommand::SetColour(self.prompt("Colour")?),
            DeviceAction::ToggleRecording => DeviceCommand::ToggleRecording,
            DeviceAction::SetResolution => {
                DeviceCommand::SetResolution(self.prompt("Resolution")?)
            }
            DeviceAction::SetTemperature => {
                DeviceCommand::SetTemperature(self.prompt_number("Temperature")?)
            }
            DeviceAction::SetHumidity => {
                DeviceCommand::SetHumidity(self.prompt_number("Humidity (%)")?)
            }
            DeviceAction::SetMode => DeviceCommand::SetMode(self.prompt("Mode")?),
            DeviceAction::ViewFeed => {
                if let SmartDevice::SecurityCamera(camera) = device.snapshot() {
                    writeln!(self.output, "{}", camera.feed())?;
                }
                return Ok(());
            }
        };

        let notified = device.apply(command)?;
        let status = device.status().map_or_else(|| "N/A".to_string(), |s| s.text);
        writeln!(self.output, "Status of {} updated: {status}", device.name())?;
        if !notified {
            writeln!(self.output, "(change too small, no notification sent)")?;
        }
        Ok(())
    }

    fn add_subscriber(&mut self) -> Result<(), ConsoleError> {
        let id: SubscriberId = self.prompt_number("Subscriber id")?;
        if self.service.registry().find_observer(id).is_some() {
            return Err(ConsoleError::DuplicateSubscriber(id));
        }
        let name = self.prompt("Name")?;
        let contact = self.prompt("Contact (optional)")?;
        let subscriber = self.service.add_subscriber(id, name);
        if !contact.is_empty() {
            subscriber.set_contact_info(Some(contact));
        }
        writeln!(self.output, "{} added as an observer.", subscriber.name())?;
        Ok(())
    }

    fn remove_device(&mut self) -> Result<(), ConsoleError> {
        let id: DeviceId = self.prompt_number("Device id")?;
        let device = self.service.remove_device(id)?;
        writeln!(self.output, "{} removed from the system.", device.name())?;
        Ok(())
    }

    fn remove_subscriber(&mut self) -> Result<(), ConsoleError> {
        let id: SubscriberId = self.prompt_number("Subscriber id")?;
        let subscriber = self.service.remove_subscriber(id)?;
        writeln!(self.output, "{} removed as an observer.", subscriber.name())?;
        Ok(())
    }

    fn subscribe(&mut self) -> Result<(), ConsoleError> {
        let subscriber_id: SubscriberId = self.prompt_number("Subscriber id")?;
        let device_id: DeviceId = self.prompt_number("Device id")?;
        let subscriber = self.service.subscriber(subscriber_id)?;
        let device = self.service.device(device_id)?;

        if self.service.subscribe(subscriber_id, device_id)? {
            writeln!(
                self.output,
                "{} will now receive notifications about {} ({}).",
                subscriber.name(),
                device.name(),
                device.id()
            )?;
        } else {
            writeln!(
                self.output,
                "{} is already subscribed to {}.",
                subscriber.name(),
                device.name()
            )?;
        }
        Ok(())
    }

    fn unsubscribe(&mut self) -> Result<(), ConsoleError> {
        let subscriber_id: SubscriberId = self.prompt_number("Subscriber id")?;
        let device_id: DeviceId = self.prompt_number("Device id")?;
        let subscriber = self.service.subscriber(subscriber_id)?;

        if self.service.unsubscribe(subscriber_id, device_id)? {
            writeln!(
                self.output,
                "{} will no longer receive notifications about device {device_id}.",
                subscriber.name()
            )?;
        } else {
            writeln!(
                self.output,
                "{} was not subscribed to device {device_id}.",
                subscriber.name()
            )?;
        }
        Ok(())
    }

    fn print_menu(&mut self) -> Result<(), ConsoleError> {
        writeln!(self.output)?;
        writeln!(self.output, "=== Smart Home ===")?;
        for choice in MenuChoice::ALL {
            writeln!(self.output, "{}. {}", choice.key(), choice.label())?;
        }
        Ok(())
    }

    /// Write `label`, then read one trimmed line.
    fn prompt(&mut self, label: &str) -> Result<String, ConsoleError> {
        write!(self.output, "{label}: ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ConsoleError::UnexpectedEof);
        }
        Ok(line.trim().to_string())
    }

    fn prompt_number<T: FromStr>(&mut self, label: &str) -> Result<T, ConsoleError> {
        let input = self.prompt(label)?;
        input
            .parse()
            .map_err(|_| ConsoleError::InvalidNumber { input })
    }
}
