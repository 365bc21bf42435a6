//! End-to-end tests for the full smarthub stack.
//!
//! Each test wires a real registry, real device handles and real subscribers
//! together, and drives them either through the control service or through
//! the console menu over in-memory buffers.

use std::io::Cursor;
use std::sync::Arc;

use smarthub_adapter_console::Console;
use smarthub_app::registry::Registry;
use smarthub_app::services::control_service::ControlService;
use smarthub_domain::device::{DeviceCommand, Light, NotifyPolicy, SecurityCamera, Thermostat};
use smarthub_domain::event_log::Retention;
use smarthub_domain::id::{DeviceId, SubscriberId};

const LAMP: DeviceId = DeviceId::new(1);
const CAMERA: DeviceId = DeviceId::new(2);
const THERMO: DeviceId = DeviceId::new(3);
const ALICE: SubscriberId = SubscriberId::new(1);
const BOB: SubscriberId = SubscriberId::new(2);

fn hub() -> ControlService {
    let service = ControlService::new(Arc::new(Registry::default()), Retention::Unbounded);
    service.add_device(Light::new(LAMP, "Lamp"));
    service.add_device(SecurityCamera::new(CAMERA, "Front Door Camera", "1080p"));
    service.add_device(Thermostat::new(THERMO, "Thermo"));
    service
}

fn console(service: &ControlService, script: &str) -> String {
    let mut console = Console::new(service.clone(), Cursor::new(script.to_string()), Vec::new());
    console.run().unwrap();
    String::from_utf8(console.into_output()).unwrap()
}

// ---------------------------------------------------------------------------
// Notification routing
// ---------------------------------------------------------------------------

#[test]
fn should_log_each_lamp_toggle_for_subscriber_and_globally() {
    let service = hub();
    let alice = service.add_subscriber(ALICE, "Alice");
    service.subscribe(ALICE, LAMP).unwrap();
    let lamp = service.device(LAMP).unwrap();

    service.control(LAMP, DeviceCommand::ToggleOnOff).unwrap();
    let first = lamp.status().unwrap();
    service.control(LAMP, DeviceCommand::ToggleOnOff).unwrap();
    let second = lamp.status().unwrap();

    assert_eq!(first.text, "On");
    assert_eq!(second.text, "Off");
    assert!(second.updated_at >= first.updated_at);

    let history = alice.history();
    assert_eq!(history.len(), 2);
    assert!(history.iter().all(|n| n.device_name == "Lamp"));
    assert_eq!(service.registry().event_history().len(), 2);
}

#[test]
fn should_log_globally_without_subscribers() {
    let service = hub();

    service
        .control(THERMO, DeviceCommand::SetTemperature(30.0))
        .unwrap();

    let events = service.registry().event_history();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].message, "Temperature set to 30 degrees");
}

#[test]
fn should_deliver_once_to_each_camera_subscriber() {
    let service = hub();
    let alice = service.add_subscriber(ALICE, "Alice");
    let bob = service.add_subscriber(BOB, "Bob");
    service.subscribe(ALICE, CAMERA).unwrap();
    service.subscribe(BOB, CAMERA).unwrap();

    service.control(CAMERA, DeviceCommand::ToggleRecording).unwrap();

    assert_eq!(alice.history().len(), 1);
    assert_eq!(bob.history().len(), 1);
    assert_eq!(service.registry().event_history().len(), 1);
    assert_eq!(alice.history()[0].message, "Recording started");
}

#[test]
fn should_leave_unsubscribed_log_untouched() {
    let service = hub();
    let alice = service.add_subscriber(ALICE, "Alice");
    service.subscribe(ALICE, LAMP).unwrap();

    service.control(CAMERA, DeviceCommand::ToggleRecording).unwrap();
    service
        .control(THERMO, DeviceCommand::SetMode("Cool".to_string()))
        .unwrap();

    assert!(alice.history().is_empty());
    assert_eq!(service.registry().event_history().len(), 2);
}

#[test]
fn should_stop_delivery_after_removal_but_keep_log() {
    let service = hub();
    service.add_subscriber(ALICE, "Alice");
    service.subscribe(ALICE, LAMP).unwrap();
    service.control(LAMP, DeviceCommand::SetBrightness(40)).unwrap();

    let alice = service.remove_subscriber(ALICE).unwrap();
    service.control(LAMP, DeviceCommand::SetBrightness(80)).unwrap();

    assert_eq!(alice.history().len(), 1);
    assert!(alice.is_subscribed(&service.device(LAMP).unwrap()));
    assert_eq!(service.registry().event_history().len(), 2);
}

#[test]
fn should_suppress_small_thermostat_changes_under_threshold_policy() {
    let service = ControlService::new(Arc::new(Registry::default()), Retention::Unbounded);
    service.add_device(
        Thermostat::new(THERMO, "Thermo").with_policy(NotifyPolicy::default_threshold()),
    );
    let alice = service.add_subscriber(ALICE, "Alice");
    service.subscribe(ALICE, THERMO).unwrap();

    assert!(!service.control(THERMO, DeviceCommand::SetTemperature(5.0)).unwrap());
    assert!(!service.control(THERMO, DeviceCommand::SetHumidity(20.0)).unwrap());
    assert!(service.control(THERMO, DeviceCommand::SetTemperature(21.0)).unwrap());
    assert!(service
        .control(THERMO, DeviceCommand::SetMode("Heat".to_string()))
        .unwrap());

    let messages: Vec<String> = alice.history().into_iter().map(|n| n.message).collect();
    assert_eq!(
        messages,
        ["Temperature changed by 10 or more degrees", "Mode changed to Heat"]
    );
    let status = service.device(THERMO).unwrap().status().unwrap();
    assert_eq!(status.text, "Set at 21 degrees, Heat");
}

#[test]
fn should_keep_only_newest_entries_with_bounded_retention() {
    let service = ControlService::new(
        Arc::new(Registry::new(Retention::Bounded(2))),
        Retention::Bounded(1),
    );
    service.add_device(Light::new(LAMP, "Lamp"));
    let alice = service.add_subscriber(ALICE, "Alice");
    service.subscribe(ALICE, LAMP).unwrap();

    for level in [10, 20, 30] {
        service.control(LAMP, DeviceCommand::SetBrightness(level)).unwrap();
    }

    let events: Vec<String> = service
        .registry()
        .event_history()
        .into_iter()
        .map(|n| n.message)
        .collect();
    assert_eq!(events, ["Brightness set to 20", "Brightness set to 30"]);
    assert_eq!(alice.history()[0].message, "Brightness set to 30");
}

#[test]
fn should_route_by_device_not_by_shared_id() {
    let service = ControlService::new(Arc::new(Registry::default()), Retention::Unbounded);
    let kitchen = service.add_device(Light::new(LAMP, "Kitchen"));
    let garage = service.add_device(Light::new(LAMP, "Garage"));
    let alice = service.add_subscriber(ALICE, "Alice");
    service.subscribe(ALICE, LAMP).unwrap();

    garage.apply(DeviceCommand::ToggleOnOff).unwrap();
    assert!(alice.history().is_empty());

    kitchen.apply(DeviceCommand::ToggleOnOff).unwrap();
    let history = alice.history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].device_name, "Kitchen");
    assert_eq!(service.registry().event_history().len(), 2);
}

#[test]
fn should_not_carry_subscription_over_to_replacement_device() {
    let service = hub();
    let alice = service.add_subscriber(ALICE, "Alice");
    service.subscribe(ALICE, LAMP).unwrap();
    service.remove_device(LAMP).unwrap();
    service.add_device(Light::new(LAMP, "New Lamp"));

    service.control(LAMP, DeviceCommand::ToggleOnOff).unwrap();

    assert!(alice.history().is_empty());
    assert_eq!(service.registry().event_history().len(), 1);
}

// ---------------------------------------------------------------------------
// Console
// ---------------------------------------------------------------------------

#[test]
fn should_run_full_session_through_console() {
    let service = hub();
    let script = concat!(
        "4\n1\nAlice\n\n", // add Alice, no contact
        "6\n1\n2\n",       // Alice follows the camera
        "2\n2\n2\n4K\n",   // set camera resolution
        "2\n2\n1\n",       // start recording
        "3\n",             // list subscribers
        "8\n",             // event log
        "0\n",
    );

    let out = console(&service, script);

    assert!(out.contains("Status of Front Door Camera updated: Resolution set to 4K"));
    assert!(out.contains("Status of Front Door Camera updated: Recording with 4K resolution"));
    assert!(out.contains("1. Alice (subscribed to: 2)"));
    assert!(out.contains("Front Door Camera: Resolution changed to 4K"));
    assert!(out.contains("Front Door Camera: Recording started"));
    assert!(out.contains("Goodbye."));
    assert_eq!(service.registry().event_history().len(), 2);
}

#[test]
fn should_remove_device_through_console_and_keep_history() {
    let service = hub();
    let alice = service.add_subscriber(ALICE, "Alice");
    alice.set_contact_info(Some("alice@example.com".to_string()));
    service.subscribe(ALICE, LAMP).unwrap();
    service.control(LAMP, DeviceCommand::ToggleOnOff).unwrap();

    let out = console(&service, "10\n1\n1\n3\n0\n");

    assert!(out.contains("Lamp removed from the system."));
    assert!(out.contains("2. Front Door Camera [security camera]"));
    assert!(!out.contains("1. Lamp [light]"));
    assert!(out.contains("1. Alice <alice@example.com> (subscribed to: 1)"));
    assert!(out.contains("Lamp: Turned on"));
    assert_eq!(service.registry().device_count(), 2);
    assert_eq!(service.registry().event_history().len(), 1);
}

#[test]
fn should_survive_malformed_console_input() {
    let service = hub();
    let script = "x\n2\n1\n2\nbright\n6\n9\n1\n0\n";

    let out = console(&service, script);

    assert!(out.contains("Error: `x` is not an option"));
    assert!(out.contains("Error: `bright` is not a valid number"));
    assert!(out.contains("Error: Subscriber 9 not found"));
    assert!(out.contains("Goodbye."));
    assert!(service.registry().event_history().is_empty());
}

#[test]
fn should_snapshot_state_as_json() {
    let service = hub();
    service.add_subscriber(ALICE, "Alice");
    service.subscribe(ALICE, LAMP).unwrap();
    service.control(LAMP, DeviceCommand::ToggleOnOff).unwrap();

    let json = serde_json::to_value(service.registry().snapshot()).unwrap();

    assert_eq!(json["devices"].as_array().unwrap().len(), 3);
    assert_eq!(json["devices"][0]["kind"], "light");
    assert_eq!(json["subscribers"][0]["name"], "Alice");
    assert_eq!(json["events"][0]["message"], "Turned on");
}
