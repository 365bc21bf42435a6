//! Plain-text rendering of registry views, shared by the menu and the demo driver.

use std::io::{self, Write};

use smarthub_app::registry::{DeviceReport, SubscriberReport};
use smarthub_domain::notification::Notification;

pub fn devices(out: &mut impl Write, devices: &[DeviceReport]) -> io::Result<()> {
    if devices.is_empty() {
        return writeln!(out, "No devices registered.");
    }
    for device in devices {
        writeln!(
            out,
            "{}. {} [{}] | Status: {}",
            device.id,
            device.name,
            device.kind,
            device.status_line()
        )?;
    }
    Ok(())
}

pub fn subscribers(out: &mut impl Write, subscribers: &[SubscriberReport]) -> io::Result<()> {
    if subscribers.is_empty() {
        return writeln!(out, "No subscribers registered.");
    }
    for subscriber in subscribers {
        let followed: Vec<String> = subscriber
            .subscriptions
            .iter()
            .map(ToString::to_string)
            .collect();
        let followed = if followed.is_empty() {
            "none".to_string()
        } else {
            followed.join(", ")
        };
        match &subscriber.contact_info {
            Some(contact) => writeln!(
                out,
                "{}. {} <{contact}> (subscribed to: {followed})",
                subscriber.id, subscriber.name
            )?,
            None => writeln!(
                out,
                "{}. {} (subscribed to: {followed})",
                subscriber.id, subscriber.name
            )?,
        }
        if subscriber.notifications.is_empty() {
            writeln!(out, "    (no notifications)")?;
        }
        for notification in &subscriber.notifications {
            writeln!(out, "    {notification}")?;
        }
    }
    Ok(())
}

pub fn events(out: &mut impl Write, events: &[Notification]) -> io::Result<()> {
    if events.is_empty() {
        return writeln!(out, "No events recorded.");
    }
    for event in events {
        writeln!(out, "{event}")?;
    }
    Ok(())
}
