//! # smarthub: smart-home notification hub
//!
//! Composition root that wires the registry, the stock household and the
//! console menu together.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialize logging
//! - Construct the registry and the control service
//! - Seed the demo devices and subscribers
//! - Run either the interactive menu or the scripted demo
//!
//! ## Usage
//! - `smarthub` or `smarthub menu`: interactive menu on stdin/stdout
//! - `smarthub demo`: scripted walkthrough, then exit
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! No domain logic belongs here.

mod config;
mod demo;

use std::sync::Arc;

use smarthub_adapter_console::Console;
use smarthub_app::registry::Registry;
use smarthub_app::services::control_service::ControlService;

use crate::config::Config;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Menu,
    Demo,
}

impl Mode {
    fn from_args(mut args: impl Iterator<Item = String>) -> Result<Self, String> {
        match args.next().as_deref() {
            None | Some("menu") => Ok(Self::Menu),
            Some("demo") => Ok(Self::Demo),
            Some(other) => Err(format!("unknown mode `{other}`, expected `menu` or `demo`")),
        }
    }
}

/// Install the global subscriber, writing to stderr through `filter`.
fn init_logging(filter: &str) -> Result<(), BoxError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_new(filter)?)
        .with_writer(std::io::stderr)
        .try_init()
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = Config::load()?;
    init_logging(&config.logging.filter)?;

    let mode = Mode::from_args(std::env::args().skip(1))?;

    // Registry
    let registry = Arc::new(Registry::new(config.event_log_retention()));
    let service = ControlService::new(registry, config.notification_log_retention());

    if config.demo.seed || mode == Mode::Demo {
        demo::seed(&service, config.thermostat_policy());
    }

    tracing::info!(?mode, "smarthub starting");
    match mode {
        Mode::Demo => {
            let mut stdout = std::io::stdout().lock();
            demo::run(&service, config.demo_pace(), &mut stdout).await?;
        }
        Mode::Menu => {
            tokio::task::spawn_blocking(move || {
                let stdin = std::io::stdin().lock();
                let stdout = std::io::stdout().lock();
                Console::new(service, stdin, stdout).run()
            })
            .await??;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(ToString::to_string).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn should_default_to_menu_mode() {
        assert_eq!(Mode::from_args(args(&[])).unwrap(), Mode::Menu);
        assert_eq!(Mode::from_args(args(&["menu"])).unwrap(), Mode::Menu);
    }

    #[test]
    fn should_select_demo_mode() {
        assert_eq!(Mode::from_args(args(&["demo"])).unwrap(), Mode::Demo);
    }

    #[test]
    fn should_reject_unknown_mode() {
        assert!(Mode::from_args(args(&["serve"])).is_err());
    }

    #[test]
    fn should_reject_invalid_log_filter() {
        let err = init_logging("smarthub=loud").unwrap_err();
        assert!(!err.to_string().is_empty());
    }
}
