//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `smarthub.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use smarthub_domain::device::NotifyPolicy;
use smarthub_domain::event_log::Retention;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Log retention settings.
    pub registry: RegistryConfig,
    /// Thermostat notification policy.
    pub thermostat: ThermostatConfig,
    /// Demo seeding and pacing.
    pub demo: DemoConfig,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Retention of the global event log and of each subscriber's log.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Maximum entries in the global event log; `0` keeps everything.
    pub event_log_capacity: usize,
    /// Maximum entries per subscriber log; `0` keeps everything.
    pub notification_log_capacity: usize,
}

/// Which thermostat changes raise notifications.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ThermostatConfig {
    pub policy: PolicyKind,
    /// Minimum temperature change (degrees) under the threshold policy.
    pub temperature_threshold: f32,
    /// Minimum humidity change (percentage points) under the threshold policy.
    pub humidity_threshold: f32,
}

/// Name of a thermostat notification policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    #[default]
    Always,
    Threshold,
}

impl FromStr for PolicyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "always" => Ok(Self::Always),
            "threshold" => Ok(Self::Threshold),
            other => Err(ConfigError::Validation(format!(
                "unknown thermostat policy `{other}`"
            ))),
        }
    }
}

/// Demo devices and scripted walkthrough.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Register the stock devices and subscribers at startup.
    pub seed: bool,
    /// Pause between scripted demo steps, in milliseconds.
    pub pace_ms: u64,
}

impl Config {
    /// Load configuration from `smarthub.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting values are invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("smarthub.toml")?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("SMARTHUB_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Some(capacity) = env_parse("SMARTHUB_EVENT_LOG_CAPACITY") {
            self.registry.event_log_capacity = capacity;
        }
        if let Ok(val) = std::env::var("SMARTHUB_THERMOSTAT_POLICY") {
            self.thermostat.policy = val.parse()?;
        }
        if let Some(pace) = env_parse("SMARTHUB_DEMO_PACE_MS") {
            self.demo.pace_ms = pace;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let ThermostatConfig {
            temperature_threshold,
            humidity_threshold,
            ..
        } = self.thermostat;
        if !(temperature_threshold >= 0.0 && humidity_threshold >= 0.0) {
            return Err(ConfigError::Validation(
                "thermostat thresholds must be non-negative numbers".to_string(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn event_log_retention(&self) -> Retention {
        Retention::from_capacity(self.registry.event_log_capacity)
    }

    #[must_use]
    pub fn notification_log_retention(&self) -> Retention {
        Retention::from_capacity(self.registry.notification_log_capacity)
    }

    /// The policy newly created thermostats follow.
    #[must_use]
    pub fn thermostat_policy(&self) -> NotifyPolicy {
        match self.thermostat.policy {
            PolicyKind::Always => NotifyPolicy::Always,
            PolicyKind::Threshold => NotifyPolicy::Threshold {
                temperature: self.thermostat.temperature_threshold,
                humidity: self.thermostat.humidity_threshold,
            },
        }
    }

    #[must_use]
    pub fn demo_pace(&self) -> Duration {
        Duration::from_millis(self.demo.pace_ms)
    }
}

/// Numeric overrides that fail to parse are ignored.
fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|val| val.trim().parse().ok())
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "smarthub=info,smarthub_app=info,smarthub_adapter_console=info".to_string(),
        }
    }
}

impl Default for ThermostatConfig {
    fn default() -> Self {
        Self {
            policy: PolicyKind::Always,
            temperature_threshold: NotifyPolicy::DEFAULT_TEMPERATURE_THRESHOLD,
            humidity_threshold: NotifyPolicy::DEFAULT_HUMIDITY_THRESHOLD,
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            seed: true,
            pace_ms: 1000,
        }
    }
}

/// Why loading the configuration failed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("malformed smarthub.toml: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("cannot read smarthub.toml")]
    Io(#[from] std::io::Error),
    /// A value parsed but is out of range, or an override names nothing known.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
