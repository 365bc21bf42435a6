//! Time and timestamp helpers.

use chrono::{DateTime, Utc};

/// UTC timestamp used for status updates and notification times.
pub type Timestamp = DateTime<Utc>;

/// Human-readable layout used when a timestamp is rendered into a message.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Render a timestamp with [`DISPLAY_FORMAT`].
#[must_use]
pub fn display(ts: &Timestamp) -> String {
    ts.format(DISPLAY_FORMAT).to_string()
}
