//! Console adapter error types.

use smarthub_domain::error::HubError;
use smarthub_domain::id::SubscriberId;

/// Errors raised while driving the console menu.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    /// Reading from or writing to the terminal failed.
    #[error("console I/O failed")]
    Io(#[from] std::io::Error),

    /// The input stream closed while a prompt was waiting.
    #[error("input closed")]
    UnexpectedEof,

    /// A numeric field could not be parsed.
    #[error("`{input}` is not a valid number")]
    InvalidNumber { input: String },

    /// The entered option is not on the current menu.
    #[error("`{0}` is not an option")]
    UnknownChoice(String),

    /// The operator tried to reuse a subscriber id.
    #[error("subscriber {0} already exists")]
    DuplicateSubscriber(SubscriberId),

    /// The registry rejected the request (unknown id, wrong device kind).
    #[error(transparent)]
    Hub(#[from] HubError),

    /// The snapshot could not be rendered as JSON.
    #[error("failed to render snapshot")]
    Snapshot(#[from] serde_json::Error),
}

impl ConsoleError {
    /// Whether the menu should report the error and keep going.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidNumber { .. }
                | Self::UnknownChoice(_)
                | Self::DuplicateSubscriber(_)
                | Self::Hub(_)
                | Self::Snapshot(_)
        )
    }
}
