//! Common error types used across the workspace.
//!
//! The core is almost infallible: mutators accept any input and removals of
//! absent items are no-ops. What remains are lookups by id and commands sent
//! to the wrong kind of device.

use crate::device::DeviceKind;

/// Top-level error for smarthub operations.
#[derive(Debug, thiserror::Error)]
pub enum HubError {
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error("{device} does not support `{command}`")]
    UnsupportedCommand {
        device: DeviceKind,
        command: &'static str,
    },
}

/// A lookup by id matched nothing.
#[derive(Debug, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}
