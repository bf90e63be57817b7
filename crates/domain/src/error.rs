//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`AirHubError`]
//! via `#[from]` (or boxing, for adapter-level errors the domain must not
//! know about).

use crate::device::DeviceId;

/// Top-level error for all airhub operations.
#[derive(Debug, thiserror::Error)]
pub enum AirHubError {
    /// A request carried an id or body that failed validation.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A referenced device is outside the supported set.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// A device exists but has no recorded readings.
    #[error("no data")]
    NoData(#[from] NoDataError),

    /// The persistence backend failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Validation failures on incoming identifiers and bodies.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// The id path segment was not a non-negative integer.
    #[error("invalid device id: {0}")]
    InvalidDeviceId(String),

    /// The count path segment was not a non-negative integer.
    #[error("invalid reading count: {0}")]
    InvalidCount(String),

    /// A write referenced a device outside the supported set.
    #[error("device {0} is not a supported device")]
    UnsupportedDevice(DeviceId),
}

/// A referenced resource does not exist.
#[derive(Debug, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    /// Kind of resource, e.g. `"Device"`.
    pub entity: &'static str,
    /// The identifier that failed to resolve.
    pub id: String,
}

/// A device has no readings to return.
#[derive(Debug, thiserror::Error)]
#[error("no readings recorded for device {device_id}")]
pub struct NoDataError {
    pub device_id: DeviceId,
}
