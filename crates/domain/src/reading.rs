//! Readings — immutable timestamped air samples reported by devices.

use serde::{Deserialize, Serialize};

use crate::device::DeviceId;
use crate::time::Timestamp;

/// A unique identifier for a [`Reading`] record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReadingId(uuid::Uuid);

impl Default for ReadingId {
    fn default() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl ReadingId {
    /// Generate a new random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// Access the inner UUID.
    #[must_use]
    pub fn as_uuid(self) -> uuid::Uuid {
        self.0
    }
}

impl std::fmt::Display for ReadingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for ReadingId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::parse_str(s).map(Self)
    }
}

/// One air sample from one device at one point in time.
///
/// Readings are immutable once created: there is no update operation,
/// only creation and deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub id: ReadingId,
    pub device_id: DeviceId,
    pub temperature: f64,
    pub pressure: f64,
    pub humidity: f64,
    pub recorded_at: Timestamp,
}

impl Reading {
    /// Create a builder for constructing a [`Reading`].
    #[must_use]
    pub fn builder() -> ReadingBuilder {
        ReadingBuilder::default()
    }
}

/// Step-by-step builder for [`Reading`].
///
/// `recorded_at` defaults to the time [`build`](ReadingBuilder::build) is
/// called; write paths rely on this for creation-time stamping.
#[derive(Debug, Default)]
pub struct ReadingBuilder {
    id: Option<ReadingId>,
    device_id: Option<DeviceId>,
    temperature: Option<f64>,
    pressure: Option<f64>,
    humidity: Option<f64>,
    recorded_at: Option<Timestamp>,
}

impl ReadingBuilder {
    #[must_use]
    pub fn id(mut self, id: ReadingId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn device_id(mut self, device_id: DeviceId) -> Self {
        self.device_id = Some(device_id);
        self
    }

    #[must_use]
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    #[must_use]
    pub fn pressure(mut self, pressure: f64) -> Self {
        self.pressure = Some(pressure);
        self
    }

    #[must_use]
    pub fn humidity(mut self, humidity: f64) -> Self {
        self.humidity = Some(humidity);
        self
    }

    #[must_use]
    pub fn recorded_at(mut self, recorded_at: Timestamp) -> Self {
        self.recorded_at = Some(recorded_at);
        self
    }

    /// Consume the builder and return a [`Reading`].
    #[must_use]
    pub fn build(self) -> Reading {
        Reading {
            id: self.id.unwrap_or_default(),
            device_id: self.device_id.unwrap_or_default(),
            temperature: self.temperature.unwrap_or_default(),
            pressure: self.pressure.unwrap_or_default(),
            humidity: self.humidity.unwrap_or_default(),
            recorded_at: self.recorded_at.unwrap_or_else(crate::time::now),
        }
    }
}

/// Outcome of a deletion, counting removed readings.
///
/// Deleting a device that holds no readings is not an error; the count is
/// simply zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionResult {
    pub deleted: u64,
}
