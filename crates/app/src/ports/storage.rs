//! Storage port — repository trait for reading persistence.

use std::future::Future;

use airhub_domain::device::DeviceId;
use airhub_domain::error::AirHubError;
use airhub_domain::reading::Reading;

/// Repository for persisting and querying [`Reading`]s.
///
/// Every method is one logical unit of work against the store; callers are
/// responsible for sequencing multi-device operations.
pub trait ReadingRepository {
    /// Persist a new reading.
    fn insert(&self, reading: Reading) -> impl Future<Output = Result<Reading, AirHubError>> + Send;

    /// All readings for a device, ordered oldest-first.
    fn find_by_device(
        &self,
        device_id: DeviceId,
    ) -> impl Future<Output = Result<Vec<Reading>, AirHubError>> + Send;

    /// The most recent readings for a device, newest-first, at most `limit`.
    fn find_recent(
        &self,
        device_id: DeviceId,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Reading>, AirHubError>> + Send;

    /// The single most recent reading for a device, if any.
    fn find_latest(
        &self,
        device_id: DeviceId,
    ) -> impl Future<Output = Result<Option<Reading>, AirHubError>> + Send;

    /// The most recent reading of every device that has one.
    fn find_latest_per_device(
        &self,
    ) -> impl Future<Output = Result<Vec<Reading>, AirHubError>> + Send;

    /// Delete all readings for a device, returning the number of rows removed.
    fn delete_by_device(
        &self,
        device_id: DeviceId,
    ) -> impl Future<Output = Result<u64, AirHubError>> + Send;
}
