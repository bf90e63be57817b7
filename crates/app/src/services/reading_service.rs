//! Reading service — use-cases for recording and retrieving sensor readings.

use std::collections::BTreeMap;

use airhub_domain::device::{DeviceId, DeviceRegistry};
use airhub_domain::error::{AirHubError, NoDataError, NotFoundError, ValidationError};
use airhub_domain::reading::{DeletionResult, Reading};

use crate::ports::ReadingRepository;

/// Application service mediating between HTTP handlers and the store.
///
/// Holds the repository and the fixed [`DeviceRegistry`]; reads on unknown
/// devices fail with `NotFound`, writes with `Validation`.
pub struct ReadingService<R> {
    repo: R,
    registry: DeviceRegistry,
}

impl<R: ReadingRepository> ReadingService<R> {
    /// Create a new service backed by the given repository and device set.
    pub fn new(repo: R, registry: DeviceRegistry) -> Self {
        Self { repo, registry }
    }

    /// The registry of supported devices.
    #[must_use]
    pub fn registry(&self) -> DeviceRegistry {
        self.registry
    }

    fn ensure_known(&self, device_id: DeviceId) -> Result<(), AirHubError> {
        if self.registry.contains(device_id) {
            Ok(())
        } else {
            Err(NotFoundError {
                entity: "Device",
                id: device_id.to_string(),
            }
            .into())
        }
    }

    /// All readings for a device, oldest-first.
    ///
    /// # Errors
    ///
    /// Returns [`AirHubError::NotFound`] when the device is outside the
    /// supported set, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn query(&self, device_id: DeviceId) -> Result<Vec<Reading>, AirHubError> {
        self.ensure_known(device_id)?;
        self.repo.find_by_device(device_id).await
    }

    /// The most recent reading for a device.
    ///
    /// # Errors
    ///
    /// Returns [`AirHubError::NotFound`] for an unknown device,
    /// [`AirHubError::NoData`] when the device has no readings, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn latest(&self, device_id: DeviceId) -> Result<Reading, AirHubError> {
        self.ensure_known(device_id)?;
        self.repo
            .find_latest(device_id)
            .await?
            .ok_or_else(|| NoDataError { device_id }.into())
    }

    /// The most recent reading of every device that has recorded one.
    ///
    /// Devices without readings are absent from the map.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn latest_all(&self) -> Result<BTreeMap<DeviceId, Reading>, AirHubError> {
        let rows = self.repo.find_latest_per_device().await?;
        Ok(rows.into_iter().map(|r| (r.device_id, r)).collect())
    }

    /// The `count` most recent readings for a device, newest-first.
    ///
    /// # Errors
    ///
    /// Returns [`AirHubError::NotFound`] for an unknown device, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn recent(
        &self,
        device_id: DeviceId,
        count: usize,
    ) -> Result<Vec<Reading>, AirHubError> {
        self.ensure_known(device_id)?;
        self.repo.find_recent(device_id, count).await
    }

    /// Persist a new reading.
    ///
    /// # Errors
    ///
    /// Returns [`AirHubError::Validation`] when the reading references a
    /// device outside the supported set, or a storage error from the
    /// repository.
    #[tracing::instrument(skip(self, reading), fields(device_id = %reading.device_id))]
    pub async fn record(&self, reading: Reading) -> Result<Reading, AirHubError> {
        if !self.registry.contains(reading.device_id) {
            return Err(ValidationError::UnsupportedDevice(reading.device_id).into());
        }
        self.repo.insert(reading).await
    }

    /// Delete all readings for a device.
    ///
    /// Idempotent: deleting a device with no readings (or one outside the
    /// supported set) succeeds with a zero count.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, device_id: DeviceId) -> Result<DeletionResult, AirHubError> {
        let deleted = self.repo.delete_by_device(device_id).await?;
        Ok(DeletionResult { deleted })
    }

    /// Delete all readings for every supported device.
    ///
    /// Each per-device deletion completes before the next starts and before
    /// this method returns; the result aggregates the row counts.
    ///
    /// # Errors
    ///
    /// Returns the first storage error encountered. Deletions that already
    /// completed stay applied; each is idempotent, so a retry converges.
    #[tracing::instrument(skip(self))]
    pub async fn delete_all(&self) -> Result<DeletionResult, AirHubError> {
        let mut deleted = 0;
        for device_id in self.registry.iter() {
            deleted += self.repo.delete_by_device(device_id).await?;
        }
        Ok(DeletionResult { deleted })
    }
}
