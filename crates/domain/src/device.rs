//! Device identity — small-integer identifiers within a configured count.
//!
//! Devices are not stored anywhere: the supported set is fixed at startup
//! as the half-open range `[0, supported)`. A [`DeviceRegistry`] is the
//! authority on which identifiers are valid.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of a sensor device.
///
/// Unlike database-generated identifiers this is a plain small integer:
/// device identity is assigned by deployment, not by the store.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct DeviceId(u16);

impl DeviceId {
    /// Wrap a raw device number.
    #[must_use]
    pub fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    /// Access the raw device number.
    #[must_use]
    pub fn as_u16(self) -> u16 {
        self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for DeviceId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u16>().map(Self)
    }
}

/// The fixed set of supported devices, `[0, supported)`.
#[derive(Debug, Clone, Copy)]
pub struct DeviceRegistry {
    supported: u16,
}

impl DeviceRegistry {
    /// Create a registry covering `supported` devices.
    #[must_use]
    pub fn new(supported: u16) -> Self {
        Self { supported }
    }

    /// Whether `id` refers to a supported device.
    #[must_use]
    pub fn contains(self, id: DeviceId) -> bool {
        id.as_u16() < self.supported
    }

    /// Iterate over every supported device identifier, in order.
    pub fn iter(self) -> impl Iterator<Item = DeviceId> {
        (0..self.supported).map(DeviceId::from_raw)
    }

    /// Number of supported devices.
    #[must_use]
    pub fn len(self) -> usize {
        usize::from(self.supported)
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.supported == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_roundtrip_through_display_and_from_str() {
        let id = DeviceId::from_raw(7);
        let text = id.to_string();
        let parsed: DeviceId = text.parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn should_return_error_when_parsing_non_numeric_id() {
        let result = DeviceId::from_str("three");
        assert!(result.is_err());
    }

    #[test]
    fn should_return_error_when_parsing_negative_id() {
        let result = DeviceId::from_str("-1");
        assert!(result.is_err());
    }

    #[test]
    fn should_serialize_as_plain_number() {
        let id = DeviceId::from_raw(3);
        assert_eq!(serde_json::to_string(&id).unwrap(), "3");
    }

    #[test]
    fn should_contain_only_ids_below_supported_count() {
        let registry = DeviceRegistry::new(4);
        assert!(registry.contains(DeviceId::from_raw(0)));
        assert!(registry.contains(DeviceId::from_raw(3)));
        assert!(!registry.contains(DeviceId::from_raw(4)));
    }

    #[test]
    fn should_iterate_all_supported_devices_in_order() {
        let registry = DeviceRegistry::new(3);
        let ids: Vec<u16> = registry.iter().map(DeviceId::as_u16).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn should_report_len_and_emptiness() {
        assert_eq!(DeviceRegistry::new(5).len(), 5);
        assert!(!DeviceRegistry::new(5).is_empty());
        assert!(DeviceRegistry::new(0).is_empty());
    }
}
