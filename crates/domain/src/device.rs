//! Device — a typed hardware record, optionally attached to an endpoint.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::DeviceId;

/// Number of devices synthesized by a single generation call.
pub const DEVICES_PER_BATCH: usize = 10;

/// Number of freshly generated devices that receive an endpoint.
pub const ENDPOINTS_PER_BATCH: usize = 5;

/// The closed catalog of device types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DevType {
    Emeter,
    Zigbee,
    Lora,
    Gsm,
}

impl DevType {
    /// Every device type, in catalog order.
    pub const ALL: [Self; 4] = [Self::Emeter, Self::Zigbee, Self::Lora, Self::Gsm];

    /// Lowercase name as stored in the `dev_type` column.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Emeter => "emeter",
            Self::Zigbee => "zigbee",
            Self::Lora => "lora",
            Self::Gsm => "gsm",
        }
    }
}

impl fmt::Display for DevType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Six-byte hardware identifier, rendered as 12 lowercase hex characters.
///
/// Uniqueness is not enforced anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HardwareId([u8; 6]);

impl HardwareId {
    /// Byte length of every hardware identifier.
    pub const LEN: usize = 6;

    #[must_use]
    pub fn from_bytes(bytes: [u8; Self::LEN]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for HardwareId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// A device that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDevice {
    pub dev_type: DevType,
    pub dev_id: HardwareId,
}

impl NewDevice {
    /// Attach the identifier assigned by the store.
    #[must_use]
    pub fn persisted(self, id: DeviceId) -> Device {
        Device {
            id,
            dev_type: self.dev_type,
            dev_id: self.dev_id,
        }
    }
}

/// A persisted device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub id: DeviceId,
    pub dev_type: DevType,
    pub dev_id: HardwareId,
}

/// Number of devices of one type that have no endpoint attached.
///
/// `dev_type` stays a plain string: the store may hold types written by
/// other producers than this service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceTypeCount {
    pub dev_type: String,
    pub count: i64,
}

/// Outcome of one committed generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedBatch {
    /// Every device inserted by the call.
    pub device_ids: Vec<DeviceId>,
    /// The subset of `device_ids` that received an endpoint.
    pub endpoint_device_ids: Vec<DeviceId>,
}
