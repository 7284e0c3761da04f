//! Random source port — device synthesis and sampling.

use devstock_domain::device::{DevType, HardwareId};
use devstock_domain::id::DeviceId;

/// Source of randomness for device generation.
///
/// Values are not security sensitive. Implementations are shared across
/// concurrent requests and therefore take `&self`.
pub trait RandomSource: Send + Sync {
    /// Pick a device type uniformly from [`DevType::ALL`].
    fn dev_type(&self) -> DevType;

    /// Produce a random six-byte hardware identifier.
    fn hardware_id(&self) -> HardwareId;

    /// Pick `amount` distinct elements of `ids` uniformly, without replacement.
    ///
    /// Returns every element when `amount >= ids.len()`.
    fn sample(&self, ids: &[DeviceId], amount: usize) -> Vec<DeviceId>;
}
