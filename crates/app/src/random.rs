//! Seedable random source backed by [`StdRng`].

use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use devstock_domain::device::{DevType, HardwareId};
use devstock_domain::id::DeviceId;

use crate::ports::RandomSource;

/// [`RandomSource`] over a mutex-guarded [`StdRng`].
///
/// The lock is held only for the duration of a single draw, never across
/// an `.await`.
pub struct StdRandom {
    rng: Mutex<StdRng>,
}

impl StdRandom {
    /// Seed from operating-system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Seed deterministically, so two sources built from the same seed
    /// produce the same sequence.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut *rng)
    }
}

impl RandomSource for StdRandom {
    fn dev_type(&self) -> DevType {
        self.with_rng(|rng| DevType::ALL[rng.gen_range(0..DevType::ALL.len())])
    }

    fn hardware_id(&self) -> HardwareId {
        let mut bytes = [0u8; HardwareId::LEN];
        self.with_rng(|rng| rng.fill(&mut bytes[..]));
        HardwareId::from_bytes(bytes)
    }

    fn sample(&self, ids: &[DeviceId], amount: usize) -> Vec<DeviceId> {
        self.with_rng(|rng| ids.choose_multiple(rng, amount).copied().collect())
    }
}
