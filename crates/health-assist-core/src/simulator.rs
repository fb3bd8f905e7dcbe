//! Random vital-sign generator.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::{VitalBounds, VitalReading};

/// Produces random readings within [`VitalBounds::SIMULATION`].
pub struct VitalSimulator<R: Rng = StdRng> {
    rng: R,
    bounds: VitalBounds,
}

impl VitalSimulator<StdRng> {
    /// Simulator seeded from system entropy.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic simulator for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for VitalSimulator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> VitalSimulator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            bounds: VitalBounds::SIMULATION,
        }
    }

    /// Draw one reading. Temperature is rounded to one decimal place.
    pub fn sample(&mut self) -> VitalReading {
        let temperature = self.rng.gen_range(self.bounds.temperature.clone());
        VitalReading {
            temperature: (temperature * 10.0).round() / 10.0,
            heart_rate: self.rng.gen_range(self.bounds.heart_rate.clone()),
            systolic: self.rng.gen_range(self.bounds.systolic.clone()),
            diastolic: self.rng.gen_range(self.bounds.diastolic.clone()),
        }
    }
}
