use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::util::Float;

/// Uniform draw from the closed interval `[lo, hi]`
pub fn rand_interval<R: Rng + ?Sized>(rng: &mut R, lo: Float, hi: Float) -> Float {
    assert!(lo <= hi, "Invalid interval [{}, {}]", lo, hi);
    Uniform::new_inclusive(lo, hi).sample(rng)
}

/// The single generator a training run threads through weight
/// initialization and data generation.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
