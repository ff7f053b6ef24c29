//! Shared setup for integration tests.
use packed_vec3_core::Vec3Packed;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Deterministic generator so failures reproduce.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Random vector with lanes in `[-range, range)` and the given `w`.
pub fn random_vector(rng: &mut StdRng, range: f32, w: f32) -> Vec3Packed {
    Vec3Packed::new4(
        rng.random_range(-range..range),
        rng.random_range(-range..range),
        rng.random_range(-range..range),
        w,
    )
}
