//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use rand::{Rng, SeedableRng, rngs::StdRng};
use solar_backup_sizer::{LoadItem, Phase};

/// Seed for randomized property sweeps.
pub const SWEEP_SEED: u64 = 42;

/// Number of random profiles per sweep.
pub const SWEEP_CASES: usize = 200;

/// The four-appliance household from the form defaults (4360 Wh/day).
pub fn residential_loads() -> Vec<LoadItem> {
    vec![
        LoadItem::new("LED", 50.0, 1, 4.0),
        LoadItem::new("Fridge", 150.0, 1, 24.0),
        LoadItem::new("Router", 10.0, 1, 24.0),
        LoadItem::new("TV", 80.0, 1, 4.0),
    ]
}

/// Deterministic RNG for property sweeps.
pub fn sweep_rng() -> StdRng {
    StdRng::seed_from_u64(SWEEP_SEED)
}

/// A random but valid load profile of 0 to 8 appliances, from phone
/// chargers to 20 kW machinery.
pub fn random_loads(rng: &mut StdRng) -> Vec<LoadItem> {
    let count = rng.random_range(0..=8);
    (0..count)
        .map(|i| {
            let watts = f64::from(rng.random_range(5_u32..=20_000));
            let quantity = rng.random_range(1..=6);
            let hours = f64::from(rng.random_range(0_u32..=48)) / 2.0;
            LoadItem::new(format!("Appliance {i}"), watts, quantity, hours)
        })
        .collect()
}

/// A random outage window between half an hour and two days.
pub fn random_outage_hours(rng: &mut StdRng) -> f64 {
    f64::from(rng.random_range(1_u32..=96)) / 2.0
}

pub fn random_phase(rng: &mut StdRng) -> Phase {
    match rng.random_range(0..3) {
        0 => Phase::SinglePhase,
        1 => Phase::ThreePhase,
        _ => Phase::Unknown,
    }
}
