//! Synthetic domestic water wells.
//!
//! Each orphan well gets `domestic_wells_1km` points scattered at a uniform
//! bearing and a uniform radial distance inside the configured band.

use std::f64::consts::TAU;

use geo::Point;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Uniform};

use crate::config::SyntheticConfig;
use crate::types::{DomesticWell, WellRecord};

/// Build the run's random source.
///
/// With no configured seed a fresh one is drawn and returned so the run can
/// be reproduced later.
pub fn seeded_rng(seed: Option<u64>) -> (ChaCha8Rng, u64) {
    let seed = seed.unwrap_or_else(rand::random);
    (ChaCha8Rng::seed_from_u64(seed), seed)
}

/// Scatter domestic wells around every orphan well.
///
/// Wells with no recorded count get none. Output order follows input order
/// so a fixed seed reproduces the same points.
pub fn generate_domestic_wells<R: Rng + ?Sized>(
    wells: &[WellRecord],
    config: &SyntheticConfig,
    rng: &mut R,
) -> Vec<DomesticWell> {
    let bearing = Uniform::new(0.0, TAU);
    let distance = if config.max_distance_m > config.min_distance_m {
        Uniform::new(config.min_distance_m, config.max_distance_m)
    } else {
        Uniform::new_inclusive(config.min_distance_m, config.min_distance_m)
    };

    let total: usize = wells
        .iter()
        .map(|w| w.domestic_wells_1km.unwrap_or(0) as usize)
        .sum();
    let mut points = Vec::with_capacity(total);

    for well in wells {
        let count = well.domestic_wells_1km.unwrap_or(0);
        for _ in 0..count {
            let theta = bearing.sample(rng);
            let r = distance.sample(rng);
            points.push(DomesticWell {
                location: Point::new(
                    well.location.x() + r * theta.cos(),
                    well.location.y() + r * theta.sin(),
                ),
                orphan_api: well.api,
            });
        }
    }

    tracing::info!(
        orphan_wells = wells.len(),
        domestic_wells = points.len(),
        "Generated synthetic domestic wells"
    );
    points
}
