//! Distance-weighted domestic water demand around a well.

use geo::{EuclideanDistance, Point};

use crate::config::DemandConfig;
use crate::types::DomesticWell;

/// Annual use of one self-supplied domestic well in `county` (m³/yr).
///
/// Falls back to the configured default for unknown counties and for
/// counties with no recorded domestic wells.
pub fn per_well_use(county: &str, cfg: &DemandConfig) -> f64 {
    match cfg.county(county).and_then(|c| c.per_well_m3()) {
        Some(use_m3) => use_m3,
        None => {
            tracing::debug!(county, fallback = cfg.fallback_use_m3_per_well, "No county water use, using fallback");
            cfg.fallback_use_m3_per_well
        }
    }
}

/// Demand-weighted sum over domestic wells inside the radius.
///
/// Each well contributes `per_well_use * (1 - d / radius)`, so a well at the
/// orphan site counts fully and one at the radius counts nothing. Returns
/// the demand and the number of domestic wells inside the radius.
pub fn distance_weighted_demand(
    origin: &Point<f64>,
    domestic_wells: &[DomesticWell],
    per_well_use_m3: f64,
    radius_m: f64,
) -> (f64, usize) {
    let mut demand = 0.0;
    let mut nearby = 0;
    for dw in domestic_wells {
        let d = origin.euclidean_distance(&dw.location);
        if d <= radius_m {
            nearby += 1;
            demand += per_well_use_m3 * (1.0 - d / radius_m).max(0.0);
        }
    }
    (demand, nearby)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CountyWaterUse;

    fn dw(x: f64, y: f64) -> DomesticWell {
        DomesticWell {
            location: Point::new(x, y),
            orphan_api: 1,
        }
    }

    #[test]
    fn test_weights_fall_linearly() {
        let origin = Point::new(0.0, 0.0);
        let wells = vec![dw(0.0, 0.0), dw(500.0, 0.0), dw(0.0, 1000.0), dw(1500.0, 0.0)];
        let (demand, nearby) = distance_weighted_demand(&origin, &wells, 300.0, 1000.0);
        // 300 * 1.0 + 300 * 0.5 + 300 * 0.0
        assert!((demand - 450.0).abs() < 1e-9);
        assert_eq!(nearby, 3);
    }

    #[test]
    fn test_no_wells_no_demand() {
        let (demand, nearby) = distance_weighted_demand(&Point::new(0.0, 0.0), &[], 300.0, 1000.0);
        assert_eq!(demand, 0.0);
        assert_eq!(nearby, 0);
    }

    #[test]
    fn test_county_lookup_and_fallback() {
        let cfg = DemandConfig::default();
        let alfalfa = per_well_use("Alfalfa", &cfg);
        assert!((alfalfa - 180_000.0 / 520.0).abs() < 1e-9);
        assert_eq!(per_well_use("NOWHERE", &cfg), 300.0);
    }

    #[test]
    fn test_zero_well_county_falls_back() {
        let mut cfg = DemandConfig::default();
        cfg.counties.insert(
            "EMPTY".to_string(),
            CountyWaterUse {
                annual_volume_m3: 1000.0,
                domestic_wells: 0,
            },
        );
        assert_eq!(per_well_use("EMPTY", &cfg), cfg.fallback_use_m3_per_well);
    }
}
