//! The five risk sub-scores.
//!
//! Geometry queries return `Result` so the aggregator can tell "far away"
//! from "could not be measured". Attribute-based scorers take `Option`s and
//! treat a missing attribute as contributing nothing.

use geo::{EuclideanDistance, Intersects, LineString, Point, Polygon};

use crate::config::ScoringConfig;

/// A geometry query that could not produce a usable answer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("layer '{0}' has no features")]
    EmptyLayer(&'static str),

    #[error("non-finite {0}")]
    NonFinite(&'static str),
}

fn check_point(point: &Point<f64>) -> Result<(), GeometryError> {
    if point.x().is_finite() && point.y().is_finite() {
        Ok(())
    } else {
        Err(GeometryError::NonFinite("well location"))
    }
}

/// Minimum distance over a layer, rejecting empty layers and NaN results.
fn nearest<G>(
    point: &Point<f64>,
    features: &[G],
    layer: &'static str,
) -> Result<f64, GeometryError>
where
    Point<f64>: EuclideanDistance<f64, G>,
{
    check_point(point)?;
    if features.is_empty() {
        return Err(GeometryError::EmptyLayer(layer));
    }
    let d = features
        .iter()
        .map(|f| point.euclidean_distance(f))
        .fold(f64::INFINITY, f64::min);
    if d.is_finite() {
        Ok(d)
    } else {
        Err(GeometryError::NonFinite("distance"))
    }
}

// ============================================================================
// Geometry Queries
// ============================================================================

/// True when the well lies inside or on the boundary of any aquifer polygon.
pub fn aquifer_intersects(
    point: &Point<f64>,
    aquifers: &[Polygon<f64>],
) -> Result<bool, GeometryError> {
    check_point(point)?;
    if aquifers.is_empty() {
        return Err(GeometryError::EmptyLayer("aquifers"));
    }
    Ok(aquifers.iter().any(|poly| point.intersects(poly)))
}

/// Distance to the nearest aquifer polygon in metres, 0 inside one.
pub fn nearest_aquifer_distance(
    point: &Point<f64>,
    aquifers: &[Polygon<f64>],
) -> Result<f64, GeometryError> {
    nearest(point, aquifers, "aquifers")
}

/// Distance to the nearest hydrography flowline in metres.
pub fn nearest_flowline_distance(
    point: &Point<f64>,
    flowlines: &[LineString<f64>],
) -> Result<f64, GeometryError> {
    nearest(point, flowlines, "flowlines")
}

// ============================================================================
// Sub-scores
// ============================================================================

/// Aquifer presence and proximity (cap 30).
///
/// `None` inputs mean the corresponding query failed and contribute 0.
pub fn aquifer_score(intersects: Option<bool>, distance_m: Option<f64>, cfg: &ScoringConfig) -> f64 {
    let a = &cfg.aquifer;
    let presence = if intersects == Some(true) {
        a.intersect_points
    } else {
        0.0
    };
    let proximity = distance_m.map_or(0.0, |d| a.proximity_points * (-d / a.proximity_decay_m).exp());
    presence + proximity
}

/// Surface water proximity (cap 20).
pub fn surface_water_score(distance_m: Option<f64>, cfg: &ScoringConfig) -> f64 {
    let s = &cfg.surface_water;
    distance_m.map_or(0.0, |d| s.max_points * (-d / s.decay_m).exp())
}

/// Age and surface casing (cap 20).
///
/// A completion year in the future counts as age 0. Casing deeper than the
/// reference depth earns no casing points.
pub fn casing_age_score(
    completion_year: Option<i32>,
    surface_casing_ft: Option<f64>,
    current_year: i32,
    cfg: &ScoringConfig,
) -> f64 {
    let c = &cfg.casing_age;
    let age_part = completion_year.map_or(0.0, |year| {
        let age = f64::from(current_year.saturating_sub(year).max(0));
        (age / c.age_horizon_years * c.age_max_points).min(c.age_max_points)
    });
    let casing_part = surface_casing_ft.map_or(0.0, |ft| {
        let depth = ft.clamp(0.0, c.casing_reference_ft);
        c.casing_max_points * (1.0 - depth / c.casing_reference_ft)
    });
    age_part + casing_part
}

/// Historical spill (cap 15). No spill dataset is wired in; a constant.
pub fn spill_score(cfg: &ScoringConfig) -> f64 {
    cfg.spill.placeholder_points
}

/// Nearby human receptors (cap 15).
pub fn receptors_score(domestic_wells_1km: Option<u32>, cfg: &ScoringConfig) -> f64 {
    let r = &cfg.receptors;
    domestic_wells_1km.map_or(0.0, |n| (f64::from(n) * r.points_per_well).min(r.cap_points))
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{line_string, polygon};

    fn square() -> Polygon<f64> {
        polygon![(x: 0.0, y: 0.0), (x: 100.0, y: 0.0), (x: 100.0, y: 100.0), (x: 0.0, y: 100.0), (x: 0.0, y: 0.0)]
    }

    fn cfg() -> ScoringConfig {
        ScoringConfig::default()
    }

    #[test]
    fn test_point_inside_aquifer() {
        let p = Point::new(50.0, 50.0);
        assert_eq!(aquifer_intersects(&p, &[square()]), Ok(true));
        assert_eq!(nearest_aquifer_distance(&p, &[square()]), Ok(0.0));
    }

    #[test]
    fn test_boundary_point_intersects() {
        let p = Point::new(100.0, 50.0);
        assert_eq!(aquifer_intersects(&p, &[square()]), Ok(true));
        let d = nearest_aquifer_distance(&p, &[square()]).unwrap();
        assert!(d.abs() < 1e-9);
        assert!((aquifer_score(Some(true), Some(d), &cfg()) - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_outside_point_distance() {
        let p = Point::new(400.0, 50.0);
        assert_eq!(aquifer_intersects(&p, &[square()]), Ok(false));
        let d = nearest_aquifer_distance(&p, &[square()]).unwrap();
        assert!((d - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_layers_are_errors() {
        let p = Point::new(0.0, 0.0);
        assert_eq!(aquifer_intersects(&p, &[]), Err(GeometryError::EmptyLayer("aquifers")));
        assert_eq!(nearest_flowline_distance(&p, &[]), Err(GeometryError::EmptyLayer("flowlines")));
    }

    #[test]
    fn test_nan_point_is_error() {
        let p = Point::new(f64::NAN, 0.0);
        assert!(matches!(nearest_aquifer_distance(&p, &[square()]), Err(GeometryError::NonFinite(_))));
    }

    #[test]
    fn test_flowline_distance_picks_nearest() {
        let lines = vec![
            line_string![(x: 0.0, y: 1000.0), (x: 100.0, y: 1000.0)],
            line_string![(x: 0.0, y: 250.0), (x: 100.0, y: 250.0)],
        ];
        let d = nearest_flowline_distance(&Point::new(50.0, 0.0), &lines).unwrap();
        assert!((d - 250.0).abs() < 1e-9);
    }

    #[test]
    fn test_aquifer_score_decay() {
        // Outside, 5 km away: 10 * e^-1
        let s = aquifer_score(Some(false), Some(5000.0), &cfg());
        assert!((s - 10.0 * (-1.0f64).exp()).abs() < 1e-9);
        // Failed queries contribute nothing
        assert_eq!(aquifer_score(None, None, &cfg()), 0.0);
    }

    #[test]
    fn test_surface_water_score() {
        assert!((surface_water_score(Some(0.0), &cfg()) - 20.0).abs() < 1e-12);
        let s = surface_water_score(Some(500.0), &cfg());
        assert!((s - 20.0 * (-1.0f64).exp()).abs() < 1e-9);
        assert_eq!(surface_water_score(None, &cfg()), 0.0);
    }

    #[test]
    fn test_casing_age_score() {
        // 43 years, 857 ft casing
        let s = casing_age_score(Some(1982), Some(857.0), 2025, &cfg());
        let expected = 43.0 / 50.0 * 10.0 + 10.0 * (1.0 - 857.0 / 1500.0);
        assert!((s - expected).abs() < 1e-9);
    }

    #[test]
    fn test_casing_age_caps_and_clamps() {
        // Very old well caps at 10; casing beyond reference earns 0
        assert!((casing_age_score(Some(1900), Some(2000.0), 2025, &cfg()) - 10.0).abs() < 1e-12);
        // Future completion year is age 0
        assert_eq!(casing_age_score(Some(2030), None, 2025, &cfg()), 0.0);
        assert_eq!(casing_age_score(None, None, 2025, &cfg()), 0.0);
        // extreme years saturate instead of overflowing
        assert!((casing_age_score(Some(i32::MIN), None, 2025, &cfg()) - 10.0).abs() < 1e-12);
        assert_eq!(casing_age_score(Some(i32::MAX), None, 2025, &cfg()), 0.0);
    }

    #[test]
    fn test_receptors_capped() {
        assert_eq!(receptors_score(Some(2), &cfg()), 6.0);
        assert_eq!(receptors_score(Some(5), &cfg()), 15.0);
        assert_eq!(receptors_score(Some(40), &cfg()), 15.0);
        assert_eq!(receptors_score(None, &cfg()), 0.0);
    }

    #[test]
    fn test_spill_placeholder() {
        assert_eq!(spill_score(&cfg()), 5.0);
    }
}
