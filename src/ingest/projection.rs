//! WGS84 → EPSG:3857 (spherical Web Mercator) reprojection.
//!
//! Distances in EPSG:3857 are inflated by `1 / cos(lat)` (about 1.25 at
//! Oklahoma's latitude). Scoring uses these planar metres directly so the
//! decay constants keep their calibrated meaning.

use geo::{Coord, Point};
use std::f64::consts::FRAC_PI_4;

use crate::config::defaults::{WEB_MERCATOR_MAX_LAT, WEB_MERCATOR_RADIUS_M};

/// A coordinate that cannot be placed on the Web Mercator plane.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProjectionError {
    #[error("non-finite coordinate (lon={lon}, lat={lat})")]
    NonFinite { lon: f64, lat: f64 },

    #[error("longitude {0} outside [-180, 180]")]
    LongitudeOutOfRange(f64),

    #[error("latitude {0} outside the Web Mercator limit of ±85.0511°")]
    LatitudeOutOfRange(f64),
}

/// Project longitude/latitude degrees to EPSG:3857 metres.
pub fn project_to_web_mercator(lon: f64, lat: f64) -> Result<Point<f64>, ProjectionError> {
    Ok(Point::from(project_coord(lon, lat)?))
}

/// Coordinate-level projection shared with the GIS layer loader.
pub fn project_coord(lon: f64, lat: f64) -> Result<Coord<f64>, ProjectionError> {
    if !lon.is_finite() || !lat.is_finite() {
        return Err(ProjectionError::NonFinite { lon, lat });
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(ProjectionError::LongitudeOutOfRange(lon));
    }
    if lat.abs() > WEB_MERCATOR_MAX_LAT {
        return Err(ProjectionError::LatitudeOutOfRange(lat));
    }

    let x = WEB_MERCATOR_RADIUS_M * lon.to_radians();
    let y = WEB_MERCATOR_RADIUS_M * (FRAC_PI_4 + lat.to_radians() / 2.0).tan().ln();
    Ok(Coord { x, y })
}
