//! GIS layer provider
//!
//! Aquifer polygons and hydrography flowlines are read from shapefiles and
//! held in EPSG:3857 metres. Domestic water wells have no statewide point
//! layer, so they are synthesised around each orphan well.

mod fetch;
mod shapefile_loader;
mod synthetic;

use geo::{LineString, Polygon};

use crate::types::DomesticWell;

pub use fetch::{ensure_archive, ensure_layers, FetchError};
pub use shapefile_loader::{load_layers, read_flowlines, read_polygons, LayerError};
pub use synthetic::{generate_domestic_wells, seeded_rng};

/// All vector layers used by the geometry scorers, in EPSG:3857.
#[derive(Debug, Clone, Default)]
pub struct GisLayers {
    pub aquifers: Vec<Polygon<f64>>,
    pub flowlines: Vec<LineString<f64>>,
    /// Filled by the pipeline after the orphan wells are known
    pub domestic_wells: Vec<DomesticWell>,
}

impl GisLayers {
    pub fn new(aquifers: Vec<Polygon<f64>>, flowlines: Vec<LineString<f64>>) -> Self {
        Self {
            aquifers,
            flowlines,
            domestic_wells: Vec::new(),
        }
    }
}
