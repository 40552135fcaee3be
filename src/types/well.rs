use geo::Point;
use serde::Serialize;

/// One orphan well from the input table.
///
/// Optional attributes are `None` when the cell was blank or `NaN`; each
/// scorer documents what it substitutes and records a data gap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WellRecord {
    /// API well number
    pub api: u64,
    pub name: String,
    pub county: String,
    /// WGS84 degrees, as read
    pub longitude: f64,
    pub latitude: f64,
    /// EPSG:3857 metres, used for all distance math
    #[serde(skip)]
    pub location: Point<f64>,
    pub completion_year: Option<i32>,
    pub surface_casing_ft: Option<f64>,
    /// Count of domestic water wells within 1 km
    pub domestic_wells_1km: Option<u32>,
}

/// Synthetic domestic water well placed around an orphan well.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomesticWell {
    /// EPSG:3857 metres
    pub location: Point<f64>,
    /// API number of the orphan well this point was generated for
    pub orphan_api: u64,
}
