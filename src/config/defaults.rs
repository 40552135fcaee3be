//! System-wide default constants.
//!
//! Values that are not operator-tunable scoring parameters but still need a
//! single home: file locations, source URLs and the mocked county table.

// ============================================================================
// Config Discovery
// ============================================================================

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "ORPHAN_RISK_CONFIG";

/// Config file picked up from the working directory.
pub const LOCAL_CONFIG_FILE: &str = "risk_config.toml";

// ============================================================================
// GIS Sources
// ============================================================================

/// OWRB groundwater aquifer polygons.
pub const AQUIFER_ARCHIVE_URL: &str =
    "https://www.owrb.ok.gov/maps/data/layers/groundwater/gw_owrb_aquifers.zip";

/// USGS NHD statewide hydrography (flowlines split across two shapefiles).
pub const FLOWLINE_ARCHIVE_URL: &str =
    "https://prd-tnm.s3.amazonaws.com/StagedProducts/Hydrography/NHD/State/Shape/NHD_H_Oklahoma_State_Shape.zip";

/// HTTP timeout for a single archive download (seconds).
///
/// The statewide NHD bundle is several hundred MB.
pub const DOWNLOAD_TIMEOUT_SECS: u64 = 300;

// ============================================================================
// Outputs
// ============================================================================

/// Summary table, one row per well.
pub const SUMMARY_CSV_FILE: &str = "water_risk_scores.csv";

/// Full per-well records keyed by API number.
pub const WELL_METRICS_JSON_FILE: &str = "well_metrics.json";

/// Suffix of per-well dossier documents (`<API>_dossier.md`).
pub const DOSSIER_SUFFIX: &str = "_dossier.md";

// ============================================================================
// Projection
// ============================================================================

/// Sphere radius used by EPSG:3857 (metres).
pub const WEB_MERCATOR_RADIUS_M: f64 = 6_378_137.0;

/// Latitude limit of the Web Mercator square (degrees).
pub const WEB_MERCATOR_MAX_LAT: f64 = 85.051_128_78;

// ============================================================================
// Mocked County Water Use
// ============================================================================

/// `(county, self-supplied domestic m³/yr, domestic well count)`.
///
/// Approximations for the counties in the reference well set, not survey data.
pub const MOCK_COUNTY_WATER_USE: &[(&str, f64, u32)] = &[
    ("ALFALFA", 180_000.0, 520),
    ("CUSTER", 640_000.0, 1_900),
    ("GARFIELD", 820_000.0, 2_600),
    ("HASKELL", 410_000.0, 1_450),
    ("LOGAN", 1_900_000.0, 5_200),
];

// ============================================================================
// Self-Check Fixture
// ============================================================================

/// Reference well: score 67, DRASTIC 0.8, demand 600 m³/yr.
pub const SELF_CHECK_SCORE: f64 = 67.0;
pub const SELF_CHECK_DRASTIC: f64 = 0.8;
pub const SELF_CHECK_DEMAND_M3: f64 = 600.0;

/// Expected outputs and tolerances for the fixture above.
pub const SELF_CHECK_P_LEAK: f64 = 0.73;
pub const SELF_CHECK_P_LEAK_TOLERANCE: f64 = 0.01;
pub const SELF_CHECK_WATER_M3: f64 = 439.0;
pub const SELF_CHECK_WATER_TOLERANCE: f64 = 5.0;
