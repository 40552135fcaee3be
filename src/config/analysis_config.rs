//! Analysis Configuration - every scoring constant as an operator-tunable TOML value
//!
//! Weight caps, decay lengths, tier boundaries, the DRASTIC curve, county
//! water use, leak-rate assumptions and unit conversions all live here.
//! Each struct implements `Default` with the reference values, so a run
//! without a config file scores exactly like the published methodology.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::defaults;

// ============================================================================
// Config Provenance
// ============================================================================

/// Tracks which configuration keys were explicitly present in the user's TOML file.
#[derive(Debug, Clone, Default)]
pub struct ConfigProvenance {
    /// Dotted key paths explicitly present in the user's TOML file
    pub explicit_keys: HashSet<String>,
}

impl ConfigProvenance {
    /// Check whether a dotted key path was explicitly set by the user.
    ///
    /// Example: `provenance.is_user_set("drastic.decay_length_m")`
    pub fn is_user_set(&self, dotted_key: &str) -> bool {
        self.explicit_keys.contains(dotted_key)
    }

    /// Leaf keys the operator overrode, sorted. Table headers are skipped.
    pub fn overridden_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .explicit_keys
            .iter()
            .map(String::as_str)
            .filter(|key| {
                let prefix = format!("{key}.");
                !self.explicit_keys.iter().any(|other| other.starts_with(&prefix))
            })
            .collect();
        keys.sort_unstable();
        keys
    }
}

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for one screening run.
///
/// Load with `AnalysisConfig::load(explicit)` which searches:
/// 1. the explicit path (CLI `--config`)
/// 2. `$ORPHAN_RISK_CONFIG`
/// 3. `./risk_config.toml`
/// 4. Built-in defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Run identity, reference year and random seed
    #[serde(default)]
    pub run: RunConfig,

    /// Input/output locations and GIS layer sources
    #[serde(default)]
    pub data: DataConfig,

    /// Sub-score formulas
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Risk tier boundaries
    #[serde(default)]
    pub tiers: TierConfig,

    /// DRASTIC vulnerability curve
    #[serde(default)]
    pub drastic: DrasticConfig,

    /// Domestic demand weighting and county water use
    #[serde(default)]
    pub demand: DemandConfig,

    /// Leak probability and contaminant load
    #[serde(default)]
    pub leak: LeakConfig,

    /// Synthetic domestic well placement
    #[serde(default)]
    pub synthetic: SyntheticConfig,

    /// Unit conversions
    #[serde(default)]
    pub conversion: ConversionConfig,

    /// AI water-footprint comparison constants
    #[serde(default)]
    pub ai_equivalents: AiEquivalentConfig,
}

impl AnalysisConfig {
    /// Load configuration using the standard search order.
    ///
    /// An explicit path that fails to load is an error; the implicit
    /// locations fall back to defaults with a warning.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, ConfigProvenance), ConfigError> {
        if let Some(path) = explicit {
            let loaded = Self::load_from_file_with_provenance(path)?;
            info!(path = %path.display(), run = %loaded.0.run.name, "Loaded analysis config");
            return Ok(loaded);
        }

        // 1. Check env var
        if let Ok(path) = std::env::var(defaults::CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file_with_provenance(&p) {
                    Ok((config, provenance)) => {
                        info!(path = %p.display(), run = %config.run.name, "Loaded analysis config from {}", defaults::CONFIG_ENV_VAR);
                        return Ok((config, provenance));
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from {}, falling back", defaults::CONFIG_ENV_VAR);
                    }
                }
            } else {
                warn!(path = %path, "{} points to non-existent file, falling back", defaults::CONFIG_ENV_VAR);
            }
        }

        // 2. Check ./risk_config.toml
        let local = PathBuf::from(defaults::LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file_with_provenance(&local) {
                Ok((config, provenance)) => {
                    info!(run = %config.run.name, "Loaded analysis config from ./{}", defaults::LOCAL_CONFIG_FILE);
                    return Ok((config, provenance));
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{}, using defaults", defaults::LOCAL_CONFIG_FILE);
                }
            }
        }

        // 3. Defaults
        info!("No {} found, using built-in defaults", defaults::LOCAL_CONFIG_FILE);
        Ok((Self::default(), ConfigProvenance::default()))
    }

    /// Load from a specific TOML file path, also returning provenance.
    pub fn load_from_file_with_provenance(
        path: &Path,
    ) -> Result<(Self, ConfigProvenance), ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let (config, provenance) = Self::from_toml_str(&contents)
            .map_err(|e| match e {
                ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
                other => other,
            })?;
        Ok((config, provenance))
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<(Self, ConfigProvenance), ConfigError> {
        // Two-pass: unknown keys first (warnings only)
        for w in &super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let provenance = ConfigProvenance {
            explicit_keys: super::validation::walk_toml_keys(
                &contents
                    .parse::<toml::Value>()
                    .unwrap_or(toml::Value::Table(toml::map::Map::default())),
                "",
            )
            .into_iter()
            .collect(),
        };

        let config: Self =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;
        Ok((config, provenance))
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Effective config as TOML, headed by comments naming the keys the
    /// config file set. Everything else is a built-in default.
    pub fn to_annotated_toml(&self, provenance: &ConfigProvenance) -> Result<String, ConfigError> {
        let keys = provenance.overridden_keys();
        let mut out = String::new();
        if keys.is_empty() {
            out.push_str("# All values are built-in defaults\n");
        } else {
            out.push_str("# Set in config file:\n");
            for key in keys {
                out.push_str("#   ");
                out.push_str(key);
                out.push('\n');
            }
        }
        out.push('\n');
        out.push_str(&self.to_toml()?);
        Ok(out)
    }

    /// Reference year for well age. Defaults to the current calendar year.
    pub fn current_year(&self) -> i32 {
        use chrono::Datelike;
        self.run
            .current_year
            .unwrap_or_else(|| chrono::Utc::now().year())
    }

    /// Validate all values for internal consistency.
    ///
    /// Rules:
    /// - Decay lengths, horizons and divisors must be positive
    /// - Tier boundaries must be ordered
    /// - DRASTIC floor <= fallback <= ceiling
    /// - Leak-rate range must be ordered and non-negative
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        let s = &self.scoring;
        Self::check_positive(s.aquifer.proximity_decay_m, "scoring.aquifer.proximity_decay_m", &mut errors);
        Self::check_positive(s.surface_water.decay_m, "scoring.surface_water.decay_m", &mut errors);
        Self::check_positive(s.casing_age.age_horizon_years, "scoring.casing_age.age_horizon_years", &mut errors);
        Self::check_positive(s.casing_age.casing_reference_ft, "scoring.casing_age.casing_reference_ft", &mut errors);
        if s.receptors.points_per_well < 0.0 {
            errors.push("scoring.receptors.points_per_well cannot be negative".to_string());
        }

        // Tiers: moderate < high
        if self.tiers.moderate_min >= self.tiers.high_min {
            errors.push(format!(
                "tiers.moderate_min ({:.1}) must be less than tiers.high_min ({:.1})",
                self.tiers.moderate_min, self.tiers.high_min
            ));
        }

        // DRASTIC: floor <= fallback <= ceiling
        let d = &self.drastic;
        Self::check_positive(d.decay_length_m, "drastic.decay_length_m", &mut errors);
        if d.min_factor <= 0.0 || d.min_factor > d.max_factor {
            errors.push(format!(
                "drastic.min_factor ({:.2}) must be > 0 and <= max_factor ({:.2})",
                d.min_factor, d.max_factor
            ));
        }
        if d.fallback_factor < d.min_factor || d.fallback_factor > d.max_factor {
            errors.push(format!(
                "drastic.fallback_factor ({:.2}) must lie within [{:.2}, {:.2}]",
                d.fallback_factor, d.min_factor, d.max_factor
            ));
        }
        if d.class_tolerance < 0.0 {
            errors.push("drastic.class_tolerance cannot be negative".to_string());
        }

        // Demand
        Self::check_positive(self.demand.radius_m, "demand.radius_m", &mut errors);
        if self.demand.fallback_use_m3_per_well < 0.0 {
            errors.push("demand.fallback_use_m3_per_well cannot be negative".to_string());
        }
        for (county, usage) in &self.demand.counties {
            if usage.annual_volume_m3 < 0.0 {
                errors.push(format!(
                    "demand.counties.{county}.annual_volume_m3 cannot be negative"
                ));
            }
        }

        // Leak model
        let l = &self.leak;
        Self::check_positive(l.sigmoid_scale, "leak.sigmoid_scale", &mut errors);
        if l.leak_rate_min_m3_day < 0.0 || l.leak_rate_min_m3_day > l.leak_rate_max_m3_day {
            errors.push(format!(
                "leak.leak_rate_min_m3_day ({:.2}) must be >= 0 and <= leak_rate_max_m3_day ({:.2})",
                l.leak_rate_min_m3_day, l.leak_rate_max_m3_day
            ));
        }
        Self::check_positive(l.days_per_year, "leak.days_per_year", &mut errors);

        // Synthetic placement
        let syn = &self.synthetic;
        if syn.min_distance_m < 0.0 || syn.min_distance_m >= syn.max_distance_m {
            errors.push(format!(
                "synthetic.min_distance_m ({:.1}) must be >= 0 and < max_distance_m ({:.1})",
                syn.min_distance_m, syn.max_distance_m
            ));
        }

        // Conversions used as divisors
        Self::check_positive(self.conversion.m3_per_acre_foot, "conversion.m3_per_acre_foot", &mut errors);
        let ai = &self.ai_equivalents;
        Self::check_positive(ai.training_run_m3, "ai_equivalents.training_run_m3", &mut errors);
        Self::check_positive(ai.query_m3, "ai_equivalents.query_m3", &mut errors);
        Self::check_positive(ai.cluster_hour_m3, "ai_equivalents.cluster_hour_m3", &mut errors);
        Self::check_positive(ai.hours_per_year, "ai_equivalents.hours_per_year", &mut errors);

        // Physical range validation
        let (range_errors, range_warnings) = super::validation::validate_physical_ranges(self);
        errors.extend(range_errors);
        for w in &range_warnings {
            warn!("{}", w);
        }

        // Reject NaN/Inf in any config value (sweep all f64 fields via serialization)
        if let Ok(value) = toml::Value::try_from(self) {
            for key in super::validation::non_finite_keys(&value, "") {
                errors.push(format!("{key} must be a finite number"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    fn check_positive(value: f64, name: &str, errors: &mut Vec<String>) {
        // NaN comparisons silently pass, catch them explicitly
        if !value.is_finite() {
            errors.push(format!("{name}: value must be finite (got {value})"));
            return;
        }
        if value <= 0.0 {
            errors.push(format!("{name} must be > 0 (got {value:.3})"));
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Serialize(toml::ser::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Config I/O error ({}): {}", path.display(), e),
            ConfigError::Parse(path, e) => {
                write!(f, "Config parse error ({}): {}", path.display(), e)
            }
            ConfigError::Serialize(e) => write!(f, "Config serialization error: {}", e),
            ConfigError::Validation(errors) => {
                writeln!(f, "Config validation failed:")?;
                for e in errors {
                    writeln!(f, "  - {}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Run
// ============================================================================

/// Run identification and reproducibility controls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Label that appears in logs and reports
    #[serde(default = "default_run_name")]
    pub name: String,

    /// Reference year for well age (current calendar year when unset)
    #[serde(default)]
    pub current_year: Option<i32>,

    /// Seed for synthetic domestic well placement (entropy when unset)
    #[serde(default)]
    pub random_seed: Option<u64>,
}

fn default_run_name() -> String {
    "oklahoma-orphan-wells".to_string()
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            name: default_run_name(),
            current_year: None,
            random_seed: None,
        }
    }
}

// ============================================================================
// Data Locations
// ============================================================================

/// Coordinate reference system a shapefile is stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceCrs {
    /// Geographic longitude/latitude degrees
    #[serde(rename = "EPSG:4326")]
    Wgs84,
    /// Spherical Web Mercator metres (no reprojection needed)
    #[serde(rename = "EPSG:3857")]
    WebMercator,
}

/// One remotely hosted shapefile bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerSource {
    /// Zip archive URL
    pub url: String,

    /// Extraction directory, relative to `data.data_dir`
    pub archive_dir: String,

    /// Shapefiles inside `archive_dir` that make up this layer
    pub shapefiles: Vec<String>,

    /// CRS of the stored coordinates
    #[serde(default = "default_source_crs")]
    pub crs: SourceCrs,
}

const fn default_source_crs() -> SourceCrs {
    SourceCrs::Wgs84
}

impl LayerSource {
    /// Absolute-or-relative paths of every shapefile in this layer.
    pub fn shapefile_paths(&self, data_dir: &Path) -> Vec<PathBuf> {
        let dir = data_dir.join(&self.archive_dir);
        self.shapefiles.iter().map(|s| dir.join(s)).collect()
    }
}

/// Input table, output directory and GIS layer sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_wells_csv")]
    pub wells_csv: PathBuf,

    /// Cache directory for downloaded GIS archives
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Seconds before a GIS download is abandoned
    #[serde(default = "default_download_timeout")]
    pub download_timeout_secs: u64,

    #[serde(default = "default_aquifer_source")]
    pub aquifers: LayerSource,

    #[serde(default = "default_flowline_source")]
    pub flowlines: LayerSource,
}

fn default_wells_csv() -> PathBuf {
    PathBuf::from("wells_input.csv")
}
fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}
const fn default_download_timeout() -> u64 {
    defaults::DOWNLOAD_TIMEOUT_SECS
}
fn default_aquifer_source() -> LayerSource {
    LayerSource {
        url: defaults::AQUIFER_ARCHIVE_URL.to_string(),
        archive_dir: "aquifers".to_string(),
        shapefiles: vec!["gw_owrb_aquifers.shp".to_string()],
        crs: SourceCrs::Wgs84,
    }
}
fn default_flowline_source() -> LayerSource {
    LayerSource {
        url: defaults::FLOWLINE_ARCHIVE_URL.to_string(),
        archive_dir: "nhd_ok".to_string(),
        shapefiles: vec![
            "Shape/NHDFlowline_0.shp".to_string(),
            "Shape/NHDFlowline_1.shp".to_string(),
        ],
        crs: SourceCrs::Wgs84,
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            wells_csv: default_wells_csv(),
            data_dir: default_data_dir(),
            output_dir: default_output_dir(),
            download_timeout_secs: default_download_timeout(),
            aquifers: default_aquifer_source(),
            flowlines: default_flowline_source(),
        }
    }
}

// ============================================================================
// Scoring (sub-score formulas)
// ============================================================================

/// All five sub-score formulas.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub aquifer: AquiferScoring,

    #[serde(default)]
    pub surface_water: SurfaceWaterScoring,

    #[serde(default)]
    pub casing_age: CasingAgeScoring,

    #[serde(default)]
    pub spill: SpillScoring,

    #[serde(default)]
    pub receptors: ReceptorScoring,
}

/// `intersect_points + proximity_points * exp(-d / proximity_decay_m)`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AquiferScoring {
    #[serde(default = "default_aquifer_intersect")]
    pub intersect_points: f64,

    #[serde(default = "default_aquifer_proximity")]
    pub proximity_points: f64,

    #[serde(default = "default_aquifer_decay")]
    pub proximity_decay_m: f64,
}

const fn default_aquifer_intersect() -> f64 {
    20.0
}
const fn default_aquifer_proximity() -> f64 {
    10.0
}
const fn default_aquifer_decay() -> f64 {
    5000.0
}

impl Default for AquiferScoring {
    fn default() -> Self {
        Self {
            intersect_points: default_aquifer_intersect(),
            proximity_points: default_aquifer_proximity(),
            proximity_decay_m: default_aquifer_decay(),
        }
    }
}

/// `max_points * exp(-d / decay_m)`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceWaterScoring {
    #[serde(default = "default_surface_max")]
    pub max_points: f64,

    #[serde(default = "default_surface_decay")]
    pub decay_m: f64,
}

const fn default_surface_max() -> f64 {
    20.0
}
const fn default_surface_decay() -> f64 {
    500.0
}

impl Default for SurfaceWaterScoring {
    fn default() -> Self {
        Self {
            max_points: default_surface_max(),
            decay_m: default_surface_decay(),
        }
    }
}

/// Age part saturates after `age_horizon_years`; casing part falls linearly
/// to zero at `casing_reference_ft`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CasingAgeScoring {
    #[serde(default = "default_age_max")]
    pub age_max_points: f64,

    #[serde(default = "default_age_horizon")]
    pub age_horizon_years: f64,

    #[serde(default = "default_casing_max")]
    pub casing_max_points: f64,

    #[serde(default = "default_casing_reference")]
    pub casing_reference_ft: f64,
}

const fn default_age_max() -> f64 {
    10.0
}
const fn default_age_horizon() -> f64 {
    50.0
}
const fn default_casing_max() -> f64 {
    10.0
}
const fn default_casing_reference() -> f64 {
    1500.0
}

impl Default for CasingAgeScoring {
    fn default() -> Self {
        Self {
            age_max_points: default_age_max(),
            age_horizon_years: default_age_horizon(),
            casing_max_points: default_casing_max(),
            casing_reference_ft: default_casing_reference(),
        }
    }
}

/// No spill database is integrated; every well receives the placeholder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpillScoring {
    #[serde(default = "default_spill_placeholder")]
    pub placeholder_points: f64,

    /// Nominal cap of the spill component
    #[serde(default = "default_spill_cap")]
    pub cap_points: f64,
}

const fn default_spill_placeholder() -> f64 {
    5.0
}
const fn default_spill_cap() -> f64 {
    15.0
}

impl Default for SpillScoring {
    fn default() -> Self {
        Self {
            placeholder_points: default_spill_placeholder(),
            cap_points: default_spill_cap(),
        }
    }
}

/// `min(cap_points, domestic_wells_1km * points_per_well)`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceptorScoring {
    #[serde(default = "default_receptor_per_well")]
    pub points_per_well: f64,

    #[serde(default = "default_receptor_cap")]
    pub cap_points: f64,
}

const fn default_receptor_per_well() -> f64 {
    3.0
}
const fn default_receptor_cap() -> f64 {
    15.0
}

impl Default for ReceptorScoring {
    fn default() -> Self {
        Self {
            points_per_well: default_receptor_per_well(),
            cap_points: default_receptor_cap(),
        }
    }
}

// ============================================================================
// Tiers
// ============================================================================

/// Half-open tier bands: Low < moderate_min <= Moderate < high_min <= High.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierConfig {
    #[serde(default = "default_high_min")]
    pub high_min: f64,

    #[serde(default = "default_moderate_min")]
    pub moderate_min: f64,
}

const fn default_high_min() -> f64 {
    60.0
}
const fn default_moderate_min() -> f64 {
    30.0
}

impl Default for TierConfig {
    fn default() -> Self {
        Self {
            high_min: default_high_min(),
            moderate_min: default_moderate_min(),
        }
    }
}

// ============================================================================
// DRASTIC
// ============================================================================

/// `min_factor + (max_factor - min_factor) * exp(-d / decay_length_m)`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrasticConfig {
    #[serde(default = "default_drastic_min")]
    pub min_factor: f64,

    #[serde(default = "default_drastic_max")]
    pub max_factor: f64,

    #[serde(default = "default_drastic_decay")]
    pub decay_length_m: f64,

    /// Largest gap between a factor and a class anchor that still matches
    #[serde(default = "default_drastic_tolerance")]
    pub class_tolerance: f64,

    /// Factor used when the aquifer distance could not be computed
    #[serde(default = "default_drastic_fallback")]
    pub fallback_factor: f64,
}

const fn default_drastic_min() -> f64 {
    0.2
}
const fn default_drastic_max() -> f64 {
    1.0
}
const fn default_drastic_decay() -> f64 {
    2000.0
}
const fn default_drastic_tolerance() -> f64 {
    0.1
}
const fn default_drastic_fallback() -> f64 {
    0.6
}

impl Default for DrasticConfig {
    fn default() -> Self {
        Self {
            min_factor: default_drastic_min(),
            max_factor: default_drastic_max(),
            decay_length_m: default_drastic_decay(),
            class_tolerance: default_drastic_tolerance(),
            fallback_factor: default_drastic_fallback(),
        }
    }
}

// ============================================================================
// Demand
// ============================================================================

/// Self-supplied domestic water use for one county (mocked figures).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountyWaterUse {
    /// Total self-supplied domestic withdrawal, m³/yr
    pub annual_volume_m3: f64,

    /// Number of domestic wells supplying that volume
    pub domestic_wells: u32,
}

impl CountyWaterUse {
    /// Average annual use per domestic well, `None` when the county has no wells.
    pub fn per_well_m3(&self) -> Option<f64> {
        (self.domestic_wells > 0).then(|| self.annual_volume_m3 / f64::from(self.domestic_wells))
    }
}

/// Distance-weighted domestic demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemandConfig {
    /// Search radius around the orphan well, metres
    #[serde(default = "default_demand_radius")]
    pub radius_m: f64,

    /// Per-well use when the county is unknown, m³/yr
    #[serde(default = "default_fallback_use")]
    pub fallback_use_m3_per_well: f64,

    /// County name (upper case) -> water use
    #[serde(default = "default_counties")]
    pub counties: BTreeMap<String, CountyWaterUse>,
}

const fn default_demand_radius() -> f64 {
    1000.0
}
const fn default_fallback_use() -> f64 {
    300.0
}

fn default_counties() -> BTreeMap<String, CountyWaterUse> {
    defaults::MOCK_COUNTY_WATER_USE
        .iter()
        .map(|&(name, annual_volume_m3, domestic_wells)| {
            (
                name.to_string(),
                CountyWaterUse {
                    annual_volume_m3,
                    domestic_wells,
                },
            )
        })
        .collect()
}

impl DemandConfig {
    /// Case-insensitive county lookup.
    pub fn county(&self, name: &str) -> Option<&CountyWaterUse> {
        let key = name.trim().to_uppercase();
        self.counties
            .get(&key)
            .or_else(|| self.counties.iter().find(|(k, _)| k.to_uppercase() == key).map(|(_, v)| v))
    }
}

impl Default for DemandConfig {
    fn default() -> Self {
        Self {
            radius_m: default_demand_radius(),
            fallback_use_m3_per_well: default_fallback_use(),
            counties: default_counties(),
        }
    }
}

// ============================================================================
// Leak Model
// ============================================================================

/// Logistic leak curve and contaminant load assumptions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeakConfig {
    /// Score at which the base probability is 0.5
    #[serde(default = "default_sigmoid_center")]
    pub sigmoid_center: f64,

    #[serde(default = "default_sigmoid_scale")]
    pub sigmoid_scale: f64,

    #[serde(default = "default_leak_min")]
    pub leak_rate_min_m3_day: f64,

    #[serde(default = "default_leak_max")]
    pub leak_rate_max_m3_day: f64,

    #[serde(default = "default_days_per_year")]
    pub days_per_year: f64,
}

const fn default_sigmoid_center() -> f64 {
    50.0
}
const fn default_sigmoid_scale() -> f64 {
    7.5
}
const fn default_leak_min() -> f64 {
    0.5
}
const fn default_leak_max() -> f64 {
    5.9
}
const fn default_days_per_year() -> f64 {
    365.0
}

impl Default for LeakConfig {
    fn default() -> Self {
        Self {
            sigmoid_center: default_sigmoid_center(),
            sigmoid_scale: default_sigmoid_scale(),
            leak_rate_min_m3_day: default_leak_min(),
            leak_rate_max_m3_day: default_leak_max(),
            days_per_year: default_days_per_year(),
        }
    }
}

// ============================================================================
// Synthetic Domestic Wells
// ============================================================================

/// Radial placement band for synthetic domestic wells, `[min, max)` metres.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyntheticConfig {
    #[serde(default = "default_synthetic_min")]
    pub min_distance_m: f64,

    #[serde(default = "default_synthetic_max")]
    pub max_distance_m: f64,
}

const fn default_synthetic_min() -> f64 {
    100.0
}
const fn default_synthetic_max() -> f64 {
    1000.0
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            min_distance_m: default_synthetic_min(),
            max_distance_m: default_synthetic_max(),
        }
    }
}

// ============================================================================
// Conversions
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionConfig {
    #[serde(default = "default_m3_per_acre_foot")]
    pub m3_per_acre_foot: f64,
}

const fn default_m3_per_acre_foot() -> f64 {
    1233.5
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            m3_per_acre_foot: default_m3_per_acre_foot(),
        }
    }
}

/// Illustrative water cost of AI workloads, all in m³.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiEquivalentConfig {
    /// One large-model training run
    #[serde(default = "default_training_run")]
    pub training_run_m3: f64,

    /// One complex model query
    #[serde(default = "default_query")]
    pub query_m3: f64,

    /// One hour of GPU cluster cooling
    #[serde(default = "default_cluster_hour")]
    pub cluster_hour_m3: f64,

    #[serde(default = "default_hours_per_year")]
    pub hours_per_year: f64,

    /// Query count at which the comparison switches to millions of queries
    #[serde(default = "default_query_threshold")]
    pub query_threshold: f64,
}

const fn default_training_run() -> f64 {
    2500.0
}
const fn default_query() -> f64 {
    0.0012
}
const fn default_cluster_hour() -> f64 {
    0.05
}
const fn default_hours_per_year() -> f64 {
    8760.0
}
const fn default_query_threshold() -> f64 {
    1_000_000.0
}

impl Default for AiEquivalentConfig {
    fn default() -> Self {
        Self {
            training_run_m3: default_training_run(),
            query_m3: default_query(),
            cluster_hour_m3: default_cluster_hour(),
            hours_per_year: default_hours_per_year(),
            query_threshold: default_query_threshold(),
        }
    }
}
