use serde::{Deserialize, Serialize};

// ============================================================================
// Classifications
// ============================================================================

/// Coarse risk bucket derived from the final score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RiskTier {
    Low = 0,
    Moderate = 1,
    High = 2,
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskTier::Low => write!(f, "Low"),
            RiskTier::Moderate => write!(f, "Moderate"),
            RiskTier::High => write!(f, "High"),
        }
    }
}

/// Result of the point-in-aquifer query.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AquiferCheck {
    Intersect,
    #[serde(rename = "No Intersect")]
    NoIntersect,
    Error,
}

impl std::fmt::Display for AquiferCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AquiferCheck::Intersect => write!(f, "Intersect"),
            AquiferCheck::NoIntersect => write!(f, "No Intersect"),
            AquiferCheck::Error => write!(f, "Error"),
        }
    }
}

/// Discrete DRASTIC vulnerability class.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum DrasticClass {
    #[serde(rename = "Very Low")]
    VeryLow = 0,
    Low = 1,
    Moderate = 2,
    High = 3,
    #[serde(rename = "Very High")]
    VeryHigh = 4,
}

impl DrasticClass {
    /// Anchor factor for each class, most vulnerable first.
    pub const ANCHORS: [(f64, DrasticClass); 5] = [
        (1.0, DrasticClass::VeryHigh),
        (0.8, DrasticClass::High),
        (0.6, DrasticClass::Moderate),
        (0.4, DrasticClass::Low),
        (0.2, DrasticClass::VeryLow),
    ];
}

impl std::fmt::Display for DrasticClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DrasticClass::VeryHigh => write!(f, "Very High"),
            DrasticClass::High => write!(f, "High"),
            DrasticClass::Moderate => write!(f, "Moderate"),
            DrasticClass::Low => write!(f, "Low"),
            DrasticClass::VeryLow => write!(f, "Very Low"),
        }
    }
}

// ============================================================================
// Data Gaps
// ============================================================================

/// Why a value on a record is a substitute rather than a computed result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataGap {
    /// Aquifer intersection query failed; flag set to `Error`
    AquiferIntersection { reason: String },
    /// Nearest-aquifer distance failed; proximity scored 0, DRASTIC fallback used
    AquiferDistance { reason: String },
    /// Nearest-flowline distance failed; surface water scored 0
    SurfaceWaterDistance { reason: String },
    /// An optional input attribute was blank; its part scored 0
    MissingField { field: String },
}

impl std::fmt::Display for DataGap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataGap::AquiferIntersection { reason } => {
                write!(f, "aquifer intersection unavailable: {reason}")
            }
            DataGap::AquiferDistance { reason } => write!(f, "aquifer distance unavailable: {reason}"),
            DataGap::SurfaceWaterDistance { reason } => {
                write!(f, "surface water distance unavailable: {reason}")
            }
            DataGap::MissingField { field } => write!(f, "missing input field '{field}'"),
        }
    }
}

// ============================================================================
// Scores and Derived Metrics
// ============================================================================

/// The five sub-scores, each on its nominal cap (30/20/20/15/15).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct ComponentScores {
    pub aquifer_score: f64,
    pub surface_water_score: f64,
    pub casing_age_score: f64,
    pub spill_score: f64,
    pub receptors_score: f64,
}

impl ComponentScores {
    /// Unweighted, unclipped sum.
    pub fn total(&self) -> f64 {
        self.aquifer_score
            + self.surface_water_score
            + self.casing_age_score
            + self.spill_score
            + self.receptors_score
    }
}

/// Illustrative conversions of safeguarded water into AI workload water cost.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AiEquivalents {
    /// Large-model training runs (2 dp)
    pub training_run_equivalent: f64,
    pub queries_per_year: u64,
    pub gpu_cluster_hours: u64,
    pub description: String,
    pub primary_comparison: String,
}

/// Everything the pipeline derives for one well. Written once per run and
/// never mutated; report writers read only from this.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WellRiskRecord {
    pub api: u64,
    pub well_name: String,
    pub county: String,
    pub longitude: f64,
    pub latitude: f64,
    pub completion_year: Option<i32>,
    pub surface_casing_ft: Option<f64>,
    pub domestic_wells_1km: Option<u32>,

    #[serde(flatten)]
    pub components: ComponentScores,
    /// Sum of the sub-scores before rounding
    pub raw_score: f64,
    pub final_score: f64,
    pub risk_tier: RiskTier,

    pub live_aquifer_check: AquiferCheck,
    /// Nearest aquifer distance, metres (0 inside a polygon)
    pub aquifer_distance_m: Option<f64>,
    /// Nearest flowline distance, metres, rounded to 2 dp
    pub surface_water_dist_m: Option<f64>,

    pub drastic_factor: f64,
    pub drastic_class: DrasticClass,
    pub nearby_domestic_wells: usize,
    pub domestic_demand_wtd_m3_yr: f64,
    pub p_leak: f64,
    pub water_safeguarded_m3_yr: f64,
    pub water_safeguarded_acft_yr: f64,
    pub contaminant_load_avoided_m3_yr: f64,
    pub ai_equivalents: AiEquivalents,

    pub data_gap_flag: bool,
    pub data_gaps: Vec<DataGap>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_total_is_plain_sum() {
        let c = ComponentScores {
            aquifer_score: 25.5,
            surface_water_score: 18.25,
            casing_age_score: 12.0,
            spill_score: 5.0,
            receptors_score: 6.0,
        };
        assert!((c.total() - 66.75).abs() < 1e-12);
    }

    #[test]
    fn test_labels_match_report_vocabulary() {
        assert_eq!(AquiferCheck::NoIntersect.to_string(), "No Intersect");
        assert_eq!(DrasticClass::VeryHigh.to_string(), "Very High");
        assert_eq!(RiskTier::Moderate.to_string(), "Moderate");
        assert_eq!(
            serde_json::to_string(&AquiferCheck::NoIntersect).unwrap(),
            "\"No Intersect\""
        );
    }

    #[test]
    fn test_data_gap_serializes_tagged() {
        let gap = DataGap::MissingField {
            field: "completion_year".to_string(),
        };
        let json = serde_json::to_value(&gap).unwrap();
        assert_eq!(json["kind"], "missing_field");
        assert_eq!(json["field"], "completion_year");
    }
}
