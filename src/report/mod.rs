//! Persisted outputs
//!
//! Every writer reads only from finished `WellRiskRecord`s. Nothing is
//! written until the whole analysis has succeeded.

mod dossier;
mod summary;

use std::path::{Path, PathBuf};

use crate::config::{defaults, ScoringConfig};
use crate::types::WellRiskRecord;

pub use dossier::{dossier_path, render_dossier, write_dossier};
pub use summary::{summary_csv, write_summary_csv, write_well_metrics_json, SUMMARY_COLUMNS};

/// Output writer errors
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Formatting error: {0}")]
    Format(#[from] std::fmt::Error),

    #[error("No record for API {0}")]
    UnknownWell(u64),
}

pub(crate) fn write_file(path: &Path, contents: &str) -> Result<(), ReportError> {
    std::fs::write(path, contents).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the summary table, the per-well metrics and, optionally, one
/// dossier per well into `dir`. Returns the paths written.
pub fn write_outputs(
    records: &[WellRiskRecord],
    dir: &Path,
    scoring: &ScoringConfig,
    with_dossiers: bool,
) -> Result<Vec<PathBuf>, ReportError> {
    std::fs::create_dir_all(dir).map_err(|source| ReportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::new();

    let csv_path = dir.join(defaults::SUMMARY_CSV_FILE);
    write_summary_csv(records, &csv_path)?;
    written.push(csv_path);

    let json_path = dir.join(defaults::WELL_METRICS_JSON_FILE);
    write_well_metrics_json(records, &json_path)?;
    written.push(json_path);

    if with_dossiers {
        for record in records {
            written.push(write_dossier(record, scoring, dir)?);
        }
    }

    tracing::info!(dir = %dir.display(), files = written.len(), "Outputs written");
    Ok(written)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::types::{AiEquivalents, AquiferCheck, ComponentScores, DrasticClass, RiskTier};

    pub(crate) fn sample_record() -> WellRiskRecord {
        WellRiskRecord {
            api: 3_500_320_743,
            well_name: "SCHNITZER 1".to_string(),
            county: "ALFALFA".to_string(),
            longitude: -98.41,
            latitude: 36.73,
            completion_year: Some(1982),
            surface_casing_ft: Some(857.0),
            domestic_wells_1km: Some(2),
            components: ComponentScores {
                aquifer_score: 25.0,
                surface_water_score: 18.1,
                casing_age_score: 12.9,
                spill_score: 5.0,
                receptors_score: 6.0,
            },
            raw_score: 67.0,
            final_score: 67.0,
            risk_tier: RiskTier::High,
            live_aquifer_check: AquiferCheck::Intersect,
            aquifer_distance_m: Some(0.0),
            surface_water_dist_m: Some(212.4),
            drastic_factor: 0.8,
            drastic_class: DrasticClass::High,
            nearby_domestic_wells: 2,
            domestic_demand_wtd_m3_yr: 600.0,
            p_leak: 0.7249,
            water_safeguarded_m3_yr: 434.94,
            water_safeguarded_acft_yr: 0.3526,
            contaminant_load_avoided_m3_yr: 846.7,
            ai_equivalents: AiEquivalents::default(),
            data_gap_flag: false,
            data_gaps: Vec::new(),
        }
    }

    #[test]
    fn test_sample_record_is_consistent() {
        let r = sample_record();
        assert!((r.components.total() - r.raw_score).abs() < 1e-9);
        assert_eq!(r.raw_score.round(), r.final_score);
    }

    #[test]
    fn test_write_outputs_creates_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("nested/output");
        let files = write_outputs(&[sample_record()], &out, &ScoringConfig::default(), true).unwrap();
        assert_eq!(files.len(), 3);
        assert!(out.join(defaults::SUMMARY_CSV_FILE).exists());
        assert!(out.join(defaults::WELL_METRICS_JSON_FILE).exists());
        assert!(out.join("3500320743_dossier.md").exists());
    }
}
