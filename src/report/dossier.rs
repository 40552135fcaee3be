//! Per-well dossier in Markdown.
//!
//! Sections: well details, risk profile, component breakdown, water
//! safeguarded, and the water footprint offset statement.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use super::{write_file, ReportError};
use crate::config::{defaults, ScoringConfig};
use crate::scoring::equivalents::thousands;
use crate::types::WellRiskRecord;

fn or_unknown<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "unknown".to_string(), |v| v.to_string())
}

/// Render the dossier for one well.
///
/// Component caps are taken from the scoring config so the "x / cap"
/// columns stay honest when the weights are retuned.
pub fn render_dossier(r: &WellRiskRecord, scoring: &ScoringConfig) -> Result<String, ReportError> {
    let caps = [
        scoring.aquifer.intersect_points + scoring.aquifer.proximity_points,
        scoring.surface_water.max_points,
        scoring.casing_age.age_max_points + scoring.casing_age.casing_max_points,
        scoring.spill.cap_points,
        scoring.receptors.cap_points,
    ];
    let mut doc = String::new();
    write_sections(&mut doc, r, caps)?;
    Ok(doc)
}

fn write_sections(doc: &mut String, r: &WellRiskRecord, caps: [f64; 5]) -> std::fmt::Result {
    let c = &r.components;
    writeln!(doc, "# Orphan Well Water Risk Dossier\n")?;
    writeln!(doc, "## Well Dossier: {} (API: {})\n", r.well_name, r.api)?;
    writeln!(doc, "- County: {}", r.county)?;
    writeln!(doc, "- Completion Year: {}", or_unknown(r.completion_year))?;
    writeln!(doc, "- Surface Casing: {} ft", or_unknown(r.surface_casing_ft))?;
    writeln!(doc, "- Location: {:.5}, {:.5}", r.latitude, r.longitude)?;
    writeln!(doc)?;

    writeln!(doc, "## Risk Profile\n")?;
    writeln!(doc, "| Metric | Value |")?;
    writeln!(doc, "|---|---|")?;
    writeln!(doc, "| Final Score | {:.0} / 100 |", r.final_score)?;
    writeln!(doc, "| Risk Tier | {} |", r.risk_tier)?;
    writeln!(doc, "| Leak Probability | {:.1}% |", r.p_leak * 100.0)?;
    writeln!(doc, "| DRASTIC Vulnerability | {:.2} ({}) |", r.drastic_factor, r.drastic_class)?;
    writeln!(doc, "| Aquifer Check | {} |", r.live_aquifer_check)?;
    writeln!(
        doc,
        "| Nearest Surface Water | {} |",
        r.surface_water_dist_m.map_or_else(|| "unavailable".to_string(), |d| format!("{d:.0} m"))
    )?;
    writeln!(doc)?;

    writeln!(doc, "## Risk Component Breakdown\n")?;
    writeln!(doc, "| Component | Score |")?;
    writeln!(doc, "|---|---|")?;
    let rows = [
        ("Aquifer Vulnerability", c.aquifer_score),
        ("Surface Water Proximity", c.surface_water_score),
        ("Well Integrity (Age/Casing)", c.casing_age_score),
        ("Historical Spills", c.spill_score),
        ("Human Receptors", c.receptors_score),
    ];
    for ((label, score), cap) in rows.iter().zip(caps) {
        writeln!(doc, "| {label} | {score:.1} / {cap:.0} |")?;
    }
    writeln!(doc)?;

    writeln!(doc, "## Water Safeguarded\n")?;
    writeln!(
        doc,
        "By plugging this well, an estimated {:.1} cubic meters/year ({:.2} acre-feet/year) \
         of freshwater are safeguarded from potential contamination. {} synthetic domestic \
         wells lie within the demand radius.",
        r.water_safeguarded_m3_yr, r.water_safeguarded_acft_yr, r.nearby_domestic_wells
    )?;
    writeln!(
        doc,
        "\nContaminant load avoided: {:.1} m³/year.\n",
        r.contaminant_load_avoided_m3_yr
    )?;

    writeln!(doc, "## AI Infrastructure Water Footprint Offset\n")?;
    writeln!(
        doc,
        "Funding the plugging of orphan well {} (API: {}) safeguards {:.2} acre-feet of \
         freshwater per year, a measurable offset to the water footprint of AI and data \
         center operations.\n",
        r.well_name, r.api, r.water_safeguarded_acft_yr
    )?;
    let eq = &r.ai_equivalents;
    writeln!(doc, "- Headline: {}", eq.primary_comparison)?;
    writeln!(doc, "- Model queries per year: {}", thousands(eq.queries_per_year))?;
    writeln!(doc, "- GPU cluster cooling hours: {}", thousands(eq.gpu_cluster_hours))?;
    writeln!(doc, "- Training run equivalent: {:.2}", eq.training_run_equivalent)?;

    if r.data_gap_flag {
        writeln!(doc, "\n## Data Gaps\n")?;
        for gap in &r.data_gaps {
            writeln!(doc, "- {gap}")?;
        }
    }
    Ok(())
}

/// `<dir>/<API>_dossier.md`
pub fn dossier_path(api: u64, dir: &Path) -> PathBuf {
    dir.join(format!("{api}{}", defaults::DOSSIER_SUFFIX))
}

pub fn write_dossier(
    record: &WellRiskRecord,
    scoring: &ScoringConfig,
    dir: &Path,
) -> Result<PathBuf, ReportError> {
    let path = dossier_path(record.api, dir);
    write_file(&path, &render_dossier(record, scoring)?)?;
    tracing::debug!(api = record.api, file = %path.display(), "Dossier written");
    Ok(path)
}
