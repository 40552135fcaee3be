//! Summary CSV and per-well JSON metrics.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use super::{write_file, ReportError};
use crate::types::WellRiskRecord;

/// Column order of the summary table.
pub const SUMMARY_COLUMNS: [&str; 12] = [
    "API",
    "WELL_NAME",
    "COUNTY",
    "final_score",
    "risk_tier",
    "surface_water_dist_m",
    "surface_casing_ft",
    "completion_year",
    "domestic_wells_1km",
    "Water_Safeguarded_m3_yr",
    "Water_Safeguarded_acft_yr",
    "Data_Gap_Flag",
];

/// Quote a field if it contains a delimiter, quote or newline.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn opt<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(String::new, |v| v.to_string())
}

/// Render the summary table. Missing values are left blank.
pub fn summary_csv(records: &[WellRiskRecord]) -> Result<String, ReportError> {
    let mut out = SUMMARY_COLUMNS.join(",");
    out.push('\n');
    write_rows(&mut out, records)?;
    Ok(out)
}

fn write_rows(out: &mut String, records: &[WellRiskRecord]) -> std::fmt::Result {
    for r in records {
        writeln!(
            out,
            "{},{},{},{:.0},{},{},{},{},{},{:.2},{:.4},{}",
            r.api,
            csv_field(&r.well_name),
            csv_field(&r.county),
            r.final_score,
            r.risk_tier,
            r.surface_water_dist_m.map_or_else(String::new, |d| format!("{d:.2}")),
            opt(r.surface_casing_ft),
            opt(r.completion_year),
            opt(r.domestic_wells_1km),
            r.water_safeguarded_m3_yr,
            r.water_safeguarded_acft_yr,
            u8::from(r.data_gap_flag),
        )?;
    }
    Ok(())
}

pub fn write_summary_csv(records: &[WellRiskRecord], path: &Path) -> Result<(), ReportError> {
    write_file(path, &summary_csv(records)?)?;
    tracing::info!(file = %path.display(), rows = records.len(), "Summary CSV written");
    Ok(())
}

/// Full records as a JSON object keyed by API number.
pub fn write_well_metrics_json(records: &[WellRiskRecord], path: &Path) -> Result<(), ReportError> {
    let keyed: BTreeMap<String, &WellRiskRecord> =
        records.iter().map(|r| (r.api.to_string(), r)).collect();
    let json = serde_json::to_string_pretty(&keyed)?;
    write_file(path, &json)?;
    tracing::info!(file = %path.display(), wells = keyed.len(), "Well metrics written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::tests::sample_record;

    #[test]
    fn test_header_and_row() {
        let csv = summary_csv(&[sample_record()]).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next().unwrap(), SUMMARY_COLUMNS.join(","));
        let row: Vec<&str> = lines.next().unwrap().split(',').collect();
        assert_eq!(row.len(), SUMMARY_COLUMNS.len());
        assert_eq!(row[0], "3500320743");
        assert_eq!(row[3], "67");
        assert_eq!(row[4], "High");
        assert_eq!(row[5], "212.40");
        assert_eq!(row[11], "0");
    }

    #[test]
    fn test_missing_values_blank() {
        let mut r = sample_record();
        r.surface_water_dist_m = None;
        r.completion_year = None;
        let csv = summary_csv(&[r]).unwrap();
        let row: Vec<&str> = csv.lines().nth(1).unwrap().split(',').collect();
        assert_eq!(row[5], "");
        assert_eq!(row[7], "");
    }

    #[test]
    fn test_name_with_comma_is_quoted() {
        let mut r = sample_record();
        r.well_name = "SMITH, J 1".to_string();
        let csv = summary_csv(&[r]).unwrap();
        assert!(csv.contains("\"SMITH, J 1\""));
        let parsed = crate::ingest::csv_split(csv.lines().nth(1).unwrap());
        assert_eq!(parsed.len(), SUMMARY_COLUMNS.len());
    }

    #[test]
    fn test_json_keyed_by_api() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.json");
        write_well_metrics_json(&[sample_record()], &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let rec = &value["3500320743"];
        assert_eq!(rec["well_name"], "SCHNITZER 1");
        assert_eq!(rec["risk_tier"], "High");
        assert_eq!(rec["aquifer_score"], 25.0);
    }
}
