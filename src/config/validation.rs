//! Risk config checks.
//!
//! Pass one reads the file as a loose `toml::Value` and warns about keys no
//! struct field will pick up, suggesting the nearest real key. Pass two runs
//! after serde and returns hard errors for values the scoring model cannot
//! use. Unknown keys only warn; a stale config still loads.

use std::collections::HashSet;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Prefix under which county names are free-form keys.
const COUNTY_TABLE_PREFIX: &str = "demand.counties.";

/// Fields allowed inside each `[demand.counties.<NAME>]` table.
const COUNTY_FIELDS: &[&str] = &["annual_volume_m3", "domestic_wells"];

/// Returns the complete set of valid dotted key paths for AnalysisConfig.
///
/// Maintained by hand to match the struct hierarchy in analysis_config.rs.
/// County tables are checked separately since their names are data.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [run]
        "run",
        "run.name",
        "run.current_year",
        "run.random_seed",
        // [data]
        "data",
        "data.wells_csv",
        "data.data_dir",
        "data.output_dir",
        "data.download_timeout_secs",
        "data.aquifers",
        "data.aquifers.url",
        "data.aquifers.archive_dir",
        "data.aquifers.shapefiles",
        "data.aquifers.crs",
        "data.flowlines",
        "data.flowlines.url",
        "data.flowlines.archive_dir",
        "data.flowlines.shapefiles",
        "data.flowlines.crs",
        // [scoring]
        "scoring",
        "scoring.aquifer",
        "scoring.aquifer.intersect_points",
        "scoring.aquifer.proximity_points",
        "scoring.aquifer.proximity_decay_m",
        "scoring.surface_water",
        "scoring.surface_water.max_points",
        "scoring.surface_water.decay_m",
        "scoring.casing_age",
        "scoring.casing_age.age_max_points",
        "scoring.casing_age.age_horizon_years",
        "scoring.casing_age.casing_max_points",
        "scoring.casing_age.casing_reference_ft",
        "scoring.spill",
        "scoring.spill.placeholder_points",
        "scoring.spill.cap_points",
        "scoring.receptors",
        "scoring.receptors.points_per_well",
        "scoring.receptors.cap_points",
        // [tiers]
        "tiers",
        "tiers.high_min",
        "tiers.moderate_min",
        // [drastic]
        "drastic",
        "drastic.min_factor",
        "drastic.max_factor",
        "drastic.decay_length_m",
        "drastic.class_tolerance",
        "drastic.fallback_factor",
        // [demand]
        "demand",
        "demand.radius_m",
        "demand.fallback_use_m3_per_well",
        "demand.counties",
        // [leak]
        "leak",
        "leak.sigmoid_center",
        "leak.sigmoid_scale",
        "leak.leak_rate_min_m3_day",
        "leak.leak_rate_max_m3_day",
        "leak.days_per_year",
        // [synthetic]
        "synthetic",
        "synthetic.min_distance_m",
        "synthetic.max_distance_m",
        // [conversion]
        "conversion",
        "conversion.m3_per_acre_foot",
        // [ai_equivalents]
        "ai_equivalents",
        "ai_equivalents.training_run_m3",
        "ai_equivalents.query_m3",
        "ai_equivalents.cluster_hour_m3",
        "ai_equivalents.hours_per_year",
        "ai_equivalents.query_threshold",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

fn join_key(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

/// Every dotted key path in the tree, tables included.
///
/// `{ demand = { radius_m = 1000.0 } }` gives `["demand", "demand.radius_m"]`.
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let Some(table) = value.as_table() else {
        return Vec::new();
    };
    table
        .iter()
        .flat_map(|(k, v)| {
            let path = join_key(prefix, k);
            let mut nested = walk_toml_keys(v, &path);
            nested.insert(0, path);
            nested
        })
        .collect()
}

/// Dotted paths of every float in the tree that is NaN or infinite.
pub fn non_finite_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    match value {
        toml::Value::Float(f) if !f.is_finite() => vec![prefix.to_string()],
        toml::Value::Table(table) => table
            .iter()
            .flat_map(|(k, v)| non_finite_keys(v, &join_key(prefix, k)))
            .collect(),
        toml::Value::Array(items) => items
            .iter()
            .enumerate()
            .flat_map(|(i, v)| non_finite_keys(v, &format!("{prefix}[{i}]")))
            .collect(),
        _ => Vec::new(),
    }
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

/// Edit distance (insert, delete, substitute) between two keys.
fn levenshtein(a: &str, b: &str) -> usize {
    let target: Vec<char> = b.chars().collect();
    // row[j] = distance between the prefix of `a` seen so far and target[..j]
    let mut row: Vec<usize> = (0..=target.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &cb) in target.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = (above + 1)
                .min(row[j] + 1)
                .min(diagonal + usize::from(ca != cb));
            diagonal = above;
        }
    }
    row[target.len()]
}

/// Nearest known key within three edits. Ties resolve alphabetically.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|&k| (levenshtein(unknown, k), k))
        .filter(|&(dist, _)| dist <= 3)
        .min()
        .map(|(_, k)| k.to_string())
}

/// County tables accept any name; only their fields are checked.
///
/// `None` when `key` is not under `demand.counties.`.
fn check_county_key(key: &str) -> Option<Result<(), ValidationWarning>> {
    let rest = key.strip_prefix(COUNTY_TABLE_PREFIX)?;
    let Some((county, field)) = rest.split_once('.') else {
        return Some(Ok(()));
    };
    if COUNTY_FIELDS.contains(&field) {
        return Some(Ok(()));
    }
    let suggestion = COUNTY_FIELDS
        .iter()
        .map(|f| (f, levenshtein(field, f)))
        .filter(|(_, d)| *d <= 3)
        .min_by_key(|(_, d)| *d)
        .map(|(f, _)| format!("{COUNTY_TABLE_PREFIX}{county}.{f}"));
    Some(Err(ValidationWarning {
        field: key.to_string(),
        message: format!("Unknown config key '{key}'"),
        suggestion,
    }))
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// This does NOT fail on unknown keys, it only warns.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(), // parse errors are handled by serde later
    };

    let known = known_config_keys();
    let found = walk_toml_keys(&value, "");
    let mut warnings = Vec::new();

    for key in &found {
        if known.contains(key.as_str()) {
            continue;
        }
        if let Some(outcome) = check_county_key(key) {
            if let Err(w) = outcome {
                warnings.push(w);
            }
            continue;
        }
        let suggestion = suggest_correction(key, &known);
        warnings.push(ValidationWarning {
            field: key.clone(),
            message: format!("Unknown config key '{key}'"),
            suggestion,
        });
    }

    warnings
}

// ============================================================================
// Physical Range Validation
// ============================================================================

/// Validate physical ranges on a parsed AnalysisConfig.
///
/// Returns (errors, warnings). Errors are impossible values that must
/// prevent the run; warnings are suspicious but not fatal.
pub fn validate_physical_ranges(
    config: &super::AnalysisConfig,
) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    // Completion years are recorded from the 1890s onward
    if let Some(year) = config.run.current_year {
        if !(1900..=2200).contains(&year) {
            errors.push(format!(
                "run.current_year = {year} is outside plausible range (1900-2200)"
            ));
        }
    }

    // DRASTIC factors are multipliers on a probability
    let d = &config.drastic;
    if d.max_factor > 1.0 {
        errors.push(format!(
            "drastic.max_factor = {:.2} would push leak probability above 1",
            d.max_factor
        ));
    }

    // Points placed beyond the demand radius never contribute
    if config.synthetic.max_distance_m > config.demand.radius_m {
        warnings.push(ValidationWarning {
            field: "synthetic.max_distance_m".to_string(),
            message: format!(
                "synthetic.max_distance_m = {:.0} exceeds demand.radius_m = {:.0}, outer domestic wells will carry zero weight",
                config.synthetic.max_distance_m, config.demand.radius_m
            ),
            suggestion: None,
        });
    }

    // Nominal 100-point scale: 30 + 20 + 20 + 15 + 15
    let s = &config.scoring;
    let nominal_total = s.aquifer.intersect_points
        + s.aquifer.proximity_points
        + s.surface_water.max_points
        + s.casing_age.age_max_points
        + s.casing_age.casing_max_points
        + s.spill.cap_points
        + s.receptors.cap_points;
    if nominal_total > 100.0 + 1e-9 {
        warnings.push(ValidationWarning {
            field: "scoring".to_string(),
            message: format!(
                "sub-score caps sum to {nominal_total:.1}, final scores may exceed 100"
            ),
            suggestion: None,
        });
    }

    if s.spill.placeholder_points < 0.0 {
        errors.push(format!(
            "scoring.spill.placeholder_points = {:.1} cannot be negative",
            s.spill.placeholder_points
        ));
    }
    if s.spill.placeholder_points > s.spill.cap_points {
        errors.push(format!(
            "scoring.spill.placeholder_points ({:.1}) exceeds scoring.spill.cap_points ({:.1})",
            s.spill.placeholder_points, s.spill.cap_points
        ));
    }

    (errors, warnings)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_identical() {
        assert_eq!(levenshtein("aquifer", "aquifer"), 0);
    }

    #[test]
    fn test_levenshtein_one_edit() {
        assert_eq!(levenshtein("aquifr", "aquifer"), 1);
    }

    #[test]
    fn test_levenshtein_empty() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
    }

    #[test]
    fn test_walk_toml_keys_nested() {
        let toml: toml::Value = r#"
            [scoring]
            [scoring.aquifer]
            intersect_points = 20.0
        "#
        .parse()
        .unwrap();
        let keys = walk_toml_keys(&toml, "");
        assert!(keys.contains(&"scoring".to_string()));
        assert!(keys.contains(&"scoring.aquifer".to_string()));
        assert!(keys.contains(&"scoring.aquifer.intersect_points".to_string()));
    }

    #[test]
    fn test_typo_key_produces_warning_with_suggestion() {
        let toml_str = r#"
[drastic]
decay_lenght_m = 2000.0
"#;
        let warnings = validate_unknown_keys(toml_str);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].field.contains("decay_lenght_m"));
        assert_eq!(
            warnings[0].suggestion.as_deref(),
            Some("drastic.decay_length_m")
        );
    }

    #[test]
    fn test_county_names_are_free_form() {
        let toml_str = r#"
[demand.counties.PAYNE]
annual_volume_m3 = 500000.0
domestic_wells = 1200
"#;
        assert!(validate_unknown_keys(toml_str).is_empty());
    }

    #[test]
    fn test_county_field_typo_warns() {
        let toml_str = r#"
[demand.counties.PAYNE]
anual_volume_m3 = 500000.0
domestic_wells = 1200
"#;
        let warnings = validate_unknown_keys(toml_str);
        assert_eq!(warnings.len(), 1);
        assert_eq!(
            warnings[0].suggestion.as_deref(),
            Some("demand.counties.PAYNE.annual_volume_m3")
        );
    }

    #[test]
    fn test_non_finite_keys_finds_nested_nan() {
        let mut table = toml::map::Map::new();
        let mut leak = toml::map::Map::new();
        leak.insert("sigmoid_scale".to_string(), toml::Value::Float(f64::NAN));
        table.insert("leak".to_string(), toml::Value::Table(leak));
        let keys = non_finite_keys(&toml::Value::Table(table), "");
        assert_eq!(keys, vec!["leak.sigmoid_scale".to_string()]);
    }

    #[test]
    fn test_physical_range_defaults_clean() {
        let config = crate::config::AnalysisConfig::default();
        let (errors, warnings) = validate_physical_ranges(&config);
        assert!(errors.is_empty(), "Defaults should produce no errors: {errors:?}");
        assert!(warnings.is_empty(), "Defaults should produce no warnings: {warnings:?}");
    }

    #[test]
    fn test_physical_range_year_out_of_range() {
        let mut config = crate::config::AnalysisConfig::default();
        config.run.current_year = Some(1492);
        let (errors, _) = validate_physical_ranges(&config);
        assert!(errors.iter().any(|e| e.contains("run.current_year")));
    }

    #[test]
    fn test_synthetic_beyond_radius_warns() {
        let mut config = crate::config::AnalysisConfig::default();
        config.synthetic.max_distance_m = 2500.0;
        let (_, warnings) = validate_physical_ranges(&config);
        assert!(warnings.iter().any(|w| w.field == "synthetic.max_distance_m"));
    }
}
