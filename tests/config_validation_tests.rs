//! Config Validation Tests
//!
//! Typo detection on unknown keys and range/consistency checks, exercised
//! through the public config API.

use orphan_well_risk::config::validation::{
    known_config_keys, suggest_correction, validate_physical_ranges, validate_unknown_keys,
};
use orphan_well_risk::config::{AnalysisConfig, ConfigError};

// ============================================================================
// Typo Detection
// ============================================================================

#[test]
fn typo_in_sigmoid_scale_warns_with_suggestion() {
    let toml_str = r#"
[leak]
sigmoid_scael = 7.5
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 1, "Expected exactly 1 warning");
    assert_eq!(
        warnings[0].suggestion.as_deref(),
        Some("leak.sigmoid_scale"),
        "Should suggest the correct spelling"
    );
}

#[test]
fn unrelated_key_warns_without_suggestion() {
    let warnings = validate_unknown_keys("[dashboard]\ntheme = \"dark\"\n");
    assert!(!warnings.is_empty());
    assert!(warnings.iter().all(|w| w.suggestion.is_none()));
}

#[test]
fn every_known_key_is_accepted() {
    let known = known_config_keys();
    for key in &known {
        assert_eq!(suggest_correction(key, &known).as_deref(), Some(*key));
    }
}

#[test]
fn shipped_config_has_no_unknown_keys() {
    let contents = std::fs::read_to_string(concat!(env!("CARGO_MANIFEST_DIR"), "/risk_config.toml"))
        .expect("risk_config.toml should exist at the crate root");
    let warnings = validate_unknown_keys(&contents);
    assert!(warnings.is_empty(), "Unexpected warnings: {warnings:?}");
    let (config, provenance) = AnalysisConfig::from_toml_str(&contents).unwrap();
    assert_eq!(config.run.random_seed, Some(42));
    assert!(provenance.is_user_set("drastic.fallback_factor"));
}

// ============================================================================
// Range Validation
// ============================================================================

#[test]
fn defaults_are_valid() {
    AnalysisConfig::default().validate().expect("defaults must validate");
    let (errors, warnings) = validate_physical_ranges(&AnalysisConfig::default());
    assert!(errors.is_empty() && warnings.is_empty());
}

#[test]
fn inverted_leak_rates_rejected() {
    let toml_str = r#"
[leak]
leak_rate_min_m3_day = 6.0
leak_rate_max_m3_day = 0.5
"#;
    match AnalysisConfig::from_toml_str(toml_str) {
        Err(ConfigError::Validation(errors)) => {
            assert!(errors.iter().any(|e| e.contains("leak_rate_min_m3_day")));
        }
        other => panic!("Expected validation error, got {other:?}"),
    }
}

#[test]
fn fallback_outside_drastic_range_rejected() {
    let mut config = AnalysisConfig::default();
    config.drastic.fallback_factor = 0.1;
    assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
}

#[test]
fn oversized_caps_warn_but_validate() {
    let mut config = AnalysisConfig::default();
    config.scoring.receptors.cap_points = 40.0;
    let (errors, warnings) = validate_physical_ranges(&config);
    assert!(errors.is_empty());
    assert!(warnings.iter().any(|w| w.message.contains("exceed 100")));
    assert!(config.validate().is_ok());
}

#[test]
fn custom_county_table_replaces_defaults() {
    let toml_str = r#"
[demand.counties.PAYNE]
annual_volume_m3 = 600000.0
domestic_wells = 2000
"#;
    let (config, _) = AnalysisConfig::from_toml_str(toml_str).unwrap();
    assert!(config.demand.county("payne").is_some());
    assert!(config.demand.county("ALFALFA").is_none());
}
