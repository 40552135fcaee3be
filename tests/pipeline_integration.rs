//! Pipeline integration tests
//!
//! End-to-end runs over small in-memory layers and shapefiles written to a
//! temp directory. No network access: the full run is always offline.

use std::path::Path;

use geo::{line_string, polygon};
use orphan_well_risk::config::{defaults, AnalysisConfig, SourceCrs};
use orphan_well_risk::gis::{self, GisLayers};
use orphan_well_risk::ingest::parse_wells;
use orphan_well_risk::pipeline::{run_full_analysis, run_risk_analysis, AnalysisError, RunOptions};
use shapefile::{Point as ShpPoint, Polygon as ShpPolygon, PolygonRing, Polyline as ShpPolyline};

const WELLS_CSV: &str = "\
API,WELL_NAME,SH_LON,SH_LAT,COUNTY,completion_year,surface_casing_ft,domestic_wells_1km
3500320743,SCHNITZER 1-22,-98.3412,36.7318,ALFALFA,1982,857,4
3506121229,BLAKE 1-9,-95.1187,35.2064,HASKELL,1998,416,6
3508320686,WILSON 2,-97.4395,35.8921,LOGAN,1977,435,
";

/// Aquifer covering the Alfalfa well (WGS84).
fn aquifer_shapes() -> Vec<ShpPolygon> {
    vec![ShpPolygon::new(PolygonRing::Outer(vec![
        ShpPoint::new(-98.40, 36.70),
        ShpPoint::new(-98.40, 36.76),
        ShpPoint::new(-98.30, 36.76),
        ShpPoint::new(-98.30, 36.70),
        ShpPoint::new(-98.40, 36.70),
    ]))]
}

/// Creek near the Logan well in the first part, an unrelated segment in
/// the second (WGS84).
fn flowline_shapes(part: usize) -> Vec<ShpPolyline> {
    if part == 0 {
        vec![ShpPolyline::new(vec![ShpPoint::new(-97.45, 35.88), ShpPoint::new(-97.43, 35.90)])]
    } else {
        vec![ShpPolyline::new(vec![ShpPoint::new(-96.0, 34.0), ShpPoint::new(-96.1, 34.1)])]
    }
}

fn in_memory_layers() -> GisLayers {
    let wells = parse_wells(WELLS_CSV.as_bytes(), "inline").unwrap();
    let alfalfa = wells[0].location;
    let logan = wells[2].location;
    GisLayers::new(
        vec![polygon![
            (x: alfalfa.x() - 500.0, y: alfalfa.y() - 500.0),
            (x: alfalfa.x() + 500.0, y: alfalfa.y() - 500.0),
            (x: alfalfa.x() + 500.0, y: alfalfa.y() + 500.0),
            (x: alfalfa.x() - 500.0, y: alfalfa.y() + 500.0),
        ]],
        vec![line_string![(x: logan.x() - 1000.0, y: logan.y() + 300.0), (x: logan.x() + 1000.0, y: logan.y() + 300.0)]],
    )
}

fn write_layers(data_dir: &Path, config: &AnalysisConfig) {
    let aq_path = &config.data.aquifers.shapefile_paths(data_dir)[0];
    std::fs::create_dir_all(aq_path.parent().unwrap()).unwrap();
    {
        let mut writer = shapefile::ShapeWriter::from_path(aq_path).unwrap();
        writer.write_shapes(&aquifer_shapes()).unwrap();
    }

    let flow_paths = config.data.flowlines.shapefile_paths(data_dir);
    for (i, path) in flow_paths.iter().enumerate() {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        let shapes = flowline_shapes(i);
        let mut writer = shapefile::ShapeWriter::from_path(path).unwrap();
        writer.write_shapes(&shapes).unwrap();
    }
}

fn offline_config(root: &Path) -> AnalysisConfig {
    let mut config = AnalysisConfig::default();
    config.run.current_year = Some(2025);
    config.data.data_dir = root.join("data");
    config.data.output_dir = root.join("output");
    config.data.wells_csv = root.join("wells.csv");
    config.data.aquifers.crs = SourceCrs::Wgs84;
    config.data.flowlines.crs = SourceCrs::Wgs84;
    std::fs::write(&config.data.wells_csv, WELLS_CSV).unwrap();
    config
}

#[test]
fn same_seed_same_records() {
    let mut config = AnalysisConfig::default();
    config.run.current_year = Some(2025);
    let wells = parse_wells(WELLS_CSV.as_bytes(), "inline").unwrap();

    let mut layers_a = in_memory_layers();
    let (mut rng_a, _) = gis::seeded_rng(Some(2024));
    let a = run_risk_analysis(&wells, &mut layers_a, &config, &mut rng_a).unwrap();

    let mut layers_b = in_memory_layers();
    let (mut rng_b, _) = gis::seeded_rng(Some(2024));
    let b = run_risk_analysis(&wells, &mut layers_b, &config, &mut rng_b).unwrap();

    assert_eq!(a.records, b.records);
    assert_eq!(a.records.len(), 3);
}

#[test]
fn records_honour_core_invariants() {
    let mut config = AnalysisConfig::default();
    config.run.current_year = Some(2025);
    let wells = parse_wells(WELLS_CSV.as_bytes(), "inline").unwrap();
    let mut layers = in_memory_layers();
    let (mut rng, _) = gis::seeded_rng(Some(5));
    let out = run_risk_analysis(&wells, &mut layers, &config, &mut rng).unwrap();

    for r in &out.records {
        assert_eq!(r.final_score, r.components.total().round());
        assert!((0.2..=1.0).contains(&r.drastic_factor));
        assert!((0.0..=1.0).contains(&r.p_leak));
        assert!((r.water_safeguarded_m3_yr - r.domestic_demand_wtd_m3_yr * r.p_leak).abs() < 1e-9);
        assert!((r.water_safeguarded_acft_yr * 1233.5 - r.water_safeguarded_m3_yr).abs() < 1e-6);
        assert_eq!(r.data_gap_flag, !r.data_gaps.is_empty());
    }

    // Alfalfa well sits inside the aquifer
    let alfalfa = out.record(3_500_320_743).unwrap();
    assert_eq!(alfalfa.aquifer_distance_m, Some(0.0));
    assert!((alfalfa.drastic_factor - 1.0).abs() < 1e-12);
    assert!(alfalfa.nearby_domestic_wells >= 4);

    // Logan well has no domestic count: flagged, no receptors
    let logan = out.record(3_508_320_686).unwrap();
    assert!(logan.data_gap_flag);
    assert_eq!(logan.components.receptors_score, 0.0);
    assert!((logan.surface_water_dist_m.unwrap() - 300.0).abs() < 0.01);
}

#[tokio::test]
async fn offline_run_from_shapefiles_writes_outputs() {
    let tmp = tempfile::tempdir().unwrap();
    let config = offline_config(tmp.path());
    write_layers(&config.data.data_dir, &config);

    let options = RunOptions {
        offline: true,
        seed: Some(11),
        write_dossiers: true,
    };
    let summary = run_full_analysis(&config, &options).await.unwrap();

    assert_eq!(summary.seed, 11);
    assert_eq!(summary.output.records.len(), 3);
    assert_eq!(summary.files_written.len(), 5);

    let csv = std::fs::read_to_string(config.data.output_dir.join(defaults::SUMMARY_CSV_FILE)).unwrap();
    assert_eq!(csv.lines().count(), 4);
    assert!(csv.starts_with("API,WELL_NAME,COUNTY,final_score,risk_tier"));

    let json: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(config.data.output_dir.join(defaults::WELL_METRICS_JSON_FILE)).unwrap(),
    )
    .unwrap();
    assert_eq!(json["3500320743"]["live_aquifer_check"], "Intersect");
    assert_eq!(json["3506121229"]["live_aquifer_check"], "No Intersect");

    assert!(config.data.output_dir.join("3506121229_dossier.md").exists());
}

#[tokio::test]
async fn missing_shapefile_aborts_without_outputs() {
    let tmp = tempfile::tempdir().unwrap();
    let config = offline_config(tmp.path());
    // No layers written

    let options = RunOptions {
        offline: true,
        seed: Some(1),
        write_dossiers: true,
    };
    let result = run_full_analysis(&config, &options).await;

    assert!(matches!(result, Err(AnalysisError::Layer(_))));
    assert!(!config.data.output_dir.exists(), "no output should be written");
}

#[tokio::test]
async fn bad_well_table_aborts_without_outputs() {
    let tmp = tempfile::tempdir().unwrap();
    let config = offline_config(tmp.path());
    write_layers(&config.data.data_dir, &config);
    std::fs::write(&config.data.wells_csv, "API,WELL_NAME\n1,A\n").unwrap();

    let options = RunOptions {
        offline: true,
        seed: Some(1),
        write_dossiers: false,
    };
    let result = run_full_analysis(&config, &options).await;

    assert!(matches!(result, Err(AnalysisError::Ingest(_))));
    assert!(!config.data.output_dir.exists());
}
