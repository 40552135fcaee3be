//! Orphan Well Groundwater Risk Screening
//!
//! Scores Oklahoma orphan oil and gas wells for groundwater contamination
//! risk and estimates the domestic water each plugging would safeguard.
//!
//! ## Architecture
//!
//! - **ingest**: well table loading and WGS84 → Web Mercator projection
//! - **gis**: aquifer/flowline shapefiles, archive cache, synthetic domestic wells
//! - **scoring**: five weighted sub-scores, DRASTIC, demand, leak probability
//! - **pipeline**: run orchestration and the reference self-check
//! - **report**: summary CSV, per-well JSON and Markdown dossiers

pub mod config;
pub mod gis;
pub mod ingest;
pub mod pipeline;
pub mod report;
pub mod scoring;
pub mod types;

pub use config::AnalysisConfig;
pub use pipeline::{
    reference_self_check, run_full_analysis, run_risk_analysis, AnalysisError, AnalysisOutput,
    RunOptions,
};
pub use types::{DomesticWell, RiskTier, WellRecord, WellRiskRecord};
