//! Risk scoring
//!
//! - `components`: the five weighted sub-scores and their geometry queries
//! - `drastic`: mocked aquifer vulnerability factor and class
//! - `demand`: distance-weighted domestic water demand
//! - `probability`: logistic leak probability and derived volumes
//! - `equivalents`: AI workload water comparisons
//! - `aggregate`: combines the above into one `WellRiskRecord`

pub mod aggregate;
pub mod components;
pub mod demand;
pub mod drastic;
pub mod equivalents;
pub mod probability;

pub use aggregate::{classify_tier, final_score, score_well};
pub use components::GeometryError;

/// Round to `dp` decimal places, half away from zero.
pub fn round_to(value: f64, dp: i32) -> f64 {
    let scale = 10f64.powi(dp);
    (value * scale).round() / scale
}
