//! Leak probability and the volumes derived from it.

use statrs::function::logistic::logistic;
use statrs::statistics::Statistics;

use crate::config::{ConversionConfig, LeakConfig};

/// Base leak probability for a final score, on a logistic curve centred at
/// `sigmoid_center`.
pub fn score_sigmoid(final_score: f64, cfg: &LeakConfig) -> f64 {
    logistic((final_score - cfg.sigmoid_center) / cfg.sigmoid_scale)
}

/// `P(leak) = sigmoid(score) * DRASTIC factor`, in [0, 1].
pub fn leak_probability(final_score: f64, drastic_factor: f64, cfg: &LeakConfig) -> f64 {
    (score_sigmoid(final_score, cfg) * drastic_factor).clamp(0.0, 1.0)
}

/// Expected domestic water volume protected by plugging the well (m³/yr).
pub fn water_safeguarded(demand_m3: f64, p_leak: f64) -> f64 {
    demand_m3 * p_leak
}

pub fn to_acre_feet(volume_m3: f64, cfg: &ConversionConfig) -> f64 {
    volume_m3 / cfg.m3_per_acre_foot
}

/// Expected contaminant volume kept out of the aquifer (m³/yr), using the
/// midpoint of the configured leak-rate range.
pub fn contaminant_load_avoided(p_leak: f64, cfg: &LeakConfig) -> f64 {
    let mean_rate = [cfg.leak_rate_min_m3_day, cfg.leak_rate_max_m3_day].iter().mean();
    mean_rate * cfg.days_per_year * p_leak
}
