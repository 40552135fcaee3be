//! AI workload water equivalents.
//!
//! Illustrative only: translates a safeguarded volume into the cooling water
//! of common AI workloads for outreach material.

use crate::config::AiEquivalentConfig;
use crate::types::AiEquivalents;

use super::round_to;

/// Convert an annual volume into training runs, queries and cluster hours.
///
/// The headline comparison picks the first that reads naturally: whole
/// training runs, then millions of queries, then years of cluster cooling,
/// then raw cluster hours.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn ai_equivalents(water_m3_yr: f64, cfg: &AiEquivalentConfig) -> AiEquivalents {
    if water_m3_yr <= 0.0 || !water_m3_yr.is_finite() {
        return AiEquivalents {
            training_run_equivalent: 0.0,
            queries_per_year: 0,
            gpu_cluster_hours: 0,
            description: "No water safeguarded".to_string(),
            primary_comparison: "No water safeguarded (no nearby domestic wells)".to_string(),
        };
    }

    let training = round_to(water_m3_yr / cfg.training_run_m3, 2);
    let queries = (water_m3_yr / cfg.query_m3).floor() as u64;
    let hours = (water_m3_yr / cfg.cluster_hour_m3).floor() as u64;

    let primary_comparison = if training >= 1.0 {
        format!("≈ {training:.1}× large-model training water use")
    } else if queries as f64 >= cfg.query_threshold {
        format!("≈ {:.1}M model queries/year", queries as f64 / 1_000_000.0)
    } else if hours as f64 >= cfg.hours_per_year {
        format!(
            "≈ {:.1} years of GPU cluster cooling",
            hours as f64 / cfg.hours_per_year
        )
    } else {
        format!("≈ {} hours of GPU cluster cooling", thousands(hours))
    };

    AiEquivalents {
        training_run_equivalent: training,
        queries_per_year: queries,
        gpu_cluster_hours: hours,
        description: format!("{water_m3_yr:.0} m³/year water safeguarded"),
        primary_comparison,
    }
}

/// `1234567` -> `"1,234,567"`
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> AiEquivalentConfig {
        AiEquivalentConfig::default()
    }

    #[test]
    fn test_zero_water() {
        let eq = ai_equivalents(0.0, &cfg());
        assert_eq!(eq.queries_per_year, 0);
        assert_eq!(eq.gpu_cluster_hours, 0);
        assert!(eq.primary_comparison.starts_with("No water safeguarded"));
    }

    #[test]
    fn test_training_comparison_wins_first() {
        let eq = ai_equivalents(5000.0, &cfg());
        assert_eq!(eq.training_run_equivalent, 2.0);
        assert!(eq.primary_comparison.contains("2.0× large-model training"));
    }

    #[test]
    fn test_query_comparison() {
        // 1500 m³ -> 0.6 runs, 1.25M queries
        let eq = ai_equivalents(1500.0, &cfg());
        assert_eq!(eq.training_run_equivalent, 0.6);
        assert_eq!(eq.queries_per_year, 1_250_000);
        assert!(eq.primary_comparison.contains("M model queries/year"), "{}", eq.primary_comparison);
    }

    #[test]
    fn test_hours_comparison() {
        // 600 m³ -> 500k queries, 12000 hours (> 1 year)
        let eq = ai_equivalents(600.0, &cfg());
        assert_eq!(eq.gpu_cluster_hours, 12_000);
        assert!(eq.primary_comparison.contains("years of GPU cluster cooling"));
    }

    #[test]
    fn test_raw_hours_comparison() {
        let eq = ai_equivalents(100.0, &cfg());
        assert_eq!(eq.gpu_cluster_hours, 2000);
        assert_eq!(eq.primary_comparison, "≈ 2,000 hours of GPU cluster cooling");
    }

    #[test]
    fn test_thousands_separator() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(1_234_567), "1,234,567");
    }
}
