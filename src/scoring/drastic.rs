//! Mocked DRASTIC aquifer vulnerability.
//!
//! A real DRASTIC index needs depth-to-water, recharge, soil and vadose
//! zone layers. Here the factor decays with distance to the nearest aquifer
//! and snaps to the standard five classes for reporting.

use crate::config::DrasticConfig;
use crate::types::DrasticClass;

/// Vulnerability factor for a well `distance_m` from the nearest aquifer.
///
/// Equals `max_factor` inside an aquifer and approaches `min_factor` far
/// from one.
pub fn drastic_factor(distance_m: f64, cfg: &DrasticConfig) -> f64 {
    let span = cfg.max_factor - cfg.min_factor;
    let raw = cfg.min_factor + span * (-distance_m.max(0.0) / cfg.decay_length_m).exp();
    raw.clamp(cfg.min_factor, cfg.max_factor)
}

/// Snap a factor to the nearest class anchor.
///
/// Factors further than the tolerance from every anchor report `Moderate`.
/// On an exact tie the more vulnerable class wins.
pub fn drastic_class(factor: f64, cfg: &DrasticConfig) -> DrasticClass {
    let mut best: Option<(f64, DrasticClass)> = None;
    for (anchor, class) in DrasticClass::ANCHORS {
        let gap = (factor - anchor).abs();
        if gap > cfg.class_tolerance + 1e-12 {
            continue;
        }
        match best {
            Some((best_gap, _)) if best_gap <= gap => {}
            _ => best = Some((gap, class)),
        }
    }
    best.map_or(DrasticClass::Moderate, |(_, class)| class)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> DrasticConfig {
        DrasticConfig::default()
    }

    #[test]
    fn test_factor_is_one_inside_aquifer() {
        assert!((drastic_factor(0.0, &cfg()) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_factor_decays_to_floor() {
        let at_decay = drastic_factor(2000.0, &cfg());
        assert!((at_decay - (0.2 + 0.8 * (-1.0f64).exp())).abs() < 1e-12);
        let far = drastic_factor(1.0e7, &cfg());
        assert!((far - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_factor_monotonic_non_increasing() {
        let mut prev = drastic_factor(0.0, &cfg());
        for step in 1..200 {
            let f = drastic_factor(f64::from(step) * 50.0, &cfg());
            assert!(f <= prev);
            assert!((0.2..=1.0).contains(&f));
            prev = f;
        }
    }

    #[test]
    fn test_class_snaps_to_nearest_anchor() {
        assert_eq!(drastic_class(1.0, &cfg()), DrasticClass::VeryHigh);
        assert_eq!(drastic_class(0.82, &cfg()), DrasticClass::High);
        assert_eq!(drastic_class(0.66, &cfg()), DrasticClass::Moderate);
        assert_eq!(drastic_class(0.41, &cfg()), DrasticClass::Low);
        assert_eq!(drastic_class(0.2, &cfg()), DrasticClass::VeryLow);
    }

    #[test]
    fn test_class_defaults_to_moderate_outside_tolerance() {
        let narrow = DrasticConfig {
            class_tolerance: 0.01,
            ..cfg()
        };
        assert_eq!(drastic_class(0.5, &narrow), DrasticClass::Moderate);
        assert_eq!(drastic_class(0.3, &narrow), DrasticClass::Moderate);
    }

    #[test]
    fn test_class_tie_prefers_more_vulnerable() {
        // 0.9 is equidistant from 1.0 and 0.8 in f64
        assert_eq!(1.0 - 0.9, 0.9 - 0.8);
        assert_eq!(drastic_class(0.9, &cfg()), DrasticClass::VeryHigh);
    }
}
