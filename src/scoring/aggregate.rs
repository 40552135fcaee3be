//! Per-well aggregation: sub-scores to final score, tier, leak probability
//! and water safeguarded.
//!
//! A failed geometry query never aborts the well. The affected part scores
//! 0, the diagnostic field says why, and a `DataGap` is recorded.

use crate::config::{AnalysisConfig, TierConfig};
use crate::gis::GisLayers;
use crate::types::{AquiferCheck, ComponentScores, DataGap, RiskTier, WellRecord, WellRiskRecord};

use super::components::{
    aquifer_intersects, aquifer_score, casing_age_score, nearest_aquifer_distance,
    nearest_flowline_distance, receptors_score, spill_score, surface_water_score,
};
use super::demand::{distance_weighted_demand, per_well_use};
use super::drastic::{drastic_class, drastic_factor};
use super::equivalents::ai_equivalents;
use super::probability::{contaminant_load_avoided, leak_probability, to_acre_feet, water_safeguarded};
use super::round_to;

/// Half-open tier bands: `[high_min, ∞)`, `[moderate_min, high_min)`, below.
pub fn classify_tier(final_score: f64, tiers: &TierConfig) -> RiskTier {
    if final_score >= tiers.high_min {
        RiskTier::High
    } else if final_score >= tiers.moderate_min {
        RiskTier::Moderate
    } else {
        RiskTier::Low
    }
}

/// Final score: the unclipped sub-score sum rounded half away from zero.
pub fn final_score(components: &ComponentScores) -> f64 {
    components.total().round()
}

/// Score one well against the loaded layers.
pub fn score_well(
    well: &WellRecord,
    layers: &GisLayers,
    config: &AnalysisConfig,
    current_year: i32,
) -> WellRiskRecord {
    let mut gaps: Vec<DataGap> = Vec::new();
    let s = &config.scoring;

    // --- Aquifer ---
    let (live_aquifer_check, intersects) = match aquifer_intersects(&well.location, &layers.aquifers) {
        Ok(true) => (AquiferCheck::Intersect, Some(true)),
        Ok(false) => (AquiferCheck::NoIntersect, Some(false)),
        Err(e) => {
            tracing::warn!(api = well.api, error = %e, "Aquifer intersection failed");
            gaps.push(DataGap::AquiferIntersection { reason: e.to_string() });
            (AquiferCheck::Error, None)
        }
    };
    let aquifer_distance_m = match nearest_aquifer_distance(&well.location, &layers.aquifers) {
        Ok(d) => Some(d),
        Err(e) => {
            tracing::warn!(api = well.api, error = %e, "Aquifer distance failed");
            gaps.push(DataGap::AquiferDistance { reason: e.to_string() });
            None
        }
    };

    // --- Surface water ---
    let surface_distance = match nearest_flowline_distance(&well.location, &layers.flowlines) {
        Ok(d) => Some(d),
        Err(e) => {
            tracing::warn!(api = well.api, error = %e, "Surface water distance failed");
            gaps.push(DataGap::SurfaceWaterDistance { reason: e.to_string() });
            None
        }
    };

    // --- Attribute gaps ---
    if well.completion_year.is_none() {
        gaps.push(DataGap::MissingField { field: "completion_year".to_string() });
    }
    if well.surface_casing_ft.is_none() {
        gaps.push(DataGap::MissingField { field: "surface_casing_ft".to_string() });
    }
    if well.domestic_wells_1km.is_none() {
        gaps.push(DataGap::MissingField { field: "domestic_wells_1km".to_string() });
    }

    let components = ComponentScores {
        aquifer_score: aquifer_score(intersects, aquifer_distance_m, s),
        surface_water_score: surface_water_score(surface_distance, s),
        casing_age_score: casing_age_score(well.completion_year, well.surface_casing_ft, current_year, s),
        spill_score: spill_score(s),
        receptors_score: receptors_score(well.domestic_wells_1km, s),
    };
    let raw_score = components.total();
    let final_score = final_score(&components);
    let risk_tier = classify_tier(final_score, &config.tiers);

    // --- DRASTIC ---
    let drastic = aquifer_distance_m.map_or(config.drastic.fallback_factor, |d| drastic_factor(d, &config.drastic));
    let class = drastic_class(drastic, &config.drastic);

    // --- Demand and leak ---
    let use_per_well = per_well_use(&well.county, &config.demand);
    let (demand, nearby) = distance_weighted_demand(
        &well.location,
        &layers.domestic_wells,
        use_per_well,
        config.demand.radius_m,
    );
    let p_leak = leak_probability(final_score, drastic, &config.leak);
    let water_m3 = water_safeguarded(demand, p_leak);

    tracing::debug!(
        api = well.api,
        score = final_score,
        tier = %risk_tier,
        drastic,
        p_leak,
        water_m3,
        "Well scored"
    );

    WellRiskRecord {
        api: well.api,
        well_name: well.name.clone(),
        county: well.county.clone(),
        longitude: well.longitude,
        latitude: well.latitude,
        completion_year: well.completion_year,
        surface_casing_ft: well.surface_casing_ft,
        domestic_wells_1km: well.domestic_wells_1km,
        components,
        raw_score,
        final_score,
        risk_tier,
        live_aquifer_check,
        aquifer_distance_m,
        surface_water_dist_m: surface_distance.map(|d| round_to(d, 2)),
        drastic_factor: drastic,
        drastic_class: class,
        nearby_domestic_wells: nearby,
        domestic_demand_wtd_m3_yr: demand,
        p_leak,
        water_safeguarded_m3_yr: water_m3,
        water_safeguarded_acft_yr: to_acre_feet(water_m3, &config.conversion),
        contaminant_load_avoided_m3_yr: contaminant_load_avoided(p_leak, &config.leak),
        ai_equivalents: ai_equivalents(water_m3, &config.ai_equivalents),
        data_gap_flag: !gaps.is_empty(),
        data_gaps: gaps,
    }
}
