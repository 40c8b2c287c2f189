use crate::error::{Result, SueloError};
use crate::models::observation::{AdvancedInput, Coloration, LandUse, Odor};
use crate::models::risk::{AdvancedRiskResult, RiskFactor, RiskLevel};

/// Fixed penalty when free phase is observed
pub const FREE_PHASE_POINTS: u32 = 10;

/// Weighted score at which a site becomes Medium
pub const MEDIUM_THRESHOLD: f64 = 30.0;

/// Weighted score at which a site becomes High
pub const HIGH_THRESHOLD: f64 = 60.0;

/// Water-table points at or above which the table counts as shallow
const SHALLOW_WATER_TABLE_POINTS: u32 = 8;

/// Classify a weighted score. Intervals are closed-open: 30 is Medium and
/// 60 is High.
pub fn classify_weighted(weighted_score: f64) -> RiskLevel {
    match weighted_score {
        s if s < MEDIUM_THRESHOLD => RiskLevel::Low,
        s if s < HIGH_THRESHOLD => RiskLevel::Medium,
        _ => RiskLevel::High,
    }
}

fn land_use_factor(land_use: LandUse) -> RiskFactor {
    match land_use {
        LandUse::Conservation => RiskFactor::ConservationLandUse,
        LandUse::Residential => RiskFactor::ResidentialLandUse,
        LandUse::Industrial => RiskFactor::IndustrialLandUse,
    }
}

/// Score an advanced observation set.
///
/// Fails with `IncompleteInput` naming every missing scoring field; no
/// partial result is produced.
pub fn score_advanced(input: &AdvancedInput) -> Result<AdvancedRiskResult> {
    let (Some(odor), Some(coloration), Some(free_phase), Some(land_use), Some(water_table)) = (
        input.odor,
        input.coloration,
        input.free_phase,
        input.land_use,
        input.water_table_depth,
    ) else {
        return Err(SueloError::IncompleteInput { fields: input.missing_fields() });
    };

    let mut factors = Vec::new();

    let mut raw_score = odor.points();
    if odor == Odor::Severe {
        factors.push(RiskFactor::SevereOdor);
    }

    raw_score += coloration.points();
    if coloration == Coloration::ExtensiveDeep {
        factors.push(RiskFactor::ExtensiveColoration);
    }

    if free_phase {
        raw_score += FREE_PHASE_POINTS;
        factors.push(RiskFactor::FreePhase);
    }

    raw_score += water_table.points();
    if water_table.points() >= SHALLOW_WATER_TABLE_POINTS {
        factors.push(RiskFactor::ShallowWaterTable);
    }

    let weighted_score = f64::from(raw_score * land_use.multiplier());
    factors.push(land_use_factor(land_use));

    let level = classify_weighted(weighted_score);
    tracing::debug!(raw_score, weighted_score, %level, "Scored advanced observations");

    Ok(AdvancedRiskResult { raw_score, weighted_score, level, contributing_factors: factors })
}
