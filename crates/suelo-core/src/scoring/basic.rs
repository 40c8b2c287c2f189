use crate::error::{Result, SueloError};
use crate::models::observation::BasicInput;
use crate::models::risk::{BasicRiskResult, RiskFactor, RiskLevel};
use crate::models::{SoilColor, VisibleResidue};

/// Theoretical maximum of the basic scale. Scores can exceed it (the area
/// bonus is not part of the nominal scale) and still classify as High.
pub const MAX_SCORE: u32 = 120;

pub const MEDIUM_THRESHOLD: u32 = 30;

pub const HIGH_THRESHOLD: u32 = 60;

/// Bonus for the affected surface in m². Only the highest applicable tier
/// counts.
pub fn area_bonus(area_m2: f64) -> u32 {
    match area_m2 {
        a if a > 1000.0 => 30,
        a if a > 100.0 => 20,
        a if a > 10.0 => 10,
        _ => 0,
    }
}

pub fn classify_basic(score: u32) -> RiskLevel {
    match score {
        s if s >= HIGH_THRESHOLD => RiskLevel::High,
        s if s >= MEDIUM_THRESHOLD => RiskLevel::Medium,
        _ => RiskLevel::Low,
    }
}

fn area_factor(bonus: u32) -> Option<RiskFactor> {
    match bonus {
        30 => Some(RiskFactor::LargeAffectedArea),
        20 => Some(RiskFactor::ModerateAffectedArea),
        10 => Some(RiskFactor::SmallAffectedArea),
        _ => None,
    }
}

/// Score a basic observation set
pub fn score_basic(input: &BasicInput) -> Result<BasicRiskResult> {
    let missing = input.missing_fields();
    let (Some(odor), Some(color), Some(residue), Some(water_body), Some(area)) =
        (input.odor, input.color, input.residue, input.water_body, input.affected_area_m2)
    else {
        return Err(SueloError::IncompleteInput { fields: missing });
    };
    if !missing.is_empty() {
        return Err(SueloError::IncompleteInput { fields: missing });
    }

    let mut factors = Vec::new();

    if odor.points() > 0 {
        factors.push(RiskFactor::OdorDetected);
    }
    if color.points() > 10 {
        factors.push(match color {
            SoilColor::Iridescent => RiskFactor::IridescentSoil,
            _ => RiskFactor::DarkStainedSoil,
        });
    }
    if residue.points() > 10 {
        factors.push(match residue {
            VisibleResidue::HydrocarbonResidue => RiskFactor::HydrocarbonResidue,
            _ => RiskFactor::DeadVegetation,
        });
    }
    if water_body.points() >= 25 {
        factors.push(RiskFactor::CriticalWaterBodyProximity);
    }

    let bonus = area_bonus(area);
    if let Some(factor) = area_factor(bonus) {
        factors.push(factor);
    }

    let raw_score = odor.points() + color.points() + residue.points() + water_body.points() + bonus;
    let level = classify_basic(raw_score);
    tracing::debug!(raw_score, %level, "Scored basic observations");

    Ok(BasicRiskResult { raw_score, level, contributing_factors: factors })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NearbyWaterBody, OdorDetected};

    fn input(
        odor: OdorDetected,
        color: SoilColor,
        residue: VisibleResidue,
        water_body: NearbyWaterBody,
        area: f64,
    ) -> BasicInput {
        BasicInput {
            odor: Some(odor),
            color: Some(color),
            residue: Some(residue),
            water_body: Some(water_body),
            affected_area_m2: Some(area),
            notes: None,
        }
    }

    #[test]
    fn test_area_bonus_tiers() {
        assert_eq!(area_bonus(0.0), 0);
        assert_eq!(area_bonus(10.0), 0);
        assert_eq!(area_bonus(10.5), 10);
        assert_eq!(area_bonus(100.0), 10);
        assert_eq!(area_bonus(101.0), 20);
        assert_eq!(area_bonus(1000.0), 20);
        assert_eq!(area_bonus(1500.0), 30);
    }

    #[test]
    fn test_threshold_boundaries() {
        assert_eq!(classify_basic(29), RiskLevel::Low);
        assert_eq!(classify_basic(30), RiskLevel::Medium);
        assert_eq!(classify_basic(59), RiskLevel::Medium);
        assert_eq!(classify_basic(60), RiskLevel::High);
        assert_eq!(classify_basic(MAX_SCORE + 25), RiskLevel::High);
    }

    #[test]
    fn test_clean_site() {
        let result = score_basic(&input(
            OdorDetected::No,
            SoilColor::Natural,
            VisibleResidue::None,
            NearbyWaterBody::No,
            5.0,
        ))
        .unwrap();
        assert_eq!(result.raw_score, 0);
        assert_eq!(result.level, RiskLevel::Low);
        assert!(result.contributing_factors.is_empty());
    }

    #[test]
    fn test_everything_observed() {
        let result = score_basic(&input(
            OdorDetected::Yes,
            SoilColor::Iridescent,
            VisibleResidue::HydrocarbonResidue,
            NearbyWaterBody::Under50m,
            1500.0,
        ))
        .unwrap();
        assert_eq!(result.raw_score, 145);
        assert_eq!(result.level, RiskLevel::High);
        assert_eq!(
            result.contributing_factors,
            vec![
                RiskFactor::OdorDetected,
                RiskFactor::IridescentSoil,
                RiskFactor::HydrocarbonResidue,
                RiskFactor::CriticalWaterBodyProximity,
                RiskFactor::LargeAffectedArea,
            ]
        );
    }

    #[test]
    fn test_low_point_observations_not_flagged() {
        // trash (5) and a distant water body (10) score but are not factors
        let result = score_basic(&input(
            OdorDetected::No,
            SoilColor::Natural,
            VisibleResidue::InorganicTrash,
            NearbyWaterBody::Over500m,
            50.0,
        ))
        .unwrap();
        assert_eq!(result.raw_score, 25);
        assert_eq!(result.level, RiskLevel::Low);
        assert_eq!(result.contributing_factors, vec![RiskFactor::SmallAffectedArea]);
    }

    #[test]
    fn test_dark_stain_and_dead_vegetation() {
        let result = score_basic(&input(
            OdorDetected::No,
            SoilColor::DarkStained,
            VisibleResidue::DeadVegetation,
            NearbyWaterBody::From50To500m,
            0.0,
        ))
        .unwrap();
        assert_eq!(result.raw_score, 55);
        assert_eq!(result.level, RiskLevel::Medium);
        assert_eq!(
            result.contributing_factors,
            vec![
                RiskFactor::DarkStainedSoil,
                RiskFactor::DeadVegetation,
                RiskFactor::CriticalWaterBodyProximity,
            ]
        );
    }

    #[test]
    fn test_missing_area_rejected() {
        let mut partial = input(
            OdorDetected::Yes,
            SoilColor::Natural,
            VisibleResidue::None,
            NearbyWaterBody::No,
            0.0,
        );
        partial.affected_area_m2 = None;
        partial.residue = None;

        match score_basic(&partial) {
            Err(SueloError::IncompleteInput { fields }) => {
                assert_eq!(fields, vec!["residue", "affected_area_m2"]);
            }
            other => panic!("expected incomplete input, got {other:?}"),
        }
    }

    #[test]
    fn test_nan_area_rejected() {
        let partial = input(
            OdorDetected::Yes,
            SoilColor::Natural,
            VisibleResidue::None,
            NearbyWaterBody::No,
            f64::NAN,
        );
        assert!(matches!(score_basic(&partial), Err(SueloError::IncompleteInput { .. })));
    }
}
