//! End-to-end scoring scenarios and scoring properties

use proptest::prelude::*;
use suelo_core::models::{
    AdvancedInput, BasicInput, Coloration, LandUse, NearbyWaterBody, Odor, OdorDetected,
    ReportBody, RiskFactor, RiskLevel, SoilColor, VisibleResidue, WaterTableDepth,
};
use suelo_core::scoring::{classify_weighted, score_advanced, score_basic};
use suelo_core::SueloError;

#[test]
fn test_severe_residential_site_is_high() {
    let input = AdvancedInput {
        odor: Some("severe".parse().unwrap()),
        coloration: Some("extensive_deep".parse().unwrap()),
        free_phase: Some(true),
        land_use: Some("residential".parse().unwrap()),
        water_table_depth: Some("<5m".parse().unwrap()),
        ..Default::default()
    };

    let result = score_advanced(&input).unwrap();

    assert_eq!(result.raw_score, 27);
    assert_eq!(result.weighted_score, 81.0);
    assert_eq!(result.level, RiskLevel::High);

    let descriptions: Vec<String> =
        result.contributing_factors.iter().map(|f| f.to_string()).collect();
    for expected in [
        "severe odor",
        "extensive coloration",
        "free phase",
        "shallow water table",
        "residential land use",
    ] {
        assert!(
            descriptions.iter().any(|d| d.contains(expected)),
            "missing factor '{expected}' in {descriptions:?}"
        );
    }
}

#[test]
fn test_clean_basic_site_is_low() {
    let input = BasicInput {
        odor: Some(OdorDetected::No),
        color: Some(SoilColor::Natural),
        residue: Some(VisibleResidue::None),
        water_body: Some(NearbyWaterBody::No),
        affected_area_m2: Some(5.0),
        notes: None,
    };

    let result = score_basic(&input).unwrap();
    assert_eq!(result.raw_score, 0);
    assert_eq!(result.level, RiskLevel::Low);
    assert!(result.contributing_factors.is_empty());
}

#[test]
fn test_worst_basic_site_exceeds_scale_and_stays_high() {
    let input = BasicInput {
        odor: Some("yes".parse().unwrap()),
        color: Some("iridescent".parse().unwrap()),
        residue: Some("hydrocarbon_residue".parse().unwrap()),
        water_body: Some("<50m".parse().unwrap()),
        affected_area_m2: Some(1500.0),
        notes: Some("strong smell near the pipeline".to_string()),
    };

    let result = score_basic(&input).unwrap();
    assert_eq!(result.raw_score, 145);
    assert_eq!(result.level, RiskLevel::High);
    assert_eq!(result.contributing_factors.len(), 5);
    assert_eq!(result.contributing_factors.last(), Some(&RiskFactor::LargeAffectedArea));
    assert_eq!(RiskFactor::LargeAffectedArea.to_string(), "large affected area");
}

#[test]
fn test_invalid_value_surfaces_before_scoring() {
    let err = "shallow".parse::<WaterTableDepth>().unwrap_err();
    assert!(matches!(err, SueloError::InvalidEnumValue { .. }));
}

#[test]
fn test_report_body_recomputes_same_level() {
    let body = ReportBody::assess_advanced(AdvancedInput {
        odor: Some(Odor::Mild),
        coloration: Some(Coloration::Superficial),
        free_phase: Some(false),
        land_use: Some(LandUse::Conservation),
        water_table_depth: Some(WaterTableDepth::From5To10m),
        ..Default::default()
    })
    .unwrap();

    // (3 + 2 + 5) * 4 = 40
    assert_eq!(body.level(), RiskLevel::Medium);
    assert!(body.verify_result().unwrap());
}

fn advanced_input_strategy() -> impl Strategy<Value = AdvancedInput> {
    (
        prop::sample::select(Odor::ALL.to_vec()),
        prop::sample::select(Coloration::ALL.to_vec()),
        any::<bool>(),
        prop::sample::select(LandUse::ALL.to_vec()),
        prop::sample::select(WaterTableDepth::ALL.to_vec()),
    )
        .prop_map(|(odor, coloration, free_phase, land_use, depth)| AdvancedInput {
            odor: Some(odor),
            coloration: Some(coloration),
            free_phase: Some(free_phase),
            land_use: Some(land_use),
            water_table_depth: Some(depth),
            ..Default::default()
        })
}

proptest! {
    #[test]
    fn prop_advanced_scoring_is_deterministic(input in advanced_input_strategy()) {
        let first = score_advanced(&input).unwrap();
        let second = score_advanced(&input).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_weighted_score_is_raw_times_multiplier(input in advanced_input_strategy()) {
        let result = score_advanced(&input).unwrap();
        let multiplier = input.land_use.unwrap().multiplier();
        prop_assert_eq!(result.weighted_score, f64::from(result.raw_score * multiplier));
        prop_assert_eq!(result.level, classify_weighted(result.weighted_score));
    }

    #[test]
    fn prop_land_use_annotation_always_last(input in advanced_input_strategy()) {
        let result = score_advanced(&input).unwrap();
        let last = *result.contributing_factors.last().unwrap();
        prop_assert!(matches!(
            last,
            RiskFactor::ConservationLandUse
                | RiskFactor::ResidentialLandUse
                | RiskFactor::IndustrialLandUse
        ));
    }

    #[test]
    fn prop_weighted_classification_is_monotonic(a in 0.0f64..300.0, b in 0.0f64..300.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(classify_weighted(lo) <= classify_weighted(hi));
    }

    #[test]
    fn prop_basic_area_never_lowers_level(area in 0.0f64..5000.0, extra in 0.0f64..5000.0) {
        let base = BasicInput {
            odor: Some(OdorDetected::Yes),
            color: Some(SoilColor::Natural),
            residue: Some(VisibleResidue::None),
            water_body: Some(NearbyWaterBody::No),
            affected_area_m2: Some(area),
            notes: None,
        };
        let larger = BasicInput { affected_area_m2: Some(area + extra), ..base.clone() };
        let small = score_basic(&base).unwrap();
        let large = score_basic(&larger).unwrap();
        prop_assert!(small.raw_score <= large.raw_score);
        prop_assert!(small.level <= large.level);
    }
}
