//! Assess command implementation

use crate::cli::{AdvancedArgs, AssessArgs, AssessScheme, BasicArgs, SiteArgs};
use crate::errors;
use crate::output::{styled_level, OutputWriter};
use crate::output_types::AssessOutput;
use anyhow::Result;
use suelo_core::models::{AdvancedInput, BasicInput, Coordinates, ReportBody, ReportId, SiteData};
use suelo_store::ReportStore;

pub async fn execute(args: AssessArgs, store: &ReportStore, output: &OutputWriter) -> Result<()> {
    let (scheme, body, site) = match args.scheme {
        AssessScheme::Advanced(args) => {
            let (input, site) = advanced_input(args);
            let body = ReportBody::assess_advanced(input)
                .map_err(|e| errors::from_suelo("advanced", e))?;
            ("advanced", body, site)
        }
        AssessScheme::Basic(args) => {
            let (input, site) = basic_input(args);
            let body =
                ReportBody::assess_basic(input).map_err(|e| errors::from_suelo("basic", e))?;
            ("basic", body, site)
        }
    };

    let site_data = site_data(&site).map_err(|e| errors::from_suelo(scheme, e))?;

    let report_id = if site.save {
        let report = store
            .create_report(site_data, body.clone())
            .await
            .map_err(|e| errors::from_suelo(scheme, e))?;
        Some(report.id)
    } else {
        None
    };

    let result = assess_output(&body, report_id);

    if output.is_json() {
        output.result(result)?;
        return Ok(());
    }

    output.section(format!("Assessment ({})", result.kind));
    output.kv("Raw score", result.raw_score);
    if let Some(weighted) = result.weighted_score {
        output.kv("Weighted score", weighted);
    }
    output.kv("Risk level", styled_level(result.level));

    output.section("Contributing factors");
    if result.contributing_factors.is_empty() {
        output.bullet("none");
    }
    for factor in &result.contributing_factors {
        output.bullet(factor);
    }

    output.section("Recommendations");
    for recommendation in &result.recommendations {
        output.bullet(recommendation);
    }
    println!();

    match result.report_id {
        Some(id) => output.success(format!("Saved report {}", id)),
        None => output.info("Not saved (pass --save to keep it)"),
    }

    Ok(())
}

fn advanced_input(args: AdvancedArgs) -> (AdvancedInput, SiteArgs) {
    let input = AdvancedInput {
        odor: args.odor,
        coloration: args.coloration,
        free_phase: args.free_phase,
        land_use: args.land_use,
        water_table_depth: args.water_table,
        affected_area: args.affected_area,
        depth: args.depth,
        soil_type: args.soil_type,
        near_water_bodies: args.near_water_bodies,
    };
    (input, args.site)
}

fn basic_input(args: BasicArgs) -> (BasicInput, SiteArgs) {
    let input = BasicInput {
        odor: args.odor,
        color: args.color,
        residue: args.residue,
        water_body: args.water_body,
        affected_area_m2: args.area,
        notes: args.notes,
    };
    (input, args.site)
}

fn site_data(site: &SiteArgs) -> suelo_core::Result<SiteData> {
    let coordinates = match (site.lat, site.lon) {
        (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)?),
        _ => None,
    };

    Ok(SiteData {
        site_name: site.site_name.clone(),
        location: site.location.clone(),
        coordinates,
        inspection_date: site.inspection_date.clone(),
        inspector: site.inspector.clone(),
    })
}

fn assess_output(body: &ReportBody, report_id: Option<ReportId>) -> AssessOutput {
    let level = body.level();
    let (raw_score, weighted_score, contributing_factors) = match body {
        ReportBody::Advanced { risk_result, .. } => (
            risk_result.raw_score,
            Some(risk_result.weighted_score),
            risk_result.contributing_factors.clone(),
        ),
        ReportBody::Basic { risk_result, .. } => {
            (risk_result.raw_score, None, risk_result.contributing_factors.clone())
        }
    };

    AssessOutput {
        kind: body.kind(),
        raw_score,
        weighted_score,
        level,
        contributing_factors,
        recommendations: level.recommendations().to_vec(),
        report_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use suelo_core::models::{NearbyWaterBody, OdorDetected, RiskLevel, SoilColor, VisibleResidue};

    #[test]
    fn test_site_data_without_coordinates() {
        let site = SiteArgs { site_name: Some("Pozo 12".to_string()), ..Default::default() };
        let data = site_data(&site).unwrap();
        assert_eq!(data.site_name.as_deref(), Some("Pozo 12"));
        assert!(data.coordinates.is_none());
    }

    #[test]
    fn test_site_data_rejects_out_of_range_latitude() {
        let site = SiteArgs { lat: Some(95.0), lon: Some(0.0), ..Default::default() };
        assert!(site_data(&site).is_err());
    }

    #[test]
    fn test_basic_output_has_no_weighted_score() {
        let body = ReportBody::assess_basic(BasicInput {
            odor: Some(OdorDetected::Yes),
            color: Some(SoilColor::Iridescent),
            residue: Some(VisibleResidue::HydrocarbonResidue),
            water_body: Some(NearbyWaterBody::Under50m),
            affected_area_m2: Some(2000.0),
            notes: None,
        })
        .unwrap();

        let out = assess_output(&body, None);
        assert_eq!(out.raw_score, 145);
        assert_eq!(out.level, RiskLevel::High);
        assert!(out.weighted_score.is_none());
        assert_eq!(out.recommendations, RiskLevel::High.recommendations().to_vec());
    }
}
