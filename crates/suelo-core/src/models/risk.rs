use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorical risk outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Follow-up actions suggested for a site at this level
    pub fn recommendations(self) -> &'static [&'static str] {
        match self {
            RiskLevel::High => &[
                "Sample soil and groundwater immediately",
                "Restrict access to the affected area",
                "Notify the environmental authority",
                "Evaluate urgent remediation measures",
            ],
            RiskLevel::Medium => &[
                "Schedule a characterization sampling campaign",
                "Delimit the affected area",
                "Evaluate risks to nearby receptors",
                "Document the site photographically",
            ],
            RiskLevel::Low => &[
                "Keep the site under periodic observation",
                "Confirm with a laboratory analysis if conditions change",
            ],
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

/// An observation that contributed to a risk result.
///
/// Land-use annotations describe how strict the applicable limits are, not
/// risk as such; the advanced scheme always reports one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    // Advanced scheme
    SevereOdor,
    ExtensiveColoration,
    FreePhase,
    ShallowWaterTable,
    ConservationLandUse,
    ResidentialLandUse,
    IndustrialLandUse,

    // Basic scheme
    OdorDetected,
    DarkStainedSoil,
    IridescentSoil,
    DeadVegetation,
    HydrocarbonResidue,
    CriticalWaterBodyProximity,
    SmallAffectedArea,
    ModerateAffectedArea,
    LargeAffectedArea,
}

impl RiskFactor {
    pub fn description(self) -> &'static str {
        match self {
            RiskFactor::SevereOdor => "severe odor detected",
            RiskFactor::ExtensiveColoration => "extensive coloration, deep staining",
            RiskFactor::FreePhase => "free phase present, maximum migration risk",
            RiskFactor::ShallowWaterTable => "shallow water table, groundwater at risk",
            RiskFactor::ConservationLandUse => "conservation land use, strictest limits",
            RiskFactor::ResidentialLandUse => "residential land use (agricultural), strict limits",
            RiskFactor::IndustrialLandUse => "industrial land use, standard limits",
            RiskFactor::OdorDetected => "hydrocarbon odor detected",
            RiskFactor::DarkStainedSoil => "dark stained soil",
            RiskFactor::IridescentSoil => "iridescent sheen on soil",
            RiskFactor::DeadVegetation => "dead vegetation",
            RiskFactor::HydrocarbonResidue => "visible hydrocarbon residue",
            RiskFactor::CriticalWaterBodyProximity => "water body nearby (critical)",
            RiskFactor::SmallAffectedArea => "small affected area",
            RiskFactor::ModerateAffectedArea => "moderate affected area",
            RiskFactor::LargeAffectedArea => "large affected area",
        }
    }
}

impl fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Result of the advanced (land-use weighted) scheme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvancedRiskResult {
    /// Sum of observation points before weighting
    pub raw_score: u32,

    /// Raw score multiplied by the land-use multiplier
    pub weighted_score: f64,

    pub level: RiskLevel,

    pub contributing_factors: Vec<RiskFactor>,
}

/// Result of the basic (unweighted) scheme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicRiskResult {
    pub raw_score: u32,

    pub level: RiskLevel,

    pub contributing_factors: Vec<RiskFactor>,
}

/// Number of reports per risk level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskLevelCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl RiskLevelCounts {
    pub fn record(&mut self, level: RiskLevel) {
        match level {
            RiskLevel::Low => self.low += 1,
            RiskLevel::Medium => self.medium += 1,
            RiskLevel::High => self.high += 1,
        }
    }

    pub fn get(&self, level: RiskLevel) -> usize {
        match level {
            RiskLevel::Low => self.low,
            RiskLevel::Medium => self.medium,
            RiskLevel::High => self.high,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_serializes_as_name() {
        assert_eq!(serde_json::to_string(&RiskLevel::Medium).unwrap(), "\"Medium\"");
        let level: RiskLevel = serde_json::from_str("\"High\"").unwrap();
        assert_eq!(level, RiskLevel::High);
    }

    #[test]
    fn test_factor_serializes_as_code() {
        let json = serde_json::to_string(&RiskFactor::CriticalWaterBodyProximity).unwrap();
        assert_eq!(json, "\"critical_water_body_proximity\"");
    }

    #[test]
    fn test_every_level_has_recommendations() {
        for level in [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High] {
            assert!(!level.recommendations().is_empty());
        }
    }

    #[test]
    fn test_counts_record() {
        let mut counts = RiskLevelCounts::default();
        counts.record(RiskLevel::High);
        counts.record(RiskLevel::High);
        counts.record(RiskLevel::Low);
        assert_eq!(counts.get(RiskLevel::High), 2);
        assert_eq!(counts.get(RiskLevel::Medium), 0);
        assert_eq!(counts.get(RiskLevel::Low), 1);
    }
}
