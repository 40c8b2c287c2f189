pub mod observation;
pub mod report;
pub mod risk;
pub mod site;

pub use observation::{
    AdvancedInput, BasicInput, Coloration, LandUse, NearbyWaterBody, Odor, OdorDetected,
    SoilColor, VisibleResidue, WaterTableDepth,
};
pub use report::{Report, ReportBody, ReportId, ReportKind};
pub use risk::{AdvancedRiskResult, BasicRiskResult, RiskFactor, RiskLevel, RiskLevelCounts};
pub use site::{Coordinates, SiteData};
