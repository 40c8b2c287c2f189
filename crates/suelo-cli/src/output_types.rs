use serde::Serialize;
use suelo_core::config::ConfigSource;
use suelo_core::models::{Report, ReportId, ReportKind, RiskFactor, RiskLevel};
use tabled::Tabled;

/// Output for assess command
#[derive(Debug, Serialize)]
pub struct AssessOutput {
    #[serde(rename = "type")]
    pub kind: ReportKind,
    pub raw_score: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weighted_score: Option<f64>,
    pub level: RiskLevel,
    pub contributing_factors: Vec<RiskFactor>,
    pub recommendations: Vec<&'static str>,
    /// Set when the assessment was saved
    pub report_id: Option<ReportId>,
}

/// Output for reports sync command
#[derive(Debug, Serialize)]
pub struct SyncOutput {
    pub id: ReportId,
    #[serde(rename = "type")]
    pub kind: ReportKind,
    pub synced: bool,
}

/// Output for reports sync-all command
#[derive(Debug, Serialize)]
pub struct SyncAllOutput {
    pub marked: usize,
}

/// Output for reports delete command
#[derive(Debug, Serialize)]
pub struct DeleteOutput {
    pub id: ReportId,
    #[serde(rename = "type")]
    pub kind: ReportKind,
    pub deleted: bool,
}

/// One entry of the config command output
#[derive(Debug, Serialize, Tabled)]
pub struct ConfigEntry {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source")]
    pub source: String,
}

impl ConfigEntry {
    pub fn new(key: impl Into<String>, value: String, source: ConfigSource) -> Self {
        Self { key: key.into(), value, source: format!("{:?}", source) }
    }
}

/// Table row for report listings
#[derive(Debug, Tabled)]
pub struct ReportRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Type")]
    pub kind: String,
    #[tabled(rename = "Created")]
    pub created: String,
    #[tabled(rename = "Site")]
    pub site: String,
    #[tabled(rename = "Risk")]
    pub level: String,
    #[tabled(rename = "Synced")]
    pub synced: String,
}

impl From<&Report> for ReportRow {
    fn from(report: &Report) -> Self {
        Self {
            id: report.id.to_string(),
            kind: report.kind().to_string(),
            created: report.created_at.format("%Y-%m-%d %H:%M").to_string(),
            site: report.site_data.site_name.clone().unwrap_or_else(|| "-".to_string()),
            level: report.level().to_string(),
            synced: if report.synced { "yes" } else { "no" }.to_string(),
        }
    }
}
