use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::observation::{AdvancedInput, BasicInput};
use super::risk::{AdvancedRiskResult, BasicRiskResult, RiskLevel};
use super::site::SiteData;
use crate::error::{Result, SueloError};
use crate::scoring;

/// Unique, creation-ordered report identifier (milliseconds since the epoch,
/// bumped past any id already issued)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(pub u64);

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ReportId {
    type Err = SueloError;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<u64>()
            .map(ReportId)
            .map_err(|_| SueloError::InvalidReportId { value: s.to_string() })
    }
}

/// Report type, which also selects the storage partition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Basic,
    Advanced,
}

impl ReportKind {
    /// Partitions are read in this order when merging
    pub const ALL: [ReportKind; 2] = [ReportKind::Advanced, ReportKind::Basic];

    /// Name of the key-value partition holding reports of this kind
    pub fn partition(self) -> &'static str {
        match self {
            ReportKind::Basic => "basicReports",
            ReportKind::Advanced => "advancedReports",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportKind::Basic => write!(f, "basic"),
            ReportKind::Advanced => write!(f, "advanced"),
        }
    }
}

impl FromStr for ReportKind {
    type Err = SueloError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "basic" => Ok(ReportKind::Basic),
            "advanced" => Ok(ReportKind::Advanced),
            _ => Err(SueloError::invalid_enum("report_type", s)),
        }
    }
}

/// Kind-specific part of a report: the observations and the result of the
/// scheme that scored them. The two schemes never share a scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ReportBody {
    Basic {
        observations: BasicInput,
        risk_result: BasicRiskResult,
    },
    Advanced {
        observations: AdvancedInput,
        risk_result: AdvancedRiskResult,
    },
}

impl ReportBody {
    /// Score basic observations and wrap them with their result
    pub fn assess_basic(observations: BasicInput) -> Result<Self> {
        let risk_result = scoring::score_basic(&observations)?;
        Ok(ReportBody::Basic { observations, risk_result })
    }

    /// Score advanced observations and wrap them with their result
    pub fn assess_advanced(observations: AdvancedInput) -> Result<Self> {
        let risk_result = scoring::score_advanced(&observations)?;
        Ok(ReportBody::Advanced { observations, risk_result })
    }

    pub fn kind(&self) -> ReportKind {
        match self {
            ReportBody::Basic { .. } => ReportKind::Basic,
            ReportBody::Advanced { .. } => ReportKind::Advanced,
        }
    }

    pub fn level(&self) -> RiskLevel {
        match self {
            ReportBody::Basic { risk_result, .. } => risk_result.level,
            ReportBody::Advanced { risk_result, .. } => risk_result.level,
        }
    }

    /// Recompute the result from the stored observations and compare it
    /// with the stored one
    pub fn verify_result(&self) -> Result<bool> {
        match self {
            ReportBody::Basic { observations, risk_result } => {
                Ok(scoring::score_basic(observations)? == *risk_result)
            }
            ReportBody::Advanced { observations, risk_result } => {
                Ok(scoring::score_advanced(observations)? == *risk_result)
            }
        }
    }
}

/// A persisted site assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: ReportId,

    pub created_at: DateTime<Utc>,

    /// Whether the report has been marked as transmitted
    pub synced: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synced_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub site_data: SiteData,

    #[serde(flatten)]
    pub body: ReportBody,
}

impl Report {
    pub fn kind(&self) -> ReportKind {
        self.body.kind()
    }

    pub fn level(&self) -> RiskLevel {
        self.body.level()
    }

    /// Mark as synced. An already synced report keeps its original
    /// `synced_at`; returns whether anything changed.
    pub fn mark_synced(&mut self, now: DateTime<Utc>) -> bool {
        if self.synced && self.synced_at.is_some() {
            return false;
        }
        self.synced = true;
        self.synced_at = Some(now);
        true
    }
}
