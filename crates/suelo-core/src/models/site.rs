use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, SueloError};

/// WGS 84 coordinate pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    /// Create a validated coordinate pair
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        let coords = Self { lat, lon };
        coords.validate()?;
        Ok(coords)
    }

    /// Check that both values are finite and within WGS 84 bounds
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| SueloError::InvalidCoordinates {
            lat: self.lat,
            lon: self.lon,
            reason: reason.to_string(),
        };

        if !self.lat.is_finite() || !self.lon.is_finite() {
            return Err(invalid("coordinates must be finite"));
        }
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(invalid("latitude must be within [-90, 90]"));
        }
        if !(-180.0..=180.0).contains(&self.lon) {
            return Err(invalid("longitude must be within [-180, 180]"));
        }
        Ok(())
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lon)
    }
}

/// Identification of the assessed site.
///
/// Every field is optional; absent fields are omitted when serialized so
/// they stay distinguishable from empty strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspection_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspector: Option<String>,
}

impl SiteData {
    pub fn validate(&self) -> Result<()> {
        if let Some(coords) = &self.coordinates {
            coords.validate()?;
        }
        Ok(())
    }
}
