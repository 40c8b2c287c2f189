//! Observation vocabularies for the two assessment forms.
//!
//! The advanced and basic forms use separate vocabularies with separate point
//! scales. Every enum parses from its canonical snake_case name and from the
//! short labels used on the field forms; the advanced enums also parse from
//! the raw point value the forms used to store.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SueloError};

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Odor intensity observed on site (advanced form)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Odor {
    None,
    Mild,
    Severe,
}

impl Odor {
    pub const ALL: [Odor; 3] = [Odor::None, Odor::Mild, Odor::Severe];

    pub fn points(self) -> u32 {
        match self {
            Odor::None => 0,
            Odor::Mild => 3,
            Odor::Severe => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Odor::None => "No odor",
            Odor::Mild => "Mild odor",
            Odor::Severe => "Severe odor",
        }
    }
}

impl FromStr for Odor {
    type Err = SueloError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "none" | "0" => Ok(Odor::None),
            "mild" | "3" => Ok(Odor::Mild),
            "severe" | "5" => Ok(Odor::Severe),
            _ => Err(SueloError::invalid_enum("odor", s)),
        }
    }
}

/// Soil coloration extent (advanced form)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Coloration {
    None,
    Superficial,
    ExtensiveDeep,
}

impl Coloration {
    pub const ALL: [Coloration; 3] =
        [Coloration::None, Coloration::Superficial, Coloration::ExtensiveDeep];

    pub fn points(self) -> u32 {
        match self {
            Coloration::None => 0,
            Coloration::Superficial => 2,
            Coloration::ExtensiveDeep => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Coloration::None => "No coloration",
            Coloration::Superficial => "Superficial",
            Coloration::ExtensiveDeep => "Extensive and deep",
        }
    }
}

impl FromStr for Coloration {
    type Err = SueloError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "none" | "0" => Ok(Coloration::None),
            "superficial" | "2" => Ok(Coloration::Superficial),
            "extensive_deep" | "extensive" | "4" => Ok(Coloration::ExtensiveDeep),
            _ => Err(SueloError::invalid_enum("coloration", s)),
        }
    }
}

/// Predominant land use of the site. Sensitive uses carry stricter
/// regulatory limits, expressed as a larger multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LandUse {
    Industrial,
    Residential,
    Conservation,
}

impl LandUse {
    pub const ALL: [LandUse; 3] = [LandUse::Industrial, LandUse::Residential, LandUse::Conservation];

    pub fn multiplier(self) -> u32 {
        match self {
            LandUse::Industrial => 2,
            LandUse::Residential => 3,
            LandUse::Conservation => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LandUse::Industrial => "Industrial",
            LandUse::Residential => "Residential / Agricultural",
            LandUse::Conservation => "Conservation",
        }
    }
}

impl FromStr for LandUse {
    type Err = SueloError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "industrial" | "2" => Ok(LandUse::Industrial),
            "residential" | "agricultural" | "3" => Ok(LandUse::Residential),
            "conservation" | "4" => Ok(LandUse::Conservation),
            _ => Err(SueloError::invalid_enum("land_use", s)),
        }
    }
}

/// Depth to the water table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WaterTableDepth {
    #[serde(rename = "over_10m")]
    Over10m,
    #[serde(rename = "5_to_10m")]
    From5To10m,
    #[serde(rename = "under_5m")]
    Under5m,
}

impl WaterTableDepth {
    pub const ALL: [WaterTableDepth; 3] =
        [WaterTableDepth::Over10m, WaterTableDepth::From5To10m, WaterTableDepth::Under5m];

    pub fn points(self) -> u32 {
        match self {
            WaterTableDepth::Over10m => 2,
            WaterTableDepth::From5To10m => 5,
            WaterTableDepth::Under5m => 8,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WaterTableDepth::Over10m => "Deeper than 10 m",
            WaterTableDepth::From5To10m => "Between 5 and 10 m",
            WaterTableDepth::Under5m => "Shallower than 5 m",
        }
    }
}

impl FromStr for WaterTableDepth {
    type Err = SueloError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "over_10m" | ">10m" | "2" => Ok(WaterTableDepth::Over10m),
            "5_to_10m" | "5-10m" | "5" => Ok(WaterTableDepth::From5To10m),
            "under_5m" | "<5m" | "8" => Ok(WaterTableDepth::Under5m),
            _ => Err(SueloError::invalid_enum("water_table_depth", s)),
        }
    }
}

/// Whether a hydrocarbon odor was detected (basic form)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OdorDetected {
    No,
    Yes,
}

impl OdorDetected {
    pub fn points(self) -> u32 {
        match self {
            OdorDetected::No => 0,
            OdorDetected::Yes => 25,
        }
    }
}

impl FromStr for OdorDetected {
    type Err = SueloError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "no" | "false" => Ok(OdorDetected::No),
            "yes" | "true" => Ok(OdorDetected::Yes),
            _ => Err(SueloError::invalid_enum("odor", s)),
        }
    }
}

/// Soil color (basic form)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoilColor {
    Natural,
    DarkStained,
    Iridescent,
}

impl SoilColor {
    pub fn points(self) -> u32 {
        match self {
            SoilColor::Natural => 0,
            SoilColor::DarkStained => 15,
            SoilColor::Iridescent => 20,
        }
    }
}

impl FromStr for SoilColor {
    type Err = SueloError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "natural" => Ok(SoilColor::Natural),
            "dark_stained" | "dark" => Ok(SoilColor::DarkStained),
            "iridescent" => Ok(SoilColor::Iridescent),
            _ => Err(SueloError::invalid_enum("color", s)),
        }
    }
}

/// Residue visible on the surface (basic form)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisibleResidue {
    None,
    InorganicTrash,
    DeadVegetation,
    HydrocarbonResidue,
}

impl VisibleResidue {
    pub fn points(self) -> u32 {
        match self {
            VisibleResidue::None => 0,
            VisibleResidue::InorganicTrash => 5,
            VisibleResidue::DeadVegetation => 15,
            VisibleResidue::HydrocarbonResidue => 25,
        }
    }
}

impl FromStr for VisibleResidue {
    type Err = SueloError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "none" => Ok(VisibleResidue::None),
            "inorganic_trash" | "trash" => Ok(VisibleResidue::InorganicTrash),
            "dead_vegetation" => Ok(VisibleResidue::DeadVegetation),
            "hydrocarbon_residue" | "hydrocarbon" => Ok(VisibleResidue::HydrocarbonResidue),
            _ => Err(SueloError::invalid_enum("residue", s)),
        }
    }
}

/// Distance to the nearest water body (basic form)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NearbyWaterBody {
    #[serde(rename = "no")]
    No,
    #[serde(rename = "over_500m")]
    Over500m,
    #[serde(rename = "50_to_500m")]
    From50To500m,
    #[serde(rename = "under_50m")]
    Under50m,
}

impl NearbyWaterBody {
    pub fn points(self) -> u32 {
        match self {
            NearbyWaterBody::No => 0,
            NearbyWaterBody::Over500m => 10,
            NearbyWaterBody::From50To500m => 25,
            NearbyWaterBody::Under50m => 45,
        }
    }
}

impl FromStr for NearbyWaterBody {
    type Err = SueloError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "no" | "none" => Ok(NearbyWaterBody::No),
            "over_500m" | ">500m" => Ok(NearbyWaterBody::Over500m),
            "50_to_500m" | "50-500m" => Ok(NearbyWaterBody::From50To500m),
            "under_50m" | "<50m" => Ok(NearbyWaterBody::Under50m),
            _ => Err(SueloError::invalid_enum("water_body", s)),
        }
    }
}

macro_rules! display_via_serde_name {
    ($($ty:ty),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    match serde_json::to_value(self) {
                        Ok(serde_json::Value::String(name)) => f.write_str(&name),
                        _ => write!(f, "{:?}", self),
                    }
                }
            }
        )*
    };
}

display_via_serde_name!(
    Odor,
    Coloration,
    LandUse,
    WaterTableDepth,
    OdorDetected,
    SoilColor,
    VisibleResidue,
    NearbyWaterBody,
);

/// Observations collected by the advanced form.
///
/// Scoring fields are optional here because they mirror form state; scoring
/// rejects the input when any of them is missing. Free-text fields never
/// take part in scoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdvancedInput {
    pub odor: Option<Odor>,
    pub coloration: Option<Coloration>,
    pub free_phase: Option<bool>,
    pub land_use: Option<LandUse>,
    pub water_table_depth: Option<WaterTableDepth>,

    /// Affected area in m², as typed on the form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_area: Option<String>,

    /// Contamination depth in m, as typed on the form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soil_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub near_water_bodies: Option<bool>,
}

impl AdvancedInput {
    /// Names of the scoring fields that are still unset
    pub fn missing_fields(&self) -> Vec<String> {
        let mut missing = Vec::new();
        if self.odor.is_none() {
            missing.push("odor".to_string());
        }
        if self.coloration.is_none() {
            missing.push("coloration".to_string());
        }
        if self.free_phase.is_none() {
            missing.push("free_phase".to_string());
        }
        if self.land_use.is_none() {
            missing.push("land_use".to_string());
        }
        if self.water_table_depth.is_none() {
            missing.push("water_table_depth".to_string());
        }
        missing
    }
}

/// Observations collected by the basic form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BasicInput {
    pub odor: Option<OdorDetected>,
    pub color: Option<SoilColor>,
    pub residue: Option<VisibleResidue>,
    pub water_body: Option<NearbyWaterBody>,
    pub affected_area_m2: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl BasicInput {
    /// Names of the scoring fields that are unset or unusable. A negative or
    /// non-finite area counts as missing.
    pub fn missing_fields(&self) -> Vec<String> {
        let mut missing = Vec::new();
        if self.odor.is_none() {
            missing.push("odor".to_string());
        }
        if self.color.is_none() {
            missing.push("color".to_string());
        }
        if self.residue.is_none() {
            missing.push("residue".to_string());
        }
        if self.water_body.is_none() {
            missing.push("water_body".to_string());
        }
        match self.affected_area_m2 {
            Some(area) if area.is_finite() && area >= 0.0 => {}
            _ => missing.push("affected_area_m2".to_string()),
        }
        missing
    }
}
