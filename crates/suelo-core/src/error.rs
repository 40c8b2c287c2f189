//! Error types for Suelo

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SueloError {
    // Scoring errors
    #[error("Incomplete input, missing required fields: {}", fields.join(", "))]
    IncompleteInput { fields: Vec<String> },

    #[error("Invalid value '{value}' for {field}")]
    InvalidEnumValue { field: String, value: String },

    #[error("Invalid report id '{value}': expected a non-negative integer")]
    InvalidReportId { value: String },

    // Site errors
    #[error("Invalid coordinates ({lat}, {lon}): {reason}")]
    InvalidCoordinates { lat: f64, lon: f64, reason: String },

    #[error("Location unavailable: {reason}")]
    LocationUnavailable { reason: String },

    // Storage errors
    #[error("Storage error on key '{key}': {reason}")]
    Storage { key: String, reason: String },

    // Configuration errors
    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SueloError {
    pub(crate) fn invalid_enum(field: &str, value: impl Into<String>) -> Self {
        SueloError::InvalidEnumValue { field: field.to_string(), value: value.into() }
    }
}

impl From<serde_json::Error> for SueloError {
    fn from(err: serde_json::Error) -> Self {
        SueloError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SueloError>;
