use thiserror::Error;

use crate::vocabulary::AttributeDimension;

// ConfigError is raised while setting up a resolver; resolving itself never fails

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unknown attribute dimension {0:?}")]
    UnknownDimension(String),

    #[error("threshold for {name} must be within 0..=1, got {value}")]
    InvalidThreshold { name: String, value: f64 },

    #[error("{value:?} is not a {dimension} value")]
    UnknownValue {
        dimension: AttributeDimension,
        value: String,
    },

    #[error("brightness band {min}..{max} must be an increasing range within 0..=255")]
    InvalidBrightnessBand { min: f64, max: f64 },

    #[error("fallback category {0:?} is not a category parent")]
    UnknownFallbackParent(String),

    #[error("keywords used for both genders: {}", .0.join(", "))]
    OverlappingGenderKeywords(Vec<String>),

    #[error("could not load configuration: {}", .0)]
    Load(#[from] ::config::ConfigError),
}

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("malformed response: {}", .0)]
    Json(#[from] serde_json::Error),

    #[error("response envelope contains no results")]
    EmptyResponse,

    #[error("vision service reported an error: {message}")]
    Vendor { code: Option<i64>, message: String },
}
