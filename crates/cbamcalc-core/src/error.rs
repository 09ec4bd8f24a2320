//! Error types for the calculation core.
//!
//! Calculation itself is never fatal; missing reference data degrades to
//! safe fallbacks inside the result. These errors cover the fallible
//! edges: dataset loading, reference-table overrides and snapshot writing.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CbamError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid period '{0}', expected YYYY-MM")]
    InvalidPeriod(String),
}

pub type Result<T> = std::result::Result<T, CbamError>;
