//! Error types for the scenario store, loaders and report writers
//!
//! The projection engine itself never fails; these errors only come from
//! the layers around it.

use thiserror::Error;

/// Main error type for compound_growth operations
#[derive(Error, Debug)]
pub enum GrowthError {
    /// Parameters rejected by caller-side validation
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// Scenario lookup by id failed
    #[error("Scenario not found: {0}")]
    ScenarioNotFound(String),

    /// Persistence failure with path context
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result alias used throughout the crate
pub type GrowthResult<T> = Result<T, GrowthError>;
