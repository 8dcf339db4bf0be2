//! Compound Growth - compound interest projection engine
//!
//! This library provides:
//! - Year-by-year projections with monthly contributions and periodic compounding
//! - Inflation-adjusted (real) values alongside nominal balances
//! - Saved scenarios in a JSON store and side-by-side comparison runs
//! - Console and CSV reporting

pub mod config;
pub mod error;
pub mod params;
pub mod projection;
pub mod report;
pub mod scenario;

// Re-export commonly used types
pub use error::{GrowthError, GrowthResult};
pub use params::{CalculationParams, CompoundingFrequency};
pub use projection::{project, CalculationResult, ProjectionEngine, YearlyResult};
pub use scenario::{SavedScenario, ScenarioRunner, ScenarioStore};
