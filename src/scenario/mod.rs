//! Saved scenarios, their JSON store, and batch/comparison runs

mod store;
mod runner;

pub use store::{ScenarioStore, SCENARIOS_FILE};
pub use runner::{ComparisonRow, ScenarioRunner, CURRENT_DRAFT_NAME, CURRENT_ID};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::params::CalculationParams;

/// A named parameter set the user chose to keep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedScenario {
    /// Decimal string of the creation time in epoch milliseconds
    pub id: String,

    pub name: String,

    pub params: CalculationParams,

    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}
