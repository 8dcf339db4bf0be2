//! Scenario runner for batch and side-by-side projections
//!
//! Holds one engine configuration and projects many parameter sets with it,
//! in parallel where there is more than one.

use rayon::prelude::*;
use serde::Serialize;

use super::SavedScenario;
use crate::params::{CalculationParams, NamedParams};
use crate::projection::{CalculationResult, ProjectionConfig, ProjectionEngine};

/// Identifier used for the unsaved draft in a comparison
pub const CURRENT_ID: &str = "current";

/// Name used for the unsaved draft when none is given
pub const CURRENT_DRAFT_NAME: &str = "Current Draft";

/// One line of a side-by-side comparison
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    pub id: String,
    pub name: String,
    pub is_current: bool,
    pub params: CalculationParams,
    pub total_invested: f64,
    pub total_interest: f64,
    pub future_value: f64,
    pub future_value_real: f64,
}

impl ComparisonRow {
    fn new(
        id: String,
        name: String,
        is_current: bool,
        params: CalculationParams,
        result: &CalculationResult,
    ) -> Self {
        Self {
            id,
            name,
            is_current,
            params,
            total_invested: result.total_invested,
            total_interest: result.total_interest,
            future_value: result.future_value,
            future_value_real: result.future_value_real,
        }
    }
}

/// Batch runner sharing one engine across parameter sets
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// let rows = runner.compare("My Strategy", &draft, store.scenarios());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    engine: ProjectionEngine,
}

impl ScenarioRunner {
    /// Runner with the default engine configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Runner with a specific engine configuration
    pub fn with_config(config: ProjectionConfig) -> Self {
        Self {
            engine: ProjectionEngine::new(config),
        }
    }

    /// Run a single projection
    pub fn run(&self, params: &CalculationParams) -> CalculationResult {
        self.engine.project(params)
    }

    /// Run many parameter sets; output order follows input order
    pub fn run_batch(&self, params: &[CalculationParams]) -> Vec<CalculationResult> {
        params.par_iter().map(|p| self.engine.project(p)).collect()
    }

    /// Run named parameter sets, pairing each name with its result
    pub fn run_named(&self, sets: &[NamedParams]) -> Vec<(String, CalculationResult)> {
        sets.par_iter()
            .map(|set| (set.name.clone(), self.engine.project(&set.params)))
            .collect()
    }

    /// Compare the unsaved draft against every saved scenario.
    ///
    /// The draft always comes first; saved scenarios follow in store order.
    pub fn compare(
        &self,
        current_name: &str,
        current: &CalculationParams,
        saved: &[SavedScenario],
    ) -> Vec<ComparisonRow> {
        let current_result = self.engine.project(current);
        self.compare_projected(current_name, current, &current_result, saved)
    }

    /// Same as `compare`, reusing a draft result the caller already holds
    pub fn compare_projected(
        &self,
        current_name: &str,
        current: &CalculationParams,
        current_result: &CalculationResult,
        saved: &[SavedScenario],
    ) -> Vec<ComparisonRow> {
        let name = match current_name.trim() {
            "" => CURRENT_DRAFT_NAME.to_string(),
            n => n.to_string(),
        };

        let mut rows = Vec::with_capacity(saved.len() + 1);
        rows.push(ComparisonRow::new(
            CURRENT_ID.to_string(),
            name,
            true,
            *current,
            current_result,
        ));

        let saved_rows: Vec<ComparisonRow> = saved
            .par_iter()
            .map(|s| {
                let result = self.engine.project(&s.params);
                ComparisonRow::new(s.id.clone(), s.name.clone(), false, s.params, &result)
            })
            .collect();
        rows.extend(saved_rows);

        log::debug!("Compared {} scenarios", rows.len());
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn saved(id: &str, name: &str, rate: f64) -> SavedScenario {
        SavedScenario {
            id: id.to_string(),
            name: name.to_string(),
            params: CalculationParams { interest_rate: rate, ..CalculationParams::default() },
            created_at: Utc.timestamp_millis_opt(1_700_000_000_000).unwrap(),
        }
    }

    #[test]
    fn test_scenario_runner_batch() {
        let runner = ScenarioRunner::new();

        let params: Vec<_> = [3.0, 5.0, 7.0]
            .iter()
            .map(|&rate| CalculationParams { interest_rate: rate, ..CalculationParams::default() })
            .collect();

        let results = runner.run_batch(&params);
        assert_eq!(results.len(), 3);

        // Higher rate should result in higher future value
        assert!(results[2].future_value > results[1].future_value);
        assert!(results[1].future_value > results[0].future_value);
        assert_eq!(results[0], runner.run(&params[0]));
    }

    #[test]
    fn test_compare_puts_current_first() {
        let runner = ScenarioRunner::new();
        let store = vec![saved("1", "Low", 3.0), saved("2", "High", 9.0)];

        let rows = runner.compare("  ", &CalculationParams::default(), &store);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].id, CURRENT_ID);
        assert_eq!(rows[0].name, CURRENT_DRAFT_NAME);
        assert!(rows[0].is_current);
        assert_eq!(rows[1].name, "Low");
        assert_eq!(rows[2].name, "High");
        assert!(!rows[2].is_current);
        assert!(rows[2].future_value > rows[1].future_value);
    }

    #[test]
    fn test_compare_with_no_saved() {
        let runner = ScenarioRunner::new();
        let rows = runner.compare("My Strategy", &CalculationParams::default(), &[]);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "My Strategy");
        assert_eq!(rows[0].total_invested, 130_000.0);
    }

    #[test]
    fn test_compare_projected_reuses_draft_result() {
        let runner = ScenarioRunner::new();
        let draft = CalculationParams { years: 10, ..CalculationParams::default() };
        let result = runner.run(&draft);
        let store = vec![saved("1", "Low", 3.0)];

        let rows = runner.compare_projected("Draft", &draft, &result, &store);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].future_value, result.future_value);
        assert_eq!(rows[0].total_interest, result.total_interest);
        assert_eq!(rows[1].future_value, runner.run(&store[0].params).future_value);
        assert_eq!(
            rows[0].future_value,
            runner.compare("Draft", &draft, &store)[0].future_value
        );
    }

    #[test]
    fn test_run_named_keeps_names() {
        let runner = ScenarioRunner::new();
        let sets = vec![
            NamedParams { name: "a".to_string(), params: CalculationParams::default() },
            NamedParams {
                name: "b".to_string(),
                params: CalculationParams { years: 5, ..CalculationParams::default() },
            },
        ];

        let results = runner.run_named(&sets);
        assert_eq!(results[0].0, "a");
        assert_eq!(results[1].1.breakdown.len(), 5);
    }
}
