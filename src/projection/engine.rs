//! Core projection engine for monthly accrual with periodic compounding

use crate::params::CalculationParams;
use super::state::{AccrualState, CompoundingSchedule};
use super::results::{CalculationResult, MonthRow, YearlyResult};

/// Configuration for a projection run
#[derive(Debug, Clone, Default)]
pub struct ProjectionConfig {
    /// Record a row per simulated month in `CalculationResult::months`
    pub monthly_detail: bool,
}

/// Main projection engine
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

/// Cumulative inflation discount factor after `year` years.
/// `inflation_rate` is a percentage.
pub fn discount_factor(inflation_rate: f64, year: u32) -> f64 {
    (1.0 + inflation_rate / 100.0).powi(year as i32)
}

/// Project with the default configuration
pub fn project(params: &CalculationParams) -> CalculationResult {
    ProjectionEngine::default().project(params)
}

impl ProjectionEngine {
    /// Create a new projection engine with the given config
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    /// Run the projection.
    ///
    /// Interest accrues monthly at rate/12 on the balance as it stood before
    /// the month's contribution, and sits in pending interest until the
    /// schedule capitalizes it. Interest still pending when the horizon ends
    /// is not part of the reported balance. Inputs are not validated: a zero
    /// horizon returns an empty breakdown and an inflation rate of -100%
    /// produces non-finite real values.
    pub fn project(&self, params: &CalculationParams) -> CalculationResult {
        let monthly_rate = (params.interest_rate / 100.0) / 12.0;
        let schedule = CompoundingSchedule::from_frequency(params.compound_frequency);

        log::debug!(
            "Projecting {} years: principal={:.2} contribution={:.2} rate={}% inflation={}% \
             schedule={:?}",
            params.years,
            params.initial_principal,
            params.monthly_contribution,
            params.interest_rate,
            params.inflation_rate,
            schedule,
        );

        let mut state = AccrualState::from_params(params);
        let mut breakdown = Vec::with_capacity(params.years as usize);
        let mut months = if self.config.monthly_detail {
            Vec::with_capacity(params.years as usize * 12)
        } else {
            Vec::new()
        };

        for year in 1..=params.years {
            for _ in 1..=12 {
                state.advance_month();
                let row = self.simulate_month(
                    &mut state,
                    schedule,
                    monthly_rate,
                    params.monthly_contribution,
                );
                if self.config.monthly_detail {
                    months.push(row);
                }
            }

            let real_value = state.balance / discount_factor(params.inflation_rate, year);
            log::trace!(
                "Year {}: invested={:.2} total={:.2} real={:.2} pending={:.4}",
                year,
                state.total_invested,
                state.balance,
                real_value,
                state.pending_interest,
            );

            breakdown.push(YearlyResult {
                year,
                invested: state.total_invested,
                interest: state.interest_earned(),
                total: state.balance,
                real_value,
            });
        }

        if state.pending_interest != 0.0 {
            log::debug!(
                "Dropping {:.4} of uncapitalized interest at the horizon",
                state.pending_interest
            );
        }

        let balance_real = state.balance / discount_factor(params.inflation_rate, params.years);

        CalculationResult::from_totals(
            state.total_invested,
            state.balance,
            balance_real,
            breakdown,
            months,
        )
    }

    /// Accrue, contribute, then capitalize if the schedule says so
    fn simulate_month(
        &self,
        state: &mut AccrualState,
        schedule: CompoundingSchedule,
        monthly_rate: f64,
        contribution: f64,
    ) -> MonthRow {
        let opening_balance = state.balance;

        let interest_accrued = state.accrue(monthly_rate);
        state.contribute(contribution);

        let capitalized = schedule.capitalizes_in(state.month_in_year);
        if capitalized {
            state.capitalize();
        }

        MonthRow {
            projection_month: state.projection_month,
            year: state.year,
            month_in_year: state.month_in_year,
            opening_balance,
            interest_accrued,
            contribution,
            capitalized,
            pending_interest: state.pending_interest,
            closing_balance: state.balance,
        }
    }
}
