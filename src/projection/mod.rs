//! Projection engine: monthly accrual, periodic compounding, inflation discounting

mod state;
mod engine;
mod results;

pub use state::{AccrualState, CompoundingSchedule};
pub use engine::{discount_factor, project, ProjectionConfig, ProjectionEngine};
pub use results::{round_to_cents, CalculationResult, MonthRow, YearlyResult};
