//! Projection parameters and named parameter-set loading

mod data;
pub mod loader;

pub use data::{CalculationParams, CompoundingFrequency, FREQUENCY_OPTIONS, MAX_YEARS};
pub use loader::{load_named_params, load_named_params_from_reader, NamedParams};
