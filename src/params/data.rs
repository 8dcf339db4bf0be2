//! Parameter structures matching the calculator's stored scenario format

use serde::{Deserialize, Serialize};

use crate::error::{GrowthError, GrowthResult};

/// Canonical compounding frequencies offered to users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompoundingFrequency {
    Annually,
    Quarterly,
    Monthly,
    /// Approximated as monthly by the engine
    Daily,
}

/// Frequencies in display order
pub const FREQUENCY_OPTIONS: [CompoundingFrequency; 4] = [
    CompoundingFrequency::Annually,
    CompoundingFrequency::Quarterly,
    CompoundingFrequency::Monthly,
    CompoundingFrequency::Daily,
];

impl CompoundingFrequency {
    /// Compounding events per year
    pub fn times_per_year(&self) -> u32 {
        match self {
            CompoundingFrequency::Annually => 1,
            CompoundingFrequency::Quarterly => 4,
            CompoundingFrequency::Monthly => 12,
            CompoundingFrequency::Daily => 365,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CompoundingFrequency::Annually => "Annually",
            CompoundingFrequency::Quarterly => "Quarterly",
            CompoundingFrequency::Monthly => "Monthly",
            CompoundingFrequency::Daily => "Daily",
        }
    }

    /// Map a raw events-per-year count back to a canonical frequency
    pub fn from_times_per_year(times: u32) -> Option<Self> {
        FREQUENCY_OPTIONS
            .iter()
            .copied()
            .find(|f| f.times_per_year() == times)
    }

    /// Case-insensitive lookup by label
    pub fn from_label(label: &str) -> Option<Self> {
        FREQUENCY_OPTIONS
            .iter()
            .copied()
            .find(|f| f.label().eq_ignore_ascii_case(label.trim()))
    }
}

/// Longest horizon `validate` accepts, in years
pub const MAX_YEARS: u32 = 1_000;

/// Inputs to a single projection
///
/// Rates are percentages (7.0 means 7%). Field names serialize in camelCase
/// so saved scenarios keep the same shape the browser front end writes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationParams {
    /// Starting balance at time 0
    pub initial_principal: f64,

    /// Added at the end of every month
    pub monthly_contribution: f64,

    /// Nominal annual interest rate, percent
    pub interest_rate: f64,

    /// Annual inflation rate, percent (absent means 0)
    #[serde(default)]
    pub inflation_rate: f64,

    /// Whole years to project
    pub years: u32,

    /// Compounding events per year (1, 4, 12, 365 canonically)
    pub compound_frequency: u32,
}

impl Default for CalculationParams {
    fn default() -> Self {
        Self {
            initial_principal: 10_000.0,
            monthly_contribution: 500.0,
            interest_rate: 7.0,
            inflation_rate: 2.5,
            years: 20,
            compound_frequency: CompoundingFrequency::Monthly.times_per_year(),
        }
    }
}

impl CalculationParams {
    pub fn new(
        initial_principal: f64,
        monthly_contribution: f64,
        interest_rate: f64,
        inflation_rate: f64,
        years: u32,
        compound_frequency: u32,
    ) -> Self {
        Self {
            initial_principal,
            monthly_contribution,
            interest_rate,
            inflation_rate,
            years,
            compound_frequency,
        }
    }

    /// Canonical frequency, if the raw count is one of the offered options
    pub fn frequency(&self) -> Option<CompoundingFrequency> {
        CompoundingFrequency::from_times_per_year(self.compound_frequency)
    }

    /// Caller-side sanity checks.
    ///
    /// The engine never calls this: it projects whatever it is given. Front
    /// ends (CLI, HTTP) run it before invoking the engine so that inputs
    /// like a zero or runaway horizon or a -100% inflation rate are rejected
    /// up front.
    /// Negative contributions and negative rates are allowed.
    pub fn validate(&self) -> GrowthResult<()> {
        let numeric = [
            ("initialPrincipal", self.initial_principal),
            ("monthlyContribution", self.monthly_contribution),
            ("interestRate", self.interest_rate),
            ("inflationRate", self.inflation_rate),
        ];
        for (name, value) in numeric {
            if !value.is_finite() {
                return Err(GrowthError::InvalidParams(format!(
                    "{} must be a finite number, got {}",
                    name, value
                )));
            }
        }

        if self.initial_principal < 0.0 {
            return Err(GrowthError::InvalidParams(format!(
                "initialPrincipal must not be negative, got {}",
                self.initial_principal
            )));
        }
        if self.years == 0 {
            return Err(GrowthError::InvalidParams(
                "years must be at least 1".to_string(),
            ));
        }
        if self.years > MAX_YEARS {
            return Err(GrowthError::InvalidParams(format!(
                "years must be at most {}, got {}",
                MAX_YEARS, self.years
            )));
        }
        if self.compound_frequency == 0 {
            return Err(GrowthError::InvalidParams(
                "compoundFrequency must be at least 1".to_string(),
            ));
        }
        if self.inflation_rate <= -100.0 {
            return Err(GrowthError::InvalidParams(format!(
                "inflationRate must be greater than -100, got {}",
                self.inflation_rate
            )));
        }

        Ok(())
    }
}
