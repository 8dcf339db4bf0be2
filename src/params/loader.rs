//! Load named parameter sets from a scenarios CSV
//!
//! Columns: Name, InitialPrincipal, MonthlyContribution, InterestRate,
//! InflationRate, Years, CompoundFrequency. A blank InflationRate means 0.
//! CompoundFrequency accepts either a count (12) or a label (Monthly).

use super::{CalculationParams, CompoundingFrequency};
use crate::error::{GrowthError, GrowthResult};
use csv::Reader;
use serde::Serialize;
use std::path::Path;

/// Raw CSV row matching the scenarios file columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "InitialPrincipal")]
    initial_principal: f64,
    #[serde(rename = "MonthlyContribution")]
    monthly_contribution: f64,
    #[serde(rename = "InterestRate")]
    interest_rate: f64,
    #[serde(rename = "InflationRate")]
    inflation_rate: Option<f64>,
    #[serde(rename = "Years")]
    years: u32,
    #[serde(rename = "CompoundFrequency")]
    compound_frequency: String,
}

/// A parameter set with a display name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedParams {
    pub name: String,
    pub params: CalculationParams,
}

impl CsvRow {
    fn into_named(self, line: usize) -> GrowthResult<NamedParams> {
        let raw = self.compound_frequency.trim();
        let compound_frequency = match raw.parse::<u32>() {
            Ok(times) => times,
            Err(_) => CompoundingFrequency::from_label(raw)
                .map(|f| f.times_per_year())
                .ok_or_else(|| {
                    GrowthError::InvalidParams(format!(
                        "row {}: unknown CompoundFrequency: {}",
                        line, raw
                    ))
                })?,
        };

        let name = self.name.trim();
        let name = if name.is_empty() {
            format!("Scenario {}", line)
        } else {
            name.to_string()
        };

        Ok(NamedParams {
            name,
            params: CalculationParams {
                initial_principal: self.initial_principal,
                monthly_contribution: self.monthly_contribution,
                interest_rate: self.interest_rate,
                inflation_rate: self.inflation_rate.unwrap_or(0.0),
                years: self.years,
                compound_frequency,
            },
        })
    }
}

/// Load all named parameter sets from a CSV file
pub fn load_named_params<P: AsRef<Path>>(path: P) -> GrowthResult<Vec<NamedParams>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .map_err(|e| GrowthError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;
    load_named_params_from_reader(file)
}

/// Load named parameter sets from any reader
pub fn load_named_params_from_reader<R: std::io::Read>(
    reader: R,
) -> GrowthResult<Vec<NamedParams>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut sets = Vec::new();

    for (idx, result) in csv_reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        sets.push(row.into_named(idx + 1)?);
    }

    log::debug!("Loaded {} parameter sets", sets.len());
    Ok(sets)
}
