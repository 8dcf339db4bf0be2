//! Output structures for projections

use serde::{Deserialize, Serialize};

/// Round half-up at the cent: ties go toward positive infinity.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}

/// End-of-year snapshot. Values are not rounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyResult {
    pub year: u32,
    pub invested: f64,
    pub interest: f64,
    pub total: f64,
    pub real_value: f64,
}

/// One month of the detailed trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthRow {
    pub projection_month: u32,
    pub year: u32,
    pub month_in_year: u32,
    pub opening_balance: f64,
    pub interest_accrued: f64,
    pub contribution: f64,
    pub capitalized: bool,
    pub pending_interest: f64,
    pub closing_balance: f64,
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    /// Principal plus contributions, rounded to cents
    pub total_invested: f64,

    /// Final balance minus invested, rounded to cents
    pub total_interest: f64,

    /// Final nominal balance, rounded to cents
    pub future_value: f64,

    /// Final balance deflated by cumulative inflation, rounded to cents
    pub future_value_real: f64,

    /// One entry per projected year, ascending
    pub breakdown: Vec<YearlyResult>,

    /// Monthly trace, empty unless requested
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub months: Vec<MonthRow>,
}

impl CalculationResult {
    /// Build the rounded summary from unrounded final values
    pub fn from_totals(
        total_invested: f64,
        balance: f64,
        balance_real: f64,
        breakdown: Vec<YearlyResult>,
        months: Vec<MonthRow>,
    ) -> Self {
        Self {
            total_invested: round_to_cents(total_invested),
            total_interest: round_to_cents(balance - total_invested),
            future_value: round_to_cents(balance),
            future_value_real: round_to_cents(balance_real),
            breakdown,
            months,
        }
    }

    /// Final year of the breakdown, if any years were projected
    pub fn last_year(&self) -> Option<&YearlyResult> {
        self.breakdown.last()
    }

    /// Fraction of the nominal future value that came from interest
    pub fn interest_share(&self) -> f64 {
        if self.future_value == 0.0 {
            0.0
        } else {
            self.total_interest / self.future_value
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_cents_half_up() {
        assert_eq!(round_to_cents(0.125), 0.13);
        assert_eq!(round_to_cents(-0.125), -0.12);
        assert_eq!(round_to_cents(1234.5678), 1234.57);
        assert_eq!(round_to_cents(1000.0), 1000.0);
        assert!(round_to_cents(f64::INFINITY).is_infinite());
    }

    #[test]
    fn test_from_totals_rounds_summary_only() {
        let row = YearlyResult {
            year: 1,
            invested: 100.0,
            interest: 0.123456,
            total: 100.123456,
            real_value: 97.654321,
        };
        let result = CalculationResult::from_totals(
            100.0,
            100.123456,
            97.654321,
            vec![row.clone()],
            Vec::new(),
        );

        assert_eq!(result.future_value, 100.12);
        assert_eq!(result.total_interest, 0.12);
        assert_eq!(result.future_value_real, 97.65);
        assert_eq!(result.breakdown[0], row);
        assert_eq!(result.last_year(), Some(&row));
        assert!((result.interest_share() - 0.12 / 100.12).abs() < 1e-12);
    }

    #[test]
    fn test_months_omitted_from_json_when_empty() {
        let result = CalculationResult::from_totals(0.0, 0.0, 0.0, Vec::new(), Vec::new());
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("months").is_none());
        assert!(json.get("futureValueReal").is_some());
        assert_eq!(result.interest_share(), 0.0);
    }
}
