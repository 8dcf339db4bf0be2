//! Console tables and CSV output for projections and comparisons

use std::io::Write;

use serde::Serialize;

use crate::error::GrowthResult;
use crate::projection::{CalculationResult, MonthRow, YearlyResult};
use crate::scenario::ComparisonRow;

#[derive(Serialize)]
struct BreakdownCsvRow {
    #[serde(rename = "Year")]
    year: u32,
    #[serde(rename = "Invested")]
    invested: f64,
    #[serde(rename = "Interest")]
    interest: f64,
    #[serde(rename = "Total")]
    total: f64,
    #[serde(rename = "RealValue")]
    real_value: f64,
}

#[derive(Serialize)]
struct MonthCsvRow {
    #[serde(rename = "Month")]
    month: u32,
    #[serde(rename = "Year")]
    year: u32,
    #[serde(rename = "MonthInYear")]
    month_in_year: u32,
    #[serde(rename = "OpeningBalance")]
    opening_balance: f64,
    #[serde(rename = "InterestAccrued")]
    interest_accrued: f64,
    #[serde(rename = "Contribution")]
    contribution: f64,
    #[serde(rename = "Capitalized")]
    capitalized: bool,
    #[serde(rename = "PendingInterest")]
    pending_interest: f64,
    #[serde(rename = "ClosingBalance")]
    closing_balance: f64,
}

#[derive(Serialize)]
struct ComparisonCsvRow<'a> {
    #[serde(rename = "Scenario")]
    name: &'a str,
    #[serde(rename = "Current")]
    is_current: bool,
    #[serde(rename = "Principal")]
    principal: f64,
    #[serde(rename = "Monthly")]
    monthly: f64,
    #[serde(rename = "Rate")]
    rate: f64,
    #[serde(rename = "Years")]
    years: u32,
    #[serde(rename = "TotalInvested")]
    total_invested: f64,
    #[serde(rename = "FutureValue")]
    future_value: f64,
    #[serde(rename = "RealValue")]
    real_value: f64,
}

/// Yearly breakdown as CSV (unrounded values)
pub fn write_breakdown_csv<W: Write>(writer: W, breakdown: &[YearlyResult]) -> GrowthResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in breakdown {
        csv_writer.serialize(BreakdownCsvRow {
            year: row.year,
            invested: row.invested,
            interest: row.interest,
            total: row.total,
            real_value: row.real_value,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Monthly trace as CSV
pub fn write_months_csv<W: Write>(writer: W, months: &[MonthRow]) -> GrowthResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in months {
        csv_writer.serialize(MonthCsvRow {
            month: row.projection_month,
            year: row.year,
            month_in_year: row.month_in_year,
            opening_balance: row.opening_balance,
            interest_accrued: row.interest_accrued,
            contribution: row.contribution,
            capitalized: row.capitalized,
            pending_interest: row.pending_interest,
            closing_balance: row.closing_balance,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Comparison rows as CSV
pub fn write_comparison_csv<W: Write>(writer: W, rows: &[ComparisonRow]) -> GrowthResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(ComparisonCsvRow {
            name: &row.name,
            is_current: row.is_current,
            principal: row.params.initial_principal,
            monthly: row.params.monthly_contribution,
            rate: row.params.interest_rate,
            years: row.params.years,
            total_invested: row.total_invested,
            future_value: row.future_value,
            real_value: row.future_value_real,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Format an amount with thousands separators and a fixed number of decimals
pub fn format_money(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

/// Summary block for a single projection
pub fn format_summary(result: &CalculationResult) -> String {
    let mut out = String::new();
    out.push_str("Summary:\n");
    out.push_str(&format!("  Total Invested:    ${}\n", format_money(result.total_invested, 2)));
    out.push_str(&format!("  Total Interest:    ${}\n", format_money(result.total_interest, 2)));
    out.push_str(&format!("  Future Value:      ${}\n", format_money(result.future_value, 2)));
    out.push_str(&format!("  Real Value:        ${}\n", format_money(result.future_value_real, 2)));
    out.push_str(&format!("  Interest Share:    {:.1}%\n", result.interest_share() * 100.0));
    out
}

/// Year-by-year table
pub fn format_breakdown_table(breakdown: &[YearlyResult]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>4} {:>18} {:>18} {:>18} {:>18}\n",
        "Year", "Invested", "Interest", "Total", "Real Value"
    ));
    out.push_str(&"-".repeat(80));
    out.push('\n');

    for row in breakdown {
        out.push_str(&format!(
            "{:>4} {:>18} {:>18} {:>18} {:>18}\n",
            row.year,
            format_money(row.invested, 2),
            format_money(row.interest, 2),
            format_money(row.total, 2),
            format_money(row.real_value, 2),
        ));
    }
    out
}

/// Side-by-side comparison table; the current draft is marked with `*`
pub fn format_comparison_table(rows: &[ComparisonRow]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<24} {:>12} {:>10} {:>12} {:>16} {:>16} {:>16}\n",
        "Scenario",
        "Principal",
        "Monthly",
        "Rate / Yrs",
        "Total Invested",
        "Future Value",
        "Real Value"
    ));
    out.push_str(&"-".repeat(112));
    out.push('\n');

    for row in rows {
        let marker = if row.is_current { "* " } else { "  " };
        out.push_str(&format!(
            "{:<24} {:>12} {:>10} {:>12} {:>16} {:>16} {:>16}\n",
            format!("{}{}", marker, row.name),
            format!("${}", format_money(row.params.initial_principal, 0)),
            format!("${}", format_money(row.params.monthly_contribution, 0)),
            format!("{}% / {}y", row.params.interest_rate, row.params.years),
            format!("${}", format_money(row.total_invested, 0)),
            format!("${}", format_money(row.future_value, 0)),
            format!("${}", format_money(row.future_value_real, 0)),
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::CalculationParams;
    use crate::projection::{project, ProjectionConfig, ProjectionEngine};
    use crate::scenario::ScenarioRunner;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0.0, 2), "0.00");
        assert_eq!(format_money(999.6, 0), "1,000");
        assert_eq!(format_money(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_money(-4200.0, 2), "-4,200.00");
        assert_eq!(format_money(-0.001, 2), "0.00");
        assert_eq!(format_money(100.0, 0), "100");
    }

    #[test]
    fn test_breakdown_csv() {
        let result = project(&CalculationParams::new(1_000.0, 0.0, 0.0, 0.0, 2, 12));
        let mut buf = Vec::new();
        write_breakdown_csv(&mut buf, &result.breakdown).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Year,Invested,Interest,Total,RealValue");
        assert_eq!(lines.len(), 3);
        assert!(lines[2].starts_with("2,"));
    }

    #[test]
    fn test_months_csv() {
        let engine = ProjectionEngine::new(ProjectionConfig { monthly_detail: true });
        let result = engine.project(&CalculationParams::new(1_000.0, 10.0, 6.0, 0.0, 1, 4));
        let mut buf = Vec::new();
        write_months_csv(&mut buf, &result.months).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 13);
        assert!(text.lines().nth(3).unwrap().contains(",true,"));
    }

    #[test]
    fn test_comparison_outputs() {
        let rows = ScenarioRunner::new().compare("Draft", &CalculationParams::default(), &[]);

        let table = format_comparison_table(&rows);
        assert!(table.contains("* Draft"));
        assert!(table.contains("$130,000"));
        assert!(table.contains("7% / 20y"));

        let mut buf = Vec::new();
        write_comparison_csv(&mut buf, &rows).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("Scenario,Current,Principal"));
    }

    #[test]
    fn test_summary_and_table_text() {
        let result = project(&CalculationParams::default());
        let summary = format_summary(&result);
        assert!(summary.contains("Total Invested:    $130,000.00"));
        assert!(summary.contains("Interest Share:"));

        let flat = project(&CalculationParams::new(1_000.0, 0.0, 0.0, 0.0, 1, 12));
        assert!(format_summary(&flat).contains("Interest Share:    0.0%"));

        let table = format_breakdown_table(&result.breakdown);
        assert_eq!(table.lines().count(), 22);
    }
}
