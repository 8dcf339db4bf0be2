//! Compound Growth CLI
//!
//! Command-line interface for running projections and managing saved scenarios

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs::File;
use std::path::{Path, PathBuf};

use compound_growth::config::AppPaths;
use compound_growth::params::{
    load_named_params, CalculationParams, CompoundingFrequency, FREQUENCY_OPTIONS,
};
use compound_growth::projection::{CompoundingSchedule, ProjectionConfig, ProjectionEngine};
use compound_growth::report;
use compound_growth::scenario::{ScenarioRunner, ScenarioStore};

#[derive(Parser)]
#[command(
    name = "compound-growth",
    version,
    about = "Compound interest projections with monthly contributions and inflation"
)]
struct Cli {
    /// Scenario store file (defaults to scenarios.json in the data directory)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
struct ParamArgs {
    /// Starting balance
    #[arg(long, default_value_t = 10_000.0)]
    principal: f64,

    /// Contribution added at the end of every month
    #[arg(long, default_value_t = 500.0, allow_negative_numbers = true)]
    monthly: f64,

    /// Annual interest rate, percent
    #[arg(long, default_value_t = 7.0, allow_negative_numbers = true)]
    rate: f64,

    /// Annual inflation rate, percent
    #[arg(long, default_value_t = 2.5, allow_negative_numbers = true)]
    inflation: f64,

    /// Years to project
    #[arg(long, default_value_t = 20)]
    years: u32,

    /// Compounding frequency: annually, quarterly, monthly, daily, or a count per year
    #[arg(long, default_value = "monthly", value_parser = parse_frequency)]
    frequency: u32,
}

impl ParamArgs {
    fn to_params(&self) -> CalculationParams {
        CalculationParams::new(
            self.principal,
            self.monthly,
            self.rate,
            self.inflation,
            self.years,
            self.frequency,
        )
    }
}

fn parse_frequency(raw: &str) -> Result<u32, String> {
    if let Ok(times) = raw.trim().parse::<u32>() {
        return Ok(times);
    }
    CompoundingFrequency::from_label(raw)
        .map(|f| f.times_per_year())
        .ok_or_else(|| format!("unknown frequency '{}'", raw))
}

#[derive(Subcommand)]
enum Commands {
    /// Project a single parameter set
    Project {
        #[command(flatten)]
        params: ParamArgs,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Write the yearly breakdown to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Write the month-by-month trace to a CSV file
        #[arg(long)]
        months_csv: Option<PathBuf>,
    },

    /// Manage saved scenarios
    #[command(subcommand)]
    Scenario(ScenarioCommands),

    /// Compare a draft parameter set against all saved scenarios
    Compare {
        /// Name shown for the draft
        #[arg(long, default_value = "My Strategy")]
        name: String,

        #[command(flatten)]
        params: ParamArgs,

        /// Print rows as JSON
        #[arg(long)]
        json: bool,

        /// Write the comparison to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Project every row of a scenarios CSV
    Batch {
        /// CSV with Name, InitialPrincipal, MonthlyContribution, InterestRate,
        /// InflationRate, Years and CompoundFrequency columns
        file: PathBuf,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// List supported compounding frequencies
    Frequencies,
}

#[derive(Subcommand)]
enum ScenarioCommands {
    /// Save a parameter set under a name
    Save {
        /// Scenario name (omitted or blank gets "Scenario N")
        name: Option<String>,

        #[command(flatten)]
        params: ParamArgs,
    },

    /// List saved scenarios
    List,

    /// Project a saved scenario
    Show {
        id: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a saved scenario
    Delete { id: String },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let store_path = cli
        .store
        .clone()
        .unwrap_or_else(|| AppPaths::from_env().scenarios_file());

    match cli.command {
        Commands::Project { params, json, csv, months_csv } => {
            let params = params.to_params();
            params.validate()?;

            let engine = ProjectionEngine::new(ProjectionConfig {
                monthly_detail: months_csv.is_some(),
            });
            let result = engine.project(&params);

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", report::format_breakdown_table(&result.breakdown));
                println!();
                print!("{}", report::format_summary(&result));
            }

            if let Some(path) = csv {
                let file = File::create(&path)
                    .with_context(|| format!("Unable to create {}", path.display()))?;
                report::write_breakdown_csv(file, &result.breakdown)?;
                eprintln!("Breakdown written to: {}", path.display());
            }
            if let Some(path) = months_csv {
                let file = File::create(&path)
                    .with_context(|| format!("Unable to create {}", path.display()))?;
                report::write_months_csv(file, &result.months)?;
                eprintln!("Monthly trace written to: {}", path.display());
            }
        }

        Commands::Scenario(cmd) => {
            let mut store = open_store(&store_path)?;
            handle_scenario_command(&mut store, cmd)?;
        }

        Commands::Compare { name, params, json, csv } => {
            let params = params.to_params();
            params.validate()?;

            let store = open_store(&store_path)?;
            let rows = ScenarioRunner::new().compare(&name, &params, store.scenarios());

            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                print!("{}", report::format_comparison_table(&rows));
            }

            if let Some(path) = csv {
                let file = File::create(&path)
                    .with_context(|| format!("Unable to create {}", path.display()))?;
                report::write_comparison_csv(file, &rows)?;
                eprintln!("Comparison written to: {}", path.display());
            }
        }

        Commands::Batch { file, json } => {
            let sets = load_named_params(&file)
                .with_context(|| format!("Failed to load {}", file.display()))?;
            for set in &sets {
                set.params
                    .validate()
                    .with_context(|| format!("Scenario '{}'", set.name))?;
            }

            let results = ScenarioRunner::new().run_named(&sets);

            if json {
                let out: Vec<_> = results
                    .iter()
                    .map(|(name, result)| serde_json::json!({ "name": name, "result": result }))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!(
                    "{:<24} {:>16} {:>16} {:>16}",
                    "Scenario", "Total Invested", "Future Value", "Real Value"
                );
                println!("{}", "-".repeat(75));
                for (name, result) in &results {
                    println!(
                        "{:<24} {:>16} {:>16} {:>16}",
                        name,
                        report::format_money(result.total_invested, 2),
                        report::format_money(result.future_value, 2),
                        report::format_money(result.future_value_real, 2),
                    );
                }
            }
        }

        Commands::Frequencies => {
            for freq in FREQUENCY_OPTIONS {
                println!(
                    "{:<10} {:>4} per year  {}",
                    freq.label(),
                    freq.times_per_year(),
                    describe_schedule(freq.times_per_year())
                );
            }
        }
    }

    Ok(())
}

fn open_store(path: &Path) -> Result<ScenarioStore> {
    ScenarioStore::open(path)
        .with_context(|| format!("Failed to open scenario store {}", path.display()))
}

/// How often pending interest is folded in for a raw frequency
fn describe_schedule(compound_frequency: u32) -> String {
    match CompoundingSchedule::from_frequency(compound_frequency).interval_months() {
        Some(1) => "capitalized every month".to_string(),
        Some(n) => format!("capitalized every {} months", n),
        None => "never capitalized".to_string(),
    }
}

fn handle_scenario_command(store: &mut ScenarioStore, cmd: ScenarioCommands) -> Result<()> {
    match cmd {
        ScenarioCommands::Save { name, params } => {
            let params = params.to_params();
            params.validate()?;

            let saved = store.add(name.as_deref().unwrap_or(""), params);
            println!("Saved '{}' (id {})", saved.name, saved.id);
            store.save()?;
        }

        ScenarioCommands::List => {
            if store.is_empty() {
                println!("No saved scenarios in {}", store.path().display());
                return Ok(());
            }
            println!(
                "{:<16} {:<24} {:>12} {:>10} {:>8} {:>6} {:<10}",
                "ID", "Name", "Principal", "Monthly", "Rate", "Years", "Frequency"
            );
            for s in store.scenarios() {
                let freq = s
                    .params
                    .frequency()
                    .map(|f| f.label().to_string())
                    .unwrap_or_else(|| format!("{}/yr", s.params.compound_frequency));
                println!(
                    "{:<16} {:<24} {:>12} {:>10} {:>7}% {:>6} {:<10}",
                    s.id,
                    s.name,
                    report::format_money(s.params.initial_principal, 0),
                    report::format_money(s.params.monthly_contribution, 0),
                    s.params.interest_rate,
                    s.params.years,
                    freq,
                );
            }
        }

        ScenarioCommands::Show { id, json } => {
            let scenario = store
                .get(&id)
                .ok_or_else(|| compound_growth::GrowthError::ScenarioNotFound(id.clone()))?;
            let result = ScenarioRunner::new().run(&scenario.params);

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!(
                    "{} (saved {})",
                    scenario.name,
                    scenario.created_at.format("%Y-%m-%d %H:%M UTC")
                );
                println!();
                print!("{}", report::format_breakdown_table(&result.breakdown));
                println!();
                print!("{}", report::format_summary(&result));
            }
        }

        ScenarioCommands::Delete { id } => {
            let removed = store.delete(&id)?;
            store.save()?;
            println!("Deleted '{}'", removed.name);
        }
    }

    Ok(())
}
