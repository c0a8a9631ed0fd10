//! Household Planner CLI
//!
//! Loads entries, persons, and growth rates from CSV, runs the projection,
//! validates the result, and writes the tabular export.

use std::collections::HashMap;
use std::fs::File;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::{info, warn};

use household_planner::model::loader;
use household_planner::model::FilingStatus;
use household_planner::projection::{validate_all, Projector, TabularExport};
use household_planner::tax::TaxConfig;

#[derive(Parser, Debug)]
#[command(name = "household-planner", version, about = "Project household finances year by year")]
struct Args {
    /// Entries CSV (Owner,ItemType,Description,Value,StartYear,EndYear)
    #[arg(long)]
    entries: PathBuf,

    /// Persons CSV (Name,BirthYear)
    #[arg(long)]
    persons: PathBuf,

    /// Growth rates CSV (ItemType,Rate); missing types default to 0%
    #[arg(long)]
    rates: Option<PathBuf>,

    /// Filing status (single, mfj, mfs, hoh, and common aliases)
    #[arg(long, default_value = "single")]
    filing_status: String,

    /// Treat earned income as self-employment income for payroll taxes
    #[arg(long)]
    self_employed: bool,

    /// Output CSV for the metrics-by-years table
    #[arg(long, default_value = "projection.csv")]
    output: PathBuf,

    /// Optional JSON dump of the full summary sequence
    #[arg(long)]
    json: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let filing_status: FilingStatus = args
        .filing_status
        .parse()
        .with_context(|| format!("invalid filing status '{}'", args.filing_status))?;

    let entries = loader::load_entries(&args.entries)
        .with_context(|| format!("loading entries from {}", args.entries.display()))?;
    let persons = loader::load_persons(&args.persons)
        .with_context(|| format!("loading persons from {}", args.persons.display()))?;
    let rates = match &args.rates {
        Some(path) => loader::load_rates(path)
            .with_context(|| format!("loading rates from {}", path.display()))?,
        None => HashMap::new(),
    };

    info!(
        "loaded {} entries, {} persons, {} rates",
        entries.len(),
        persons.len(),
        rates.len()
    );

    let tax = TaxConfig::new_2024(filing_status, args.self_employed);
    let projector = Projector::new(rates, persons, tax);
    let summaries = projector.project(&entries);

    if summaries.is_empty() {
        println!("No entries; nothing to project.");
        return Ok(());
    }

    let report = validate_all(&summaries);
    if !report.ok {
        for diagnostic in &report.diagnostics {
            warn!("{diagnostic}");
        }
    }

    println!(
        "{:>6} {:>14} {:>14} {:>14} {:>14} {:>14} {:>12}",
        "Year", "Income", "Expenses", "Withdrawals", "Taxes", "Qualified", "Deficit"
    );
    println!("{}", "-".repeat(94));
    for s in &summaries {
        let withdrawals = s.totals.rmd_withdrawal
            + s.totals.qualified_withdrawal
            + s.totals.non_qualified_withdrawal
            + s.totals.roth_withdrawal
            + s.totals.cash_withdrawal;
        println!(
            "{:>6} {:>14.2} {:>14.2} {:>14.2} {:>14.2} {:>14.2} {:>12.2}",
            s.year,
            s.totals.income,
            s.totals.expenses,
            withdrawals,
            s.totals.total_taxes(),
            s.totals.qualified_balance,
            s.totals.deficit,
        );
    }

    let export = TabularExport::from_summaries(&summaries);
    let file = File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    export.write_csv(file)?;
    println!("\nTabular export written to: {}", args.output.display());

    if let Some(path) = &args.json {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(file, &summaries)?;
        println!("Summary sequence written to: {}", path.display());
    }

    Ok(())
}
