//! Price an entire application book from CSV
//!
//! Outputs one priced row per listed application plus a rejection report

use anyhow::{Context, Result};
use clap::Parser;
use lending_engine::book::BookRunner;
use lending_engine::loan::{load_applications, loader::DEFAULT_APPLICATIONS_PATH};
use lending_engine::{PricingConfig, RiskCategory};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(name = "price_book", about = "Price a CSV book of loan applications")]
struct Args {
    /// Applications CSV (ApplicationId,MonthlyIncome,CibilScore,Amount,TenureMonths,Purpose)
    #[arg(long, default_value = DEFAULT_APPLICATIONS_PATH)]
    input: PathBuf,

    /// Priced output CSV
    #[arg(long, default_value = "priced_book_output.csv")]
    output: PathBuf,

    /// Pricing config JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// Only list loans at or better than this category (e.g. B+)
    #[arg(long)]
    min_category: Option<RiskCategory>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

/// One priced row of the output file
#[derive(Debug, Serialize)]
struct OutputRow<'a> {
    #[serde(rename = "ApplicationId")]
    application_id: &'a str,
    #[serde(rename = "Purpose")]
    purpose: &'a str,
    #[serde(rename = "Amount")]
    amount: f64,
    #[serde(rename = "TenureMonths")]
    tenure_months: u32,
    #[serde(rename = "RiskScore")]
    risk_score: u8,
    #[serde(rename = "RiskCategory")]
    risk_category: &'a str,
    #[serde(rename = "AnnualRate")]
    annual_rate: f64,
    #[serde(rename = "LenderRate")]
    lender_rate: f64,
    #[serde(rename = "MonthlyEMI")]
    monthly_emi: f64,
    #[serde(rename = "TotalPayable")]
    total_payable: f64,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    println!("Loading applications from {}...", args.input.display());

    let applications = load_applications(&args.input)
        .with_context(|| format!("Failed to load applications from {}", args.input.display()))?;
    println!("Loaded {} applications in {:?}", applications.len(), start.elapsed());

    let config = match &args.config {
        Some(path) => PricingConfig::from_json_path(path)
            .with_context(|| format!("Failed to load pricing config {}", path.display()))?,
        None => PricingConfig::default_platform(),
    };
    let runner = BookRunner::with_config(config);

    println!("Pricing...");
    let price_start = Instant::now();
    let book = runner.price(&applications);
    println!("Pricing complete in {:?}", price_start.elapsed());

    let worst = args.min_category.unwrap_or(RiskCategory::C);

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    let mut written = 0usize;
    for loan in book.at_least(worst) {
        let pricing = &loan.pricing;
        writer.serialize(OutputRow {
            application_id: &loan.application.application_id,
            purpose: loan.application.purpose.code(),
            amount: pricing.amount,
            tenure_months: pricing.tenure_months,
            risk_score: pricing.risk_score,
            risk_category: pricing.risk_category.code(),
            annual_rate: pricing.annual_interest_rate,
            lender_rate: pricing.lender_rate_pct,
            monthly_emi: pricing.monthly_emi,
            total_payable: pricing.total_payable,
        })?;
        written += 1;
    }
    writer.flush()?;
    println!("Wrote {} priced loans to {}", written, args.output.display());

    let summary = book.summary();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("\nBook Summary:");
    println!("  Listed:          {}", summary.listed);
    println!("  Rejected:        {}", summary.rejected);
    println!("  Total Principal: ₹{:.0}", summary.total_principal);
    println!("  Total Payable:   ₹{:.0}", summary.total_payable);
    println!("  Avg Borrower Rate: {:.2}%", summary.weighted_borrower_rate_pct);
    println!("  Avg Lender Rate:   {:.2}%", summary.weighted_lender_rate_pct);

    println!("\nBy Category:");
    for category in RiskCategory::ALL {
        let count = summary.by_category.get(&category).copied().unwrap_or(0);
        println!("  {:<16} {:>5}", category.to_string(), count);
    }

    if !book.rejected.is_empty() {
        println!("\nRejected:");
        for rejected in &book.rejected {
            println!("  {}: {}", rejected.application.application_id, rejected.reason);
        }
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
