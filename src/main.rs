//! Lending Engine CLI
//!
//! Command-line interface for quoting a single loan

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use lending_engine::{
    BorrowerProfile, IncomeBand, LoanApplication, LoanPurpose, LoanRequest, PricingConfig, PricingEngine,
};
use serde::Serialize;
use std::path::PathBuf;

/// Quote a peer-to-peer loan: risk category, rate, EMI and total payable
#[derive(Debug, Parser)]
#[command(name = "lending_engine", version)]
struct Args {
    /// Principal requested
    #[arg(long, default_value_t = 50_000.0)]
    amount: f64,

    /// Repayment term in months
    #[arg(long, default_value_t = 3)]
    tenure: u32,

    /// CIBIL credit score (omit or 0 for unscored)
    #[arg(long)]
    cibil: Option<u16>,

    /// Monthly income band, e.g. 50000-100000 or 200000+
    #[arg(long)]
    income: Option<IncomeBand>,

    /// Loan purpose code (personal, medical, education, business, debt, home, travel, other)
    #[arg(long, default_value = "personal")]
    purpose: LoanPurpose,

    /// Pricing config JSON (ladder, fees, limits)
    #[arg(long, conflicts_with = "ladder_dir")]
    config: Option<PathBuf>,

    /// Directory containing rate_ladder.csv
    #[arg(long)]
    ladder_dir: Option<PathBuf>,

    /// Price outside the platform amount range and tenure set
    #[arg(long)]
    no_limits: bool,

    /// Print the month-by-month repayment schedule
    #[arg(long)]
    schedule: bool,

    /// Disbursement date for schedule due dates (YYYY-MM-DD)
    #[arg(long)]
    disbursed_on: Option<NaiveDate>,

    /// Emit JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct QuoteOutput<'a> {
    application: &'a LoanApplication,
    pricing: &'a lending_engine::PricingResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    schedule: Option<&'a lending_engine::pricing::RepaymentSchedule>,
}

fn load_config(args: &Args) -> Result<PricingConfig> {
    if let Some(path) = &args.config {
        return PricingConfig::from_json_path(path)
            .with_context(|| format!("Failed to load pricing config {}", path.display()));
    }
    if let Some(dir) = &args.ladder_dir {
        return PricingConfig::from_csv_path(dir)
            .with_context(|| format!("Failed to load rate ladder from {}", dir.display()));
    }
    Ok(PricingConfig::default_platform())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let engine = PricingEngine::new(load_config(&args)?);

    let application = LoanApplication {
        application_id: "CLI".to_string(),
        profile: BorrowerProfile::new(args.income, args.cibil),
        request: LoanRequest::new(args.amount, args.tenure),
        purpose: args.purpose,
    };

    let pricing = if args.no_limits {
        engine.evaluate_loan(&application.profile, &application.request)
    } else {
        engine.quote(&application)
    }
    .context("Failed to price loan")?;

    let schedule = if args.schedule || args.disbursed_on.is_some() {
        Some(lending_engine::pricing::RepaymentSchedule::build(
            pricing.amount,
            pricing.annual_interest_rate,
            pricing.tenure_months,
            args.disbursed_on,
        )?)
    } else {
        None
    };

    if args.json {
        let output = QuoteOutput {
            application: &application,
            pricing: &pricing,
            schedule: schedule.as_ref(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Lending Engine v{}", env!("CARGO_PKG_VERSION"));
    println!("====================\n");

    let income = application
        .profile
        .monthly_income_band
        .map(|b| b.to_string())
        .unwrap_or_else(|| "not declared".to_string());
    let cibil = application
        .profile
        .credit_score()
        .map(|s| s.to_string())
        .unwrap_or_else(|| "unscored".to_string());

    println!("Borrower:");
    println!("  Monthly Income: {}", income);
    println!("  CIBIL Score:    {}", cibil);
    println!("Loan:");
    println!("  Amount:  ₹{:.0}", pricing.amount);
    println!("  Tenure:  {} month{}", pricing.tenure_months, if pricing.tenure_months > 1 { "s" } else { "" });
    println!("  Purpose: {}", application.purpose);
    println!();

    let f = &pricing.factors;
    println!("Risk Score: {}/100", pricing.risk_score);
    println!("  Credit:        {:>3}/40", f.credit);
    println!("  Income:        {:>3}/30", f.income);
    println!("  Affordability: {:>3}/20", f.affordability);
    println!("  Tenure:        {:>3}/10", f.tenure);
    println!("Risk Category: {}", pricing.risk_category);
    println!();

    println!("Pricing:");
    println!("  Interest Rate: {}% p.a.", pricing.annual_interest_rate);
    println!("  Platform Fee:  {}%", pricing.platform_fee_pct);
    println!("  Lender Rate:   {}% p.a.", pricing.lender_rate_pct);
    println!("  Monthly EMI:   ₹{:.0}", pricing.monthly_emi);
    println!("  Total Payable: ₹{:.0}", pricing.total_payable);
    println!("  Interest Cost: ₹{:.0}", pricing.total_interest);

    if let Some(schedule) = &schedule {
        println!("\nRepayment Schedule:");
        println!("{:>3} {:>10} {:>12} {:>10} {:>10} {:>12} {:>12}",
            "#", "Due", "Opening", "Interest", "Principal", "Payment", "Closing");
        println!("{}", "-".repeat(75));
        for row in &schedule.rows {
            let due = row.due_date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string());
            println!("{:>3} {:>10} {:>12.2} {:>10.2} {:>10.2} {:>12.2} {:>12.2}",
                row.installment,
                due,
                row.opening_balance,
                row.interest,
                row.principal,
                row.payment,
                row.closing_balance,
            );
        }
    }

    Ok(())
}
