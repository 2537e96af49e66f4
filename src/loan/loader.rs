//! Load loan applications from CSV exports of the intake form

use super::{LoanApplication, LoanPurpose, LoanRequest};
use crate::borrower::{BorrowerProfile, IncomeBand};
use crate::error::LoadError;
use csv::Reader;
use std::path::Path;

/// Sample application book shipped with the repository
pub const DEFAULT_APPLICATIONS_PATH: &str = "data/sample_applications.csv";

/// Raw CSV row matching the application export columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "ApplicationId")]
    application_id: String,
    #[serde(rename = "MonthlyIncome")]
    monthly_income: String,
    #[serde(rename = "CibilScore")]
    cibil_score: Option<u16>,
    #[serde(rename = "Amount")]
    amount: f64,
    #[serde(rename = "TenureMonths")]
    tenure_months: u32,
    #[serde(rename = "Purpose")]
    purpose: String,
}

impl CsvRow {
    fn to_application(self) -> Result<LoanApplication, LoadError> {
        let income = self.monthly_income.trim();
        let monthly_income_band = if income.is_empty() {
            None
        } else {
            Some(income.parse::<IncomeBand>()?)
        };

        Ok(LoanApplication {
            application_id: self.application_id,
            profile: BorrowerProfile::new(monthly_income_band, self.cibil_score),
            request: LoanRequest::new(self.amount, self.tenure_months),
            purpose: self.purpose.parse::<LoanPurpose>()?,
        })
    }
}

/// Load all applications from a CSV file
pub fn load_applications<P: AsRef<Path>>(path: P) -> Result<Vec<LoanApplication>, LoadError> {
    let path = path.as_ref();
    let applications = read_applications(Reader::from_path(path)?)?;
    log::info!("Loaded {} applications from {}", applications.len(), path.display());
    Ok(applications)
}

/// Load applications from any reader (e.g., request body, string buffer)
pub fn load_applications_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<LoanApplication>, LoadError> {
    read_applications(Reader::from_reader(reader))
}

fn read_applications<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<LoanApplication>, LoadError> {
    let mut applications = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        applications.push(row.to_application()?);
    }

    Ok(applications)
}

/// Load applications from the bundled sample book
pub fn load_default_applications() -> Result<Vec<LoanApplication>, LoadError> {
    load_applications(DEFAULT_APPLICATIONS_PATH)
}
