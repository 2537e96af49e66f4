//! Loan request and application structures

use crate::borrower::BorrowerProfile;
use crate::error::LoadError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Requested loan parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanRequest {
    /// Principal requested
    pub amount: f64,

    /// Repayment term in months
    pub tenure_months: u32,
}

impl LoanRequest {
    pub fn new(amount: f64, tenure_months: u32) -> Self {
        Self { amount, tenure_months }
    }

    /// Principal repaid per month, ignoring interest
    pub fn monthly_principal(&self) -> f64 {
        self.amount / self.tenure_months as f64
    }
}

/// Stated reason for borrowing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanPurpose {
    Personal,
    Medical,
    Education,
    Business,
    /// Debt consolidation
    Debt,
    /// Home improvement
    Home,
    Travel,
    Other,
}

impl LoanPurpose {
    pub const ALL: [LoanPurpose; 8] = [
        LoanPurpose::Personal,
        LoanPurpose::Medical,
        LoanPurpose::Education,
        LoanPurpose::Business,
        LoanPurpose::Debt,
        LoanPurpose::Home,
        LoanPurpose::Travel,
        LoanPurpose::Other,
    ];

    /// Code stored with the application
    pub fn code(&self) -> &'static str {
        match self {
            LoanPurpose::Personal => "personal",
            LoanPurpose::Medical => "medical",
            LoanPurpose::Education => "education",
            LoanPurpose::Business => "business",
            LoanPurpose::Debt => "debt",
            LoanPurpose::Home => "home",
            LoanPurpose::Travel => "travel",
            LoanPurpose::Other => "other",
        }
    }

    /// Label shown to lenders browsing the marketplace
    pub fn label(&self) -> &'static str {
        match self {
            LoanPurpose::Personal => "Personal Expenses",
            LoanPurpose::Medical => "Medical Emergency",
            LoanPurpose::Education => "Education",
            LoanPurpose::Business => "Business/Startup",
            LoanPurpose::Debt => "Debt Consolidation",
            LoanPurpose::Home => "Home Improvement",
            LoanPurpose::Travel => "Travel",
            LoanPurpose::Other => "Other",
        }
    }
}

impl fmt::Display for LoanPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LoanPurpose {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_lowercase();
        LoanPurpose::ALL
            .into_iter()
            .find(|p| p.code() == code)
            .ok_or_else(|| LoadError::UnknownValue {
                field: "loan purpose",
                value: s.to_string(),
            })
    }
}

/// A borrower's submitted loan application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanApplication {
    /// Application reference
    pub application_id: String,

    pub profile: BorrowerProfile,

    pub request: LoanRequest,

    pub purpose: LoanPurpose,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purpose_parses_form_codes() {
        assert_eq!("debt".parse::<LoanPurpose>().unwrap(), LoanPurpose::Debt);
        assert_eq!(" Medical ".parse::<LoanPurpose>().unwrap(), LoanPurpose::Medical);
        assert!("".parse::<LoanPurpose>().is_err());
        assert!("yacht".parse::<LoanPurpose>().is_err());
    }

    #[test]
    fn test_monthly_principal() {
        let request = LoanRequest::new(60_000.0, 6);
        assert_eq!(request.monthly_principal(), 10_000.0);
    }
}
