//! Additive point-based risk scoring
//!
//! Four independent factors contribute to a score out of 100:
//! - Credit bureau score (up to 40)
//! - Declared income band (up to 30)
//! - Loan-to-income ratio (up to 20)
//! - Repayment tenure (up to 10)
//!
//! Missing inputs are never rejected; each factor falls back to a fixed default.

use crate::borrower::{BorrowerProfile, IncomeBand};
use crate::loan::LoanRequest;
use serde::{Deserialize, Serialize};

/// Credit points for a borrower with no bureau score
pub const UNSCORED_CREDIT_POINTS: u8 = 15;

/// Per-factor breakdown of a risk score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFactors {
    pub credit: u8,
    pub income: u8,
    pub affordability: u8,
    pub tenure: u8,
}

impl RiskFactors {
    /// Evaluate every factor for a profile and request
    pub fn evaluate(profile: &BorrowerProfile, request: &LoanRequest) -> Self {
        Self {
            credit: credit_points(profile.credit_score()),
            income: income_points(profile.monthly_income_band),
            affordability: affordability_points(loan_to_income_ratio(profile, request)),
            tenure: tenure_points(request.tenure_months),
        }
    }

    /// Total risk score in [0, 100]
    pub fn total(&self) -> u8 {
        self.credit + self.income + self.affordability + self.tenure
    }
}

/// Compute the risk score for a loan request
pub fn compute_risk_score(profile: &BorrowerProfile, request: &LoanRequest) -> u8 {
    RiskFactors::evaluate(profile, request).total()
}

/// Credit bureau factor (max 40)
pub fn credit_points(cibil_score: Option<u16>) -> u8 {
    match cibil_score {
        None => UNSCORED_CREDIT_POINTS,
        Some(s) if s >= 800 => 40,
        Some(s) if s >= 750 => 35,
        Some(s) if s >= 700 => 30,
        Some(s) if s >= 650 => 20,
        Some(_) => 10,
    }
}

/// Income band factor (max 30)
pub fn income_points(band: Option<IncomeBand>) -> u8 {
    match band {
        Some(IncomeBand::Over200k) => 30,
        Some(IncomeBand::From100kTo200k) => 25,
        Some(IncomeBand::From50kTo100k) => 20,
        Some(IncomeBand::From25kTo50k) => 15,
        Some(IncomeBand::From15kTo25k) | None => 10,
    }
}

/// Monthly principal as a fraction of the band's lowest monthly income
pub fn loan_to_income_ratio(profile: &BorrowerProfile, request: &LoanRequest) -> f64 {
    request.monthly_principal() / profile.income_lower_bound()
}

/// Affordability factor (max 20)
pub fn affordability_points(ratio: f64) -> u8 {
    if ratio <= 0.3 {
        20
    } else if ratio <= 0.5 {
        15
    } else if ratio <= 0.7 {
        10
    } else {
        5
    }
}

/// Tenure factor (max 10)
pub fn tenure_points(tenure_months: u32) -> u8 {
    match tenure_months {
        0..=3 => 10,
        4..=6 => 8,
        _ => 5,
    }
}
