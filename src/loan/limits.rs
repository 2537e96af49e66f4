//! Platform lending limits enforced at intake

use super::LoanRequest;
use crate::error::PricingError;
use serde::{Deserialize, Serialize};

/// Amount range, amount granularity and offered tenures
///
/// Deserialized limits go through [`LoanLimits::check`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLoanLimits")]
pub struct LoanLimits {
    /// Smallest principal the platform lends
    pub min_amount: f64,

    /// Largest principal the platform lends
    pub max_amount: f64,

    /// Principal must be a multiple of this (0 disables the check)
    pub amount_step: f64,

    /// Offered repayment terms in months
    pub allowed_tenures: Vec<u32>,
}

/// Unchecked wire form of [`LoanLimits`]
#[derive(Deserialize)]
struct RawLoanLimits {
    min_amount: f64,
    max_amount: f64,
    amount_step: f64,
    allowed_tenures: Vec<u32>,
}

impl TryFrom<RawLoanLimits> for LoanLimits {
    type Error = PricingError;

    fn try_from(raw: RawLoanLimits) -> Result<Self, Self::Error> {
        let limits = LoanLimits {
            min_amount: raw.min_amount,
            max_amount: raw.max_amount,
            amount_step: raw.amount_step,
            allowed_tenures: raw.allowed_tenures,
        };
        limits.check()?;
        Ok(limits)
    }
}

impl Default for LoanLimits {
    fn default() -> Self {
        Self {
            min_amount: 1_000.0,
            max_amount: 500_000.0,
            amount_step: 1_000.0,
            allowed_tenures: vec![1, 3, 6],
        }
    }
}

impl LoanLimits {
    /// Reject limits no request could satisfy consistently
    pub fn check(&self) -> Result<(), PricingError> {
        if !self.min_amount.is_finite() || !self.max_amount.is_finite() || !self.amount_step.is_finite() {
            return Err(PricingError::InvalidLimits(format!(
                "non-finite bound (min {}, max {}, step {})",
                self.min_amount, self.max_amount, self.amount_step
            )));
        }
        if self.min_amount > self.max_amount {
            return Err(PricingError::InvalidLimits(format!(
                "min_amount {} exceeds max_amount {}",
                self.min_amount, self.max_amount
            )));
        }
        if self.amount_step < 0.0 {
            return Err(PricingError::InvalidLimits(format!(
                "amount_step {} is negative",
                self.amount_step
            )));
        }
        if self.allowed_tenures.is_empty() {
            return Err(PricingError::InvalidLimits("no tenures offered".into()));
        }
        if self.allowed_tenures.contains(&0) {
            return Err(PricingError::InvalidLimits("zero-month tenure offered".into()));
        }
        Ok(())
    }

    /// Check a request against the platform limits
    pub fn validate(&self, request: &LoanRequest) -> Result<(), PricingError> {
        let amount = request.amount;
        if !amount.is_finite() || amount < self.min_amount || amount > self.max_amount {
            return Err(PricingError::AmountOutOfRange {
                amount,
                min: self.min_amount,
                max: self.max_amount,
            });
        }

        if self.amount_step > 0.0 {
            let steps = amount / self.amount_step;
            if (steps - steps.round()).abs() > 1e-9 {
                return Err(PricingError::AmountOffStep {
                    amount,
                    step: self.amount_step,
                });
            }
        }

        if !self.allowed_tenures.contains(&request.tenure_months) {
            return Err(PricingError::TenureNotOffered {
                tenure_months: request.tenure_months,
                allowed: self.allowed_tenures.clone(),
            });
        }

        Ok(())
    }
}
