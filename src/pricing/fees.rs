//! Platform fee taken out of the borrower rate

use serde::{Deserialize, Serialize};

/// Split of the borrower rate between platform and lenders
///
/// Loans priced at or above `high_risk_threshold_pct` carry the higher fee.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlatformFees {
    pub high_risk_threshold_pct: f64,
    pub high_risk_fee_pct: f64,
    pub standard_fee_pct: f64,
}

impl Default for PlatformFees {
    fn default() -> Self {
        Self {
            high_risk_threshold_pct: 20.0,
            high_risk_fee_pct: 4.0,
            standard_fee_pct: 2.0,
        }
    }
}

impl PlatformFees {
    /// Fee in percentage points for a borrower rate
    pub fn fee_for(&self, annual_rate_pct: f64) -> f64 {
        if annual_rate_pct >= self.high_risk_threshold_pct {
            self.high_risk_fee_pct
        } else {
            self.standard_fee_pct
        }
    }

    /// Rate passed through to lenders, never negative
    pub fn lender_rate(&self, annual_rate_pct: f64) -> f64 {
        (annual_rate_pct - self.fee_for(annual_rate_pct)).max(0.0)
    }
}
