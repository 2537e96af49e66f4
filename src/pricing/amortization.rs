//! Fixed-rate EMI amortization
//!
//! EMI = P × r × (1 + r)^n / [(1 + r)^n - 1], with r = annual_rate_pct / 100 / 12,
//! evaluated as P × r / [1 - (1 + r)^-n]

use crate::error::PricingError;
use serde::{Deserialize, Serialize};

/// Rounded repayment summary for a loan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Amortization {
    /// Monthly installment, rounded to the nearest unit
    pub monthly_emi: f64,

    /// Sum of all installments, rounded to the nearest unit
    pub total_payable: f64,
}

/// Convert an annual percentage rate to a monthly decimal rate
pub fn monthly_rate(annual_rate_pct: f64) -> f64 {
    annual_rate_pct / 100.0 / 12.0
}

/// Unrounded monthly installment
pub fn emi(principal: f64, annual_rate_pct: f64, tenure_months: u32) -> Result<f64, PricingError> {
    if tenure_months < 1 {
        return Err(PricingError::invalid_argument(
            "tenure_months",
            "tenure must be at least one month",
        ));
    }
    if !principal.is_finite() {
        return Err(PricingError::invalid_argument("principal", "principal must be finite"));
    }
    if !annual_rate_pct.is_finite() || annual_rate_pct < 0.0 {
        return Err(PricingError::invalid_argument(
            "annual_rate_pct",
            format!("rate must be a non-negative percentage, got {}", annual_rate_pct),
        ));
    }

    let r = monthly_rate(annual_rate_pct);
    let n = tenure_months as f64;

    // Zero rate: straight-line repayment
    if r == 0.0 {
        return Ok(principal / n);
    }

    // Negative exponent form stays finite as n grows
    let installment = principal * r / (1.0 - (1.0 + r).powf(-n));
    if !installment.is_finite() {
        return Err(PricingError::invalid_argument(
            "tenure_months",
            format!("no finite installment for {} months at {}%", tenure_months, annual_rate_pct),
        ));
    }
    Ok(installment)
}

/// Compute the rounded EMI and total payable for a loan
///
/// `total_payable` is rounded from the unrounded EMI times the tenure, so it
/// can differ by a few units from `monthly_emi * tenure_months`.
pub fn amortize(principal: f64, annual_rate_pct: f64, tenure_months: u32) -> Result<Amortization, PricingError> {
    let installment = emi(principal, annual_rate_pct, tenure_months)?;

    Ok(Amortization {
        monthly_emi: installment.round(),
        total_payable: (installment * tenure_months as f64).round(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_regression_fixture_50000_18pct_12m() {
        let result = amortize(50_000.0, 18.0, 12).unwrap();
        assert_eq!(result.monthly_emi, 4584.0);
        assert_eq!(result.total_payable, 55008.0);
    }

    #[test]
    fn test_platform_tenures() {
        let result = amortize(50_000.0, 15.0, 3).unwrap();
        assert_eq!(result.monthly_emi, 17085.0);
        assert_eq!(result.total_payable, 51255.0);

        let result = amortize(100_000.0, 28.0, 6).unwrap();
        assert_eq!(result.monthly_emi, 18054.0);
        assert_eq!(result.total_payable, 108324.0);
    }

    #[test]
    fn test_single_month_is_one_month_interest() {
        let installment = emi(1_000.0, 22.0, 1).unwrap();
        assert_abs_diff_eq!(installment, 1_000.0 * (1.0 + 0.22 / 12.0), epsilon = 1e-9);
        assert_eq!(amortize(1_000.0, 22.0, 1).unwrap().monthly_emi, 1018.0);
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        let result = amortize(60_000.0, 0.0, 6).unwrap();
        assert_eq!(result.monthly_emi, 10_000.0);
        assert_eq!(result.total_payable, 60_000.0);
    }

    #[test]
    fn test_zero_tenure_is_invalid_argument() {
        let err = amortize(50_000.0, 18.0, 0).unwrap_err();
        assert!(matches!(err, PricingError::InvalidArgument { param: "tenure_months", .. }));
    }

    #[test]
    fn test_very_long_tenure_stays_finite() {
        // (1 + r)^n overflows well before these tenures
        for tenure in [40_000u32, 3_000_000_000, u32::MAX] {
            let result = amortize(50_000.0, 18.0, tenure).unwrap();
            assert!(result.monthly_emi.is_finite() && result.monthly_emi > 0.0);
            assert!(result.total_payable.is_finite() && result.total_payable > 0.0);
            // Converges on interest-only: 50000 * 0.015
            assert_eq!(result.monthly_emi, 750.0);
        }
    }

    #[test]
    fn test_non_finite_inputs_rejected() {
        assert!(amortize(f64::INFINITY, 18.0, 3).is_err());
        assert!(amortize(50_000.0, f64::NAN, 3).is_err());
        assert!(amortize(50_000.0, -1.0, 3).is_err());
    }
}
