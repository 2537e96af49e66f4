//! Pricing pipeline: risk scorer -> classifier -> amortization

use super::amortization::amortize;
use super::classifier::RiskCategory;
use super::risk::RiskFactors;
use super::schedule::RepaymentSchedule;
use crate::borrower::BorrowerProfile;
use crate::config::PricingConfig;
use crate::error::PricingError;
use crate::loan::{LoanApplication, LoanRequest};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Priced outcome for one profile and request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    pub amount: f64,
    pub tenure_months: u32,

    /// Risk score in [0, 100]
    pub risk_score: u8,

    /// Per-factor breakdown of `risk_score`
    pub factors: RiskFactors,

    pub risk_category: RiskCategory,

    /// Borrower rate in percent per annum
    pub annual_interest_rate: f64,

    /// Platform share of the borrower rate (percentage points)
    pub platform_fee_pct: f64,

    /// Rate earned by lenders in percent per annum
    pub lender_rate_pct: f64,

    pub monthly_emi: f64,
    pub total_payable: f64,
    pub total_interest: f64,
}

/// Stateless pricing engine over a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    config: PricingConfig,
}

impl PricingEngine {
    /// Create a new pricing engine with the given configuration
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    /// Price a request for a borrower
    ///
    /// Platform limits are not checked here; see [`PricingEngine::quote`].
    /// Fails only on a zero tenure or a non-positive / non-finite amount.
    pub fn evaluate_loan(
        &self,
        profile: &BorrowerProfile,
        request: &LoanRequest,
    ) -> Result<PricingResult, PricingError> {
        validate_request(request)?;

        let factors = RiskFactors::evaluate(profile, request);
        let risk_score = factors.total();
        let tier = self.config.ladder.classify(risk_score);
        let rate = tier.annual_rate_pct;
        let amortization = amortize(request.amount, rate, request.tenure_months)?;

        log::debug!(
            "priced {} over {}m: score={} ({:?}) category={} rate={}%",
            request.amount,
            request.tenure_months,
            risk_score,
            factors,
            tier.category.code(),
            rate
        );

        Ok(PricingResult {
            amount: request.amount,
            tenure_months: request.tenure_months,
            risk_score,
            factors,
            risk_category: tier.category,
            annual_interest_rate: rate,
            platform_fee_pct: self.config.fees.fee_for(rate),
            lender_rate_pct: self.config.fees.lender_rate(rate),
            monthly_emi: amortization.monthly_emi,
            total_payable: amortization.total_payable,
            total_interest: amortization.total_payable - request.amount,
        })
    }

    /// Enforce platform limits, then price the application
    pub fn quote(&self, application: &LoanApplication) -> Result<PricingResult, PricingError> {
        self.config.limits.validate(&application.request)?;
        self.evaluate_loan(&application.profile, &application.request)
    }

    /// Repayment schedule at the rate this engine would charge
    pub fn schedule(
        &self,
        profile: &BorrowerProfile,
        request: &LoanRequest,
        disbursed_on: Option<NaiveDate>,
    ) -> Result<RepaymentSchedule, PricingError> {
        let result = self.evaluate_loan(profile, request)?;
        RepaymentSchedule::build(request.amount, result.annual_interest_rate, request.tenure_months, disbursed_on)
    }
}

fn validate_request(request: &LoanRequest) -> Result<(), PricingError> {
    if request.tenure_months < 1 {
        return Err(PricingError::invalid_argument(
            "tenure_months",
            "tenure must be at least one month",
        ));
    }
    if !request.amount.is_finite() || request.amount <= 0.0 {
        return Err(PricingError::invalid_argument(
            "amount",
            format!("amount must be a positive finite value, got {}", request.amount),
        ));
    }
    Ok(())
}

/// Price a request with the default platform configuration
pub fn evaluate_loan(profile: &BorrowerProfile, request: &LoanRequest) -> Result<PricingResult, PricingError> {
    PricingEngine::default().evaluate_loan(profile, request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::borrower::IncomeBand;
    use crate::loan::LoanPurpose;
    use crate::pricing::{RateLadder, RiskTier};

    #[test]
    fn test_top_profile_prices_at_a_plus() {
        let profile = BorrowerProfile::new(Some(IncomeBand::Over200k), Some(820));
        let result = evaluate_loan(&profile, &LoanRequest::new(25_000.0, 3)).unwrap();

        assert!(result.risk_score >= 90);
        assert_eq!(result.risk_category, RiskCategory::APlus);
        assert_eq!(result.annual_interest_rate, 12.0);
        assert_eq!(result.platform_fee_pct, 2.0);
        assert_eq!(result.lender_rate_pct, 10.0);
        assert_eq!(result.monthly_emi, 8501.0);
        assert_eq!(result.total_payable, 25502.0);
        assert_eq!(result.total_interest, 502.0);
    }

    #[test]
    fn test_unscored_stretched_borrower_is_high_risk() {
        // 60000 / 3 = 20000 per month against the 25000 default: ratio 0.8
        let result = evaluate_loan(&BorrowerProfile::unscored(), &LoanRequest::new(60_000.0, 3)).unwrap();

        assert_eq!(result.factors.affordability, 5);
        assert_eq!(result.risk_score, 15 + 10 + 5 + 10);
        assert_eq!(result.risk_category, RiskCategory::C);
        assert_eq!(result.annual_interest_rate, 28.0);
        assert_eq!(result.platform_fee_pct, 4.0);
        assert_eq!(result.lender_rate_pct, 24.0);
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let engine = PricingEngine::default();
        let profile = BorrowerProfile::new(Some(IncomeBand::From50kTo100k), Some(742));
        let request = LoanRequest::new(150_000.0, 6);

        let first = engine.evaluate_loan(&profile, &request).unwrap();
        let second = engine.evaluate_loan(&profile, &request).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.monthly_emi.to_bits(), second.monthly_emi.to_bits());
        assert_eq!(first.total_payable.to_bits(), second.total_payable.to_bits());
    }

    #[test]
    fn test_zero_tenure_surfaces_invalid_argument() {
        let err = evaluate_loan(&BorrowerProfile::unscored(), &LoanRequest::new(10_000.0, 0)).unwrap_err();
        assert!(matches!(err, PricingError::InvalidArgument { param: "tenure_months", .. }));
    }

    #[test]
    fn test_bad_amount_surfaces_invalid_argument() {
        for amount in [0.0, -5_000.0, f64::NAN, f64::INFINITY] {
            let err = evaluate_loan(&BorrowerProfile::unscored(), &LoanRequest::new(amount, 3)).unwrap_err();
            assert!(matches!(err, PricingError::InvalidArgument { param: "amount", .. }));
        }
    }

    #[test]
    fn test_evaluate_trusts_caller_on_platform_limits() {
        // 12 months is outside the offered set but still prices
        let result = evaluate_loan(&BorrowerProfile::unscored(), &LoanRequest::new(50_000.0, 12)).unwrap();
        assert_eq!(result.factors.tenure, 5);
    }

    #[test]
    fn test_unchecked_long_tenure_prices_finite() {
        // 50000 / 40000 is trivially affordable: 15 + 10 + 20 + 5 -> C at 28%
        let result = evaluate_loan(&BorrowerProfile::unscored(), &LoanRequest::new(50_000.0, 40_000)).unwrap();
        assert_eq!(result.risk_category, RiskCategory::C);
        assert_eq!(result.monthly_emi, 1167.0);
        assert!(result.total_payable.is_finite());
        assert!(result.total_interest.is_finite());
    }

    #[test]
    fn test_quote_enforces_limits() {
        let engine = PricingEngine::default();
        let mut application = LoanApplication {
            application_id: "LA-1".into(),
            profile: BorrowerProfile::new(Some(IncomeBand::From25kTo50k), Some(701)),
            request: LoanRequest::new(50_000.0, 12),
            purpose: LoanPurpose::Medical,
        };
        assert!(matches!(
            engine.quote(&application),
            Err(PricingError::TenureNotOffered { tenure_months: 12, .. })
        ));

        application.request.tenure_months = 3;
        let result = engine.quote(&application).unwrap();
        assert_eq!(result.tenure_months, 3);
    }

    #[test]
    fn test_custom_ladder_changes_rate_only() {
        let ladder = RateLadder::new(vec![RiskTier::new(0, RiskCategory::B, 10.0)]).unwrap();
        let engine = PricingEngine::new(PricingConfig { ladder, ..PricingConfig::default_platform() });

        let profile = BorrowerProfile::new(Some(IncomeBand::Over200k), Some(820));
        let request = LoanRequest::new(25_000.0, 3);
        let custom = engine.evaluate_loan(&profile, &request).unwrap();
        let standard = evaluate_loan(&profile, &request).unwrap();

        assert_eq!(custom.risk_score, standard.risk_score);
        assert_eq!(custom.risk_category, RiskCategory::B);
        assert_eq!(custom.annual_interest_rate, 10.0);
    }

    #[test]
    fn test_schedule_uses_priced_rate() {
        let engine = PricingEngine::default();
        let profile = BorrowerProfile::new(Some(IncomeBand::Over200k), Some(820));
        let schedule = engine.schedule(&profile, &LoanRequest::new(25_000.0, 3), None).unwrap();
        assert_eq!(schedule.annual_rate_pct, 12.0);
        assert_eq!(schedule.rows.len(), 3);
    }
}
