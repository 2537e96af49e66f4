//! Loan pricing: risk scoring, classification and amortization

pub mod risk;
mod classifier;
mod amortization;
mod fees;
mod schedule;
mod engine;

pub use risk::{compute_risk_score, RiskFactors};
pub use classifier::{classify, RateLadder, RiskCategory, RiskTier, DEFAULT_TIERS};
pub use amortization::{amortize, emi, monthly_rate, Amortization};
pub use fees::PlatformFees;
pub use schedule::{InstallmentRow, RepaymentSchedule, MAX_SCHEDULE_MONTHS};
pub use engine::{evaluate_loan, PricingEngine, PricingResult};
