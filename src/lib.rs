//! Lending Engine - risk-based loan pricing for a peer-to-peer lending platform
//!
//! This library provides:
//! - Point-based borrower risk scoring (credit score, income, affordability, tenure)
//! - Data-driven risk category ladder mapping scores to interest rates
//! - EMI amortization and month-by-month repayment schedules
//! - Platform fee split between platform and lenders
//! - Parallel pricing of application books for the lender marketplace

pub mod error;
pub mod borrower;
pub mod loan;
pub mod pricing;
pub mod config;
pub mod book;

// Re-export commonly used types
pub use error::{LoadError, PricingError};
pub use borrower::{BorrowerProfile, IncomeBand};
pub use loan::{LoanApplication, LoanLimits, LoanPurpose, LoanRequest};
pub use pricing::{evaluate_loan, PricingEngine, PricingResult, RiskCategory, RateLadder};
pub use config::PricingConfig;
pub use book::{BookRunner, PricedBook};
