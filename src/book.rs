//! Loan book pricing for the lender marketplace
//!
//! Prices a batch of applications in parallel against one engine, separating
//! applications that fail platform limits from those that can be listed.

use crate::config::PricingConfig;
use crate::error::PricingError;
use crate::loan::LoanApplication;
use crate::pricing::{PricingEngine, PricingResult, RiskCategory};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An application with its pricing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricedLoan {
    pub application: LoanApplication,
    pub pricing: PricingResult,
}

/// An application that could not be listed
#[derive(Debug, Clone)]
pub struct RejectedApplication {
    pub application: LoanApplication,
    pub reason: PricingError,
}

/// Output of pricing a book
#[derive(Debug, Clone, Default)]
pub struct PricedBook {
    pub priced: Vec<PricedLoan>,
    pub rejected: Vec<RejectedApplication>,
}

impl PricedBook {
    /// Listed loans in a given category, in input order
    pub fn in_category(&self, category: RiskCategory) -> impl Iterator<Item = &PricedLoan> {
        self.priced
            .iter()
            .filter(move |loan| loan.pricing.risk_category == category)
    }

    /// Listed loans at or better than `worst` (e.g. B+ keeps A+, A and B+)
    pub fn at_least(&self, worst: RiskCategory) -> impl Iterator<Item = &PricedLoan> {
        self.priced
            .iter()
            .filter(move |loan| loan.pricing.risk_category <= worst)
    }

    /// Get summary statistics over the listed loans
    pub fn summary(&self) -> BookSummary {
        let total_principal: f64 = self.priced.iter().map(|l| l.pricing.amount).sum();
        let total_payable: f64 = self.priced.iter().map(|l| l.pricing.total_payable).sum();

        let mut by_category = BTreeMap::new();
        for loan in &self.priced {
            *by_category.entry(loan.pricing.risk_category).or_insert(0) += 1;
        }

        BookSummary {
            listed: self.priced.len(),
            rejected: self.rejected.len(),
            total_principal,
            total_payable,
            weighted_borrower_rate_pct: self.amount_weighted(total_principal, |p| p.annual_interest_rate),
            weighted_lender_rate_pct: self.amount_weighted(total_principal, |p| p.lender_rate_pct),
            by_category,
        }
    }

    fn amount_weighted(&self, total_principal: f64, rate: impl Fn(&PricingResult) -> f64) -> f64 {
        if total_principal <= 0.0 {
            return 0.0;
        }
        self.priced
            .iter()
            .map(|l| rate(&l.pricing) * l.pricing.amount)
            .sum::<f64>()
            / total_principal
    }
}

/// Summary statistics for a priced book
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookSummary {
    pub listed: usize,
    pub rejected: usize,
    pub total_principal: f64,
    pub total_payable: f64,
    /// Amount-weighted borrower rate
    pub weighted_borrower_rate_pct: f64,
    /// Amount-weighted lender rate
    pub weighted_lender_rate_pct: f64,
    pub by_category: BTreeMap<RiskCategory, usize>,
}

/// Pre-configured runner for pricing many applications
#[derive(Debug, Clone, Default)]
pub struct BookRunner {
    engine: PricingEngine,
}

impl BookRunner {
    /// Create runner with the built-in platform configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PricingConfig) -> Self {
        Self {
            engine: PricingEngine::new(config),
        }
    }

    /// Price every application in parallel, preserving input order
    pub fn price(&self, applications: &[LoanApplication]) -> PricedBook {
        let outcomes: Vec<Result<PricingResult, PricingError>> = applications
            .par_iter()
            .map(|application| self.engine.quote(application))
            .collect();

        let mut book = PricedBook::default();
        for (application, outcome) in applications.iter().zip(outcomes) {
            match outcome {
                Ok(pricing) => book.priced.push(PricedLoan {
                    application: application.clone(),
                    pricing,
                }),
                Err(reason) => {
                    log::warn!("Rejected application {}: {}", application.application_id, reason);
                    book.rejected.push(RejectedApplication {
                        application: application.clone(),
                        reason,
                    });
                }
            }
        }

        log::info!(
            "Priced book: {} listed, {} rejected",
            book.priced.len(),
            book.rejected.len()
        );
        book
    }
}
