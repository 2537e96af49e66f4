//! Error types for pricing and input loading

use thiserror::Error;

/// Errors raised while validating or pricing a loan
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    /// An input the pricing formulas cannot be evaluated on
    #[error("invalid argument `{param}`: {message}")]
    InvalidArgument {
        param: &'static str,
        message: String,
    },

    /// Requested amount falls outside the platform's lending range
    #[error("loan amount {amount} is outside the platform range {min}..={max}")]
    AmountOutOfRange { amount: f64, min: f64, max: f64 },

    /// Requested amount is not a multiple of the platform's amount step
    #[error("loan amount {amount} is not a multiple of {step}")]
    AmountOffStep { amount: f64, step: f64 },

    /// Tenure is not one of the offered repayment terms
    #[error("tenure of {tenure_months} months is not offered (allowed: {allowed:?})")]
    TenureNotOffered { tenure_months: u32, allowed: Vec<u32> },

    /// Rate ladder cannot classify every score
    #[error("invalid rate ladder: {0}")]
    InvalidLadder(String),

    /// Loan limits are inconsistent or non-finite
    #[error("invalid loan limits: {0}")]
    InvalidLimits(String),
}

impl PricingError {
    pub(crate) fn invalid_argument(param: &'static str, message: impl Into<String>) -> Self {
        PricingError::InvalidArgument {
            param,
            message: message.into(),
        }
    }

    /// True for errors caused by the caller's inputs rather than configuration
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, PricingError::InvalidLadder(_) | PricingError::InvalidLimits(_))
    }
}

/// Errors raised while loading configuration or loan applications
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A field held a value outside its enumerated set
    #[error("unknown {field}: {value:?}")]
    UnknownValue { field: &'static str, value: String },

    #[error(transparent)]
    Pricing(#[from] PricingError),
}
