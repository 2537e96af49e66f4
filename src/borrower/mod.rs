//! Borrower profile data used for risk scoring

mod data;

pub use data::{BorrowerProfile, IncomeBand, DEFAULT_INCOME_LOWER_BOUND};
