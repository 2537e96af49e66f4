//! Loan requests, platform limits and application loading

mod request;
mod limits;
pub mod loader;

pub use request::{LoanRequest, LoanPurpose, LoanApplication};
pub use limits::LoanLimits;
pub use loader::{load_applications, load_applications_from_reader};
