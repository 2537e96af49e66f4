//! Pricing configuration: rate ladder, platform fees and loan limits

pub mod loader;

use crate::error::LoadError;
use crate::loan::LoanLimits;
use crate::pricing::{PlatformFees, RateLadder};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Container for everything the pricing engine is parameterised by
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    #[serde(default)]
    pub ladder: RateLadder,
    #[serde(default)]
    pub fees: PlatformFees,
    #[serde(default)]
    pub limits: LoanLimits,
}

impl PricingConfig {
    /// Built-in platform configuration
    pub fn default_platform() -> Self {
        Self {
            ladder: RateLadder::default(),
            fees: PlatformFees::default(),
            limits: LoanLimits::default(),
        }
    }

    /// Load a full configuration from a JSON file; missing sections use defaults
    pub fn from_json_path(path: &Path) -> Result<Self, LoadError> {
        let file = std::fs::File::open(path)?;
        let config: Self = serde_json::from_reader(std::io::BufReader::new(file))?;
        log::info!("Loaded pricing config from {}", path.display());
        Ok(config)
    }

    /// Load the rate ladder from CSV in the default location (data/)
    pub fn from_csv() -> Result<Self, LoadError> {
        Self::from_csv_path(Path::new(loader::DEFAULT_CONFIG_PATH))
    }

    /// Load the rate ladder from CSV in a specific directory, keeping default fees and limits
    pub fn from_csv_path(path: &Path) -> Result<Self, LoadError> {
        Ok(Self {
            ladder: loader::load_rate_ladder(path)?,
            ..Self::default_platform()
        })
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self::default_platform()
    }
}
