//! CSV-based configuration loader
//!
//! Loads the rate ladder from `rate_ladder.csv` in a config directory

use crate::error::LoadError;
use crate::pricing::{RateLadder, RiskCategory, RiskTier};
use std::fs::File;
use std::path::Path;

/// Default path to the configuration directory
pub const DEFAULT_CONFIG_PATH: &str = "data";

/// Raw CSV row of the rate ladder
#[derive(Debug, serde::Deserialize)]
struct LadderRow {
    #[serde(rename = "MinScore")]
    min_score: u8,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "AnnualRate")]
    annual_rate: f64,
}

/// Load the rate ladder from `rate_ladder.csv`
pub fn load_rate_ladder(path: &Path) -> Result<RateLadder, LoadError> {
    let file = File::open(path.join("rate_ladder.csv"))?;
    load_rate_ladder_from_reader(file)
}

/// Load a rate ladder from any reader
pub fn load_rate_ladder_from_reader<R: std::io::Read>(reader: R) -> Result<RateLadder, LoadError> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut tiers = Vec::new();

    for result in reader.deserialize() {
        let row: LadderRow = result?;
        let category: RiskCategory = row.category.parse()?;
        tiers.push(RiskTier::new(row.min_score, category, row.annual_rate));
    }

    Ok(RateLadder::new(tiers)?)
}
