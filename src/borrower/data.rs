//! Borrower profile structures matching the onboarding form

use crate::error::LoadError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Monthly income assumed when the borrower did not declare a band
pub const DEFAULT_INCOME_LOWER_BOUND: f64 = 25_000.0;

/// Declared monthly income range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncomeBand {
    /// 15000-25000
    #[serde(rename = "15000-25000")]
    From15kTo25k,
    /// 25000-50000
    #[serde(rename = "25000-50000")]
    From25kTo50k,
    /// 50000-100000
    #[serde(rename = "50000-100000")]
    From50kTo100k,
    /// 100000-200000
    #[serde(rename = "100000-200000")]
    From100kTo200k,
    /// 200000+
    #[serde(rename = "200000+")]
    Over200k,
}

impl IncomeBand {
    pub const ALL: [IncomeBand; 5] = [
        IncomeBand::From15kTo25k,
        IncomeBand::From25kTo50k,
        IncomeBand::From50kTo100k,
        IncomeBand::From100kTo200k,
        IncomeBand::Over200k,
    ];

    /// Get the string representation used by the onboarding form
    pub fn as_str(&self) -> &'static str {
        match self {
            IncomeBand::From15kTo25k => "15000-25000",
            IncomeBand::From25kTo50k => "25000-50000",
            IncomeBand::From50kTo100k => "50000-100000",
            IncomeBand::From100kTo200k => "100000-200000",
            IncomeBand::Over200k => "200000+",
        }
    }

    /// Lowest monthly income in the band, used as the affordability denominator
    pub fn lower_bound(&self) -> f64 {
        match self {
            IncomeBand::From15kTo25k => 15_000.0,
            IncomeBand::From25kTo50k => 25_000.0,
            IncomeBand::From50kTo100k => 50_000.0,
            IncomeBand::From100kTo200k => 100_000.0,
            IncomeBand::Over200k => 200_000.0,
        }
    }
}

impl fmt::Display for IncomeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IncomeBand {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IncomeBand::ALL
            .into_iter()
            .find(|band| band.as_str() == s.trim())
            .ok_or_else(|| LoadError::UnknownValue {
                field: "monthly income band",
                value: s.to_string(),
            })
    }
}

/// The parts of a borrower's profile that drive pricing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BorrowerProfile {
    /// Declared monthly income band (None = not declared)
    #[serde(default)]
    pub monthly_income_band: Option<IncomeBand>,

    /// CIBIL credit bureau score (None = unscored)
    #[serde(default)]
    pub cibil_score: Option<u16>,
}

impl BorrowerProfile {
    /// Create a profile; a CIBIL score of 0 is treated as unscored
    pub fn new(monthly_income_band: Option<IncomeBand>, cibil_score: Option<u16>) -> Self {
        Self {
            monthly_income_band,
            cibil_score: cibil_score.filter(|&s| s > 0),
        }
    }

    /// Profile with neither an income band nor a credit score
    pub fn unscored() -> Self {
        Self::default()
    }

    /// Credit score if the borrower has one
    pub fn credit_score(&self) -> Option<u16> {
        self.cibil_score.filter(|&s| s > 0)
    }

    /// Monthly income used for the loan-to-income ratio
    pub fn income_lower_bound(&self) -> f64 {
        self.monthly_income_band
            .map(|band| band.lower_bound())
            .unwrap_or(DEFAULT_INCOME_LOWER_BOUND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_income_band_round_trips_form_values() {
        for band in IncomeBand::ALL {
            assert_eq!(band.as_str().parse::<IncomeBand>().unwrap(), band);
        }
        assert!("30000-40000".parse::<IncomeBand>().is_err());
    }

    #[test]
    fn test_income_lower_bound_defaults_when_undeclared() {
        assert_eq!(BorrowerProfile::unscored().income_lower_bound(), 25_000.0);

        let profile = BorrowerProfile::new(Some(IncomeBand::Over200k), None);
        assert_eq!(profile.income_lower_bound(), 200_000.0);
    }

    #[test]
    fn test_zero_cibil_score_is_unscored() {
        let profile = BorrowerProfile::new(None, Some(0));
        assert_eq!(profile.cibil_score, None);

        // Constructed directly, the accessor still filters it
        let raw = BorrowerProfile { monthly_income_band: None, cibil_score: Some(0) };
        assert_eq!(raw.credit_score(), None);
    }

    #[test]
    fn test_profile_deserializes_form_strings() {
        let profile: BorrowerProfile =
            serde_json::from_str(r#"{"monthly_income_band":"50000-100000","cibil_score":742}"#).unwrap();
        assert_eq!(profile.monthly_income_band, Some(IncomeBand::From50kTo100k));
        assert_eq!(profile.credit_score(), Some(742));

        let empty: BorrowerProfile = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, BorrowerProfile::unscored());
    }
}
