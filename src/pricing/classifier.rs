//! Threshold ladder mapping risk scores to priced categories

use crate::error::{LoadError, PricingError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordered risk category, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskCategory {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "C")]
    C,
}

impl RiskCategory {
    pub const ALL: [RiskCategory; 5] = [
        RiskCategory::APlus,
        RiskCategory::A,
        RiskCategory::BPlus,
        RiskCategory::B,
        RiskCategory::C,
    ];

    /// Short grade code
    pub fn code(&self) -> &'static str {
        match self {
            RiskCategory::APlus => "A+",
            RiskCategory::A => "A",
            RiskCategory::BPlus => "B+",
            RiskCategory::B => "B",
            RiskCategory::C => "C",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskCategory::APlus => "Excellent",
            RiskCategory::A => "Very Good",
            RiskCategory::BPlus => "Good",
            RiskCategory::B => "Fair",
            RiskCategory::C => "High Risk",
        }
    }
}

/// Display form, e.g. "A+ (Excellent)"
impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.label())
    }
}

impl FromStr for RiskCategory {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept both "A+" and "A+ (Excellent)"
        let code = s.split_whitespace().next().unwrap_or("");
        RiskCategory::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| LoadError::UnknownValue {
                field: "risk category",
                value: s.to_string(),
            })
    }
}

/// One rung of the ladder: scores at or above `min_score` get this category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskTier {
    pub min_score: u8,
    pub category: RiskCategory,
    /// Annual borrower rate in percent
    pub annual_rate_pct: f64,
}

impl RiskTier {
    pub const fn new(min_score: u8, category: RiskCategory, annual_rate_pct: f64) -> Self {
        Self { min_score, category, annual_rate_pct }
    }
}

/// Default platform ladder, highest threshold first
pub const DEFAULT_TIERS: [RiskTier; 5] = [
    RiskTier::new(90, RiskCategory::APlus, 12.0),
    RiskTier::new(80, RiskCategory::A, 15.0),
    RiskTier::new(70, RiskCategory::BPlus, 18.0),
    RiskTier::new(60, RiskCategory::B, 22.0),
    RiskTier::new(0, RiskCategory::C, 28.0),
];

/// Validated, ordered list of risk tiers
///
/// Thresholds strictly descend and the last tier starts at 0, so every score
/// classifies to exactly one tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<RiskTier>", into = "Vec<RiskTier>")]
pub struct RateLadder {
    tiers: Vec<RiskTier>,
}

impl RateLadder {
    /// Build a ladder; tiers may be given in any order
    pub fn new(mut tiers: Vec<RiskTier>) -> Result<Self, PricingError> {
        if tiers.is_empty() {
            return Err(PricingError::InvalidLadder("no tiers".into()));
        }

        tiers.sort_by(|a, b| b.min_score.cmp(&a.min_score));

        for pair in tiers.windows(2) {
            if pair[0].min_score == pair[1].min_score {
                return Err(PricingError::InvalidLadder(format!(
                    "duplicate threshold {}",
                    pair[0].min_score
                )));
            }
        }

        if let Some(bottom) = tiers.last() {
            if bottom.min_score != 0 {
                return Err(PricingError::InvalidLadder(format!(
                    "lowest threshold is {}, scores below it cannot be classified",
                    bottom.min_score
                )));
            }
        }

        if let Some(bad) = tiers.iter().find(|t| !t.annual_rate_pct.is_finite() || t.annual_rate_pct < 0.0) {
            return Err(PricingError::InvalidLadder(format!(
                "tier {} has invalid rate {}",
                bad.category.code(),
                bad.annual_rate_pct
            )));
        }

        Ok(Self { tiers })
    }

    /// Tiers from highest threshold to lowest
    pub fn tiers(&self) -> &[RiskTier] {
        &self.tiers
    }

    /// Classify a score, testing thresholds top-down
    pub fn classify(&self, score: u8) -> RiskTier {
        self.tiers
            .iter()
            .find(|tier| score >= tier.min_score)
            .copied()
            // unreachable: the bottom tier starts at 0
            .unwrap_or(self.tiers[self.tiers.len() - 1])
    }
}

impl Default for RateLadder {
    fn default() -> Self {
        Self { tiers: DEFAULT_TIERS.to_vec() }
    }
}

impl TryFrom<Vec<RiskTier>> for RateLadder {
    type Error = PricingError;

    fn try_from(tiers: Vec<RiskTier>) -> Result<Self, Self::Error> {
        RateLadder::new(tiers)
    }
}

impl From<RateLadder> for Vec<RiskTier> {
    fn from(ladder: RateLadder) -> Self {
        ladder.tiers
    }
}

/// Classify a score against the default platform ladder
pub fn classify(score: u8) -> RiskTier {
    DEFAULT_TIERS
        .iter()
        .find(|tier| score >= tier.min_score)
        .copied()
        .unwrap_or(DEFAULT_TIERS[DEFAULT_TIERS.len() - 1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries_exact() {
        let tier = classify(90);
        assert_eq!(tier.category, RiskCategory::APlus);
        assert_eq!(tier.annual_rate_pct, 12.0);

        let tier = classify(89);
        assert_eq!(tier.category, RiskCategory::A);
        assert_eq!(tier.annual_rate_pct, 15.0);

        let tier = classify(59);
        assert_eq!(tier.category, RiskCategory::C);
        assert_eq!(tier.annual_rate_pct, 28.0);

        assert_eq!(classify(80).category, RiskCategory::A);
        assert_eq!(classify(79).category, RiskCategory::BPlus);
        assert_eq!(classify(70).category, RiskCategory::BPlus);
        assert_eq!(classify(60).category, RiskCategory::B);
        assert_eq!(classify(0).category, RiskCategory::C);
        assert_eq!(classify(100).category, RiskCategory::APlus);
    }

    #[test]
    fn test_default_ladder_matches_free_function() {
        let ladder = RateLadder::default();
        for score in 0..=100u8 {
            assert_eq!(ladder.classify(score), classify(score));
        }
    }

    #[test]
    fn test_rates_rise_as_category_worsens() {
        let ladder = RateLadder::default();
        for pair in ladder.tiers().windows(2) {
            assert!(pair[0].category < pair[1].category);
            assert!(pair[0].annual_rate_pct < pair[1].annual_rate_pct);
        }
    }

    #[test]
    fn test_ladder_sorts_unordered_tiers() {
        let ladder = RateLadder::new(vec![
            RiskTier::new(0, RiskCategory::C, 30.0),
            RiskTier::new(75, RiskCategory::A, 14.0),
        ])
        .unwrap();
        assert_eq!(ladder.tiers()[0].min_score, 75);
        assert_eq!(ladder.classify(75).annual_rate_pct, 14.0);
        assert_eq!(ladder.classify(74).annual_rate_pct, 30.0);
    }

    #[test]
    fn test_ladder_rejects_gaps_and_duplicates() {
        assert!(RateLadder::new(vec![]).is_err());
        assert!(RateLadder::new(vec![RiskTier::new(10, RiskCategory::C, 28.0)]).is_err());
        assert!(RateLadder::new(vec![
            RiskTier::new(50, RiskCategory::B, 22.0),
            RiskTier::new(50, RiskCategory::BPlus, 18.0),
            RiskTier::new(0, RiskCategory::C, 28.0),
        ])
        .is_err());
        assert!(RateLadder::new(vec![RiskTier::new(0, RiskCategory::C, -1.0)]).is_err());
    }

    #[test]
    fn test_category_parsing_and_display() {
        assert_eq!("A+".parse::<RiskCategory>().unwrap(), RiskCategory::APlus);
        assert_eq!("b+ (Good)".parse::<RiskCategory>().unwrap(), RiskCategory::BPlus);
        assert!("D".parse::<RiskCategory>().is_err());
        assert_eq!(RiskCategory::C.to_string(), "C (High Risk)");
        assert_eq!(RiskCategory::APlus.to_string(), "A+ (Excellent)");
    }

    #[test]
    fn test_ladder_json_validates() {
        let json = r#"[{"min_score":0,"category":"C","annual_rate_pct":25.0}]"#;
        let ladder: RateLadder = serde_json::from_str(json).unwrap();
        assert_eq!(ladder.classify(100).annual_rate_pct, 25.0);

        let bad = r#"[{"min_score":40,"category":"C","annual_rate_pct":25.0}]"#;
        assert!(serde_json::from_str::<RateLadder>(bad).is_err());
    }
}
