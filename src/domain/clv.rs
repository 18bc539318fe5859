//! Closing-line value of a single wager.
//!
//! CLV compares the implied probability of the price a bettor got with the
//! market's final price. Beating the close (the market moved toward the
//! selection after the bet) yields a positive value.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::money::SignedOdds;
use super::odds::{implied_probability_percent, to_decimal};

/// Value bucket of a CLV percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClvCategory {
    Positive,
    Neutral,
    Negative,
}

impl fmt::Display for ClvCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        };
        f.write_str(name)
    }
}

/// Category boundaries, in CLV percentage points. Both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClvThresholds {
    pub positive: Decimal,
    pub negative: Decimal,
}

impl Default for ClvThresholds {
    fn default() -> Self {
        Self {
            positive: dec!(2),
            negative: dec!(-2),
        }
    }
}

impl ClvThresholds {
    #[must_use]
    pub fn classify(&self, clv_percent: Decimal) -> ClvCategory {
        if clv_percent >= self.positive {
            ClvCategory::Positive
        } else if clv_percent <= self.negative {
            ClvCategory::Negative
        } else {
            ClvCategory::Neutral
        }
    }
}

/// CLV of one wager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClvResult {
    pub clv_percent: Decimal,
    pub category: ClvCategory,
}

/// CLV of a wager placed at `opening` against a market that closed at
/// `closing`, classified with the default ±2 thresholds.
#[must_use]
pub fn compute_clv(opening: SignedOdds, closing: SignedOdds) -> ClvResult {
    compute_clv_with(opening, closing, &ClvThresholds::default())
}

/// [`compute_clv`] with caller-supplied thresholds.
#[must_use]
pub fn compute_clv_with(
    opening: SignedOdds,
    closing: SignedOdds,
    thresholds: &ClvThresholds,
) -> ClvResult {
    let clv_percent = clv_percent(opening, closing);
    ClvResult {
        clv_percent,
        category: thresholds.classify(clv_percent),
    }
}

fn clv_percent(opening: SignedOdds, closing: SignedOdds) -> Decimal {
    let opening_prob = implied_probability_percent(opening);
    let closing_prob = implied_probability_percent(closing);
    (closing_prob - opening_prob) / opening_prob * Decimal::ONE_HUNDRED
}

/// Expected return, in percent, of a unit stake at `opening` if the closing
/// implied probability is the true chance of winning.
#[must_use]
pub fn expected_edge_percent(opening: SignedOdds, closing: SignedOdds) -> Decimal {
    let closing_prob = implied_probability_percent(closing) / Decimal::ONE_HUNDRED;
    (closing_prob * to_decimal(opening) - Decimal::ONE) * Decimal::ONE_HUNDRED
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn beating_the_close_is_positive() {
        // -110 implies 52.38%, -130 implies 56.52%.
        let result = compute_clv(-110, -130);
        assert!((result.clv_percent - dec!(7.90)).abs() < dec!(0.01));
        assert_eq!(result.category, ClvCategory::Positive);
    }

    #[test]
    fn market_moving_away_is_negative() {
        let result = compute_clv(-130, -110);
        assert!(result.clv_percent < dec!(-2));
        assert_eq!(result.category, ClvCategory::Negative);
    }

    #[test]
    fn unchanged_price_is_neutral_zero() {
        let result = compute_clv(150, 150);
        assert_eq!(result.clv_percent, Decimal::ZERO);
        assert_eq!(result.category, ClvCategory::Neutral);
    }

    #[test]
    fn small_move_is_neutral() {
        // 52.38% -> 52.61%
        let result = compute_clv(-110, -111);
        assert_eq!(result.category, ClvCategory::Neutral);
    }

    #[test]
    fn boundaries_are_inclusive() {
        let thresholds = ClvThresholds::default();
        assert_eq!(thresholds.classify(dec!(2.00)), ClvCategory::Positive);
        assert_eq!(thresholds.classify(dec!(-2.00)), ClvCategory::Negative);
        assert_eq!(thresholds.classify(dec!(1.99)), ClvCategory::Neutral);
        assert_eq!(thresholds.classify(dec!(-1.99)), ClvCategory::Neutral);
        assert_eq!(thresholds.classify(Decimal::ZERO), ClvCategory::Neutral);
    }

    #[test]
    fn custom_thresholds() {
        let thresholds = ClvThresholds {
            positive: dec!(10),
            negative: dec!(-10),
        };
        let result = compute_clv_with(-110, -130, &thresholds);
        assert_eq!(result.category, ClvCategory::Neutral);
    }

    #[test]
    fn underdog_shortening_is_positive() {
        // +150 (40%) closing at +120 (45.45%)
        let result = compute_clv(150, 120);
        assert!((result.clv_percent - dec!(13.64)).abs() < dec!(0.01));
        assert_eq!(result.category, ClvCategory::Positive);
    }

    #[test]
    fn expected_edge_matches_clv_for_canonical_odds() {
        let edge = expected_edge_percent(-110, -130);
        let clv = compute_clv(-110, -130).clv_percent;
        assert!((edge - clv).abs() < dec!(0.0001));
    }
}
