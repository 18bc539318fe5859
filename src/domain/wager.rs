//! Combined wager requests and their priced quotes.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::leg::Leg;
use super::money::{DecimalOdds, Money, SignedOdds};

/// How the legs of a wager are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WagerType {
    /// Exactly one leg at its own price.
    Single,
    /// Two or more legs, all of which must win.
    Parlay,
    /// A parlay with shifted lines at fixed odds.
    Teaser,
}

impl WagerType {
    /// Whether `legs` is an acceptable leg count for this wager type.
    #[must_use]
    pub const fn accepts_leg_count(self, legs: usize) -> bool {
        match self {
            Self::Single => legs == 1,
            Self::Parlay | Self::Teaser => legs >= 2,
        }
    }
}

impl fmt::Display for WagerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Single => "single",
            Self::Parlay => "parlay",
            Self::Teaser => "teaser",
        };
        f.write_str(name)
    }
}

/// A validated request to price a combined wager.
///
/// # Domain Invariants
///
/// - single wagers have exactly one leg, parlays and teasers at least two
/// - the stake is not negative
/// - teasers carry positive `teaser_points`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WagerData", rename_all = "camelCase")]
pub struct CombinedWagerRequest {
    legs: Vec<Leg>,
    wager_type: WagerType,
    stake: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    teaser_points: Option<Decimal>,
}

impl CombinedWagerRequest {
    /// Create a request with domain invariant validation.
    ///
    /// `teaser_points` is ignored for non-teaser wagers.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` if any invariant is violated.
    pub fn try_new(
        legs: Vec<Leg>,
        wager_type: WagerType,
        stake: Money,
        teaser_points: Option<Decimal>,
    ) -> Result<Self, DomainError> {
        if legs.is_empty() {
            return Err(DomainError::EmptyLegs);
        }
        if !wager_type.accepts_leg_count(legs.len()) {
            return Err(DomainError::LegCountMismatch {
                wager_type,
                legs: legs.len(),
            });
        }
        if stake < Decimal::ZERO {
            return Err(DomainError::NegativeStake { stake });
        }

        let teaser_points = match wager_type {
            WagerType::Teaser => match teaser_points {
                Some(points) if points > Decimal::ZERO => Some(points),
                other => return Err(DomainError::InvalidTeaserPoints { points: other }),
            },
            WagerType::Single | WagerType::Parlay => None,
        };

        Ok(Self {
            legs,
            wager_type,
            stake,
            teaser_points,
        })
    }

    /// A single-leg wager.
    pub fn single(leg: Leg, stake: Money) -> Result<Self, DomainError> {
        Self::try_new(vec![leg], WagerType::Single, stake, None)
    }

    /// A parlay over `legs`.
    pub fn parlay(legs: Vec<Leg>, stake: Money) -> Result<Self, DomainError> {
        Self::try_new(legs, WagerType::Parlay, stake, None)
    }

    /// A teaser over `legs`, shifting each line by `points`.
    pub fn teaser(legs: Vec<Leg>, stake: Money, points: Decimal) -> Result<Self, DomainError> {
        Self::try_new(legs, WagerType::Teaser, stake, Some(points))
    }

    #[must_use]
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    #[must_use]
    pub const fn wager_type(&self) -> WagerType {
        self.wager_type
    }

    #[must_use]
    pub const fn stake(&self) -> Money {
        self.stake
    }

    #[must_use]
    pub const fn teaser_points(&self) -> Option<Decimal> {
        self.teaser_points
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WagerData {
    legs: Vec<Leg>,
    wager_type: WagerType,
    stake: Money,
    #[serde(default)]
    teaser_points: Option<Decimal>,
}

impl TryFrom<WagerData> for CombinedWagerRequest {
    type Error = DomainError;

    fn try_from(data: WagerData) -> Result<Self, Self::Error> {
        Self::try_new(data.legs, data.wager_type, data.stake, data.teaser_points)
    }
}

/// Result of pricing a [`CombinedWagerRequest`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WagerQuote {
    pub wager_type: WagerType,
    /// Combined price in signed notation.
    pub combined_odds: SignedOdds,
    /// Product of the legs' decimal odds.
    pub decimal_odds: DecimalOdds,
    pub stake: Money,
    pub payout: Money,
    pub profit: Money,
    /// Legs that were multiplied together, with teaser lines already shifted.
    pub legs: Vec<Leg>,
    /// Legs removed as redundant same-event selections.
    pub dropped: Vec<Leg>,
}
