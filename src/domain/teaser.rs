//! Teaser point menus, fixed teaser odds, and line shifting.
//!
//! A teaser moves every leg's line in the bettor's favor by a fixed number
//! of points. In exchange, each leg is priced at a flat table price that
//! depends only on the sport family and the points taken.

use std::collections::BTreeSet;
use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::error::DomainError;
use super::leg::{Leg, SelectionSide, SelectionType};
use super::money::SignedOdds;

/// Points offered when a family has no menu configured.
pub const DEFAULT_TEASER_POINTS: Decimal = dec!(6);

/// Per-leg price used when the table has no entry for a family and points.
pub const FALLBACK_TEASER_ODDS: SignedOdds = -110;

/// Sport grouping that shares a teaser menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SportFamily {
    Football,
    Basketball,
    /// Any sport without its own menu.
    Other,
}

impl SportFamily {
    /// Classify a sport key such as `americanfootball_nfl` or `basketball_nba`.
    ///
    /// The family is taken from the prefix before the first underscore.
    #[must_use]
    pub fn from_sport_key(key: &str) -> Self {
        let prefix = key.split('_').next().unwrap_or_default().to_lowercase();
        match prefix.as_str() {
            "americanfootball" | "football" => Self::Football,
            "basketball" => Self::Basketball,
            _ => Self::Other,
        }
    }

    /// Family of a single leg; legs without a sport fall into `Other`.
    #[must_use]
    pub fn of_leg(leg: &Leg) -> Self {
        leg.sport().map_or(Self::Other, Self::from_sport_key)
    }
}

impl fmt::Display for SportFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Football => "football",
            Self::Basketball => "basketball",
            Self::Other => "other",
        };
        f.write_str(name)
    }
}

/// One priced entry of the teaser menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeaserOption {
    pub family: SportFamily,
    pub points: Decimal,
    pub odds: SignedOdds,
}

impl TeaserOption {
    #[must_use]
    pub const fn new(family: SportFamily, points: Decimal, odds: SignedOdds) -> Self {
        Self {
            family,
            points,
            odds,
        }
    }
}

/// Teaser menu keyed by sport family and points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeaserTable {
    #[serde(default = "default_options")]
    pub options: Vec<TeaserOption>,
}

fn default_options() -> Vec<TeaserOption> {
    use SportFamily::{Basketball, Football, Other};
    vec![
        TeaserOption::new(Football, dec!(6), -110),
        TeaserOption::new(Football, dec!(6.5), -120),
        TeaserOption::new(Football, dec!(7), -130),
        TeaserOption::new(Basketball, dec!(4), -110),
        TeaserOption::new(Basketball, dec!(4.5), -120),
        TeaserOption::new(Basketball, dec!(5), -130),
        TeaserOption::new(Other, DEFAULT_TEASER_POINTS, FALLBACK_TEASER_ODDS),
    ]
}

impl Default for TeaserTable {
    fn default() -> Self {
        Self {
            options: default_options(),
        }
    }
}

impl TeaserTable {
    /// Points offered for `family`, ascending.
    #[must_use]
    pub fn allowed_points(&self, family: SportFamily) -> Vec<Decimal> {
        let points: BTreeSet<Decimal> = self
            .options
            .iter()
            .filter(|option| option.family == family)
            .map(|option| option.points.normalize())
            .collect();

        if points.is_empty() {
            vec![DEFAULT_TEASER_POINTS]
        } else {
            points.into_iter().collect()
        }
    }

    /// Flat per-leg price for `family` at `points`, falling back to -110.
    #[must_use]
    pub fn fixed_odds(&self, family: SportFamily, points: Decimal) -> SignedOdds {
        self.options
            .iter()
            .find(|option| option.family == family && option.points == points)
            .map_or_else(
                || {
                    warn!(
                        %family,
                        %points,
                        fallback = FALLBACK_TEASER_ODDS,
                        "no teaser price configured, using fallback"
                    );
                    FALLBACK_TEASER_ODDS
                },
                |option| option.odds,
            )
    }
}

/// The single sport family shared by every leg.
///
/// # Errors
///
/// Returns [`DomainError::MixedSportFamilies`] when the legs span more than
/// one family, and [`DomainError::EmptyLegs`] when there are no legs.
pub fn sport_family(legs: &[Leg]) -> Result<SportFamily, DomainError> {
    let families: BTreeSet<SportFamily> = legs.iter().map(SportFamily::of_leg).collect();
    let mut iter = families.iter();
    match (iter.next(), iter.next()) {
        (Some(family), None) => Ok(*family),
        (None, _) => Err(DomainError::EmptyLegs),
        (Some(_), Some(_)) => Err(DomainError::MixedSportFamilies {
            families: families
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        }),
    }
}

/// The leg's line after taking `points` in the bettor's favor.
///
/// Spreads add the points, which moves a favorite toward zero and an
/// underdog away from it. Overs come down and unders go up.
///
/// # Errors
///
/// Moneyline legs cannot be teased.
pub fn shift_line(leg: &Leg, points: Decimal) -> Result<Decimal, DomainError> {
    let selection_type = leg.selection_type();
    if selection_type == SelectionType::Moneyline {
        return Err(DomainError::MoneylineInTeaser {
            event_id: leg.event_id().to_string(),
        });
    }
    let line = leg
        .line()
        .ok_or(DomainError::MissingLine { selection_type })?;

    Ok(match (selection_type, leg.side()) {
        (SelectionType::Total, SelectionSide::Over) => line - points,
        _ => line + points,
    })
}

/// Shift every leg by `points` and reprice it at the table's fixed odds.
///
/// The returned legs carry the teaser price as their effective odds; their
/// original prices remain available through [`Leg::odds`].
///
/// # Errors
///
/// Fails on mixed sport families or a moneyline leg.
pub fn tease(table: &TeaserTable, legs: &[Leg], points: Decimal) -> Result<Vec<Leg>, DomainError> {
    let family = sport_family(legs)?;
    let odds = table.fixed_odds(family, points);

    legs.iter()
        .map(|leg| {
            let line = shift_line(leg, points)?;
            Ok(leg.with_line(line).with_adjusted_odds(odds))
        })
        .collect()
}
