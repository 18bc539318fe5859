//! Parlay combination and full wager pricing.

use rust_decimal::Decimal;
use tracing::debug;

use super::correlation::resolve;
use super::error::DomainError;
use super::leg::{Leg, SelectionType};
use super::money::{DecimalOdds, SignedOdds};
use super::odds::to_signed;
use super::payout::{payout, profit};
use super::teaser::{tease, TeaserTable};
use super::wager::{CombinedWagerRequest, WagerQuote, WagerType};

/// Product of the legs' effective decimal odds.
///
/// # Errors
///
/// Fails on an empty leg list or when the product overflows.
pub fn combined_decimal(legs: &[Leg]) -> Result<DecimalOdds, DomainError> {
    if legs.is_empty() {
        return Err(DomainError::EmptyLegs);
    }
    legs.iter().try_fold(Decimal::ONE, |product, leg| {
        product
            .checked_mul(leg.decimal_odds())
            .ok_or(DomainError::OddsOverflow)
    })
}

/// Combined signed price of independent legs.
///
/// A single leg is returned at its own effective odds.
///
/// # Errors
///
/// Fails on an empty leg list, on overflow, or when the product does not
/// describe a winning price.
pub fn combine(legs: &[Leg]) -> Result<SignedOdds, DomainError> {
    let decimal = combined_decimal(legs)?;
    signed_from_product(legs, decimal)
}

fn signed_from_product(legs: &[Leg], decimal: DecimalOdds) -> Result<SignedOdds, DomainError> {
    match legs {
        [leg] => Ok(leg.effective_odds()),
        _ => to_signed(decimal),
    }
}

/// Price a combined wager.
///
/// Teasers with a moneyline leg are rejected before anything else. Legs are
/// then resolved for same-event redundancy. Teasers shift each surviving leg
/// and reprice it from `teasers`; other wagers multiply the legs at their
/// effective odds.
///
/// # Errors
///
/// Returns `DomainError` for un-teasable legs, mixed teaser sports, or an
/// unrepresentable combined price or payout.
pub fn price(
    request: &CombinedWagerRequest,
    teasers: &TeaserTable,
) -> Result<WagerQuote, DomainError> {
    if request.wager_type() == WagerType::Teaser {
        ensure_teasable(request.legs())?;
    }

    let resolution = resolve(request.legs());

    let legs = match (request.wager_type(), request.teaser_points()) {
        (WagerType::Teaser, Some(points)) => tease(teasers, &resolution.legs, points)?,
        (WagerType::Teaser, None) => {
            return Err(DomainError::InvalidTeaserPoints { points: None });
        }
        (WagerType::Single | WagerType::Parlay, _) => resolution.legs,
    };

    let decimal_odds = combined_decimal(&legs)?;
    let combined_odds = signed_from_product(&legs, decimal_odds)?;
    let stake = request.stake();

    debug!(
        wager_type = %request.wager_type(),
        legs = legs.len(),
        dropped = resolution.dropped.len(),
        combined_odds,
        %decimal_odds,
        "priced wager"
    );

    Ok(WagerQuote {
        wager_type: request.wager_type(),
        combined_odds,
        decimal_odds,
        stake,
        payout: payout(stake, Some(combined_odds))?,
        profit: profit(stake, Some(combined_odds))?,
        legs,
        dropped: resolution.dropped,
    })
}

// Resolution may drop a moneyline in favor of a same-side spread, so this
// runs on the requested legs.
fn ensure_teasable(legs: &[Leg]) -> Result<(), DomainError> {
    match legs
        .iter()
        .find(|leg| leg.selection_type() == SelectionType::Moneyline)
    {
        Some(leg) => Err(DomainError::MoneylineInTeaser {
            event_id: leg.event_id().to_string(),
        }),
        None => Ok(()),
    }
}
