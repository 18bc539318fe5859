//! Payout and profit for a stake at a single (possibly combined) price.

use rust_decimal::Decimal;

use super::error::DomainError;
use super::money::{round_cents, Money, SignedOdds};

/// Total return for `stake` at `odds`, stake included, rounded to cents.
///
/// Returns zero when the stake is not positive or no price is available.
///
/// # Errors
///
/// Returns [`DomainError::OddsOverflow`] when the return is too large to
/// represent.
pub fn payout(stake: Money, odds: Option<SignedOdds>) -> Result<Money, DomainError> {
    let Some(odds) = odds else {
        return Ok(Decimal::ZERO);
    };
    if stake <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }

    let winnings = if odds > 0 {
        stake
            .checked_mul(Decimal::from(odds))
            .and_then(|risked| risked.checked_div(Decimal::ONE_HUNDRED))
    } else if odds < 0 {
        stake
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|risked| risked.checked_div(Decimal::from(odds.unsigned_abs())))
    } else {
        Some(Decimal::ZERO)
    };

    winnings
        .and_then(|winnings| stake.checked_add(winnings))
        .map(round_cents)
        .ok_or(DomainError::OddsOverflow)
}

/// Profit for `stake` at `odds`: payout minus stake, zero when there is no payout.
///
/// # Errors
///
/// Fails like [`payout`].
pub fn profit(stake: Money, odds: Option<SignedOdds>) -> Result<Money, DomainError> {
    let total = payout(stake, odds)?;
    if total.is_zero() {
        Ok(Decimal::ZERO)
    } else {
        Ok(total - stake)
    }
}
