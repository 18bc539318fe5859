//! Monetary and odds value types.

use rust_decimal::{Decimal, RoundingStrategy};

/// Stake, payout and profit amounts.
pub type Money = Decimal;

/// Multiplicative decimal odds (total return per unit staked).
pub type DecimalOdds = Decimal;

/// Moneyline-style signed odds: positive for underdogs, negative for favorites.
pub type SignedOdds = i64;

/// Round a money amount to cents, half away from zero.
#[must_use]
pub fn round_cents(amount: Money) -> Money {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
