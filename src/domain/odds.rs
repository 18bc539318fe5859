//! Odds conversion and display.
//!
//! Two notations are used throughout:
//!
//! - **Signed odds** (moneyline style): `+150` wins 150 per 100 staked,
//!   `-110` must stake 110 to win 100.
//! - **Decimal odds**: total return per unit staked, stake included.
//!
//! Canonical signed odds satisfy `|odds| >= 100`. `+100` and `-100` both
//! describe even money and convert back to `+100`. Zero is accepted as a
//! degenerate price that returns only the stake (decimal `1.0`).

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::error::DomainError;
use super::money::{DecimalOdds, SignedOdds};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;
const TWO: Decimal = Decimal::TWO;

/// Convert signed odds to decimal odds.
#[must_use]
pub fn to_decimal(odds: SignedOdds) -> DecimalOdds {
    if odds > 0 {
        Decimal::ONE + Decimal::from(odds) / HUNDRED
    } else if odds < 0 {
        Decimal::ONE + HUNDRED / Decimal::from(odds.unsigned_abs())
    } else {
        Decimal::ONE
    }
}

/// Convert decimal odds to signed odds, rounding half away from zero.
///
/// # Errors
///
/// Returns [`DomainError::InvalidDecimalOdds`] when `decimal <= 1.0`, and
/// [`DomainError::OddsOverflow`] when the result does not fit a signed price.
pub fn to_signed(decimal: DecimalOdds) -> Result<SignedOdds, DomainError> {
    if decimal <= Decimal::ONE {
        return Err(DomainError::InvalidDecimalOdds { decimal });
    }

    let profit = decimal - Decimal::ONE;
    let raw = if decimal >= TWO {
        profit.checked_mul(HUNDRED).ok_or(DomainError::OddsOverflow)?
    } else {
        -(HUNDRED.checked_div(profit).ok_or(DomainError::OddsOverflow)?)
    };

    raw.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(DomainError::OddsOverflow)
}

/// Implied win probability of a signed price, as a percentage (0-100).
#[must_use]
pub fn implied_probability_percent(odds: SignedOdds) -> Decimal {
    if odds > 0 {
        HUNDRED / (Decimal::from(odds) + HUNDRED) * HUNDRED
    } else if odds < 0 {
        let risk = Decimal::from(odds.unsigned_abs());
        risk / (risk + HUNDRED) * HUNDRED
    } else {
        HUNDRED
    }
}

/// Display notation for odds.
///
/// Passed explicitly to formatting calls; there is no process-wide default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OddsFormat {
    /// Signed moneyline notation (`+150`, `-110`).
    #[default]
    American,
    /// Decimal notation with two places (`2.50`).
    Decimal,
    /// Reduced fractional notation (`3/2`).
    Fractional,
}

impl fmt::Display for OddsFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::American => "american",
            Self::Decimal => "decimal",
            Self::Fractional => "fractional",
        };
        f.write_str(name)
    }
}

/// Error returned when an odds format name is not recognized.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown odds format '{0}' (expected american, decimal or fractional)")]
pub struct UnknownOddsFormat(String);

impl FromStr for OddsFormat {
    type Err = UnknownOddsFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "american" => Ok(Self::American),
            "decimal" => Ok(Self::Decimal),
            "fractional" => Ok(Self::Fractional),
            other => Err(UnknownOddsFormat(other.to_string())),
        }
    }
}

/// Render a signed price in the requested notation.
#[must_use]
pub fn format_odds(odds: SignedOdds, format: OddsFormat) -> String {
    match format {
        OddsFormat::American => {
            if odds > 0 {
                format!("+{odds}")
            } else {
                odds.to_string()
            }
        }
        OddsFormat::Decimal => {
            let decimal =
                to_decimal(odds).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            format!("{decimal:.2}")
        }
        OddsFormat::Fractional => {
            let (num, den) = if odds > 0 {
                (odds.unsigned_abs(), 100)
            } else if odds < 0 {
                (100, odds.unsigned_abs())
            } else {
                (0, 1)
            };
            let divisor = gcd(num, den).max(1);
            format!("{}/{}", num / divisor, den / divisor)
        }
    }
}

/// Render a spread or total line with an explicit sign and one decimal.
#[must_use]
pub fn format_line(line: Decimal) -> String {
    let line = line.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    if line > Decimal::ZERO {
        format!("+{line:.1}")
    } else {
        format!("{line:.1}")
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}
