//! Domain validation errors for wager pricing.
//!
//! These errors are returned when a wager or leg violates a domain invariant,
//! either from a `try_new` constructor or from one of the pricing functions.
//! Every failure is local to the computation that produced it.
//!
//! # Examples
//!
//! ```
//! use wagerline::domain::error::DomainError;
//! use wagerline::domain::odds::to_signed;
//! use rust_decimal_macros::dec;
//!
//! let result = to_signed(dec!(1.0));
//! assert!(matches!(result, Err(DomainError::InvalidDecimalOdds { .. })));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

use super::leg::{SelectionSide, SelectionType};
use super::wager::WagerType;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Decimal odds must exceed 1.0 to describe a winning payout.
    #[error("decimal odds must be greater than 1.0, got {decimal}")]
    InvalidDecimalOdds {
        /// The rejected decimal odds.
        decimal: Decimal,
    },

    /// A combination needs at least one leg.
    #[error("legs cannot be empty")]
    EmptyLegs,

    /// Stakes cannot be negative.
    #[error("stake cannot be negative, got {stake}")]
    NegativeStake {
        /// The rejected stake.
        stake: Decimal,
    },

    /// The number of legs does not fit the wager type.
    #[error("{wager_type} wager cannot have {legs} leg(s)")]
    LegCountMismatch {
        /// The requested wager type.
        wager_type: WagerType,
        /// The number of legs supplied.
        legs: usize,
    },

    /// Spread and total legs must carry a line.
    #[error("{selection_type} leg requires a line")]
    MissingLine {
        /// The selection type missing its line.
        selection_type: SelectionType,
    },

    /// The side does not belong to the selection type.
    #[error("{side} is not a valid side for a {selection_type} leg")]
    SideMismatch {
        /// The leg's selection type.
        selection_type: SelectionType,
        /// The side that was supplied.
        side: SelectionSide,
    },

    /// Teasers need a positive point adjustment.
    #[error("teaser points must be positive, got {points:?}")]
    InvalidTeaserPoints {
        /// The supplied points, if any.
        points: Option<Decimal>,
    },

    /// Only spread and total legs can be teased.
    #[error("moneyline leg on event {event_id} cannot be teased")]
    MoneylineInTeaser {
        /// Event of the offending leg.
        event_id: String,
    },

    /// All legs of a teaser must share one sport family.
    #[error("teaser legs span multiple sport families: {families}")]
    MixedSportFamilies {
        /// Comma-separated list of the families found.
        families: String,
    },

    /// The combined price exceeds what can be represented.
    #[error("combined odds overflow")]
    OddsOverflow,
}
