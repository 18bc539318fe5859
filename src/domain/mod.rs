//! Wager pricing and closing-line value.
//!
//! Everything here is pure and synchronous: callers hand in validated legs,
//! requests and closing-line records and get values back.

pub mod clv;
pub mod correlation;
pub mod error;
pub mod id;
pub mod leg;
pub mod money;
pub mod odds;
pub mod parlay;
pub mod payout;
pub mod stats;
pub mod teaser;
pub mod wager;

// Core domain types
pub use error::DomainError;
pub use id::{EventId, LegId};
pub use leg::{Leg, SelectionSide, SelectionType};
pub use money::{DecimalOdds, Money, SignedOdds};
pub use wager::{CombinedWagerRequest, WagerQuote, WagerType};

// Pricing
pub use correlation::{group_by_event, resolve, EventLegGroup, Resolution};
pub use odds::{
    format_line, format_odds, implied_probability_percent, to_decimal, to_signed, OddsFormat,
};
pub use parlay::{combine, combined_decimal, price};
pub use payout::{payout, profit};
pub use teaser::{SportFamily, TeaserOption, TeaserTable};

// Closing-line value
pub use clv::{compute_clv, compute_clv_with, ClvCategory, ClvResult, ClvThresholds};
pub use stats::{
    aggregate, aggregate_by, aggregate_by_sport, aggregate_with, BetStatus, CategoryCounts,
    ClosingLineRecord, ClvSummary, Settlement,
};
