//! Wagerline - wager odds engine.
//!
//! This crate prices sports wagers and scores them against the closing line.
//! It is a pure computation core: callers supply validated legs, requests and
//! closing-line snapshots, and get prices and summaries back.
//!
//! # Pricing pipeline
//!
//! For one [`domain::CombinedWagerRequest`], [`domain::price`] applies, in
//! order:
//!
//! 1. per-leg odds overrides (`userAdjustedOdds`)
//! 2. same-event redundancy resolution ([`domain::correlation`])
//! 3. teaser line shifts and fixed teaser prices ([`domain::teaser`])
//! 4. decimal multiplication and conversion back to signed odds
//!    ([`domain::parlay`])
//! 5. payout and profit ([`domain::payout`])
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from TOML files
//! - [`domain`] - Odds conversion, wager pricing, closing-line value
//! - [`error`] - Error types for the crate
//! - [`cli`] - Command-line front end used by the `wagerline` binary
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use wagerline::domain::{price, CombinedWagerRequest, Leg, SelectionSide, TeaserTable};
//!
//! let legs = vec![
//!     Leg::moneyline("g1", SelectionSide::Home, -110)?,
//!     Leg::moneyline("g2", SelectionSide::Away, -110)?,
//! ];
//! let request = CombinedWagerRequest::parlay(legs, dec!(10))?;
//! let quote = price(&request, &TeaserTable::default())?;
//! assert_eq!(quote.combined_odds, 264);
//! # Ok::<(), wagerline::domain::DomainError>(())
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
