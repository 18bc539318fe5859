//! Handler for `wagerline convert`.

use std::str::FromStr;

use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;

use super::output::Output;
use crate::config::Config;
use crate::domain::odds::{
    format_odds, implied_probability_percent, to_decimal, to_signed, OddsFormat,
};
use crate::domain::{DecimalOdds, SignedOdds};
use crate::error::{Error, Result};

/// Arguments for `wagerline convert`.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Odds to convert: signed (`-110`, `+150`) or, with --decimal, decimal (`1.91`)
    #[arg(allow_negative_numbers = true)]
    pub odds: String,

    /// Read the input as decimal odds
    #[arg(long)]
    pub decimal: bool,
}

/// Both notations of one price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversion {
    pub signed: SignedOdds,
    pub decimal: DecimalOdds,
    pub implied_probability: Decimal,
    pub display: String,
}

/// Parse signed odds, accepting an explicit leading `+`.
///
/// # Errors
///
/// Returns [`Error::Parse`] for non-integer input.
pub fn parse_signed(input: &str) -> Result<SignedOdds> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    digits
        .parse::<SignedOdds>()
        .map_err(|e| Error::Parse(format!("invalid signed odds '{input}': {e}")))
}

/// Convert the argument into both notations.
///
/// # Errors
///
/// Returns an error for unparseable input or decimal odds of 1.0 or less.
pub fn convert(args: &ConvertArgs, config: &Config) -> Result<Conversion> {
    let signed = if args.decimal {
        let decimal = Decimal::from_str(args.odds.trim())
            .map_err(|e| Error::Parse(format!("invalid decimal odds '{}': {e}", args.odds)))?;
        to_signed(decimal)?
    } else {
        parse_signed(&args.odds)?
    };

    Ok(Conversion {
        signed,
        decimal: to_decimal(signed).round_dp(4),
        implied_probability: implied_probability_percent(signed).round_dp(2),
        display: format_odds(signed, config.display.odds_format),
    })
}

/// Execute `convert`.
pub fn execute(args: &ConvertArgs, config: &Config, out: Output) -> Result<()> {
    let conversion = convert(args, config)?;

    if out.is_json() {
        return out.record("conversion", &conversion);
    }
    out.primary(&conversion.display);

    out.section("Odds");
    out.field("Signed", format_odds(conversion.signed, OddsFormat::American));
    out.field("Decimal", conversion.decimal);
    out.field("Implied", format!("{:.2}%", conversion.implied_probability));
    out.field(
        &format!("Display ({})", config.display.odds_format),
        &conversion.display,
    );
    Ok(())
}
