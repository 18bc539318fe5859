//! Handler for `wagerline quote`.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use super::output::{muted, Output};
use crate::config::Config;
use crate::domain::odds::format_odds;
use crate::domain::{price, CombinedWagerRequest, WagerQuote};
use crate::error::Result;

/// Arguments for `wagerline quote`.
#[derive(Args, Debug)]
pub struct QuoteArgs {
    /// JSON file holding a wager request (`legs`, `wagerType`, `stake`, `teaserPoints`)
    pub file: PathBuf,
}

/// Read a wager request from `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the request is invalid.
pub fn read_request(path: &Path) -> Result<CombinedWagerRequest> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Execute `quote`.
pub fn execute(args: &QuoteArgs, config: &Config, out: Output) -> Result<()> {
    let request = read_request(&args.file)?;
    let quote = price(&request, &config.teaser)?;

    if out.is_json() {
        return out.record("quote", &quote);
    }
    render(&quote, config, out);
    Ok(())
}

fn render(quote: &WagerQuote, config: &Config, out: Output) {
    let format = config.display.odds_format;
    out.primary(format_odds(quote.combined_odds, format));

    out.section(&format!("{} quote", capitalize(&quote.wager_type.to_string())));
    out.field("Odds", format_odds(quote.combined_odds, format));
    out.field("Decimal", quote.decimal_odds.round_dp(4));
    out.field("Stake", format!("${:.2}", quote.stake));
    out.field("Payout", format!("${:.2}", quote.payout));
    out.field("Profit", format!("${:.2}", quote.profit));

    out.section("Legs");
    for leg in &quote.legs {
        let original = if leg.adjusted_odds().is_some() {
            muted(format!(" (offered {})", format_odds(leg.odds(), format)))
        } else {
            String::new()
        };
        out.note(&format!("{leg}{original}"));
    }

    if !quote.dropped.is_empty() {
        out.section("Dropped");
        for leg in &quote.dropped {
            out.warning(&format!("{leg} (redundant same-event selection)"));
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_request_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "wagerType": "single",
                "stake": 100,
                "legs": [
                    {{"eventId": "g1", "selectionType": "moneyline", "selectionSide": "home", "odds": 150}}
                ]
            }}"#
        )
        .unwrap();

        let request = read_request(file.path()).unwrap();
        let quote = price(&request, &Config::default().teaser).unwrap();
        assert_eq!(quote.combined_odds, 150);
    }

    #[test]
    fn rejects_invalid_request() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"wagerType": "parlay", "stake": 10, "legs": []}}"#).unwrap();
        assert!(read_request(file.path()).is_err());
    }

    #[test]
    fn capitalizes_wager_type() {
        assert_eq!(capitalize("parlay"), "Parlay");
        assert_eq!(capitalize(""), "");
    }
}
