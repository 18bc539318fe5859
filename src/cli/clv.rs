//! Handler for `wagerline clv`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tabled::{Table, Tabled};

use super::output::{signed, Output};
use crate::config::Config;
use crate::domain::{
    aggregate_by_sport, aggregate_with, ClosingLineRecord, ClvSummary, Settlement,
};
use crate::error::Result;

/// Arguments for `wagerline clv`.
#[derive(Args, Debug)]
pub struct ClvArgs {
    /// JSON file with `records` and optional `settlements`
    pub file: PathBuf,

    /// Add a per-sport breakdown
    #[arg(long)]
    pub by_sport: bool,
}

/// Input document for `clv`.
#[derive(Debug, Deserialize)]
pub struct ClvInput {
    pub records: Vec<ClosingLineRecord>,
    #[serde(default)]
    pub settlements: Vec<Settlement>,
}

/// Output document for `clv --json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ClvReport {
    summary: ClvSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    by_sport: Option<BTreeMap<String, ClvSummary>>,
}

#[derive(Tabled)]
struct BreakdownRow {
    #[tabled(rename = "Sport")]
    sport: String,
    #[tabled(rename = "Wagers")]
    wagers: u64,
    #[tabled(rename = "Avg CLV")]
    average: String,
    #[tabled(rename = "+/=/-")]
    counts: String,
    #[tabled(rename = "Win rate")]
    win_rate: String,
    #[tabled(rename = "Exp ROI")]
    expected: String,
    #[tabled(rename = "Act ROI")]
    actual: String,
}

impl BreakdownRow {
    fn new(sport: &str, summary: &ClvSummary) -> Self {
        Self {
            sport: sport.to_string(),
            wagers: summary.total_wagers,
            average: percent(summary.average_clv),
            counts: format!(
                "{}/{}/{}",
                summary.counts.positive, summary.counts.neutral, summary.counts.negative
            ),
            win_rate: percent(summary.clv_win_rate.map(|rate| rate * Decimal::ONE_HUNDRED)),
            expected: percent(summary.expected_roi),
            actual: percent(summary.actual_roi),
        }
    }
}

/// Read closing-line records and settlements from `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn read_input(path: &Path) -> Result<ClvInput> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Execute `clv`.
pub fn execute(args: &ClvArgs, config: &Config, out: Output) -> Result<()> {
    let input = read_input(&args.file)?;
    let thresholds = config.clv.thresholds();

    let summary = aggregate_with(&input.records, &input.settlements, &thresholds);
    let by_sport = args
        .by_sport
        .then(|| aggregate_by_sport(&input.records, &input.settlements, &thresholds));

    if out.is_json() {
        return out.record("clv", &ClvReport { summary, by_sport });
    }

    out.primary(percent(summary.average_clv));

    out.section("Closing line value");
    out.field("Wagers", summary.total_wagers);
    if summary.excluded > 0 {
        out.field("Excluded", format!("{} (no closing price)", summary.excluded));
    }
    out.field("Average CLV", colored_percent(summary.average_clv));
    out.field(
        "Categories",
        format!(
            "{} positive, {} neutral, {} negative",
            summary.counts.positive, summary.counts.neutral, summary.counts.negative
        ),
    );
    out.field(
        "CLV win rate",
        percent(summary.clv_win_rate.map(|rate| rate * Decimal::ONE_HUNDRED)),
    );
    out.field("Expected ROI", colored_percent(summary.expected_roi));
    out.field("Actual ROI", colored_percent(summary.actual_roi));
    if summary.settled_wagers > 0 {
        out.field(
            "Realized",
            format!(
                "${:.2} on ${:.2} staked",
                summary.realized_profit, summary.total_staked
            ),
        );
    }

    if let Some(report) = by_sport {
        out.section("By sport");
        let rows: Vec<BreakdownRow> = report
            .iter()
            .map(|(sport, summary)| BreakdownRow::new(sport, summary))
            .collect();
        out.block(Table::new(rows));
    }

    Ok(())
}

fn percent(value: Option<Decimal>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.2}%", v.round_dp(2)))
}

fn colored_percent(value: Option<Decimal>) -> String {
    let sign = value.map_or(std::cmp::Ordering::Equal, |v| v.round_dp(2).cmp(&Decimal::ZERO));
    signed(percent(value), sign)
}
