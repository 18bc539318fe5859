//! Closing-line records, settlements and CLV roll-ups.
//!
//! Aggregation is a pure fold over caller-supplied collections. Records
//! whose closing price is unknown are counted as excluded and otherwise
//! ignored.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::clv::{compute_clv_with, expected_edge_percent, ClvCategory, ClvResult, ClvThresholds};
use super::error::DomainError;
use super::id::LegId;
use super::money::{round_cents, Money, SignedOdds};
use super::payout::profit;

/// Opening and closing price of one wager leg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosingLineRecord {
    pub wager_leg_id: LegId,
    /// Price at placement.
    pub opening_odds: SignedOdds,
    /// Market price at event start, when it was captured.
    #[serde(default)]
    pub closing_odds: Option<SignedOdds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sport: Option<String>,
}

impl ClosingLineRecord {
    pub fn new(
        wager_leg_id: impl Into<LegId>,
        opening_odds: SignedOdds,
        closing_odds: Option<SignedOdds>,
    ) -> Self {
        Self {
            wager_leg_id: wager_leg_id.into(),
            opening_odds,
            closing_odds,
            sport: None,
        }
    }

    #[must_use]
    pub fn with_sport(mut self, sport: impl Into<String>) -> Self {
        self.sport = Some(sport.into());
        self
    }

    /// CLV of this record, or `None` without a closing price.
    #[must_use]
    pub fn clv(&self, thresholds: &ClvThresholds) -> Option<ClvResult> {
        self.closing_odds
            .map(|closing| compute_clv_with(self.opening_odds, closing, thresholds))
    }
}

/// Settlement state of a wager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BetStatus {
    Pending,
    Won,
    Lost,
    Pushed,
}

impl BetStatus {
    /// Whether the outcome is known.
    #[must_use]
    pub const fn is_settled(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Outcome and stake of a wager leg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SettlementData", rename_all = "camelCase")]
pub struct Settlement {
    wager_leg_id: LegId,
    status: BetStatus,
    stake: Money,
}

impl Settlement {
    /// # Errors
    ///
    /// Rejects negative stakes.
    pub fn try_new(
        wager_leg_id: impl Into<LegId>,
        status: BetStatus,
        stake: Money,
    ) -> Result<Self, DomainError> {
        if stake < Decimal::ZERO {
            return Err(DomainError::NegativeStake { stake });
        }
        Ok(Self {
            wager_leg_id: wager_leg_id.into(),
            status,
            stake,
        })
    }

    #[must_use]
    pub const fn wager_leg_id(&self) -> &LegId {
        &self.wager_leg_id
    }

    #[must_use]
    pub const fn status(&self) -> BetStatus {
        self.status
    }

    #[must_use]
    pub const fn stake(&self) -> Money {
        self.stake
    }

    /// Realized profit at `opening_odds`, `None` while pending.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::OddsOverflow`] when a win pays more than can
    /// be represented.
    pub fn realized_profit(
        &self,
        opening_odds: SignedOdds,
    ) -> Result<Option<Money>, DomainError> {
        match self.status {
            BetStatus::Pending => Ok(None),
            BetStatus::Won => profit(self.stake, Some(opening_odds)).map(Some),
            BetStatus::Lost => Ok(Some(-self.stake)),
            BetStatus::Pushed => Ok(Some(Decimal::ZERO)),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettlementData {
    wager_leg_id: LegId,
    status: BetStatus,
    stake: Money,
}

impl TryFrom<SettlementData> for Settlement {
    type Error = DomainError;

    fn try_from(data: SettlementData) -> Result<Self, Self::Error> {
        Self::try_new(data.wager_leg_id, data.status, data.stake)
    }
}

/// Number of records per CLV category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    pub positive: u64,
    pub neutral: u64,
    pub negative: u64,
}

impl CategoryCounts {
    fn record(&mut self, category: ClvCategory) {
        match category {
            ClvCategory::Positive => self.positive += 1,
            ClvCategory::Neutral => self.neutral += 1,
            ClvCategory::Negative => self.negative += 1,
        }
    }
}

/// CLV roll-up over a set of records.
///
/// Ratios are `None` when their denominator is empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClvSummary {
    /// Records with a closing price.
    pub total_wagers: u64,
    /// Records skipped for lack of a closing price.
    pub excluded: u64,
    /// Mean CLV percentage.
    pub average_clv: Option<Decimal>,
    pub counts: CategoryCounts,
    /// Share (0-1) of positive-CLV records among those with a known outcome.
    pub clv_win_rate: Option<Decimal>,
    /// Mean expected return in percent, treating the close as fair.
    pub expected_roi: Option<Decimal>,
    /// Realized profit over amount staked, in percent, for settled records.
    pub actual_roi: Option<Decimal>,
    pub settled_wagers: u64,
    pub total_staked: Money,
    pub realized_profit: Money,
}

/// Aggregate with the default ±2 thresholds.
#[must_use]
pub fn aggregate(records: &[ClosingLineRecord], settlements: &[Settlement]) -> ClvSummary {
    aggregate_with(records, settlements, &ClvThresholds::default())
}

/// Fold `records` and their `settlements` into a [`ClvSummary`].
///
/// Settlements are matched to records by leg id; records without a
/// settlement count as pending.
#[must_use]
pub fn aggregate_with(
    records: &[ClosingLineRecord],
    settlements: &[Settlement],
    thresholds: &ClvThresholds,
) -> ClvSummary {
    let outcomes: HashMap<&LegId, &Settlement> = settlements
        .iter()
        .map(|settlement| (settlement.wager_leg_id(), settlement))
        .collect();

    let mut summary = ClvSummary::default();
    let mut clv_sum = Decimal::ZERO;
    let mut edge_sum = Decimal::ZERO;
    let mut known_outcomes = 0u64;
    let mut known_positive = 0u64;

    for record in records {
        let (Some(closing), Some(result)) = (record.closing_odds, record.clv(thresholds)) else {
            debug!(leg_id = %record.wager_leg_id, "no closing price, excluding record");
            summary.excluded += 1;
            continue;
        };

        summary.total_wagers += 1;
        summary.counts.record(result.category);
        clv_sum += result.clv_percent;
        edge_sum += expected_edge_percent(record.opening_odds, closing);

        let Some(settlement) = outcomes.get(&record.wager_leg_id) else {
            continue;
        };
        let realized = match settlement.realized_profit(record.opening_odds) {
            Ok(Some(realized)) => realized,
            Ok(None) => continue,
            Err(e) => {
                warn!(leg_id = %record.wager_leg_id, error = %e, "cannot settle record");
                continue;
            }
        };

        known_outcomes += 1;
        if result.category == ClvCategory::Positive {
            known_positive += 1;
        }
        summary.settled_wagers += 1;
        summary.total_staked += settlement.stake();
        summary.realized_profit += realized;
    }

    if summary.total_wagers > 0 {
        let count = Decimal::from(summary.total_wagers);
        summary.average_clv = Some(clv_sum / count);
        summary.expected_roi = Some(edge_sum / count);
    }
    if known_outcomes > 0 {
        summary.clv_win_rate = Some(Decimal::from(known_positive) / Decimal::from(known_outcomes));
    }
    if summary.total_staked > Decimal::ZERO {
        summary.actual_roi =
            Some(summary.realized_profit / summary.total_staked * Decimal::ONE_HUNDRED);
    }
    summary.realized_profit = round_cents(summary.realized_profit);

    summary
}

/// Breakdown report: one summary per key.
#[must_use]
pub fn aggregate_by<K, F>(
    records: &[ClosingLineRecord],
    settlements: &[Settlement],
    thresholds: &ClvThresholds,
    key: F,
) -> BTreeMap<K, ClvSummary>
where
    K: Ord,
    F: Fn(&ClosingLineRecord) -> K,
{
    let mut partitions: BTreeMap<K, Vec<ClosingLineRecord>> = BTreeMap::new();
    for record in records {
        partitions.entry(key(record)).or_default().push(record.clone());
    }

    partitions
        .into_iter()
        .map(|(k, group)| (k, aggregate_with(&group, settlements, thresholds)))
        .collect()
}

/// Breakdown by sport key; records without a sport are grouped as `unknown`.
#[must_use]
pub fn aggregate_by_sport(
    records: &[ClosingLineRecord],
    settlements: &[Settlement],
    thresholds: &ClvThresholds,
) -> BTreeMap<String, ClvSummary> {
    aggregate_by(records, settlements, thresholds, |record| {
        record
            .sport
            .clone()
            .unwrap_or_else(|| "unknown".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn settled(id: &str, status: BetStatus, stake: Decimal) -> Settlement {
        Settlement::try_new(id, status, stake).unwrap()
    }

    #[test]
    fn empty_input_yields_empty_summary() {
        let summary = aggregate(&[], &[]);
        assert_eq!(summary.total_wagers, 0);
        assert_eq!(summary.average_clv, None);
        assert_eq!(summary.clv_win_rate, None);
        assert_eq!(summary.actual_roi, None);
    }

    #[test]
    fn records_without_closing_price_are_excluded() {
        let records = vec![
            ClosingLineRecord::new("a", -110, Some(-130)),
            ClosingLineRecord::new("b", -110, None),
        ];
        let summary = aggregate(&records, &[]);
        assert_eq!(summary.total_wagers, 1);
        assert_eq!(summary.excluded, 1);
        assert_eq!(summary.counts.positive, 1);
        assert_eq!(summary.counts.neutral, 0);
    }

    #[test]
    fn average_and_counts() {
        let records = vec![
            ClosingLineRecord::new("a", 150, Some(150)),
            ClosingLineRecord::new("b", -110, Some(-130)),
            ClosingLineRecord::new("c", -130, Some(-110)),
        ];
        let summary = aggregate(&records, &[]);
        assert_eq!(
            summary.counts,
            CategoryCounts {
                positive: 1,
                neutral: 1,
                negative: 1
            }
        );

        let expected = (dec!(7.9051) + dec!(-7.3260)) / dec!(3);
        let average = summary.average_clv.unwrap();
        assert!((average - expected).abs() < dec!(0.001));
    }

    #[test]
    fn win_rate_counts_only_known_outcomes() {
        let records = vec![
            ClosingLineRecord::new("a", -110, Some(-130)),
            ClosingLineRecord::new("b", -110, Some(-140)),
            ClosingLineRecord::new("c", -130, Some(-110)),
            ClosingLineRecord::new("d", 150, Some(150)),
        ];
        let settlements = vec![
            settled("a", BetStatus::Won, dec!(110)),
            settled("c", BetStatus::Lost, dec!(130)),
            settled("d", BetStatus::Pending, dec!(100)),
        ];
        let summary = aggregate(&records, &settlements);
        // Known outcomes: a (positive), c (negative).
        assert_eq!(summary.clv_win_rate, Some(dec!(0.5)));
        assert_eq!(summary.settled_wagers, 2);
    }

    #[test]
    fn actual_roi_from_realized_profit() {
        let records = vec![
            ClosingLineRecord::new("a", -110, Some(-120)),
            ClosingLineRecord::new("b", 150, Some(140)),
            ClosingLineRecord::new("c", 200, Some(180)),
        ];
        let settlements = vec![
            settled("a", BetStatus::Won, dec!(110)),
            settled("b", BetStatus::Lost, dec!(100)),
            settled("c", BetStatus::Pushed, dec!(50)),
        ];
        let summary = aggregate(&records, &settlements);
        // +100 - 100 + 0 over 260 staked.
        assert_eq!(summary.realized_profit, dec!(0));
        assert_eq!(summary.total_staked, dec!(260));
        assert_eq!(summary.actual_roi, Some(Decimal::ZERO));
    }

    #[test]
    fn actual_roi_positive() {
        let records = vec![ClosingLineRecord::new("a", 150, Some(120))];
        let settlements = vec![settled("a", BetStatus::Won, dec!(100))];
        let summary = aggregate(&records, &settlements);
        assert_eq!(summary.actual_roi, Some(dec!(150)));
    }

    #[test]
    fn expected_roi_tracks_implied_edge() {
        let records = vec![ClosingLineRecord::new("a", -110, Some(-130))];
        let summary = aggregate(&records, &[]);
        let roi = summary.expected_roi.unwrap();
        assert!((roi - dec!(7.905)).abs() < dec!(0.001));
    }

    #[test]
    fn unrepresentable_win_is_left_unsettled() {
        let long_shot = 9_000_000_000_000_000_000;
        let records = vec![
            ClosingLineRecord::new("a", long_shot, Some(long_shot)),
            ClosingLineRecord::new("b", 150, Some(120)),
        ];
        let settlements = vec![
            settled("a", BetStatus::Won, dec!(100000000000)),
            settled("b", BetStatus::Won, dec!(100)),
        ];
        assert_eq!(
            settlements[0].realized_profit(long_shot),
            Err(DomainError::OddsOverflow)
        );

        let summary = aggregate(&records, &settlements);
        assert_eq!(summary.total_wagers, 2);
        assert_eq!(summary.settled_wagers, 1);
        assert_eq!(summary.realized_profit, dec!(150));
    }

    #[test]
    fn settlement_rejects_negative_stake() {
        assert!(Settlement::try_new("a", BetStatus::Won, dec!(-1)).is_err());
    }

    #[test]
    fn breakdown_by_sport() {
        let records = vec![
            ClosingLineRecord::new("a", -110, Some(-130)).with_sport("basketball_nba"),
            ClosingLineRecord::new("b", -110, Some(-105)).with_sport("basketball_nba"),
            ClosingLineRecord::new("c", 120, Some(110)).with_sport("americanfootball_nfl"),
            ClosingLineRecord::new("d", 120, None),
        ];
        let report = aggregate_by_sport(&records, &[], &ClvThresholds::default());

        assert_eq!(report.len(), 3);
        assert_eq!(report["basketball_nba"].total_wagers, 2);
        assert_eq!(report["americanfootball_nfl"].counts.positive, 1);
        assert_eq!(report["unknown"].excluded, 1);
    }

    #[test]
    fn record_deserializes_with_missing_close() {
        let json = r#"{"wagerLegId": "leg-1", "openingOdds": -110}"#;
        let record: ClosingLineRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.closing_odds, None);
        assert!(record.clv(&ClvThresholds::default()).is_none());
    }
}
