//! Wager legs.
//!
//! A [`Leg`] is one selection inside a wager: a moneyline, spread or total
//! pick on a single event. Legs are validated on construction and are
//! immutable afterwards except through the explicit `with_*` updates, which
//! return a new leg.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::{EventId, LegId};
use super::money::{DecimalOdds, SignedOdds};
use super::odds::to_decimal;

/// Kind of market a leg is placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionType {
    Moneyline,
    Spread,
    Total,
}

impl SelectionType {
    /// Whether `side` is a legal selection for this market.
    #[must_use]
    pub const fn accepts(self, side: SelectionSide) -> bool {
        match self {
            Self::Moneyline | Self::Spread => side.is_team_side(),
            Self::Total => !side.is_team_side(),
        }
    }

    /// Whether this market carries a line.
    #[must_use]
    pub const fn has_line(self) -> bool {
        matches!(self, Self::Spread | Self::Total)
    }
}

impl fmt::Display for SelectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Moneyline => "moneyline",
            Self::Spread => "spread",
            Self::Total => "total",
        };
        f.write_str(name)
    }
}

/// Side of a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionSide {
    Home,
    Away,
    Over,
    Under,
}

impl SelectionSide {
    /// Home and away are team sides; over and under are total sides.
    #[must_use]
    pub const fn is_team_side(self) -> bool {
        matches!(self, Self::Home | Self::Away)
    }
}

impl fmt::Display for SelectionSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Home => "home",
            Self::Away => "away",
            Self::Over => "over",
            Self::Under => "under",
        };
        f.write_str(name)
    }
}

/// A single selection inside a wager.
///
/// `odds` is the price the leg was offered at. A caller may override it with
/// [`Leg::with_adjusted_odds`]; the override becomes the
/// [effective odds](Leg::effective_odds) while the original stays available
/// for auditing and [reset](Leg::clear_adjusted_odds).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LegData", rename_all = "camelCase")]
pub struct Leg {
    id: LegId,
    event_id: EventId,
    #[serde(skip_serializing_if = "Option::is_none")]
    sport: Option<String>,
    selection_type: SelectionType,
    selection_side: SelectionSide,
    odds: SignedOdds,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_adjusted_odds: Option<SignedOdds>,
}

impl Leg {
    /// Create a leg with domain invariant validation.
    ///
    /// # Domain Invariants
    ///
    /// - `side` must belong to `selection_type` (home/away for moneyline and
    ///   spread, over/under for totals)
    /// - spread and total legs must carry a `line`
    ///
    /// A line supplied for a moneyline leg is ignored.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` if any invariant is violated.
    pub fn try_new(
        event_id: impl Into<EventId>,
        selection_type: SelectionType,
        side: SelectionSide,
        odds: SignedOdds,
        line: Option<Decimal>,
    ) -> Result<Self, DomainError> {
        if !selection_type.accepts(side) {
            return Err(DomainError::SideMismatch {
                selection_type,
                side,
            });
        }
        if selection_type.has_line() && line.is_none() {
            return Err(DomainError::MissingLine { selection_type });
        }

        Ok(Self {
            id: LegId::new(),
            event_id: event_id.into(),
            sport: None,
            selection_type,
            selection_side: side,
            odds,
            line: if selection_type.has_line() { line } else { None },
            user_adjusted_odds: None,
        })
    }

    /// Moneyline pick on `side`.
    pub fn moneyline(
        event_id: impl Into<EventId>,
        side: SelectionSide,
        odds: SignedOdds,
    ) -> Result<Self, DomainError> {
        Self::try_new(event_id, SelectionType::Moneyline, side, odds, None)
    }

    /// Spread pick on `side` at `line`.
    pub fn spread(
        event_id: impl Into<EventId>,
        side: SelectionSide,
        line: Decimal,
        odds: SignedOdds,
    ) -> Result<Self, DomainError> {
        Self::try_new(event_id, SelectionType::Spread, side, odds, Some(line))
    }

    /// Total pick (`Over`/`Under`) at `line`.
    pub fn total(
        event_id: impl Into<EventId>,
        side: SelectionSide,
        line: Decimal,
        odds: SignedOdds,
    ) -> Result<Self, DomainError> {
        Self::try_new(event_id, SelectionType::Total, side, odds, Some(line))
    }

    /// Replace the generated identifier with a caller-owned one.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<LegId>) -> Self {
        self.id = id.into();
        self
    }

    /// Attach a sport key such as `americanfootball_nfl`.
    #[must_use]
    pub fn with_sport(mut self, sport: impl Into<String>) -> Self {
        self.sport = Some(sport.into());
        self
    }

    /// Override the offered price; the original odds are kept.
    #[must_use]
    pub fn with_adjusted_odds(mut self, odds: SignedOdds) -> Self {
        self.user_adjusted_odds = Some(odds);
        self
    }

    /// Drop any override and price the leg at its original odds again.
    #[must_use]
    pub fn clear_adjusted_odds(mut self) -> Self {
        self.user_adjusted_odds = None;
        self
    }

    /// Copy of this leg at a different line. Only meaningful for spread and
    /// total legs.
    #[must_use]
    pub(crate) fn with_line(&self, line: Decimal) -> Self {
        Self {
            line: Some(line),
            ..self.clone()
        }
    }

    #[must_use]
    pub const fn id(&self) -> &LegId {
        &self.id
    }

    #[must_use]
    pub const fn event_id(&self) -> &EventId {
        &self.event_id
    }

    #[must_use]
    pub fn sport(&self) -> Option<&str> {
        self.sport.as_deref()
    }

    #[must_use]
    pub const fn selection_type(&self) -> SelectionType {
        self.selection_type
    }

    #[must_use]
    pub const fn side(&self) -> SelectionSide {
        self.selection_side
    }

    /// The price the leg was originally offered at.
    #[must_use]
    pub const fn odds(&self) -> SignedOdds {
        self.odds
    }

    #[must_use]
    pub const fn line(&self) -> Option<Decimal> {
        self.line
    }

    #[must_use]
    pub const fn adjusted_odds(&self) -> Option<SignedOdds> {
        self.user_adjusted_odds
    }

    /// The price used for every computation: the override when present,
    /// otherwise the original odds.
    #[must_use]
    pub fn effective_odds(&self) -> SignedOdds {
        self.user_adjusted_odds.unwrap_or(self.odds)
    }

    /// Effective odds in decimal notation.
    #[must_use]
    pub fn decimal_odds(&self) -> DecimalOdds {
        to_decimal(self.effective_odds())
    }
}

impl fmt::Display for Leg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.event_id, self.selection_type, self.selection_side
        )?;
        if let Some(line) = self.line {
            write!(f, " {}", super::odds::format_line(line))?;
        }
        write!(
            f,
            " @ {}",
            super::odds::format_odds(self.effective_odds(), super::odds::OddsFormat::American)
        )
    }
}

/// Wire shape of a leg, validated into [`Leg`] on deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegData {
    #[serde(default)]
    id: Option<LegId>,
    event_id: EventId,
    #[serde(default)]
    sport: Option<String>,
    selection_type: SelectionType,
    selection_side: SelectionSide,
    odds: SignedOdds,
    #[serde(default)]
    line: Option<Decimal>,
    #[serde(default)]
    user_adjusted_odds: Option<SignedOdds>,
}

impl TryFrom<LegData> for Leg {
    type Error = DomainError;

    fn try_from(data: LegData) -> Result<Self, Self::Error> {
        let mut leg = Self::try_new(
            data.event_id,
            data.selection_type,
            data.selection_side,
            data.odds,
            data.line,
        )?;
        if let Some(id) = data.id {
            leg.id = id;
        }
        leg.sport = data.sport;
        leg.user_adjusted_odds = data.user_adjusted_odds;
        Ok(leg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn spread_requires_line() {
        let result = Leg::try_new("g1", SelectionType::Spread, SelectionSide::Home, -110, None);
        assert_eq!(
            result,
            Err(DomainError::MissingLine {
                selection_type: SelectionType::Spread
            })
        );
    }

    #[test]
    fn total_rejects_team_side() {
        let result = Leg::total("g1", SelectionSide::Home, dec!(45.5), -110);
        assert!(matches!(result, Err(DomainError::SideMismatch { .. })));
    }

    #[test]
    fn moneyline_rejects_total_side() {
        let result = Leg::moneyline("g1", SelectionSide::Over, -110);
        assert!(matches!(result, Err(DomainError::SideMismatch { .. })));
    }

    #[test]
    fn moneyline_drops_line() {
        let leg = Leg::try_new(
            "g1",
            SelectionType::Moneyline,
            SelectionSide::Away,
            150,
            Some(dec!(3.5)),
        )
        .unwrap();
        assert_eq!(leg.line(), None);
    }

    #[test]
    fn adjusted_odds_supersede_without_losing_original() {
        let leg = Leg::moneyline("g1", SelectionSide::Home, -110)
            .unwrap()
            .with_adjusted_odds(-105);
        assert_eq!(leg.effective_odds(), -105);
        assert_eq!(leg.odds(), -110);

        let reset = leg.clear_adjusted_odds();
        assert_eq!(reset.effective_odds(), -110);
    }

    #[test]
    fn decimal_odds_uses_effective_price() {
        let leg = Leg::moneyline("g1", SelectionSide::Home, -110)
            .unwrap()
            .with_adjusted_odds(150);
        assert_eq!(leg.decimal_odds(), dec!(2.5));
    }

    #[test]
    fn deserializes_and_validates() {
        let json = r#"{
            "id": "leg-7",
            "eventId": "g1",
            "sport": "basketball_nba",
            "selectionType": "spread",
            "selectionSide": "home",
            "odds": -110,
            "line": -3.5
        }"#;
        let leg: Leg = serde_json::from_str(json).unwrap();
        assert_eq!(leg.id().as_str(), "leg-7");
        assert_eq!(leg.sport(), Some("basketball_nba"));
        assert_eq!(leg.line(), Some(dec!(-3.5)));

        let missing_line = r#"{
            "eventId": "g1",
            "selectionType": "total",
            "selectionSide": "over",
            "odds": -110
        }"#;
        assert!(serde_json::from_str::<Leg>(missing_line).is_err());
    }

    #[test]
    fn display_includes_line_and_price() {
        let leg = Leg::spread("g1", SelectionSide::Away, dec!(3.5), 120).unwrap();
        assert_eq!(leg.to_string(), "g1 spread away +3.5 @ +120");
    }
}
