//! Same-event leg resolution.
//!
//! Multiplying legs that describe the same outcome of one game overstates
//! the combined probability. Legs are partitioned by event, and inside a
//! multi-leg event group one narrow case is treated as redundant: exactly one
//! moneyline and exactly one spread on the same side. Only the better-priced
//! of the pair is kept; totals in the group stay.
//!
//! Every other same-event configuration (two totals, three or more side
//! picks, moneyline and spread on opposite sides) is multiplied as if the
//! legs were independent. This is a known simplification, not a correlation
//! model.

use std::collections::HashMap;

use tracing::debug;

use super::id::EventId;
use super::leg::{Leg, SelectionType};

/// Legs of one wager that share an event.
#[derive(Debug, Clone, PartialEq)]
pub struct EventLegGroup<'a> {
    event_id: &'a EventId,
    /// `(position in request, leg)` in request order.
    members: Vec<(usize, &'a Leg)>,
}

impl<'a> EventLegGroup<'a> {
    #[must_use]
    pub const fn event_id(&self) -> &'a EventId {
        self.event_id
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// More than one leg on the same event.
    #[must_use]
    pub fn is_correlated(&self) -> bool {
        self.members.len() > 1
    }

    /// The legs of this group in request order.
    pub fn legs(&self) -> impl Iterator<Item = &'a Leg> + '_ {
        self.members.iter().map(|(_, leg)| *leg)
    }

    /// Request position of the redundant leg in this group, if any.
    fn redundant_position(&self) -> Option<usize> {
        if !self.is_correlated() {
            return None;
        }

        let of_type = |kind: SelectionType| {
            self.members
                .iter()
                .filter(move |(_, leg)| leg.selection_type() == kind)
                .copied()
        };
        let moneylines: Vec<_> = of_type(SelectionType::Moneyline).collect();
        let spreads: Vec<_> = of_type(SelectionType::Spread).collect();

        let ([moneyline], [spread]) = (moneylines.as_slice(), spreads.as_slice()) else {
            return None;
        };
        if moneyline.1.side() != spread.1.side() {
            return None;
        }

        // Keep the higher decimal price; on a tie keep whichever came first.
        let (first, second) = if moneyline.0 < spread.0 {
            (moneyline, spread)
        } else {
            (spread, moneyline)
        };
        if second.1.decimal_odds() > first.1.decimal_odds() {
            Some(first.0)
        } else {
            Some(second.0)
        }
    }
}

/// Partition legs by event, in order of each event's first appearance.
#[must_use]
pub fn group_by_event(legs: &[Leg]) -> Vec<EventLegGroup<'_>> {
    let mut groups: Vec<EventLegGroup<'_>> = Vec::new();
    let mut index: HashMap<&EventId, usize> = HashMap::new();

    for (position, leg) in legs.iter().enumerate() {
        let slot = *index.entry(leg.event_id()).or_insert_with(|| {
            groups.push(EventLegGroup {
                event_id: leg.event_id(),
                members: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].members.push((position, leg));
    }

    groups
}

/// Outcome of resolving a wager's legs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    /// Legs to multiply, in request order.
    pub legs: Vec<Leg>,
    /// Redundant legs removed from same-event groups, in request order.
    pub dropped: Vec<Leg>,
}

/// Select the legs that may be multiplied together.
///
/// Each leg's effective odds (override included) decide which of a redundant
/// pair survives.
#[must_use]
pub fn resolve(legs: &[Leg]) -> Resolution {
    let mut redundant: Vec<usize> = group_by_event(legs)
        .iter()
        .filter_map(EventLegGroup::redundant_position)
        .collect();
    redundant.sort_unstable();

    let mut resolution = Resolution::default();
    for (position, leg) in legs.iter().enumerate() {
        if redundant.binary_search(&position).is_ok() {
            debug!(
                event_id = %leg.event_id(),
                leg_id = %leg.id(),
                selection = %leg.selection_type(),
                odds = leg.effective_odds(),
                "dropping redundant same-event leg"
            );
            resolution.dropped.push(leg.clone());
        } else {
            resolution.legs.push(leg.clone());
        }
    }

    resolution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::leg::SelectionSide;
    use rust_decimal_macros::dec;

    fn ml(event: &str, side: SelectionSide, odds: i64) -> Leg {
        Leg::moneyline(event, side, odds).unwrap()
    }

    fn spread(event: &str, side: SelectionSide, odds: i64) -> Leg {
        Leg::spread(event, side, dec!(-3.5), odds).unwrap()
    }

    fn total(event: &str, side: SelectionSide) -> Leg {
        Leg::total(event, side, dec!(47.5), -110).unwrap()
    }

    #[test]
    fn groups_preserve_first_appearance_order() {
        let legs = vec![
            ml("b", SelectionSide::Home, -110),
            ml("a", SelectionSide::Home, -110),
            total("b", SelectionSide::Over),
        ];
        let groups = group_by_event(&legs);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].event_id().as_str(), "b");
        assert_eq!(groups[0].len(), 2);
        assert!(groups[0].is_correlated());
        assert!(!groups[1].is_correlated());
    }

    #[test]
    fn independent_legs_pass_through() {
        let legs = vec![
            ml("a", SelectionSide::Home, -110),
            ml("b", SelectionSide::Away, 150),
        ];
        let resolution = resolve(&legs);
        assert_eq!(resolution.legs, legs);
        assert!(resolution.dropped.is_empty());
    }

    #[test]
    fn same_side_moneyline_and_spread_keeps_higher_decimal() {
        let moneyline = ml("a", SelectionSide::Home, -250);
        let line = spread("a", SelectionSide::Home, -110);
        let over = total("a", SelectionSide::Over);
        let legs = vec![moneyline.clone(), line.clone(), over.clone()];

        let resolution = resolve(&legs);
        assert_eq!(resolution.legs, vec![line, over]);
        assert_eq!(resolution.dropped, vec![moneyline]);
    }

    #[test]
    fn same_side_pair_respects_override() {
        let moneyline = ml("a", SelectionSide::Away, -250).with_adjusted_odds(120);
        let line = spread("a", SelectionSide::Away, -110);
        let legs = vec![line.clone(), moneyline.clone()];

        let resolution = resolve(&legs);
        assert_eq!(resolution.legs, vec![moneyline]);
        assert_eq!(resolution.dropped, vec![line]);
    }

    #[test]
    fn equal_prices_keep_first_leg() {
        let line = spread("a", SelectionSide::Home, -110);
        let moneyline = ml("a", SelectionSide::Home, -110);
        let resolution = resolve(&[line.clone(), moneyline.clone()]);
        assert_eq!(resolution.legs, vec![line]);
        assert_eq!(resolution.dropped, vec![moneyline]);
    }

    #[test]
    fn opposite_sides_multiply_independently() {
        let legs = vec![
            ml("a", SelectionSide::Home, -150),
            spread("a", SelectionSide::Away, -110),
        ];
        let resolution = resolve(&legs);
        assert_eq!(resolution.legs.len(), 2);
        assert!(resolution.dropped.is_empty());
    }

    #[test]
    fn two_totals_multiply_independently() {
        let legs = vec![total("a", SelectionSide::Over), total("a", SelectionSide::Under)];
        assert_eq!(resolve(&legs).legs.len(), 2);
    }

    #[test]
    fn extra_side_leg_disables_the_special_case() {
        let legs = vec![
            ml("a", SelectionSide::Home, -150),
            spread("a", SelectionSide::Home, -110),
            spread("a", SelectionSide::Home, 105),
        ];
        let resolution = resolve(&legs);
        assert_eq!(resolution.legs.len(), 3);
        assert!(resolution.dropped.is_empty());
    }

    #[test]
    fn resolution_is_per_event() {
        let legs = vec![
            ml("a", SelectionSide::Home, -200),
            ml("b", SelectionSide::Away, 130),
            spread("a", SelectionSide::Home, -110),
            spread("b", SelectionSide::Away, -105),
        ];
        let resolution = resolve(&legs);
        assert_eq!(resolution.dropped.len(), 2);
        assert_eq!(resolution.legs[0].event_id().as_str(), "b");
        assert_eq!(resolution.legs[0].effective_odds(), 130);
        assert_eq!(resolution.legs[1].event_id().as_str(), "a");
        assert_eq!(resolution.legs[1].effective_odds(), -110);
    }
}
