use rust_decimal::Decimal;

use wagerline::domain::{Leg, SelectionSide, SignedOdds};

pub const NFL: &str = "americanfootball_nfl";
pub const NBA: &str = "basketball_nba";

pub fn moneyline(event: &str, side: SelectionSide, odds: SignedOdds) -> Leg {
    Leg::moneyline(event, side, odds).expect("valid moneyline leg")
}

pub fn spread(event: &str, side: SelectionSide, line: Decimal, odds: SignedOdds) -> Leg {
    Leg::spread(event, side, line, odds).expect("valid spread leg")
}

pub fn total(event: &str, side: SelectionSide, line: Decimal, odds: SignedOdds) -> Leg {
    Leg::total(event, side, line, odds).expect("valid total leg")
}

pub fn nfl_spread(event: &str, side: SelectionSide, line: Decimal) -> Leg {
    spread(event, side, line, -110).with_sport(NFL)
}

pub fn nba_spread(event: &str, side: SelectionSide, line: Decimal) -> Leg {
    spread(event, side, line, -110).with_sport(NBA)
}
