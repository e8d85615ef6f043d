use crate::model::seat::Seat;
use core::fmt;
use std::str::FromStr;

/// Where each seat's three staged cards travel this hand. The cycle is
/// indexed by the deal counter, so hand 1 passes left and every fourth
/// hand keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassDirection {
    Left,
    Right,
    Across,
    Keep,
}

impl PassDirection {
    pub const CYCLE: [PassDirection; 4] = [
        PassDirection::Left,
        PassDirection::Right,
        PassDirection::Across,
        PassDirection::Keep,
    ];

    pub const fn for_deal(deal_counter: usize) -> PassDirection {
        Self::CYCLE[deal_counter % 4]
    }

    /// Keep hands skip the pass phase entirely.
    pub const fn passes(self) -> bool {
        !matches!(self, PassDirection::Keep)
    }

    /// The seat receiving cards staged by `seat`.
    pub const fn target(self, seat: Seat) -> Seat {
        match self {
            PassDirection::Left => seat.next(),
            PassDirection::Right => seat.previous(),
            PassDirection::Across => seat.across(),
            PassDirection::Keep => seat,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            PassDirection::Left => "left",
            PassDirection::Right => "right",
            PassDirection::Across => "across",
            PassDirection::Keep => "keep",
        }
    }
}

impl fmt::Display for PassDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PassDirection {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "left" => Ok(PassDirection::Left),
            "right" => Ok(PassDirection::Right),
            "across" => Ok(PassDirection::Across),
            "keep" => Ok(PassDirection::Keep),
            _ => Err(()),
        }
    }
}
