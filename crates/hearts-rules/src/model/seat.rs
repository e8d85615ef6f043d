use core::fmt;
use serde::{Deserialize, Serialize};

/// Stable table position, used as the player identifier throughout the
/// engine. Turn order proceeds South -> West -> North -> East.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Seat {
    South = 0,
    West = 1,
    North = 2,
    East = 3,
}

impl Seat {
    /// Seats in turn order. South is the human seat in the single-client
    /// arrangement.
    pub const CYCLE: [Seat; 4] = [Seat::South, Seat::West, Seat::North, Seat::East];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Seat::South),
            1 => Some(Seat::West),
            2 => Some(Seat::North),
            3 => Some(Seat::East),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn next(self) -> Seat {
        match self {
            Seat::South => Seat::West,
            Seat::West => Seat::North,
            Seat::North => Seat::East,
            Seat::East => Seat::South,
        }
    }

    pub const fn previous(self) -> Seat {
        match self {
            Seat::South => Seat::East,
            Seat::West => Seat::South,
            Seat::North => Seat::West,
            Seat::East => Seat::North,
        }
    }

    pub const fn across(self) -> Seat {
        match self {
            Seat::South => Seat::North,
            Seat::West => Seat::East,
            Seat::North => Seat::South,
            Seat::East => Seat::West,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Seat::South => "South",
            Seat::West => "West",
            Seat::North => "North",
            Seat::East => "East",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::Seat;

    #[test]
    fn next_wraps_the_table() {
        assert_eq!(Seat::East.next(), Seat::South);
    }

    #[test]
    fn previous_inverts_next() {
        for seat in Seat::CYCLE {
            assert_eq!(seat.next().previous(), seat);
        }
    }

    #[test]
    fn across_is_two_steps() {
        for seat in Seat::CYCLE {
            assert_eq!(seat.across(), seat.next().next());
        }
    }

    #[test]
    fn index_round_trips() {
        for (i, seat) in Seat::CYCLE.iter().enumerate() {
            assert_eq!(Seat::from_index(i), Some(*seat));
            assert_eq!(seat.index(), i);
        }
    }
}
