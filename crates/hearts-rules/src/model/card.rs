use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;

/// A card is identified by its (suit, rank) pair; no two cards in one deck
/// share an identity. Presentation state (face up, in trick) is implied by
/// where the card currently lives, not stored on the card itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub const TWO_OF_CLUBS: Card = Card::new(Suit::Clubs, Rank::Two);
    pub const QUEEN_OF_SPADES: Card = Card::new(Suit::Spades, Rank::Queen);

    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    pub const fn is_queen_of_spades(self) -> bool {
        matches!(self.rank, Rank::Queen) && matches!(self.suit, Suit::Spades)
    }

    /// Hearts and the queen of spades; the cards that score and that gate
    /// the "hearts broken" latch.
    pub const fn is_penalty(self) -> bool {
        self.suit.is_heart() || self.is_queen_of_spades()
    }

    pub fn penalty_points(self) -> u8 {
        if self.is_queen_of_spades() {
            13
        } else if self.suit.is_heart() {
            1
        } else {
            0
        }
    }

    /// Face-image identifier for the UI layer, e.g. "QS.svg".
    pub fn asset_key(self) -> String {
        format!("{}{}.svg", self.rank, self.suit)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

#[cfg(test)]
mod tests {
    use super::Card;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    #[test]
    fn queen_of_spades_is_thirteen_points() {
        assert!(Card::QUEEN_OF_SPADES.is_queen_of_spades());
        assert!(Card::QUEEN_OF_SPADES.is_penalty());
        assert_eq!(Card::QUEEN_OF_SPADES.penalty_points(), 13);
    }

    #[test]
    fn each_heart_is_one_point() {
        let card = Card::new(Suit::Hearts, Rank::Ace);
        assert!(card.is_penalty());
        assert_eq!(card.penalty_points(), 1);
    }

    #[test]
    fn other_cards_score_nothing() {
        let card = Card::new(Suit::Spades, Rank::King);
        assert!(!card.is_penalty());
        assert_eq!(card.penalty_points(), 0);
    }

    #[test]
    fn asset_key_matches_face_files() {
        assert_eq!(Card::QUEEN_OF_SPADES.asset_key(), "QS.svg");
        assert_eq!(Card::new(Suit::Diamonds, Rank::Ten).asset_key(), "10D.svg");
    }
}
