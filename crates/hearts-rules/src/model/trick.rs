use crate::model::card::Card;
use crate::model::seat::Seat;
use crate::model::suit::Suit;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Play {
    pub seat: Seat,
    pub card: Card,
}

/// One round of four plays. Plays are append-only apart from a single pop
/// used by undo; the winner is recorded once, when the trick resolves.
#[derive(Debug, Clone)]
pub struct Trick {
    leader: Seat,
    number: u8,
    plays: Vec<Play>,
    winner: Option<Seat>,
}

impl Trick {
    /// `number` is 1-based; a hand runs tricks 1 through 13.
    pub fn new(leader: Seat, number: u8) -> Self {
        Self {
            leader,
            number,
            plays: Vec::with_capacity(4),
            winner: None,
        }
    }

    pub fn leader(&self) -> Seat {
        self.leader
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn is_full(&self) -> bool {
        self.plays.len() == 4
    }

    pub fn lead_suit(&self) -> Option<Suit> {
        self.plays.first().map(|play| play.card.suit)
    }

    /// Append a play. Turn order is the engine's business; the trick only
    /// refuses a fifth card.
    pub fn push(&mut self, seat: Seat, card: Card) -> bool {
        if self.is_full() {
            return false;
        }
        self.plays.push(Play { seat, card });
        true
    }

    /// Pop the most recent play (the undo path). Refused once the winner is
    /// recorded.
    pub fn pop(&mut self) -> Option<Play> {
        if self.winner.is_some() {
            return None;
        }
        self.plays.pop()
    }

    /// Compute and record the winner: highest rank among plays matching the
    /// led suit. Only resolves once all four plays exist.
    pub fn resolve(&mut self) -> Option<Seat> {
        if !self.is_full() {
            return None;
        }
        if self.winner.is_none() {
            let lead = self.lead_suit()?;
            self.winner = self
                .plays
                .iter()
                .filter(|play| play.card.suit == lead)
                .max_by_key(|play| play.card.rank)
                .map(|play| play.seat);
        }
        self.winner
    }

    pub fn winner(&self) -> Option<Seat> {
        self.winner
    }

    pub fn penalty_points(&self) -> u8 {
        self.plays
            .iter()
            .map(|play| play.card.penalty_points())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::Trick;
    use crate::model::card::Card;
    use crate::model::rank::Rank;
    use crate::model::seat::Seat;
    use crate::model::suit::Suit;

    fn full_trick(cards: [Card; 4]) -> Trick {
        let mut trick = Trick::new(Seat::South, 2);
        for (seat, card) in Seat::CYCLE.iter().copied().zip(cards) {
            assert!(trick.push(seat, card));
        }
        trick
    }

    #[test]
    fn winner_is_highest_of_led_suit() {
        let mut trick = full_trick([
            Card::new(Suit::Diamonds, Rank::Five),
            Card::new(Suit::Clubs, Rank::King),
            Card::new(Suit::Diamonds, Rank::Two),
            Card::new(Suit::Diamonds, Rank::Ace),
        ]);
        assert_eq!(trick.resolve(), Some(Seat::East));
        assert_eq!(trick.winner(), Some(Seat::East));
    }

    #[test]
    fn off_suit_high_cards_do_not_win() {
        let mut trick = full_trick([
            Card::new(Suit::Clubs, Rank::Two),
            Card::new(Suit::Spades, Rank::Ace),
            Card::new(Suit::Hearts, Rank::Ace),
            Card::new(Suit::Clubs, Rank::Three),
        ]);
        assert_eq!(trick.resolve(), Some(Seat::East));
    }

    #[test]
    fn no_winner_until_four_plays() {
        let mut trick = Trick::new(Seat::West, 3);
        trick.push(Seat::West, Card::new(Suit::Clubs, Rank::Nine));
        assert_eq!(trick.resolve(), None);
        assert_eq!(trick.winner(), None);
    }

    #[test]
    fn refuses_a_fifth_play() {
        let mut trick = full_trick([
            Card::new(Suit::Clubs, Rank::Two),
            Card::new(Suit::Clubs, Rank::Three),
            Card::new(Suit::Clubs, Rank::Four),
            Card::new(Suit::Clubs, Rank::Five),
        ]);
        assert!(!trick.push(Seat::South, Card::new(Suit::Clubs, Rank::Six)));
    }

    #[test]
    fn pop_reverses_the_last_play_until_resolved() {
        let mut trick = Trick::new(Seat::North, 5);
        trick.push(Seat::North, Card::new(Suit::Spades, Rank::Jack));
        trick.push(Seat::East, Card::new(Suit::Spades, Rank::Four));
        let undone = trick.pop().expect("pop returns last play");
        assert_eq!(undone.seat, Seat::East);
        assert_eq!(trick.plays().len(), 1);
    }

    #[test]
    fn pop_refused_after_resolution() {
        let mut trick = full_trick([
            Card::new(Suit::Clubs, Rank::Two),
            Card::new(Suit::Clubs, Rank::Three),
            Card::new(Suit::Clubs, Rank::Four),
            Card::new(Suit::Clubs, Rank::Five),
        ]);
        trick.resolve();
        assert!(trick.pop().is_none());
    }

    #[test]
    fn penalty_points_sum_hearts_and_queen() {
        let trick = full_trick([
            Card::new(Suit::Clubs, Rank::Two),
            Card::QUEEN_OF_SPADES,
            Card::new(Suit::Hearts, Rank::Seven),
            Card::new(Suit::Hearts, Rank::King),
        ]);
        assert_eq!(trick.penalty_points(), 15);
    }
}
