use crate::model::hand::Hand;
use crate::model::seat::Seat;
use crate::model::trick::Trick;

/// One participant for the whole game: a fixed identity, the hand for the
/// current deal, the tricks won this hand, and the cumulative score. The
/// score only moves down through the moon-shot self-penalty.
#[derive(Debug, Clone)]
pub struct Player {
    name: String,
    seat: Seat,
    hand: Hand,
    tricks: Vec<Trick>,
    score: i32,
}

impl Player {
    pub fn new(name: impl Into<String>, seat: Seat) -> Self {
        Self {
            name: name.into(),
            seat,
            hand: Hand::new(),
            tricks: Vec::new(),
            score: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn seat(&self) -> Seat {
        self.seat
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }

    pub fn set_hand(&mut self, hand: Hand) {
        self.hand = hand;
    }

    pub fn take_trick(&mut self, trick: Trick) {
        self.tricks.push(trick);
    }

    pub fn tricks(&self) -> &[Trick] {
        &self.tricks
    }

    /// Penalty points across every trick won this hand. Tallied here at
    /// hand end rather than accumulated play by play.
    pub fn hand_penalty_points(&self) -> u8 {
        self.tricks
            .iter()
            .map(|trick| trick.penalty_points())
            .sum()
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn add_points(&mut self, points: i32) {
        self.score += points;
    }

    /// Hand-boundary reset; identity and score survive.
    pub fn clear_for_next_hand(&mut self) {
        self.hand = Hand::new();
        self.tricks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::Player;
    use crate::model::card::Card;
    use crate::model::rank::Rank;
    use crate::model::seat::Seat;
    use crate::model::suit::Suit;
    use crate::model::trick::Trick;

    fn penalty_trick(winner: Seat) -> Trick {
        let mut trick = Trick::new(winner, 1);
        trick.push(winner, Card::new(Suit::Hearts, Rank::Two));
        trick.push(winner.next(), Card::new(Suit::Hearts, Rank::Three));
        trick.push(winner.across(), Card::new(Suit::Clubs, Rank::Four));
        trick.push(winner.previous(), Card::QUEEN_OF_SPADES);
        trick
    }

    #[test]
    fn tallies_penalties_from_won_tricks() {
        let mut player = Player::new("Ann", Seat::South);
        player.take_trick(penalty_trick(Seat::South));
        assert_eq!(player.hand_penalty_points(), 15);
    }

    #[test]
    fn clear_for_next_hand_keeps_identity_and_score() {
        let mut player = Player::new("Ben", Seat::West);
        player.add_points(11);
        player.take_trick(penalty_trick(Seat::West));
        player.clear_for_next_hand();
        assert_eq!(player.name(), "Ben");
        assert_eq!(player.seat(), Seat::West);
        assert_eq!(player.score(), 11);
        assert!(player.tricks().is_empty());
        assert!(player.hand().is_empty());
    }

    #[test]
    fn score_can_go_negative_only_by_explicit_penalty() {
        let mut player = Player::new("Cleo", Seat::North);
        player.add_points(-26);
        assert_eq!(player.score(), -26);
    }
}
