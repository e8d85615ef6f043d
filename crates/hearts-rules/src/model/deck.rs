use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// A full 52-card deck. Built fresh for every deal and consumed entirely by
/// it; nothing holds a `Deck` once the hands are out.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// All 52 cards in deterministic suit-major, rank-ascending order.
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(52);
        for suit in Suit::ALL.iter().copied() {
            for rank in Rank::ORDERED.iter().copied() {
                cards.push(Card::new(suit, rank));
            }
        }
        Self { cards }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.shuffle(rng);
        deck
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    /// Unbiased Fisher-Yates via `SliceRandom::shuffle`.
    pub fn shuffle<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

#[cfg(test)]
mod tests {
    use super::Deck;
    use crate::model::card::Card;
    use std::collections::HashSet;

    #[test]
    fn standard_deck_is_52_unique_cards() {
        let deck = Deck::standard();
        let unique: HashSet<Card> = deck.cards().iter().copied().collect();
        assert_eq!(deck.cards().len(), 52);
        assert_eq!(unique.len(), 52);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let deck = Deck::shuffled_with_seed(7);
        let unique: HashSet<Card> = deck.cards().iter().copied().collect();
        assert_eq!(unique.len(), 52);
    }

    #[test]
    fn same_seed_same_order() {
        assert_eq!(
            Deck::shuffled_with_seed(42).cards(),
            Deck::shuffled_with_seed(42).cards()
        );
    }

    #[test]
    fn different_seeds_differ() {
        assert_ne!(
            Deck::shuffled_with_seed(1).cards(),
            Deck::shuffled_with_seed(2).cards()
        );
    }

    // Coarse uniformity check: over many shuffles the two of clubs should
    // land in each quarter of the deck about equally often.
    #[test]
    fn shuffle_shows_no_gross_positional_bias() {
        use rand::SeedableRng;
        use rand::rngs::StdRng;

        let mut rng = StdRng::seed_from_u64(2026);
        let trials = 4_000usize;
        let mut quarters = [0usize; 4];
        for _ in 0..trials {
            let deck = Deck::shuffled(&mut rng);
            let pos = deck
                .cards()
                .iter()
                .position(|&c| c == Card::TWO_OF_CLUBS)
                .expect("two of clubs present");
            quarters[pos / 13] += 1;
        }

        let expected = trials / 4;
        for count in quarters {
            // Allow +-25% of expected; ~8 standard deviations at this sample size.
            assert!(
                count > expected * 3 / 4 && count < expected * 5 / 4,
                "quarter counts {quarters:?} drift too far from {expected}"
            );
        }
    }
}
