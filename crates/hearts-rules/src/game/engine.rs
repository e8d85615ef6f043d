use crate::game::result::{
    DealSummary, EngineError, GameVerdict, HandOutcome, PassSummary, Phase, PlayOutcome,
    ScoreSummary, TrickSummary, UndoSummary,
};
use crate::model::card::Card;
use crate::model::deck::Deck;
use crate::model::hand::Hand;
use crate::model::passing::PassDirection;
use crate::model::player::Player;
use crate::model::seat::Seat;
use crate::model::trick::Trick;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::array;

/// Cumulative score at which the game ends. The configuration surface
/// advertises a different target; honoring it is an explicit product
/// decision made through `with_end_score`, not a silent default.
pub const DEFAULT_END_SCORE: i32 = 13;

/// Snapshot taken at play time so undo can restore the exact pre-play
/// state, including the hearts-broken latch. Cleared on trick completion.
#[derive(Debug, Clone, Copy)]
struct UndoBuffer {
    seat: Seat,
    card: Card,
    hearts_broken: bool,
    hearts_broken_trick: Option<u8>,
}

#[derive(Debug, Clone, Copy)]
struct MoonShot {
    shooter: Seat,
    #[allow(dead_code)]
    gloat: bool,
}

/// The authoritative rules/state engine. Owns everything; every mutation
/// goes through a method that either fully commits or fully rejects.
#[derive(Debug, Clone)]
pub struct HeartsEngine {
    players: [Player; 4],
    phase: Phase,
    deal_counter: usize,
    hand_number: u32,
    direction: PassDirection,
    pass_buffers: [Vec<Card>; 4],
    current_trick: Option<Trick>,
    last_trick: Option<Trick>,
    turn: Seat,
    hearts_broken: bool,
    hearts_broken_trick: Option<u8>,
    undo: Option<UndoBuffer>,
    tricks_taken: [u8; 4],
    pending_moon: Option<MoonShot>,
    verdict: GameVerdict,
    end_score: i32,
    rng: StdRng,
    seed: u64,
}

impl HeartsEngine {
    pub fn new(names: [String; 4]) -> Self {
        Self::with_seed(names, rand::random())
    }

    pub fn with_seed(names: [String; 4], seed: u64) -> Self {
        Self::with_seed_at_deal(names, seed, 0)
    }

    /// Start with the deal counter already advanced; lets tests and
    /// replays begin on any point of the pass-direction cycle.
    pub fn with_seed_at_deal(names: [String; 4], seed: u64, deal_counter: usize) -> Self {
        let mut names = names.into_iter();
        let players = array::from_fn(|i| {
            let seat = Seat::from_index(i).expect("seat index in range");
            Player::new(names.next().expect("four names"), seat)
        });
        Self {
            players,
            phase: Phase::Waiting,
            deal_counter: deal_counter % 4,
            hand_number: 0,
            direction: PassDirection::for_deal(deal_counter),
            pass_buffers: array::from_fn(|_| Vec::new()),
            current_trick: None,
            last_trick: None,
            turn: Seat::South,
            hearts_broken: false,
            hearts_broken_trick: None,
            undo: None,
            tricks_taken: [0; 4],
            pending_moon: None,
            verdict: GameVerdict::Continue,
            end_score: DEFAULT_END_SCORE,
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn with_end_score(mut self, end_score: i32) -> Self {
        self.end_score = end_score;
        self
    }

    // ---- deal ----

    pub fn deal_hands(&mut self) -> Result<DealSummary, EngineError> {
        // Reject before touching the RNG so a refused deal leaves the
        // shuffle sequence untouched.
        self.ensure_can_deal()?;
        let deck = Deck::shuffled(&mut self.rng);
        self.deal_hands_with_deck(&deck)
    }

    /// Deal from a caller-supplied deck; the seeded path and tests/replays
    /// share this.
    pub fn deal_hands_with_deck(&mut self, deck: &Deck) -> Result<DealSummary, EngineError> {
        self.ensure_can_deal()?;

        self.reset_hand_state();

        // Seat order rotates with the deal counter so the same seat does
        // not receive the same slice of the deck every hand.
        for (chunk, cards) in deck.cards().chunks(13).enumerate() {
            let seat = Seat::from_index((self.deal_counter + chunk) % 4).expect("seat in range");
            self.players[seat.index()].set_hand(Hand::with_cards(cards.to_vec()));
        }

        self.direction = PassDirection::for_deal(self.deal_counter);
        self.deal_counter = (self.deal_counter + 1) % 4;
        self.hand_number += 1;

        let leader = if self.direction.passes() {
            self.phase = Phase::Pass;
            None
        } else {
            Some(self.start_play())
        };

        Ok(DealSummary {
            hand_number: self.hand_number,
            direction: self.direction,
            phase: self.phase,
            leader,
        })
    }

    // ---- passing ----

    /// Stage a card for passing. The card leaves the hand immediately so it
    /// cannot also be played.
    pub fn add_card_for_pass(&mut self, seat: Seat, card: Card) -> Result<(), EngineError> {
        self.require_phase(Phase::Pass)?;
        let buffer = &self.pass_buffers[seat.index()];
        if buffer.len() == 3 {
            return Err(EngineError::PassBufferFull);
        }
        if buffer.contains(&card) {
            return Err(EngineError::AlreadyStaged(card));
        }
        if !self.players[seat.index()].hand_mut().remove(card) {
            return Err(EngineError::CardNotInHand(card));
        }
        self.pass_buffers[seat.index()].push(card);
        Ok(())
    }

    /// Unstage a card, returning it to the hand.
    pub fn remove_card_for_pass(&mut self, seat: Seat, card: Card) -> Result<(), EngineError> {
        self.require_phase(Phase::Pass)?;
        let buffer = &mut self.pass_buffers[seat.index()];
        match buffer.iter().position(|&c| c == card) {
            Some(index) => {
                buffer.remove(index);
                self.players[seat.index()].hand_mut().add(card);
                Ok(())
            }
            None => Err(EngineError::NotStaged(card)),
        }
    }

    /// Commit the pass. The human seat must have staged exactly 3; seats
    /// with fewer staged are topped up from the front of their hands (the
    /// single-client policy for the programmatic seats).
    pub fn pass_selected_cards(&mut self) -> Result<PassSummary, EngineError> {
        self.require_phase(Phase::Pass)?;
        let staged = self.pass_buffers[Seat::South.index()].len();
        if staged != 3 {
            return Err(EngineError::PassIncomplete { staged });
        }

        for seat in Seat::CYCLE.iter().copied().skip(1) {
            while self.pass_buffers[seat.index()].len() < 3 {
                let card = self.players[seat.index()].hand().cards()[0];
                self.players[seat.index()].hand_mut().remove(card);
                self.pass_buffers[seat.index()].push(card);
            }
        }

        // Every departing card is already out of its hand; deliver along
        // the direction permutation and re-sort each recipient.
        for seat in Seat::CYCLE {
            let target = self.direction.target(seat);
            let cards = std::mem::take(&mut self.pass_buffers[seat.index()]);
            for card in cards {
                self.players[target.index()].hand_mut().add(card);
            }
        }

        let leader = self.start_play();
        Ok(PassSummary {
            direction: self.direction,
            leader,
            phase: self.phase,
        })
    }

    // ---- playing ----

    /// Full legality evaluation; `Ok(())` means `play_card` would commit.
    pub fn check_play(&self, seat: Seat, card: Card) -> Result<(), EngineError> {
        self.require_phase(Phase::Play)?;
        let trick = self.current_trick.as_ref().expect("trick exists in play");
        if trick.is_full() {
            return Err(EngineError::TrickAwaitingCompletion);
        }
        if seat != self.turn {
            return Err(EngineError::NotYourTurn {
                expected: self.turn,
                actual: seat,
            });
        }
        let hand = self.players[seat.index()].hand();
        if !hand.contains(card) {
            return Err(EngineError::CardNotInHand(card));
        }

        // A hand of nothing but hearts and the queen of spades overrides
        // every restriction below; the seat must be able to play something.
        let only_penalty = hand.only_penalty_cards();
        let leading = trick.plays().is_empty();

        if trick.number() == 1 {
            if leading {
                if only_penalty {
                    return Ok(());
                }
                if hand.contains(Card::TWO_OF_CLUBS) && card != Card::TWO_OF_CLUBS {
                    return Err(EngineError::MustLeadTwoOfClubs);
                }
                if card.is_penalty() {
                    return Err(EngineError::NoPenaltyOnFirstTrick);
                }
                return Ok(());
            }
            let led = trick.lead_suit().expect("led suit when following");
            if card.suit != led && hand.has_suit(led) {
                return Err(EngineError::MustFollowSuit(led));
            }
            if only_penalty {
                return Ok(());
            }
            // Even a penalty card of the led suit stays blocked on trick 1.
            if card.is_penalty() {
                return Err(EngineError::NoPenaltyOnFirstTrick);
            }
            return Ok(());
        }

        if leading {
            // Revised rule: the queen of spades is gated by the same latch
            // as hearts when leading.
            if !self.hearts_broken && card.is_penalty() && !only_penalty {
                return Err(EngineError::HeartsNotBroken);
            }
            return Ok(());
        }

        if let Some(led) = trick.lead_suit() {
            if card.suit != led && hand.has_suit(led) {
                return Err(EngineError::MustFollowSuit(led));
            }
        }
        Ok(())
    }

    pub fn can_play_card(&self, seat: Seat, card: Card) -> bool {
        self.check_play(seat, card).is_ok()
    }

    /// First hand card that would be legal to play; drives the
    /// programmatic seats.
    pub fn first_playable_card(&self, seat: Seat) -> Option<Card> {
        self.players[seat.index()]
            .hand()
            .iter()
            .copied()
            .find(|&card| self.can_play_card(seat, card))
    }

    pub fn play_card(&mut self, seat: Seat, card: Card) -> Result<PlayOutcome, EngineError> {
        self.check_play(seat, card)?;

        self.players[seat.index()].hand_mut().remove(card);
        self.undo = Some(UndoBuffer {
            seat,
            card,
            hearts_broken: self.hearts_broken,
            hearts_broken_trick: self.hearts_broken_trick,
        });

        let trick = self.current_trick.as_mut().expect("trick exists in play");
        let number = trick.number();
        trick.push(seat, card);
        let full = trick.is_full();

        // One-way latch; the breaking trick is kept for UI disclosure and
        // restored on undo from the snapshot above.
        if !self.hearts_broken && card.is_penalty() {
            self.hearts_broken = true;
            self.hearts_broken_trick = Some(number);
        }

        if full {
            // Turn advancement is withheld until the trick is explicitly
            // completed.
            Ok(PlayOutcome::TrickReady)
        } else {
            self.turn = seat.next();
            Ok(PlayOutcome::Turn { next: self.turn })
        }
    }

    /// Strict inverse of the immediately preceding `play_card`; one level
    /// deep, and gone once the trick completes.
    pub fn undo_last_play(&mut self) -> Result<UndoSummary, EngineError> {
        self.require_phase(Phase::Play)?;
        let buffer = self.undo.ok_or(EngineError::NothingToUndo)?;

        let trick = self.current_trick.as_mut().expect("trick exists in play");
        let popped = trick.pop();
        match popped {
            Some(play) if play.seat == buffer.seat && play.card == buffer.card => {}
            other => {
                // The trick disagrees with the undo buffer: state corruption,
                // not a rule violation.
                return Err(EngineError::UndoMismatch {
                    expected: buffer.card,
                    found: other.map(|p| p.card),
                });
            }
        }

        self.players[buffer.seat.index()].hand_mut().add(buffer.card);
        self.hearts_broken = buffer.hearts_broken;
        self.hearts_broken_trick = buffer.hearts_broken_trick;
        self.turn = buffer.seat;
        self.undo = None;
        Ok(UndoSummary {
            seat: buffer.seat,
            card: buffer.card,
        })
    }

    pub fn complete_trick(&mut self) -> Result<TrickSummary, EngineError> {
        self.require_phase(Phase::Play)?;
        let trick = self.current_trick.as_mut().expect("trick exists in play");
        if !trick.is_full() {
            return Err(EngineError::TrickNotFull {
                plays: trick.plays().len(),
            });
        }

        let winner = trick.resolve().expect("full trick resolves");
        let points = trick.penalty_points();
        let number = trick.number();

        let finished = if number == 13 {
            self.phase = Phase::HandResolution;
            self.current_trick.take().expect("trick present")
        } else {
            self.current_trick
                .replace(Trick::new(winner, number + 1))
                .expect("trick present")
        };

        self.players[winner.index()].take_trick(finished.clone());
        self.tricks_taken[winner.index()] += 1;
        self.last_trick = Some(finished);
        self.turn = winner;
        self.undo = None;

        Ok(TrickSummary {
            trick_number: number,
            winner,
            points,
            phase: self.phase,
        })
    }

    // ---- scoring ----

    /// Tally the finished hand. Ordinary hands score directly; a 26-point
    /// sweep suspends scoring until the shooter's choice comes back.
    pub fn finish_hand(&mut self) -> Result<HandOutcome, EngineError> {
        self.require_phase(Phase::HandResolution)?;
        if self.pending_moon.is_some() {
            return Err(EngineError::MoonChoicePending);
        }

        let tallies: [u8; 4] =
            array::from_fn(|i| self.players[i].hand_penalty_points());

        if let Some(shooter) = Seat::CYCLE
            .iter()
            .copied()
            .find(|seat| tallies[seat.index()] == 26)
        {
            let gloat = self.moon_gloat(shooter);
            self.pending_moon = Some(MoonShot { shooter, gloat });
            return Ok(HandOutcome::MoonShot { shooter, gloat });
        }

        let mut hand_points = [0i32; 4];
        for seat in Seat::CYCLE {
            hand_points[seat.index()] = i32::from(tallies[seat.index()]);
            self.players[seat.index()].add_points(hand_points[seat.index()]);
        }
        Ok(HandOutcome::Scored(self.settle(hand_points)))
    }

    /// Moon resolution: push 26 onto each opponent, nothing to the shooter.
    pub fn everyone_up_26(&mut self) -> Result<ScoreSummary, EngineError> {
        self.require_phase(Phase::HandResolution)?;
        let moon = self.pending_moon.take().ok_or(EngineError::NoMoonPending)?;
        let mut hand_points = [0i32; 4];
        for seat in Seat::CYCLE {
            if seat != moon.shooter {
                hand_points[seat.index()] = 26;
                self.players[seat.index()].add_points(26);
            }
        }
        Ok(self.settle(hand_points))
    }

    /// Moon resolution: the shooter alone drops 26.
    pub fn shooter_down_26(&mut self) -> Result<ScoreSummary, EngineError> {
        self.require_phase(Phase::HandResolution)?;
        let moon = self.pending_moon.take().ok_or(EngineError::NoMoonPending)?;
        let mut hand_points = [0i32; 4];
        hand_points[moon.shooter.index()] = -26;
        self.players[moon.shooter.index()].add_points(-26);
        Ok(self.settle(hand_points))
    }

    // ---- accessors ----

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn hand_number(&self) -> u32 {
        self.hand_number
    }

    pub fn pass_direction(&self) -> PassDirection {
        self.direction
    }

    pub fn players(&self) -> &[Player; 4] {
        &self.players
    }

    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat.index()]
    }

    pub fn hand(&self, seat: Seat) -> &Hand {
        self.players[seat.index()].hand()
    }

    pub fn scores(&self) -> [i32; 4] {
        array::from_fn(|i| self.players[i].score())
    }

    pub fn tricks_taken(&self) -> [u8; 4] {
        self.tricks_taken
    }

    pub fn current_trick(&self) -> Option<&Trick> {
        self.current_trick.as_ref()
    }

    pub fn last_trick(&self) -> Option<&Trick> {
        self.last_trick.as_ref()
    }

    pub fn current_seat(&self) -> Seat {
        self.turn
    }

    pub fn hearts_broken(&self) -> bool {
        self.hearts_broken
    }

    /// Trick number in which the latch flipped, for UI disclosure.
    pub fn hearts_broken_trick(&self) -> Option<u8> {
        self.hearts_broken_trick
    }

    pub fn can_undo(&self) -> bool {
        self.phase == Phase::Play && self.undo.is_some()
    }

    pub fn staged_for_pass(&self, seat: Seat) -> &[Card] {
        &self.pass_buffers[seat.index()]
    }

    pub fn pending_moon_shooter(&self) -> Option<Seat> {
        self.pending_moon.map(|m| m.shooter)
    }

    pub fn verdict(&self) -> &GameVerdict {
        &self.verdict
    }

    pub fn end_score(&self) -> i32 {
        self.end_score
    }

    // ---- internals ----

    fn ensure_can_deal(&self) -> Result<(), EngineError> {
        match self.phase {
            Phase::Waiting | Phase::Deal => Ok(()),
            Phase::GameOver => Err(EngineError::GameFinished),
            actual => Err(EngineError::WrongPhase {
                expected: Phase::Deal,
                actual,
            }),
        }
    }

    fn require_phase(&self, expected: Phase) -> Result<(), EngineError> {
        if self.phase == Phase::GameOver {
            return Err(EngineError::GameFinished);
        }
        if self.phase != expected {
            return Err(EngineError::WrongPhase {
                expected,
                actual: self.phase,
            });
        }
        Ok(())
    }

    fn start_play(&mut self) -> Seat {
        let leader = Seat::CYCLE
            .iter()
            .copied()
            .find(|seat| self.players[seat.index()].hand().contains(Card::TWO_OF_CLUBS))
            .unwrap_or(Seat::South);
        self.turn = leader;
        self.current_trick = Some(Trick::new(leader, 1));
        self.phase = Phase::Play;
        leader
    }

    fn settle(&mut self, hand_points: [i32; 4]) -> ScoreSummary {
        let scores = self.scores();
        self.verdict = GameVerdict::from_scores(&scores, self.end_score);
        self.phase = if self.verdict.is_over() {
            Phase::GameOver
        } else {
            Phase::Deal
        };
        self.reset_hand_state();
        ScoreSummary {
            hand_points,
            scores,
            verdict: self.verdict.clone(),
            phase: self.phase,
        }
    }

    fn reset_hand_state(&mut self) {
        for player in &mut self.players {
            player.clear_for_next_hand();
        }
        self.pass_buffers = array::from_fn(|_| Vec::new());
        self.current_trick = None;
        self.last_trick = None;
        self.turn = Seat::South;
        self.hearts_broken = false;
        self.hearts_broken_trick = None;
        self.undo = None;
        self.tricks_taken = [0; 4];
        self.pending_moon = None;
    }

    /// The hard-coded flavor-text case: a specific player shooting from the
    /// middle of the standings while an opponent is deep in penalties and
    /// another would stay ahead even after the 26-point push.
    fn moon_gloat(&self, shooter: Seat) -> bool {
        if self.players[shooter.index()].name() != "G" {
            return false;
        }
        let scores = self.scores();
        let shooter_score = scores[shooter.index()];
        let below = scores.iter().filter(|&&s| s < shooter_score).count();
        if below != 1 && below != 2 {
            return false;
        }
        let opponents = Seat::CYCLE.iter().copied().filter(|&s| s != shooter);
        let deep = opponents.clone().any(|s| scores[s.index()] >= 74);
        let still_ahead = opponents
            .clone()
            .any(|s| scores[s.index()] + 26 < shooter_score);
        deep && still_ahead
    }
}
