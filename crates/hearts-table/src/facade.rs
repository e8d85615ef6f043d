use crate::config::GameRules;
use crate::roster::Roster;
use hearts_rules::game::result::{
    DealSummary, EngineError, HandOutcome, PassSummary, PlayOutcome, ScoreSummary, TrickSummary,
    UndoSummary,
};
use hearts_rules::game::snapshot::EngineSnapshot;
use hearts_rules::model::trick::Trick;
use hearts_rules::{Card, GameVerdict, HeartsEngine, Phase, Seat};
use thiserror::Error;
use tracing::{debug, error, warn};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("need four seated players, roster has {found}")]
    IncompleteRoster { found: usize },
}

/// The UI-facing facade. Owns exactly one engine, forwards every intent
/// verbatim, and never makes a legality decision of its own; rendering code
/// talks to this and only this. The configuration it carries is for the
/// surrounding layers to consult, not for the engine.
pub struct GameSession {
    engine: HeartsEngine,
    rules: GameRules,
}

impl GameSession {
    pub fn start(roster: &Roster, rules: GameRules) -> Result<Self, SessionError> {
        Self::start_with_seed(roster, rules, rand::random())
    }

    pub fn start_with_seed(
        roster: &Roster,
        rules: GameRules,
        seed: u64,
    ) -> Result<Self, SessionError> {
        let names = roster
            .seat_names()
            .ok_or_else(|| SessionError::IncompleteRoster {
                found: roster.names().len(),
            })?;
        debug!(seed, players = ?names, "starting session");
        Ok(Self {
            engine: HeartsEngine::with_seed(names, seed),
            rules,
        })
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    // ---- forwarded intents ----

    pub fn deal_hands(&mut self) -> Result<DealSummary, EngineError> {
        self.forward("deal_hands", |engine| engine.deal_hands())
    }

    pub fn add_card_for_pass(&mut self, seat: Seat, card: Card) -> Result<(), EngineError> {
        self.forward("add_card_for_pass", |engine| {
            engine.add_card_for_pass(seat, card)
        })
    }

    pub fn remove_card_for_pass(&mut self, seat: Seat, card: Card) -> Result<(), EngineError> {
        self.forward("remove_card_for_pass", |engine| {
            engine.remove_card_for_pass(seat, card)
        })
    }

    pub fn pass_selected_cards(&mut self) -> Result<PassSummary, EngineError> {
        self.forward("pass_selected_cards", |engine| engine.pass_selected_cards())
    }

    pub fn play_card(&mut self, seat: Seat, card: Card) -> Result<PlayOutcome, EngineError> {
        self.forward("play_card", |engine| engine.play_card(seat, card))
    }

    pub fn undo_last_play(&mut self) -> Result<UndoSummary, EngineError> {
        self.forward("undo_last_play", |engine| engine.undo_last_play())
    }

    pub fn complete_trick(&mut self) -> Result<TrickSummary, EngineError> {
        self.forward("complete_trick", |engine| engine.complete_trick())
    }

    pub fn finish_hand(&mut self) -> Result<HandOutcome, EngineError> {
        self.forward("finish_hand", |engine| engine.finish_hand())
    }

    pub fn everyone_up_26(&mut self) -> Result<ScoreSummary, EngineError> {
        self.forward("everyone_up_26", |engine| engine.everyone_up_26())
    }

    pub fn shooter_down_26(&mut self) -> Result<ScoreSummary, EngineError> {
        self.forward("shooter_down_26", |engine| engine.shooter_down_26())
    }

    // ---- read-only state ----

    pub fn state(&self) -> EngineSnapshot {
        EngineSnapshot::capture(&self.engine)
    }

    pub fn phase(&self) -> Phase {
        self.engine.phase()
    }

    pub fn current_seat(&self) -> Seat {
        self.engine.current_seat()
    }

    pub fn scores(&self) -> [i32; 4] {
        self.engine.scores()
    }

    pub fn tricks_taken(&self) -> [u8; 4] {
        self.engine.tricks_taken()
    }

    pub fn hearts_broken(&self) -> bool {
        self.engine.hearts_broken()
    }

    pub fn hearts_broken_trick(&self) -> Option<u8> {
        self.engine.hearts_broken_trick()
    }

    pub fn last_trick(&self) -> Option<&Trick> {
        self.engine.last_trick()
    }

    pub fn can_undo(&self) -> bool {
        self.engine.can_undo()
    }

    pub fn can_play_card(&self, seat: Seat, card: Card) -> bool {
        self.engine.can_play_card(seat, card)
    }

    pub fn first_playable_card(&self, seat: Seat) -> Option<Card> {
        self.engine.first_playable_card(seat)
    }

    pub fn player_name(&self, seat: Seat) -> &str {
        self.engine.player(seat).name()
    }

    pub fn hand(&self, seat: Seat) -> &[Card] {
        self.engine.hand(seat).cards()
    }

    pub fn verdict(&self) -> &GameVerdict {
        self.engine.verdict()
    }

    fn forward<T>(
        &mut self,
        intent: &'static str,
        call: impl FnOnce(&mut HeartsEngine) -> Result<T, EngineError>,
    ) -> Result<T, EngineError> {
        let result = call(&mut self.engine);
        match &result {
            Ok(_) => debug!(intent, "accepted"),
            Err(err) if err.is_fatal() => {
                // Invariant breaches are defects, not rule rejections.
                error!(intent, %err, "engine state corruption detected");
            }
            Err(err) => warn!(intent, %err, "rejected"),
        }
        result
    }
}
