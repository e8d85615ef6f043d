use crate::game::engine::HeartsEngine;
use crate::model::seat::Seat;
use crate::model::trick::Trick;
use serde::Serialize;

/// One play as the UI layer sees it: a seat and a card label like "QS".
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PlayView {
    pub seat: Seat,
    pub card: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TrickView {
    pub number: u8,
    pub leader: Seat,
    pub plays: Vec<PlayView>,
    pub winner: Option<Seat>,
}

impl TrickView {
    fn of(trick: &Trick) -> Self {
        Self {
            number: trick.number(),
            leader: trick.leader(),
            plays: trick
                .plays()
                .iter()
                .map(|play| PlayView {
                    seat: play.seat,
                    card: play.card.to_string(),
                })
                .collect(),
            winner: trick.winner(),
        }
    }
}

/// Read-only capture of everything the rendering layer needs; the answer to
/// `getState`. Capture only — mid-hand restore is out of scope.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EngineSnapshot {
    pub seed: u64,
    pub hand_number: u32,
    pub phase: String,
    pub pass_direction: String,
    pub current_seat: Seat,
    pub scores: [i32; 4],
    pub tricks_taken: [u8; 4],
    pub hearts_broken: bool,
    pub hearts_broken_trick: Option<u8>,
    pub can_undo: bool,
    pub hands: Vec<Vec<String>>,
    pub staged_for_pass: Vec<Vec<String>>,
    pub current_trick: Option<TrickView>,
    pub last_trick: Option<TrickView>,
}

impl EngineSnapshot {
    pub fn capture(engine: &HeartsEngine) -> Self {
        Self {
            seed: engine.seed(),
            hand_number: engine.hand_number(),
            phase: engine.phase().to_string(),
            pass_direction: engine.pass_direction().to_string(),
            current_seat: engine.current_seat(),
            scores: engine.scores(),
            tricks_taken: engine.tricks_taken(),
            hearts_broken: engine.hearts_broken(),
            hearts_broken_trick: engine.hearts_broken_trick(),
            can_undo: engine.can_undo(),
            hands: Seat::CYCLE
                .iter()
                .map(|&seat| {
                    engine
                        .hand(seat)
                        .iter()
                        .map(|card| card.to_string())
                        .collect()
                })
                .collect(),
            staged_for_pass: Seat::CYCLE
                .iter()
                .map(|&seat| {
                    engine
                        .staged_for_pass(seat)
                        .iter()
                        .map(|card| card.to_string())
                        .collect()
                })
                .collect(),
            current_trick: engine.current_trick().map(TrickView::of),
            last_trick: engine.last_trick().map(TrickView::of),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::EngineSnapshot;
    use crate::game::engine::HeartsEngine;
    use crate::model::seat::Seat;

    fn engine() -> HeartsEngine {
        HeartsEngine::with_seed(["Ann", "Ben", "Cleo", "Dov"].map(String::from), 21)
    }

    #[test]
    fn capture_reflects_the_deal() {
        let mut engine = engine();
        engine.deal_hands().unwrap();
        let snapshot = EngineSnapshot::capture(&engine);
        assert_eq!(snapshot.seed, 21);
        assert_eq!(snapshot.hand_number, 1);
        assert_eq!(snapshot.phase, "pass");
        assert_eq!(snapshot.pass_direction, "left");
        for hand in &snapshot.hands {
            assert_eq!(hand.len(), 13);
        }
        assert!(snapshot.current_trick.is_none());
    }

    #[test]
    fn staged_cards_appear_in_the_snapshot() {
        let mut engine = engine();
        engine.deal_hands().unwrap();
        let card = engine.hand(Seat::South).cards()[0];
        engine.add_card_for_pass(Seat::South, card).unwrap();
        let snapshot = EngineSnapshot::capture(&engine);
        assert_eq!(snapshot.staged_for_pass[0], vec![card.to_string()]);
        assert_eq!(snapshot.hands[0].len(), 12);
    }

    #[test]
    fn serializes_to_json() {
        let mut engine = engine();
        engine.deal_hands().unwrap();
        let json = EngineSnapshot::capture(&engine).to_json().unwrap();
        assert!(json.contains("\"seed\": 21"));
        assert!(json.contains("\"phase\": \"pass\""));
    }
}
