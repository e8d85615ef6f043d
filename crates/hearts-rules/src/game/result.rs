use crate::model::card::Card;
use crate::model::passing::PassDirection;
use crate::model::seat::Seat;
use crate::model::suit::Suit;
use core::fmt;
use serde::Serialize;

/// Engine lifecycle. `Deal` means "scored, ready for the next deal";
/// `GameOver` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Waiting,
    Pass,
    Play,
    HandResolution,
    Deal,
    GameOver,
}

impl Phase {
    pub const fn as_str(self) -> &'static str {
        match self {
            Phase::Waiting => "waiting",
            Phase::Pass => "pass",
            Phase::Play => "play",
            Phase::HandResolution => "hand_resolution",
            Phase::Deal => "deal",
            Phase::GameOver => "game_over",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four categories of the error design: rule rejections and phase or
/// precondition misuse are expected and recoverable; an invariant breach
/// means the engine state is corrupt and the hand is lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    IllegalMove,
    PhaseViolation,
    PreconditionViolation,
    InvariantViolation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    // phase violations
    WrongPhase { expected: Phase, actual: Phase },
    GameFinished,
    // illegal moves
    NotYourTurn { expected: Seat, actual: Seat },
    CardNotInHand(Card),
    MustLeadTwoOfClubs,
    MustFollowSuit(Suit),
    HeartsNotBroken,
    NoPenaltyOnFirstTrick,
    PassBufferFull,
    AlreadyStaged(Card),
    NotStaged(Card),
    // precondition violations
    PassIncomplete { staged: usize },
    TrickNotFull { plays: usize },
    TrickAwaitingCompletion,
    NothingToUndo,
    NoMoonPending,
    MoonChoicePending,
    // invariant violations
    UndoMismatch { expected: Card, found: Option<Card> },
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::WrongPhase { .. } | EngineError::GameFinished => {
                ErrorKind::PhaseViolation
            }
            EngineError::NotYourTurn { .. }
            | EngineError::CardNotInHand(_)
            | EngineError::MustLeadTwoOfClubs
            | EngineError::MustFollowSuit(_)
            | EngineError::HeartsNotBroken
            | EngineError::NoPenaltyOnFirstTrick
            | EngineError::PassBufferFull
            | EngineError::AlreadyStaged(_)
            | EngineError::NotStaged(_) => ErrorKind::IllegalMove,
            EngineError::PassIncomplete { .. }
            | EngineError::TrickNotFull { .. }
            | EngineError::TrickAwaitingCompletion
            | EngineError::NothingToUndo
            | EngineError::NoMoonPending
            | EngineError::MoonChoicePending => ErrorKind::PreconditionViolation,
            EngineError::UndoMismatch { .. } => ErrorKind::InvariantViolation,
        }
    }

    /// True for the category that signals internal corruption rather than
    /// caller misuse; callers should escalate instead of retrying.
    pub fn is_fatal(&self) -> bool {
        self.kind() == ErrorKind::InvariantViolation
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::WrongPhase { expected, actual } => {
                write!(f, "operation requires phase {expected}, engine is in {actual}")
            }
            EngineError::GameFinished => write!(f, "game is over; start a new engine"),
            EngineError::NotYourTurn { expected, actual } => {
                write!(f, "it is {expected}'s turn, not {actual}'s")
            }
            EngineError::CardNotInHand(card) => write!(f, "{card} is not in that hand"),
            EngineError::MustLeadTwoOfClubs => {
                write!(f, "the first trick must be led with the two of clubs")
            }
            EngineError::MustFollowSuit(suit) => write!(f, "must follow the led suit {suit}"),
            EngineError::HeartsNotBroken => {
                write!(f, "cannot lead a penalty card before hearts are broken")
            }
            EngineError::NoPenaltyOnFirstTrick => {
                write!(f, "no hearts or queen of spades on the first trick")
            }
            EngineError::PassBufferFull => write!(f, "three cards are already staged"),
            EngineError::AlreadyStaged(card) => write!(f, "{card} is already staged"),
            EngineError::NotStaged(card) => write!(f, "{card} is not staged"),
            EngineError::PassIncomplete { staged } => {
                write!(f, "must stage exactly 3 cards to pass, have {staged}")
            }
            EngineError::TrickNotFull { plays } => {
                write!(f, "trick holds {plays} plays, needs 4 to complete")
            }
            EngineError::TrickAwaitingCompletion => {
                write!(f, "trick is full and awaiting completion")
            }
            EngineError::NothingToUndo => write!(f, "no play available to undo"),
            EngineError::NoMoonPending => write!(f, "no moon shot awaiting a choice"),
            EngineError::MoonChoicePending => {
                write!(f, "a moon-shot choice must be made before continuing")
            }
            EngineError::UndoMismatch { expected, found } => match found {
                Some(found) => write!(
                    f,
                    "undo buffer expected {expected} but the trick held {found}"
                ),
                None => write!(f, "undo buffer expected {expected} but the trick was empty"),
            },
        }
    }
}

impl std::error::Error for EngineError {}

/// Outcome of the end-of-game check, run after every scoring pass. Lowest
/// score wins; co-minimum scores tie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameVerdict {
    Continue,
    Winner(Seat),
    Tie(Vec<Seat>),
}

impl GameVerdict {
    pub fn from_scores(scores: &[i32; 4], end_score: i32) -> Self {
        if !scores.iter().any(|&s| s >= end_score) {
            return GameVerdict::Continue;
        }
        let lowest = *scores.iter().min().expect("four scores");
        let mut winners = Seat::CYCLE
            .iter()
            .copied()
            .filter(|seat| scores[seat.index()] == lowest);
        let first = winners.next().expect("at least one minimum");
        let rest: Vec<Seat> = winners.collect();
        if rest.is_empty() {
            GameVerdict::Winner(first)
        } else {
            let mut tied = vec![first];
            tied.extend(rest);
            GameVerdict::Tie(tied)
        }
    }

    pub fn is_over(&self) -> bool {
        !matches!(self, GameVerdict::Continue)
    }
}

/// Payload of a successful deal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealSummary {
    pub hand_number: u32,
    pub direction: PassDirection,
    pub phase: Phase,
    /// Set when the pass phase is skipped and trick 1 already exists.
    pub leader: Option<Seat>,
}

/// Payload of a committed pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassSummary {
    pub direction: PassDirection,
    pub leader: Seat,
    pub phase: Phase,
}

/// Payload of a successful card play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// Turn advanced to the next seat.
    Turn { next: Seat },
    /// Fourth card landed; the turn is suspended until `complete_trick`.
    TrickReady,
}

/// Payload of a completed trick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrickSummary {
    pub trick_number: u8,
    pub winner: Seat,
    pub points: u8,
    pub phase: Phase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoSummary {
    pub seat: Seat,
    pub card: Card,
}

/// Scoring applied to the game totals, plus the end-of-game verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreSummary {
    /// Signed per-seat change this resolution (negative only for the
    /// moon-shot self-penalty).
    pub hand_points: [i32; 4],
    pub scores: [i32; 4],
    pub verdict: GameVerdict,
    pub phase: Phase,
}

/// Payload of `finish_hand`: either scores were applied directly, or a moon
/// shot suspends scoring until the shooter's choice is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandOutcome {
    Scored(ScoreSummary),
    MoonShot {
        shooter: Seat,
        /// Cosmetic flavor-text flag for one hard-coded player; never
        /// affects the arithmetic.
        gloat: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::{EngineError, ErrorKind, GameVerdict, Phase};
    use crate::model::card::Card;
    use crate::model::seat::Seat;

    #[test]
    fn verdict_continue_below_threshold() {
        assert_eq!(
            GameVerdict::from_scores(&[0, 5, 12, 3], 13),
            GameVerdict::Continue
        );
    }

    #[test]
    fn verdict_single_lowest_wins() {
        assert_eq!(
            GameVerdict::from_scores(&[13, 4, 9, 6], 13),
            GameVerdict::Winner(Seat::West)
        );
    }

    #[test]
    fn verdict_reports_all_tied_seats() {
        assert_eq!(
            GameVerdict::from_scores(&[4, 20, 4, 9], 13),
            GameVerdict::Tie(vec![Seat::South, Seat::North])
        );
    }

    #[test]
    fn threshold_is_inclusive() {
        assert!(GameVerdict::from_scores(&[13, 0, 0, 0], 13).is_over());
        assert!(!GameVerdict::from_scores(&[12, 0, 0, 0], 13).is_over());
    }

    #[test]
    fn error_kinds_follow_the_taxonomy() {
        assert_eq!(
            EngineError::MustLeadTwoOfClubs.kind(),
            ErrorKind::IllegalMove
        );
        assert_eq!(
            EngineError::WrongPhase {
                expected: Phase::Play,
                actual: Phase::Pass
            }
            .kind(),
            ErrorKind::PhaseViolation
        );
        assert_eq!(
            EngineError::NothingToUndo.kind(),
            ErrorKind::PreconditionViolation
        );
        let fatal = EngineError::UndoMismatch {
            expected: Card::TWO_OF_CLUBS,
            found: None,
        };
        assert_eq!(fatal.kind(), ErrorKind::InvariantViolation);
        assert!(fatal.is_fatal());
        assert!(!EngineError::NothingToUndo.is_fatal());
    }

    #[test]
    fn phases_render_snake_case() {
        assert_eq!(Phase::HandResolution.to_string(), "hand_resolution");
        assert_eq!(Phase::GameOver.to_string(), "game_over");
    }
}
