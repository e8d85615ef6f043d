#![deny(warnings)]
pub mod game;
pub mod model;

pub use game::engine::HeartsEngine;
pub use game::result::{EngineError, ErrorKind, GameVerdict, HandOutcome, Phase, PlayOutcome};
pub use model::card::Card;
pub use model::passing::PassDirection;
pub use model::rank::Rank;
pub use model::seat::Seat;
pub use model::suit::Suit;
