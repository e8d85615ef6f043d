use crate::facade::GameSession;
use hearts_rules::game::result::{EngineError, HandOutcome, Phase, ScoreSummary, TrickSummary};
use hearts_rules::Seat;
use tracing::debug;

/// First-legal-card driver for the programmatically controlled seats (and
/// for headless runs, the human seat too). No strategy, by policy: the
/// engine's legality scan picks the move.
pub fn play_next_card(session: &mut GameSession) -> Result<(), EngineError> {
    let seat = session.current_seat();
    let card = session
        .first_playable_card(seat)
        .expect("a non-empty hand always has a legal card");
    debug!(%seat, %card, "auto play");
    session.play_card(seat, card)?;
    Ok(())
}

/// Stage the human seat's first three cards and commit the pass; the other
/// seats are auto-selected by the engine at commit time.
pub fn auto_pass(session: &mut GameSession) -> Result<(), EngineError> {
    let staged: Vec<_> = session.hand(Seat::South)[..3].to_vec();
    for card in staged {
        session.add_card_for_pass(Seat::South, card)?;
    }
    session.pass_selected_cards()?;
    Ok(())
}

/// Play all four cards of the current trick and complete it.
pub fn play_one_trick(session: &mut GameSession) -> Result<TrickSummary, EngineError> {
    for _ in 0..4 {
        play_next_card(session)?;
    }
    session.complete_trick()
}

/// Drive one whole hand from deal to scoring. A moon shot is resolved by
/// pushing 26 onto the opponents, the choice a shooter practically always
/// makes.
pub fn play_one_hand(session: &mut GameSession) -> Result<ScoreSummary, EngineError> {
    session.deal_hands()?;
    if session.phase() == Phase::Pass {
        auto_pass(session)?;
    }
    for _ in 0..13 {
        play_one_trick(session)?;
    }
    match session.finish_hand()? {
        HandOutcome::Scored(summary) => Ok(summary),
        HandOutcome::MoonShot { shooter, .. } => {
            debug!(%shooter, "moon shot; pushing opponents up 26");
            session.everyone_up_26()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{auto_pass, play_one_hand, play_one_trick};
    use crate::config::GameRules;
    use crate::facade::GameSession;
    use crate::roster::Roster;
    use hearts_rules::Phase;

    fn session(seed: u64) -> GameSession {
        let roster = Roster::new(["Ann", "Ben", "Cleo", "Dov"].map(String::from).into());
        GameSession::start_with_seed(&roster, GameRules::default(), seed).unwrap()
    }

    #[test]
    fn a_trick_resolves_and_turn_moves_to_winner() {
        let mut session = session(31);
        session.deal_hands().unwrap();
        auto_pass(&mut session).unwrap();
        let summary = play_one_trick(&mut session).unwrap();
        assert_eq!(summary.trick_number, 1);
        assert_eq!(session.current_seat(), summary.winner);
    }

    #[test]
    fn a_hand_scores_twenty_six_points_total() {
        let mut session = session(31);
        let summary = play_one_hand(&mut session).unwrap();
        let dealt: i32 = summary.hand_points.iter().sum();
        // Ordinary hands spread 26; a moon resolution pushes 3 * 26.
        assert!(dealt == 26 || dealt == 78, "unexpected total {dealt}");
    }

    #[test]
    fn hands_repeat_until_the_game_ends() {
        let mut session = session(97);
        let mut hands = 0;
        while session.phase() != Phase::GameOver {
            hands += 1;
            assert!(hands <= 50, "game failed to terminate");
            play_one_hand(&mut session).unwrap();
        }
        assert!(session.verdict().is_over());
    }
}
