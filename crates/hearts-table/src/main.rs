use anyhow::{Context, Result};
use clap::Parser;
use hearts_table::autoplay;
use hearts_table::config::GameRules;
use hearts_table::facade::GameSession;
use hearts_table::logging::init_logging;
use hearts_table::roster::Roster;
use hearts_rules::{GameVerdict, Phase, Seat};
use std::path::PathBuf;
use tracing::info;

/// Headless Hearts: deals, passes, and plays whole games through the same
/// facade a UI would use.
#[derive(Debug, Parser)]
#[command(name = "hearts-table", version)]
struct Args {
    /// Deck seed; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many hands even if nobody has lost yet.
    #[arg(long, default_value_t = 50)]
    max_hands: u32,

    /// Roster file (JSON array of display names).
    #[arg(long)]
    roster: Option<PathBuf>,

    /// Rules file (JSON, merged over defaults).
    #[arg(long)]
    rules: Option<PathBuf>,

    /// -v for info, -vv for debug.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let roster = match &args.roster {
        Some(path) => Roster::load(path).context("loading roster")?,
        None => Roster::new(
            ["You", "West Bot", "North Bot", "East Bot"]
                .map(String::from)
                .into(),
        ),
    };
    let rules = match &args.rules {
        Some(path) => GameRules::from_path(path).context("loading rules")?,
        None => GameRules::default(),
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut session =
        GameSession::start_with_seed(&roster, rules, seed).context("seating the table")?;
    info!(seed, "table seated");

    let mut hands = 0;
    while session.phase() != Phase::GameOver && hands < args.max_hands {
        hands += 1;
        let summary = autoplay::play_one_hand(&mut session)
            .with_context(|| format!("playing hand {hands}"))?;
        print_standings(&session, hands, &summary.scores);
    }

    match session.verdict() {
        GameVerdict::Winner(seat) => {
            println!("{} wins after {hands} hands.", session.player_name(*seat));
        }
        GameVerdict::Tie(seats) => {
            let names: Vec<&str> = seats.iter().map(|&s| session.player_name(s)).collect();
            println!("Tie between {} after {hands} hands.", names.join(", "));
        }
        GameVerdict::Continue => {
            println!("Stopped after {hands} hands with no loser yet.");
        }
    }
    Ok(())
}

fn print_standings(session: &GameSession, hand: u32, scores: &[i32; 4]) {
    print!("hand {hand:>2}:");
    for seat in Seat::CYCLE {
        print!("  {} {}", session.player_name(seat), scores[seat.index()]);
    }
    println!();
}
