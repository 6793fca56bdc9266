//! Headless autoplay runner (default binary).
//!
//! Plays one session by always taking the hint, printing a line per turn and a
//! final summary. `--json` switches both to JSON lines on stdout; logs go to
//! stderr.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use serde_json::json;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use fruit_match::core::{GameSession, SessionConfig};
use fruit_match::types::{Difficulty, GameStatus, Tool};

const SEED_ENV: &str = "FRUIT_MATCH_SEED";

#[derive(Parser, Debug)]
#[command(name = "fruit-match")]
#[command(about = "Plays a fruit match-3 session headlessly", long_about = None)]
#[command(version)]
struct Args {
    /// Difficulty preset: easy, medium or hard
    #[arg(short, long)]
    difficulty: Option<String>,

    /// RNG seed (falls back to FRUIT_MATCH_SEED, then the config file)
    #[arg(short, long)]
    seed: Option<u32>,

    /// Path to a TOML session config
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Emit JSON lines instead of text
    #[arg(long)]
    json: bool,

    /// Stop after this many turns even if the game is still running
    #[arg(long, default_value = "200")]
    max_turns: u32,
}

fn main() -> Result<()> {
    let args = Args::parse();
    initialize_tracing();

    let config = build_config(&args)?;
    let mut session = GameSession::new(config).context("failed to start session")?;
    // Startup events (a deadlock reshuffle at most) are not part of any turn
    session.take_events();

    let mut turn = 0;
    while turn < args.max_turns && !session.is_over() {
        turn += 1;

        if session.moves_left() == 1 && session.tool_available(Tool::ExtraMove) {
            let moves = session.use_extra_move_tool()?;
            debug!(moves, "bought extra moves");
        }

        let Some((a, b)) = session.request_hint() else {
            warn!(turn, "no hint available, stopping");
            break;
        };
        let score_before = session.score();
        let outcome = session
            .attempt_swap(a, b)
            .with_context(|| format!("hinted swap {a}-{b} was rejected"))?;
        let events = session.take_events();

        if args.json {
            let line = json!({
                "turn": turn,
                "swap": [a, b],
                "passes": outcome.cascade.passes,
                "score_delta": session.score().saturating_sub(score_before),
                "score": session.score(),
                "moves_left": session.moves_left(),
                "reshuffled": outcome.reshuffled,
                "events": events,
            });
            println!("{line}");
        } else {
            println!(
                "turn {turn:>3}: swap {a:>3}-{b:<3} passes {} +{:<4} score {:>5}/{} moves {:>2}{}",
                outcome.cascade.passes,
                session.score().saturating_sub(score_before),
                session.score(),
                session.target(),
                session.moves_left(),
                if outcome.reshuffled { " (reshuffled)" } else { "" },
            );
        }
    }

    let snapshot = session.snapshot();
    if args.json {
        println!("{}", json!({ "summary": snapshot }));
    } else {
        print!("{}", session.board());
        let verdict = match snapshot.status {
            GameStatus::Won => "won",
            GameStatus::Lost => "lost",
            GameStatus::Playing => "unfinished",
        };
        println!(
            "{verdict}: score {}/{} ({}%) after {turn} turns",
            snapshot.score, snapshot.target, snapshot.progress
        );
    }
    Ok(())
}

fn initialize_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("fruit_match=info,fruit_match_core=info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn build_config(args: &Args) -> Result<SessionConfig> {
    let mut config = match &args.config {
        Some(path) => SessionConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => SessionConfig::default(),
    };

    if let Some(name) = &args.difficulty {
        config.difficulty =
            Difficulty::from_str(name).ok_or_else(|| anyhow!("unknown difficulty '{name}'"))?;
    }

    if let Some(seed) = args.seed {
        config.seed = seed;
    } else if let Ok(raw) = std::env::var(SEED_ENV) {
        config.seed = raw
            .trim()
            .parse()
            .with_context(|| format!("{SEED_ENV} must be an unsigned integer, got '{raw}'"))?;
    }

    config.validate()?;
    Ok(config)
}
