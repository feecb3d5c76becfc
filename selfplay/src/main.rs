//! ten-selfplay - AI-versus-AI Ten games
//!
//! Plays one game from the empty board with the MCTS engine on both sides.
//! Every move is logged, and the board is printed after each move and once
//! more with the result.

use anyhow::Result;
use clap::Parser;
use engine_core::GameStatus;
use mcts::MctsSearch;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::info;

mod config;
mod game;

use crate::config::{Config, CENTRAL_CONFIG};
use crate::game::play_game;

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let config = Config::parse();
    config.validate()?;

    init_tracing(&config.log_level);
    info!(log_level = %config.log_level, "Tracing initialized");

    let search = MctsSearch::new(config.mcts_config(CENTRAL_CONFIG.mcts.to_mcts_config()));
    let mut rng = match config.seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_entropy(),
    };
    info!(
        time_budget_ms = config.time_budget_ms,
        max_moves = config.max_moves,
        seed = ?config.seed,
        workers = config.workers,
        "Starting self-play game"
    );

    let record = play_game(
        &search,
        CENTRAL_CONFIG.ten.draw_value,
        config.max_moves,
        &mut rng,
        |played, board| {
            println!(
                "Move {}: {} plays {} ({}%)",
                played.ply,
                played.player.symbol(),
                played.mv,
                played.win_probability_percent
            );
            println!("{board}\n");
        },
    )?;

    println!("{}", record.board);
    let result = match record.status {
        GameStatus::Won(player) => format!("{} wins", player.symbol()),
        GameStatus::Draw => "Draw".to_string(),
        GameStatus::Ongoing => format!("Stopped after {} moves", record.moves.len()),
    };
    println!("Result: {result}");
    info!(moves = record.moves.len(), status = ?record.status, "Game finished");

    Ok(())
}
