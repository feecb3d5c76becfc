//! Configuration for the self-play runner
//!
//! Configuration is loaded from config.toml with environment variable overrides.
//! CLI arguments take highest priority, followed by env vars, then config.toml.

use anyhow::{anyhow, Result};
use clap::Parser;
use engine_config::{load_config, CentralConfig};
use mcts::MctsConfig;
use once_cell::sync::Lazy;
use std::time::Duration;
use tracing::level_filters::LevelFilter;

// Load central config once at startup
pub static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

fn default_time_budget_ms() -> u64 {
    CENTRAL_CONFIG.selfplay.time_budget_ms
}

fn default_max_moves() -> u32 {
    CENTRAL_CONFIG.selfplay.max_moves
}

fn default_workers() -> usize {
    CENTRAL_CONFIG.mcts.num_workers
}

fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

#[derive(Parser, Debug, Clone)]
#[command(name = "ten-selfplay")]
#[command(about = "Play Ten against itself with the MCTS engine")]
#[command(
    long_about = "Plays one AI-versus-AI game of Ten from the empty board, logging every
move with its win probability and printing the board as it goes.

Configuration is loaded from config.toml with environment variable overrides.
CLI arguments take highest priority."
)]
pub struct Config {
    /// Search time per move in milliseconds
    #[arg(long, default_value_t = default_time_budget_ms())]
    pub time_budget_ms: u64,

    /// Stop after this many moves (0 plays to the end)
    #[arg(long, default_value_t = default_max_moves())]
    pub max_moves: u32,

    /// Seed for a reproducible game
    #[arg(long)]
    pub seed: Option<u64>,

    /// Rollout threads per move (0 uses one per core)
    #[arg(long, default_value_t = default_workers())]
    pub workers: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.time_budget_ms == 0 {
            return Err(anyhow!("time_budget_ms must be greater than 0"));
        }

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        Ok(())
    }

    pub fn time_budget(&self) -> Duration {
        Duration::from_millis(self.time_budget_ms)
    }

    /// `base` with the per-move budget and worker count from the command line.
    ///
    /// The seed drives the whole game, so it is not passed down per move.
    pub fn mcts_config(&self, base: MctsConfig) -> MctsConfig {
        MctsConfig {
            seed: None,
            ..base
        }
        .with_time_budget(self.time_budget())
        .with_workers(self.workers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            time_budget_ms: 200,
            max_moves: 0,
            seed: Some(7),
            workers: 2,
            log_level: "info".into(),
        }
    }

    #[test]
    fn test_validate_accepts_valid_configuration() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_time_budget() {
        let mut cfg = base_config();
        cfg.time_budget_ms = 0;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("time_budget_ms"));
    }

    #[test]
    fn test_validate_rejects_invalid_log_level() {
        let mut cfg = base_config();
        cfg.log_level = "loud".into();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("invalid log level"));
    }

    #[test]
    fn test_mcts_config_takes_cli_settings() {
        let base = MctsConfig::default()
            .with_exploration(0.5)
            .with_max_iterations(64)
            .with_seed(1);
        let mcts = base_config().mcts_config(base);

        assert_eq!(mcts.time_budget, Duration::from_millis(200));
        assert_eq!(mcts.num_workers, 2);
        assert!((mcts.exploration - 0.5).abs() < f64::EPSILON);
        assert_eq!(mcts.max_iterations, Some(64));
        assert_eq!(mcts.seed, None);
    }

    #[test]
    fn test_parses_command_line() {
        let cfg = Config::parse_from([
            "ten-selfplay",
            "--time-budget-ms",
            "50",
            "--max-moves",
            "12",
            "--seed",
            "3",
            "--workers",
            "1",
            "--log-level",
            "debug",
        ]);
        assert_eq!(cfg.time_budget_ms, 50);
        assert_eq!(cfg.max_moves, 12);
        assert_eq!(cfg.seed, Some(3));
        assert_eq!(cfg.workers, 1);
        assert_eq!(cfg.log_level, "debug");
    }
}
