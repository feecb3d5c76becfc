//! Configuration loading logic.
//!
//! Handles loading config from files and applying environment variable overrides.

use crate::CentralConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Standard locations to search for config.toml
pub const CONFIG_SEARCH_PATHS: &[&str] = &[
    "config.toml",      // Current directory
    "../config.toml",   // Parent directory (when running from subdirectory)
    "/app/config.toml", // Docker container
];

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "TEN_CONFIG";

/// Load the central configuration from config.toml.
///
/// The file is the one named by `TEN_CONFIG` if it exists, else the first of
/// [`CONFIG_SEARCH_PATHS`] that exists. Without a file the built-in defaults
/// are used. Environment overrides are applied last in every case.
pub fn load_config() -> CentralConfig {
    match find_config_file() {
        Some(path) => {
            info!(path = %path.display(), "Loading config");
            load_from_path(&path)
        }
        None => {
            debug!("No config.toml found, using built-in defaults");
            apply_env_overrides(CentralConfig::default())
        }
    }
}

fn find_config_file() -> Option<PathBuf> {
    if let Ok(explicit) = std::env::var(CONFIG_ENV_VAR) {
        let path = PathBuf::from(&explicit);
        if path.exists() {
            return Some(path);
        }
        warn!("{CONFIG_ENV_VAR}={explicit} not found, searching defaults");
    }

    CONFIG_SEARCH_PATHS
        .iter()
        .map(PathBuf::from)
        .find(|path| path.exists())
}

/// Load configuration from a specific path.
pub fn load_from_path(path: &Path) -> CentralConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => apply_env_overrides(config),
            Err(e) => {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                apply_env_overrides(CentralConfig::default())
            }
        },
        Err(e) => {
            warn!("Failed to read {}: {}, using defaults", path.display(), e);
            apply_env_overrides(CentralConfig::default())
        }
    }
}

/// Macro to reduce env override boilerplate
macro_rules! env_override {
    // String field
    ($config:expr, $section:ident . $field:ident, $key:expr) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v;
        }
    };
    // Parseable field (u16, u64, f64, etc.), unparsable values are ignored
    ($config:expr, $section:ident . $field:ident, $key:expr, parse) => {
        if let Ok(v) =
            std::env::var($key).and_then(|s| s.parse().map_err(|_| std::env::VarError::NotPresent))
        {
            $config.$section.$field = v;
        }
    };
}

/// Apply environment variable overrides to a configuration.
///
/// Environment variables follow the pattern: TEN_<SECTION>_<KEY>
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    // Common
    env_override!(config, common.log_level, "TEN_COMMON_LOG_LEVEL");

    // Web
    env_override!(config, web.host, "TEN_WEB_HOST");
    env_override!(config, web.port, "TEN_WEB_PORT", parse);

    // MCTS
    env_override!(
        config,
        mcts.time_budget_ms,
        "TEN_MCTS_TIME_BUDGET_MS",
        parse
    );
    env_override!(config, mcts.exploration, "TEN_MCTS_EXPLORATION", parse);
    env_override!(config, mcts.num_workers, "TEN_MCTS_NUM_WORKERS", parse);
    env_override!(
        config,
        mcts.max_iterations,
        "TEN_MCTS_MAX_ITERATIONS",
        parse
    );

    // Ten
    env_override!(config, ten.draw_value, "TEN_TEN_DRAW_VALUE", parse);

    // Selfplay
    env_override!(
        config,
        selfplay.time_budget_ms,
        "TEN_SELFPLAY_TIME_BUDGET_MS",
        parse
    );
    env_override!(
        config,
        selfplay.max_moves,
        "TEN_SELFPLAY_MAX_MOVES",
        parse
    );

    config
}
