//! Centralized configuration loading from config.toml.
//!
//! This crate provides configuration structs and loading logic shared
//! across the Rust binaries (web, selfplay).
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`TEN_<SECTION>_<KEY>`)
//! 2. config.toml file
//! 3. Built-in defaults (config.defaults.toml, embedded at compile time)
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! TEN_<SECTION>_<KEY>=value
//!
//! Examples:
//!     TEN_COMMON_LOG_LEVEL=debug
//!     TEN_WEB_PORT=3000
//!     TEN_MCTS_TIME_BUDGET_MS=500
//!     TEN_TEN_DRAW_VALUE=0.5
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{
    apply_env_overrides, load_config, load_from_path, CONFIG_ENV_VAR, CONFIG_SEARCH_PATHS,
};
pub use structs::*;
