//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use std::time::Duration;

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_host() -> String {
    defaults::host().into()
}
fn d_port() -> u16 {
    defaults::port()
}
fn d_time_budget_ms() -> u64 {
    defaults::time_budget_ms()
}
fn d_exploration() -> f64 {
    defaults::exploration()
}
fn d_num_workers() -> usize {
    defaults::num_workers()
}
fn d_max_iterations() -> u32 {
    defaults::max_iterations()
}
fn d_draw_value() -> f64 {
    defaults::draw_value()
}
fn d_selfplay_time_budget_ms() -> u64 {
    defaults::selfplay_time_budget_ms()
}
fn d_selfplay_max_moves() -> u32 {
    defaults::selfplay_max_moves()
}

// ============================================================================
// Configuration structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub mcts: MctsSection,
    #[serde(default)]
    pub ten: TenConfig,
    #[serde(default)]
    pub selfplay: SelfplayConfig,
}

/// Common configuration shared by all components
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_log_level")]
    pub log_level: String,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: d_log_level(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct WebConfig {
    #[serde(default = "d_host")]
    pub host: String,
    #[serde(default = "d_port")]
    pub port: u16,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: d_host(),
            port: d_port(),
        }
    }
}

/// Search settings for AI decisions
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MctsSection {
    #[serde(default = "d_time_budget_ms")]
    pub time_budget_ms: u64,
    #[serde(default = "d_exploration")]
    pub exploration: f64,
    /// 0 means one worker per core
    #[serde(default = "d_num_workers")]
    pub num_workers: usize,
    /// 0 means no cap
    #[serde(default = "d_max_iterations")]
    pub max_iterations: u32,
}

impl Default for MctsSection {
    fn default() -> Self {
        Self {
            time_budget_ms: d_time_budget_ms(),
            exploration: d_exploration(),
            num_workers: d_num_workers(),
            max_iterations: d_max_iterations(),
        }
    }
}

impl MctsSection {
    /// Search configuration for these settings, unseeded.
    pub fn to_mcts_config(&self) -> mcts::MctsConfig {
        mcts::MctsConfig {
            time_budget: Duration::from_millis(self.time_budget_ms),
            exploration: self.exploration,
            num_workers: self.num_workers,
            max_iterations: (self.max_iterations > 0).then_some(self.max_iterations),
            seed: None,
        }
    }
}

/// Rules settings for Ten
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TenConfig {
    /// Reward credited to either side for a drawn game
    #[serde(default = "d_draw_value")]
    pub draw_value: f64,
}

impl Default for TenConfig {
    fn default() -> Self {
        Self {
            draw_value: d_draw_value(),
        }
    }
}

/// AI-versus-AI runner configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SelfplayConfig {
    #[serde(default = "d_selfplay_time_budget_ms")]
    pub time_budget_ms: u64,
    /// 0 means play until the game ends
    #[serde(default = "d_selfplay_max_moves")]
    pub max_moves: u32,
}

impl Default for SelfplayConfig {
    fn default() -> Self {
        Self {
            time_budget_ms: d_selfplay_time_budget_ms(),
            max_moves: d_selfplay_max_moves(),
        }
    }
}
