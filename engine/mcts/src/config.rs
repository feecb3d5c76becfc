//! MCTS configuration parameters.

use std::time::Duration;

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// Wall-clock budget per decision.
    /// Checked between iterations, so a decision may overrun by one iteration.
    pub time_budget: Duration,

    /// Exploration constant for the UCB1 formula.
    /// Higher values encourage exploration, lower values favor exploitation.
    pub exploration: f64,

    /// Rollout worker threads. 0 uses one thread per core.
    pub num_workers: usize,

    /// Optional cap on iterations, applied together with the time budget.
    pub max_iterations: Option<u32>,

    /// Seed for the master RNG. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            time_budget: Duration::from_millis(1500),
            exploration: 1.0,
            num_workers: 0,
            max_iterations: None,
            seed: None,
        }
    }
}

impl MctsConfig {
    /// Create a fast, reproducible config for testing.
    pub fn for_testing() -> Self {
        Self {
            time_budget: Duration::from_secs(10),
            exploration: 1.0,
            num_workers: 2,
            max_iterations: Some(200),
            seed: Some(42),
        }
    }

    /// Builder pattern: set the time budget.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = budget;
        self
    }

    /// Builder pattern: set the time budget in milliseconds.
    pub fn with_time_budget_ms(self, ms: u64) -> Self {
        self.with_time_budget(Duration::from_millis(ms))
    }

    /// Builder pattern: set the UCB exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration = c;
        self
    }

    /// Builder pattern: set the number of rollout workers.
    pub fn with_workers(mut self, n: usize) -> Self {
        self.num_workers = n;
        self
    }

    /// Builder pattern: cap the number of iterations.
    pub fn with_max_iterations(mut self, n: u32) -> Self {
        self.max_iterations = Some(n);
        self
    }

    /// Builder pattern: fix the master seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
