//! Monte Carlo Tree Search (MCTS) decision engine.
//!
//! This crate provides a game-agnostic UCB1 MCTS that works with any game
//! implementing the `engine-core` [`Board`](engine_core::Board) trait.
//!
//! # Overview
//!
//! Each iteration of the search consists of four phases:
//!
//! 1. **Selection**: Traverse the tree using UCB1, flipping perspective at
//!    every ply, until a node without children is reached
//! 2. **Expansion**: Add one child per move the board offers for search
//! 3. **Simulation**: Play a uniformly random game from every new child.
//!    Rollouts of one batch run in parallel on a rayon pool
//! 4. **Backpropagation**: Add each rollout's reward and one visit to the
//!    child and all its ancestors
//!
//! Iterations repeat until the time budget runs out. The root child with the
//! best win rate is the decision.
//!
//! # Usage
//!
//! ```rust
//! use mcts::{MctsConfig, MctsSearch};
//! use games_tictactoe::TicTacToe;
//!
//! let board = TicTacToe::new();
//! let search = MctsSearch::new(MctsConfig::for_testing().with_max_iterations(50));
//!
//! let result = search.select_move(&board).unwrap();
//! assert!(result.mv < 9);
//! assert!(result.win_probability_percent <= 100);
//! ```
//!
//! # Configuration
//!
//! The [`MctsConfig`] struct controls search behavior:
//!
//! - `time_budget`: Wall time per decision (default: 1500 ms)
//! - `exploration`: UCB1 exploration constant (default: 1.0)
//! - `num_workers`: Rollout threads, 0 = one per core (default: 0)
//! - `max_iterations`: Optional iteration cap (default: none)
//! - `seed`: Master RNG seed for reproducible searches (default: entropy)

pub mod config;
pub mod node;
pub mod search;
pub mod tree;

// Re-export main types
pub use config::MctsConfig;
pub use node::{MctsNode, NodeId, NodeStats};
pub use search::{rollout, select_move, MctsSearch, SearchError, SearchResult, SearchTree};
pub use tree::{MctsTree, TreeStats};
