//! Core traits and types for the Ten game engine
//!
//! This crate provides the abstractions the search engine is written against:
//! - `Board`: capability set any searchable two-player game state exposes
//! - `Player`: the two sides, with their `+1`/`-1` wire identities
//! - `GameStatus`: ongoing, won by a side, or drawn

pub mod board;
pub mod player;
pub mod status;

// Re-export main types for convenience
pub use board::Board;
pub use player::Player;
pub use status::GameStatus;
