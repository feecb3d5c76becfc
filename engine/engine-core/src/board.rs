//! Board trait every searchable game implements
//!
//! The MCTS engine is written against this capability set only. A game
//! provides one concrete type implementing it; the engine never looks
//! inside the state.

use std::fmt::Debug;

use crate::player::Player;
use crate::status::GameStatus;

/// Capability set of a two-player, perfect-information game position.
///
/// `Clone` is the deep copy used by the engine: many rollouts run
/// concurrently against clones of the same position, so a clone must never
/// share mutable state with its source.
///
/// # Move protocol
///
/// A move is played as:
///
/// 1. [`apply_move_unchecked`](Board::apply_move_unchecked)
/// 2. [`game_status`](Board::game_status), still from the mover's side
/// 3. [`switch_player`](Board::switch_player)
///
/// # Example
///
/// ```rust
/// use engine_core::{Board, GameStatus, Player};
///
/// /// Take one or two stones; whoever takes the last stone wins.
/// #[derive(Debug, Clone)]
/// struct Nim {
///     stones: u8,
///     to_move: Player,
///     last_mover: Option<Player>,
/// }
///
/// impl Board for Nim {
///     type Move = u8;
///
///     fn current_player(&self) -> Player {
///         self.to_move
///     }
///
///     fn apply_move_unchecked(&mut self, mv: u8) {
///         self.stones -= mv;
///         self.last_mover = Some(self.to_move);
///     }
///
///     fn switch_player(&mut self) {
///         self.to_move = self.to_move.opponent();
///     }
///
///     fn game_status(&self) -> GameStatus {
///         match (self.stones, self.last_mover) {
///             (0, Some(winner)) => GameStatus::Won(winner),
///             _ => GameStatus::Ongoing,
///         }
///     }
///
///     fn legal_moves_for_search(&self) -> Vec<u8> {
///         (1..=self.stones.min(2)).collect()
///     }
/// }
///
/// let mut nim = Nim { stones: 2, to_move: Player::A, last_mover: None };
/// nim.apply_move_unchecked(2);
/// assert_eq!(nim.game_status(), GameStatus::Won(Player::A));
/// ```
pub trait Board: Clone + Send + Sync + 'static {
    /// Move type - small and Copy
    type Move: Copy + Send + Sync + Debug + PartialEq + 'static;

    /// Whose turn it is.
    fn current_player(&self) -> Player;

    /// Play `mv` for the current player without validating it.
    ///
    /// Validation is the caller's job; this is the hot path of every rollout.
    fn apply_move_unchecked(&mut self, mv: Self::Move);

    /// Hand the turn to the other player.
    ///
    /// Callers read [`game_status`](Board::game_status) for the move just
    /// made before switching.
    fn switch_player(&mut self);

    /// Status of the game after the most recent move.
    fn game_status(&self) -> GameStatus;

    /// Moves the search engine may try from this position.
    ///
    /// May be a pruned or symmetry-reduced subset of the moves a human may
    /// legally play, never a superset. Must be non-empty whenever
    /// [`game_status`](Board::game_status) is `Ongoing`.
    fn legal_moves_for_search(&self) -> Vec<Self::Move>;

    /// Reward of a draw relative to a win (1) and a loss (0).
    fn draw_value(&self) -> f64 {
        0.0
    }

    /// Whether the game has finished.
    fn is_terminal(&self) -> bool {
        self.game_status().is_terminal()
    }
}
