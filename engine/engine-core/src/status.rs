//! Game outcome as seen by the rules of a board.

use crate::player::Player;

/// Status of a game after the most recent move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// No result yet; the next player has at least one move.
    Ongoing,
    /// The given player has won.
    Won(Player),
    /// The game ended without a winner.
    Draw,
}

impl GameStatus {
    /// Whether the game has finished.
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Ongoing)
    }

    /// The winner, if there is one.
    pub fn winner(self) -> Option<Player> {
        match self {
            GameStatus::Won(player) => Some(player),
            _ => None,
        }
    }

    /// Score a finished game for `root`: 1 for a win, 0 for a loss,
    /// `draw_value` for a draw.
    ///
    /// Returns `None` while the game is still ongoing.
    pub fn reward_for(self, root: Player, draw_value: f64) -> Option<f64> {
        match self {
            GameStatus::Ongoing => None,
            GameStatus::Won(winner) if winner == root => Some(1.0),
            GameStatus::Won(_) => Some(0.0),
            GameStatus::Draw => Some(draw_value),
        }
    }
}
