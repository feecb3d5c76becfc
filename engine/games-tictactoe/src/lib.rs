//! TicTacToe implementation of the `engine-core` Board contract
//!
//! A small, fully enumerable game used to exercise the MCTS engine
//! independently of Ten.
//!
//! # Usage
//!
//! ```rust
//! use engine_core::{Board, GameStatus, Player};
//! use games_tictactoe::TicTacToe;
//!
//! let mut game = TicTacToe::new();
//! assert!(game.apply_move(4));
//! assert_eq!(game.game_status(), GameStatus::Ongoing);
//! game.switch_player();
//! assert_eq!(game.current_player(), Player::B);
//! ```

use engine_core::{Board, GameStatus, Player};

/// Winning positions (rows, columns, diagonals)
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// TicTacToe position
///
/// Cells are numbered 0-8 row by row. `A` moves first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TicTacToe {
    board: [Option<Player>; 9],
    to_move: Player,
    draw_value: f64,
}

impl TicTacToe {
    /// Create an empty board with A to move
    pub fn new() -> Self {
        Self {
            board: [None; 9],
            to_move: Player::A,
            draw_value: 0.0,
        }
    }

    /// Play `moves` alternately from the empty board.
    ///
    /// Returns `None` if any move is illegal, including moves after the game
    /// has ended.
    pub fn from_moves(moves: &[u8]) -> Option<Self> {
        let mut game = Self::new();
        for &mv in moves {
            if !game.apply_move(mv) {
                return None;
            }
            game.switch_player();
        }
        Some(game)
    }

    /// Set the reward of a draw
    pub fn with_draw_value(mut self, draw_value: f64) -> Self {
        self.draw_value = draw_value;
        self
    }

    /// Occupant of `position`, if any
    pub fn cell(&self, position: u8) -> Option<Player> {
        self.board.get(position as usize).copied().flatten()
    }

    /// Check if `position` may be played now
    pub fn is_legal(&self, position: u8) -> bool {
        position < 9
            && self.board[position as usize].is_none()
            && !self.game_status().is_terminal()
    }

    /// Get legal moves (empty positions)
    pub fn legal_moves(&self) -> Vec<u8> {
        if self.game_status().is_terminal() {
            return Vec::new();
        }

        (0..9u8)
            .filter(|&pos| self.board[pos as usize].is_none())
            .collect()
    }

    /// Place a piece for the current player if the move is legal.
    ///
    /// Does not hand over the turn. Returns whether the move was played.
    pub fn apply_move(&mut self, position: u8) -> bool {
        if !self.is_legal(position) {
            return false;
        }
        self.apply_move_unchecked(position);
        true
    }

    fn check_winner(board: &[Option<Player>; 9]) -> Option<Player> {
        LINES.iter().find_map(|&[a, b, c]| match board[a] {
            Some(p) if board[b] == Some(p) && board[c] == Some(p) => Some(p),
            _ => None,
        })
    }
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

impl Board for TicTacToe {
    type Move = u8;

    fn current_player(&self) -> Player {
        self.to_move
    }

    fn apply_move_unchecked(&mut self, position: u8) {
        self.board[position as usize] = Some(self.to_move);
    }

    fn switch_player(&mut self) {
        self.to_move = self.to_move.opponent();
    }

    fn game_status(&self) -> GameStatus {
        if let Some(winner) = Self::check_winner(&self.board) {
            return GameStatus::Won(winner);
        }

        // Check for draw (board full but no winner)
        if self.board.iter().all(|cell| cell.is_some()) {
            GameStatus::Draw
        } else {
            GameStatus::Ongoing
        }
    }

    fn legal_moves_for_search(&self) -> Vec<u8> {
        self.legal_moves()
    }

    fn draw_value(&self) -> f64 {
        self.draw_value
    }
}
