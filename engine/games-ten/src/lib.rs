//! Ten: ultimate tic-tac-toe on a 3×3 grid of 3×3 macro-cells
//!
//! A move places a tile in one macro-cell. Its tile index selects the
//! macro-cell the opponent must play in next, unless that macro-cell is
//! already decided, in which case the opponent may play anywhere. Three
//! macro-cells in a row win the game. When every macro-cell is decided
//! without such a line, the side owning more macro-cells wins.
//!
//! # Usage
//!
//! ```rust
//! use engine_core::{Board, GameStatus, Player};
//! use games_ten::{TenBoard, TenMove};
//!
//! let mut board = TenBoard::new();
//! assert!(board.apply_move(TenMove::new(4, 0)));
//! board.switch_player();
//!
//! // B is now forced into macro-cell 0
//! assert_eq!(board.forced_macro_cell(), Some(0));
//! assert!(!board.is_legal(TenMove::new(4, 1)));
//! assert_eq!(board.current_player(), Player::B);
//! assert_eq!(board.game_status(), GameStatus::Ongoing);
//! ```

use std::fmt;

use engine_core::{Board, GameStatus, Player};
use serde::{Deserialize, Serialize};

pub mod protocol;
pub mod symmetry;

pub use protocol::{
    respond, try_respond, BoardData, ClientMove, ProtocolConfig, ProtocolError, ResponseStatus,
    ServerResponse,
};
pub use symmetry::{canonical_opening, canonical_openings, D4Transform, CANONICAL_OPENINGS};

/// Three-in-a-row lines of a 3×3 square (rows, columns, diagonals)
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// One placement: a tile inside a macro-cell, both numbered 0-8 row by row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TenMove {
    pub macro_cell: u8,
    pub tile: u8,
}

impl TenMove {
    pub const fn new(macro_cell: u8, tile: u8) -> Self {
        Self { macro_cell, tile }
    }
}

impl fmt::Display for TenMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.macro_cell, self.tile)
    }
}

/// Progress of one macro-cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MacroStatus {
    /// No winning line and at least one empty tile
    #[default]
    Open,
    /// The player owns a line in this macro-cell
    Won(Player),
    /// Every tile is occupied and nobody owns a line
    Filled,
}

impl MacroStatus {
    /// Status of a 3×3 square of tiles.
    pub fn of(tiles: &[Option<Player>; 9]) -> Self {
        match line_owner(|i| tiles[i]) {
            Some(player) => MacroStatus::Won(player),
            None if tiles.iter().any(Option::is_none) => MacroStatus::Open,
            None => MacroStatus::Filled,
        }
    }

    #[inline]
    pub fn is_open(self) -> bool {
        self == MacroStatus::Open
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            MacroStatus::Won(player) => Some(player),
            _ => None,
        }
    }
}

/// Owner of a complete line, A checked first.
fn line_owner(at: impl Fn(usize) -> Option<Player>) -> Option<Player> {
    [Player::A, Player::B].into_iter().find(|&player| {
        LINES
            .iter()
            .any(|line| line.iter().all(|&i| at(i) == Some(player)))
    })
}

/// A Ten position.
///
/// The grid is indexed `[macro_cell][tile]`. Macro-cell statuses are kept
/// in sync with the grid by every mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct TenBoard {
    grid: [[Option<Player>; 9]; 9],
    macro_status: [MacroStatus; 9],
    forced: Option<u8>,
    to_move: Player,
    draw_value: f64,
}

impl Default for TenBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl TenBoard {
    /// Empty board, A to move anywhere.
    pub fn new() -> Self {
        Self {
            grid: [[None; 9]; 9],
            macro_status: [MacroStatus::Open; 9],
            forced: None,
            to_move: Player::A,
            draw_value: 0.0,
        }
    }

    /// Rebuild a position from its parts.
    ///
    /// Statuses are recomputed from the grid. A forced macro-cell that is
    /// out of range or already decided is dropped, leaving the mover
    /// unconstrained.
    pub fn from_parts(grid: [[Option<Player>; 9]; 9], forced: Option<u8>, to_move: Player) -> Self {
        let mut macro_status = [MacroStatus::Open; 9];
        for (status, tiles) in macro_status.iter_mut().zip(grid.iter()) {
            *status = MacroStatus::of(tiles);
        }
        let forced =
            forced.filter(|&m| macro_status.get(m as usize).is_some_and(|s| s.is_open()));

        Self {
            grid,
            macro_status,
            forced,
            to_move,
            draw_value: 0.0,
        }
    }

    /// Set the reward of a draw
    pub fn with_draw_value(mut self, draw_value: f64) -> Self {
        self.draw_value = draw_value;
        self
    }

    /// Occupant of a tile, if any. Out-of-range indices read as empty.
    pub fn cell(&self, macro_cell: u8, tile: u8) -> Option<Player> {
        self.grid
            .get(macro_cell as usize)
            .and_then(|tiles| tiles.get(tile as usize))
            .copied()
            .flatten()
    }

    pub fn grid(&self) -> &[[Option<Player>; 9]; 9] {
        &self.grid
    }

    /// # Panics
    ///
    /// If `macro_cell` is not in 0-8.
    pub fn macro_status(&self, macro_cell: u8) -> MacroStatus {
        self.macro_status[macro_cell as usize]
    }

    /// Macro-cell the player to move must play in, `None` if unconstrained.
    pub fn forced_macro_cell(&self) -> Option<u8> {
        self.forced
    }

    pub fn is_empty(&self) -> bool {
        self.grid.iter().flatten().all(Option::is_none)
    }

    /// Whether `mv` follows the placement rules: in range, into an open
    /// macro-cell, onto an empty tile, respecting the forced macro-cell.
    pub fn is_legal(&self, mv: TenMove) -> bool {
        let (m, t) = (mv.macro_cell as usize, mv.tile as usize);
        if m >= 9 || t >= 9 {
            return false;
        }
        if self.forced.is_some_and(|forced| forced != mv.macro_cell) {
            return false;
        }
        self.macro_status[m].is_open() && self.grid[m][t].is_none()
    }

    /// Every move a human may play now.
    pub fn legal_moves(&self) -> Vec<TenMove> {
        let macros = match self.forced {
            Some(forced) => forced..forced + 1,
            None => 0..9,
        };
        macros
            .flat_map(|m| (0..9).map(move |t| TenMove::new(m, t)))
            .filter(|&mv| self.is_legal(mv))
            .collect()
    }

    /// Play `mv` for the current player if it is legal.
    ///
    /// Does not hand over the turn. Returns whether the move was played.
    pub fn apply_move(&mut self, mv: TenMove) -> bool {
        if !self.is_legal(mv) {
            return false;
        }
        self.apply_move_unchecked(mv);
        true
    }

    fn count_won(&self, player: Player) -> usize {
        self.macro_status
            .iter()
            .filter(|s| s.winner() == Some(player))
            .count()
    }
}

impl Board for TenBoard {
    type Move = TenMove;

    fn current_player(&self) -> Player {
        self.to_move
    }

    fn apply_move_unchecked(&mut self, mv: TenMove) {
        let (m, t) = (mv.macro_cell as usize, mv.tile as usize);
        self.grid[m][t] = Some(self.to_move);
        self.macro_status[m] = MacroStatus::of(&self.grid[m]);
        self.forced = self.macro_status[t].is_open().then_some(mv.tile);
    }

    fn switch_player(&mut self) {
        self.to_move = self.to_move.opponent();
    }

    fn game_status(&self) -> GameStatus {
        if let Some(winner) = line_owner(|i| self.macro_status[i].winner()) {
            return GameStatus::Won(winner);
        }
        if self.macro_status.iter().any(|s| s.is_open()) {
            return GameStatus::Ongoing;
        }

        let (a, b) = (self.count_won(Player::A), self.count_won(Player::B));
        match a.cmp(&b) {
            std::cmp::Ordering::Greater => GameStatus::Won(Player::A),
            std::cmp::Ordering::Less => GameStatus::Won(Player::B),
            std::cmp::Ordering::Equal => GameStatus::Draw,
        }
    }

    fn legal_moves_for_search(&self) -> Vec<TenMove> {
        if self.is_empty() && self.forced.is_none() {
            // Every other opening is a symmetric image of one of these
            return CANONICAL_OPENINGS.to_vec();
        }
        self.legal_moves()
    }

    fn draw_value(&self) -> f64 {
        self.draw_value
    }
}

impl fmt::Display for TenBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = |cell: Option<Player>| cell.map_or('.', Player::symbol);

        writeln!(f, "Current player: {}", self.to_move.symbol())?;
        writeln!(f, "-----------------")?;
        for macro_row in 0..3 {
            for tile_row in 0..3 {
                let blocks: Vec<String> = (0..3)
                    .map(|macro_col| {
                        let tiles = &self.grid[macro_row * 3 + macro_col];
                        (0..3)
                            .map(|tile_col| symbol(tiles[tile_row * 3 + tile_col]).to_string())
                            .collect::<Vec<_>>()
                            .join(" ")
                    })
                    .collect();
                writeln!(f, "{}", blocks.join("|"))?;
            }
            if macro_row != 2 {
                writeln!(f, "- - -*- - -*- - -")?;
            }
        }
        write!(f, "-----------------")
    }
}
