//! Stateless move protocol
//!
//! Every request carries the complete position before the human's move, so
//! the server keeps no session. [`respond`] rebuilds the board, plays the
//! human move, lets the engine answer and reports the outcome.
//!
//! Wire shapes (camelCase JSON):
//!
//! ```text
//! ClientMove     { "boardBeforeMove": BoardData, "move": [macro, tile] }
//! BoardData      { "grid": int[9][9], "forcedMacroCell": -1..8, "moverIdentity": ±1 }
//! ServerResponse { "aiMove": [macro, tile] | null, "forcedMacroCell": -1..8,
//!                  "status": "ONGOING" | "A_WINS" | "B_WINS" | "DRAW" | "ILLEGAL_MOVE",
//!                  "winProbabilityPercent": 0..100 }
//! ```
//!
//! `moverIdentity` is the identity of the player who made the last move, that
//! is the AI's side. The human submitting `move` plays the other side.

use engine_core::{Board, GameStatus, Player};
use mcts::{MctsConfig, MctsSearch, SearchError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::{TenBoard, TenMove};

/// Wire value of "no forced macro-cell".
pub const UNCONSTRAINED: i8 = -1;

/// Reasons a request cannot be processed.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Grid must be 9x9, got {rows} rows")]
    GridRows { rows: usize },

    #[error("Grid row {row} must have 9 tiles, got {len}")]
    GridRowLength { row: usize, len: usize },

    #[error("Invalid tile value {value} at [{macro_cell}][{tile}]")]
    TileValue {
        macro_cell: usize,
        tile: usize,
        value: i64,
    },

    #[error("Forced macro-cell must be in -1..=8, got {0}")]
    ForcedMacroCell(i64),

    #[error("Mover identity must be 1 or -1, got {0}")]
    MoverIdentity(i64),

    #[error("Move must have exactly 2 entries, got {0}")]
    MoveArity(usize),

    #[error("Search failed: {0}")]
    Search(#[from] SearchError),
}

impl ProtocolError {
    /// Whether the request itself was at fault, as opposed to the engine.
    pub fn is_malformed(&self) -> bool {
        !matches!(self, ProtocolError::Search(_))
    }
}

/// Position before the human's move, as sent by the client.
///
/// Fields are optional so that incomplete payloads still deserialize and
/// can be rejected with a reason.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardData {
    pub grid: Option<Vec<Vec<i64>>>,
    pub forced_macro_cell: Option<i64>,
    pub mover_identity: Option<i64>,
}

impl BoardData {
    /// Empty board with A (the human) about to move.
    pub fn initial() -> Self {
        Self::from_board(&TenBoard::new())
    }

    /// Encode `board`. The mover is the opponent of its player to move.
    pub fn from_board(board: &TenBoard) -> Self {
        let grid = board
            .grid()
            .iter()
            .map(|tiles| {
                tiles
                    .iter()
                    .map(|cell| cell.map_or(0, |p| i64::from(p.identity())))
                    .collect()
            })
            .collect();

        Self {
            grid: Some(grid),
            forced_macro_cell: Some(i64::from(forced_to_wire(board.forced_macro_cell()))),
            mover_identity: Some(i64::from(board.current_player().opponent().identity())),
        }
    }

    /// Rebuild the board, handing the turn from the mover to its opponent.
    pub fn to_board(&self) -> Result<TenBoard, ProtocolError> {
        let rows = self
            .grid
            .as_ref()
            .ok_or(ProtocolError::MissingField("grid"))?;
        let forced = self
            .forced_macro_cell
            .ok_or(ProtocolError::MissingField("forcedMacroCell"))?;
        let identity = self
            .mover_identity
            .ok_or(ProtocolError::MissingField("moverIdentity"))?;

        if rows.len() != 9 {
            return Err(ProtocolError::GridRows { rows: rows.len() });
        }
        let mut grid = [[None; 9]; 9];
        for (m, row) in rows.iter().enumerate() {
            if row.len() != 9 {
                return Err(ProtocolError::GridRowLength {
                    row: m,
                    len: row.len(),
                });
            }
            for (t, &value) in row.iter().enumerate() {
                grid[m][t] = match value {
                    0 => None,
                    1 => Some(Player::A),
                    -1 => Some(Player::B),
                    _ => {
                        return Err(ProtocolError::TileValue {
                            macro_cell: m,
                            tile: t,
                            value,
                        })
                    }
                };
            }
        }

        let forced = match forced {
            -1 => None,
            0..=8 => Some(forced as u8),
            _ => return Err(ProtocolError::ForcedMacroCell(forced)),
        };
        let mover = i8::try_from(identity)
            .ok()
            .and_then(Player::from_identity)
            .ok_or(ProtocolError::MoverIdentity(identity))?;

        let mut board = TenBoard::from_parts(grid, forced, mover);
        board.switch_player();
        Ok(board)
    }
}

/// A human move submission.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientMove {
    pub board_before_move: Option<BoardData>,
    #[serde(rename = "move")]
    pub mv: Option<Vec<i64>>,
}

impl ClientMove {
    pub fn new(board: BoardData, mv: TenMove) -> Self {
        Self {
            board_before_move: Some(board),
            mv: Some(vec![i64::from(mv.macro_cell), i64::from(mv.tile)]),
        }
    }
}

/// Outcome reported to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseStatus {
    Ongoing,
    AWins,
    BWins,
    Draw,
    IllegalMove,
}

impl From<GameStatus> for ResponseStatus {
    fn from(status: GameStatus) -> Self {
        match status {
            GameStatus::Ongoing => ResponseStatus::Ongoing,
            GameStatus::Won(Player::A) => ResponseStatus::AWins,
            GameStatus::Won(Player::B) => ResponseStatus::BWins,
            GameStatus::Draw => ResponseStatus::Draw,
        }
    }
}

/// Reply to a [`ClientMove`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerResponse {
    pub ai_move: Option<[u8; 2]>,
    pub forced_macro_cell: i8,
    pub status: ResponseStatus,
    pub win_probability_percent: u8,
}

impl ServerResponse {
    /// The move was rejected; the client keeps its board and forced cell.
    pub fn illegal_move(forced_macro_cell: i8) -> Self {
        Self {
            ai_move: None,
            forced_macro_cell,
            status: ResponseStatus::IllegalMove,
            win_probability_percent: 0,
        }
    }

    /// The human move ended the game.
    pub fn game_over(status: GameStatus) -> Self {
        Self {
            ai_move: None,
            forced_macro_cell: UNCONSTRAINED,
            status: status.into(),
            win_probability_percent: 0,
        }
    }
}

/// Settings for answering moves.
#[derive(Debug, Clone, Default)]
pub struct ProtocolConfig {
    /// Search settings for the AI reply; `time_budget` defaults to 1500 ms
    pub mcts: MctsConfig,
    /// Reward of a drawn game
    pub draw_value: f64,
}

fn forced_to_wire(forced: Option<u8>) -> i8 {
    forced.map_or(UNCONSTRAINED, |m| m as i8)
}

/// Answer a move, or `None` if the request cannot be processed.
///
/// The reason for a `None` is logged.
pub fn respond(client_move: &ClientMove, config: &ProtocolConfig) -> Option<ServerResponse> {
    match try_respond(client_move, config) {
        Ok(response) => Some(response),
        Err(e) if e.is_malformed() => {
            warn!(error = %e, "Rejected malformed move payload");
            None
        }
        Err(e) => {
            error!(error = %e, "Move could not be answered");
            None
        }
    }
}

/// Answer a move, reporting why a request could not be processed.
pub fn try_respond(
    client_move: &ClientMove,
    config: &ProtocolConfig,
) -> Result<ServerResponse, ProtocolError> {
    let data = client_move
        .board_before_move
        .as_ref()
        .ok_or(ProtocolError::MissingField("boardBeforeMove"))?;
    let raw_move = client_move
        .mv
        .as_ref()
        .ok_or(ProtocolError::MissingField("move"))?;
    let &[raw_macro, raw_tile] = raw_move.as_slice() else {
        return Err(ProtocolError::MoveArity(raw_move.len()));
    };

    // The human is to move on the rebuilt board
    let mut board = data.to_board()?.with_draw_value(config.draw_value);
    // Validated by to_board
    let prior_forced = data.forced_macro_cell.map_or(UNCONSTRAINED, |f| f as i8);

    // Off-board coordinates are ordinary illegal moves
    let human_move = match (u8::try_from(raw_macro), u8::try_from(raw_tile)) {
        (Ok(m), Ok(t)) => Some(TenMove::new(m, t)),
        _ => None,
    };
    let human_move = match human_move {
        Some(mv) if !board.is_terminal() && board.is_legal(mv) => mv,
        _ => return Ok(ServerResponse::illegal_move(prior_forced)),
    };

    board.apply_move_unchecked(human_move);
    let status = board.game_status();
    if status.is_terminal() {
        info!(human_move = %human_move, ?status, "Human move ended the game");
        return Ok(ServerResponse::game_over(status));
    }

    board.switch_player();
    let decision = MctsSearch::new(config.mcts.clone()).select_move(&board)?;
    board.apply_move_unchecked(decision.mv);
    let status = board.game_status();

    info!(
        human_move = %human_move,
        ai_move = %decision.mv,
        win_probability_percent = decision.win_probability_percent,
        iterations = decision.iterations,
        ?status,
        "AI replied"
    );

    Ok(ServerResponse {
        ai_move: Some([decision.mv.macro_cell, decision.mv.tile]),
        forced_macro_cell: forced_to_wire(board.forced_macro_cell()),
        status: status.into(),
        win_probability_percent: decision.win_probability_percent,
    })
}
