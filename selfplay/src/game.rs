//! One AI-versus-AI game.

use engine_core::{Board, GameStatus, Player};
use games_ten::{TenBoard, TenMove};
use mcts::{MctsSearch, SearchError};
use rand::Rng;
use tracing::info;

/// A move played during self-play.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayedMove {
    /// 1-based move number
    pub ply: u32,
    pub player: Player,
    pub mv: TenMove,
    pub win_probability_percent: u8,
}

/// Outcome of [`play_game`].
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub moves: Vec<PlayedMove>,
    pub board: TenBoard,
    /// `Ongoing` when the game was cut short by the move limit
    pub status: GameStatus,
}

/// Play from the empty board until the game ends or `max_moves` moves have
/// been made (`0` for no limit).
///
/// `on_move` sees every move together with the position it produced.
pub fn play_game<R: Rng + ?Sized>(
    search: &MctsSearch,
    draw_value: f64,
    max_moves: u32,
    rng: &mut R,
    mut on_move: impl FnMut(&PlayedMove, &TenBoard),
) -> Result<GameRecord, SearchError> {
    let mut board = TenBoard::new().with_draw_value(draw_value);
    let mut moves = Vec::new();

    while !board.is_terminal() && (max_moves == 0 || (moves.len() as u32) < max_moves) {
        let player = board.current_player();
        let decision = search.select_move_with_rng(&board, rng)?;
        board.apply_move_unchecked(decision.mv);

        let played = PlayedMove {
            ply: moves.len() as u32 + 1,
            player,
            mv: decision.mv,
            win_probability_percent: decision.win_probability_percent,
        };
        info!(
            ply = played.ply,
            player = %player.symbol(),
            mv = %played.mv,
            win_probability_percent = played.win_probability_percent,
            iterations = decision.iterations,
            "Move played"
        );
        on_move(&played, &board);
        moves.push(played);

        if !board.is_terminal() {
            board.switch_player();
        }
    }

    Ok(GameRecord {
        status: board.game_status(),
        moves,
        board,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcts::MctsConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn fast_search() -> MctsSearch {
        MctsSearch::new(MctsConfig::for_testing().with_max_iterations(20))
    }

    #[test]
    fn test_plays_to_the_end() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let mut seen = 0;
        let record = play_game(&fast_search(), 0.0, 0, &mut rng, |_, _| seen += 1).unwrap();

        assert!(record.status.is_terminal());
        assert_eq!(seen, record.moves.len());
        assert!(record.moves.len() <= 81);

        // Players alternate, starting with A
        for (i, played) in record.moves.iter().enumerate() {
            let expected = if i % 2 == 0 { Player::A } else { Player::B };
            assert_eq!(played.player, expected);
            assert_eq!(played.ply as usize, i + 1);
        }
    }

    #[test]
    fn test_first_move_is_a_canonical_opening() {
        let mut rng = ChaCha20Rng::seed_from_u64(2);
        let record = play_game(&fast_search(), 0.0, 1, &mut rng, |_, _| {}).unwrap();

        assert_eq!(record.moves.len(), 1);
        assert!(games_ten::CANONICAL_OPENINGS.contains(&record.moves[0].mv));
        assert_eq!(record.status, GameStatus::Ongoing);
        assert_eq!(record.board.current_player(), Player::B);
    }

    #[test]
    fn test_move_limit_stops_early() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let record = play_game(&fast_search(), 0.0, 6, &mut rng, |_, _| {}).unwrap();

        assert_eq!(record.moves.len(), 6);
        assert_eq!(
            record.board.grid().iter().flatten().filter(|c| c.is_some()).count(),
            6
        );
    }

    #[test]
    fn test_same_seed_same_game() {
        let play = |seed| {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            play_game(&fast_search(), 0.0, 10, &mut rng, |_, _| {})
                .unwrap()
                .moves
        };
        assert_eq!(play(9), play(9));
    }
}
