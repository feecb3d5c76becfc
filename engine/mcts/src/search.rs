//! MCTS search implementation.
//!
//! Implements the core MCTS algorithm:
//! 1. Selection: Traverse tree using UCB1 to find a leaf
//! 2. Expansion: Add one child per search move of the leaf
//! 3. Simulation: Random rollout from every new child, in parallel
//! 4. Backpropagation: Update statistics along the path
//!
//! Iterations repeat until the time budget (or the optional iteration cap)
//! runs out. The move with the best observed win rate is then returned.

use std::time::{Duration, Instant};

use engine_core::{Board, Player};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::MctsConfig;
use crate::tree::MctsTree;

/// Errors that can occur during MCTS search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Cannot search from a finished position")]
    TerminalRoot,

    #[error("Failed to build rollout thread pool: {0}")]
    ThreadPool(#[from] ThreadPoolBuildError),
}

/// Result of an MCTS search.
#[derive(Debug, Clone)]
pub struct SearchResult<M> {
    /// Best move found
    pub mv: M,

    /// Estimated win probability of `mv` for the player to move
    pub win_probability: f64,

    /// `floor(100 * win_probability)`, clamped to 0..=100
    pub win_probability_percent: u8,

    /// Number of select/expand/simulate/backpropagate iterations
    pub iterations: u32,

    /// Number of rewards propagated to the root
    pub simulations: u32,

    /// Wall time spent searching
    pub elapsed: Duration,
}

/// A grown search tree, before the final decision is read from it.
#[derive(Debug)]
pub struct SearchTree<B: Board> {
    pub tree: MctsTree<B>,
    pub iterations: u32,
    pub elapsed: Duration,
}

/// MCTS decision engine.
///
/// Holds only configuration. Every decision builds a fresh tree and a fresh
/// worker pool, both dropped when the decision returns.
#[derive(Debug, Clone, Default)]
pub struct MctsSearch {
    config: MctsConfig,
}

impl MctsSearch {
    pub fn new(config: MctsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Pick a move for the player to move in `board`.
    ///
    /// Seeds the master RNG from `config.seed`, or from entropy when unset.
    pub fn select_move<B: Board>(&self, board: &B) -> Result<SearchResult<B::Move>, SearchError> {
        let mut rng = match self.config.seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_entropy(),
        };
        self.select_move_with_rng(board, &mut rng)
    }

    /// Pick a move, drawing rollout seeds from `rng`.
    pub fn select_move_with_rng<B: Board, R: Rng + ?Sized>(
        &self,
        board: &B,
        rng: &mut R,
    ) -> Result<SearchResult<B::Move>, SearchError> {
        let grown = self.grow_tree(board, rng)?;
        let tree = &grown.tree;

        // A non-terminal root is expanded by the first iteration, and
        // expansion never yields zero children.
        let best_id = tree
            .best_child(tree.root())
            .expect("root has children after the first iteration");
        let best = tree.get(best_id);
        let mv = best.mv.expect("non-root nodes carry their move");
        let win_probability = best.win_probability();

        let result = SearchResult {
            mv,
            win_probability,
            win_probability_percent: to_percent(win_probability),
            iterations: grown.iterations,
            simulations: tree.get(tree.root()).visits(),
            elapsed: grown.elapsed,
        };

        let stats = tree.stats();
        debug!(
            mv = ?result.mv,
            win_probability = result.win_probability,
            iterations = result.iterations,
            simulations = result.simulations,
            elapsed_ms = result.elapsed.as_millis() as u64,
            total_nodes = stats.total_nodes,
            max_depth = stats.max_depth,
            "MCTS decision"
        );

        Ok(result)
    }

    /// Run iterations until the budget is spent and return the tree.
    ///
    /// At least one iteration always runs, so the root of the returned tree
    /// is expanded.
    pub fn grow_tree<B: Board, R: Rng + ?Sized>(
        &self,
        board: &B,
        rng: &mut R,
    ) -> Result<SearchTree<B>, SearchError> {
        if board.is_terminal() {
            return Err(SearchError::TerminalRoot);
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(self.config.num_workers)
            .build()?;

        let root_player = board.current_player();
        let mut tree = MctsTree::new(board.clone());
        let start = Instant::now();
        let deadline = start + self.config.time_budget;
        let mut iterations = 0u32;

        loop {
            let simulated = self.iterate(&mut tree, &pool, root_player, rng);
            iterations += 1;
            trace!(iteration = iterations, simulated, "MCTS iteration complete");

            let capped = self
                .config
                .max_iterations
                .is_some_and(|max| iterations >= max);
            if capped || Instant::now() >= deadline {
                break;
            }
        }

        Ok(SearchTree {
            tree,
            iterations,
            elapsed: start.elapsed(),
        })
    }

    /// One select -> expand -> simulate -> backpropagate pass.
    /// Returns the number of rollouts run.
    fn iterate<B: Board, R: Rng + ?Sized>(
        &self,
        tree: &mut MctsTree<B>,
        pool: &ThreadPool,
        root_player: Player,
        rng: &mut R,
    ) -> usize {
        let (leaf_id, depth) = tree.select_leaf(self.config.exploration);

        // Unexpanded nodes always hold their board
        let terminal_reward = tree
            .get(leaf_id)
            .board()
            .and_then(|b| b.game_status().reward_for(root_player, b.draw_value()));

        if let Some(reward) = terminal_reward {
            // Finished positions are never expanded; re-score instead
            tree.backpropagate(leaf_id, reward);
            trace!(leaf = leaf_id.0, depth, reward, "Terminal leaf re-scored");
            return 0;
        }

        let children = tree.expand(leaf_id);
        let seeds: Vec<u64> = children.iter().map(|_| rng.gen()).collect();
        let tree: &MctsTree<B> = tree;

        // install returns once every rollout task has finished
        pool.install(|| {
            children
                .par_iter()
                .zip(seeds.par_iter())
                .for_each(|(&child_id, &seed)| {
                    let child = tree.get(child_id);
                    let Some(board) = child.board() else {
                        return;
                    };
                    let mut task_rng = ChaCha20Rng::seed_from_u64(seed);
                    let reward = rollout(board, root_player, &mut task_rng);
                    tree.backpropagate(child_id, reward);
                });
        });

        children.len()
    }
}

/// Play uniformly random search moves from `board` until the game ends.
///
/// Returns the reward relative to `root_player`: 1 for a win, 0 for a loss,
/// the board's draw value for a draw.
///
/// # Panics
///
/// If a non-terminal position offers no moves for search.
pub fn rollout<B: Board, R: Rng + ?Sized>(board: &B, root_player: Player, rng: &mut R) -> f64 {
    let mut board = board.clone();
    loop {
        let status = board.game_status();
        if let Some(reward) = status.reward_for(root_player, board.draw_value()) {
            return reward;
        }

        let moves = board.legal_moves_for_search();
        let Some(&mv) = moves.choose(rng) else {
            panic!(
                "Board contract violation: rollout reached status {:?} with no moves for search",
                status
            );
        };
        board.apply_move_unchecked(mv);
        board.switch_player();
    }
}

/// Convenience wrapper: one decision with `config`.
pub fn select_move<B: Board>(
    board: &B,
    config: MctsConfig,
) -> Result<SearchResult<B::Move>, SearchError> {
    MctsSearch::new(config).select_move(board)
}

fn to_percent(p: f64) -> u8 {
    (p * 100.0).floor().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::GameStatus;
    use games_ten::{TenBoard, TenMove};
    use games_tictactoe::TicTacToe;
    use crate::node::NodeId;

    /// Ongoing board with one move at the root and none after it.
    #[derive(Debug, Clone)]
    struct DeadEnd {
        played: bool,
    }

    impl Board for DeadEnd {
        type Move = u8;

        fn current_player(&self) -> Player {
            Player::A
        }

        fn apply_move_unchecked(&mut self, _mv: u8) {
            self.played = true;
        }

        fn switch_player(&mut self) {}

        fn game_status(&self) -> GameStatus {
            GameStatus::Ongoing
        }

        fn legal_moves_for_search(&self) -> Vec<u8> {
            if self.played {
                Vec::new()
            } else {
                vec![0]
            }
        }
    }

    fn tictactoe(moves: &[u8]) -> TicTacToe {
        TicTacToe::from_moves(moves).expect("legal test sequence")
    }

    #[test]
    fn test_finds_winning_move() {
        // Board:
        // A | A | _
        // B | B | _
        // _ | _ | _
        //
        // A should play position 2 to win
        let board = tictactoe(&[0, 3, 1, 4]);
        let search = MctsSearch::new(MctsConfig::for_testing().with_max_iterations(300));

        let result = search.select_move(&board).unwrap();

        assert_eq!(result.mv, 2);
        assert!((result.win_probability - 1.0).abs() < 1e-12);
        assert_eq!(result.win_probability_percent, 100);
    }

    #[test]
    fn test_blocks_for_second_player() {
        // Board:
        // A | A | _
        // B | B | A
        // _ | _ | _
        //
        // B must block at 2; every other move lets A win next turn
        let board = tictactoe(&[0, 4, 1, 3, 5]);
        assert_eq!(board.current_player(), Player::B);
        let search = MctsSearch::new(MctsConfig::for_testing().with_max_iterations(1000));

        let result = search.select_move(&board).unwrap();
        assert_eq!(result.mv, 2);
    }

    #[test]
    fn test_result_is_a_search_move() {
        let board = tictactoe(&[4]);
        let result = select_move(&board, MctsConfig::for_testing()).unwrap();

        assert!(board.legal_moves_for_search().contains(&result.mv));
        assert!(result.win_probability_percent <= 100);
        assert!(result.iterations >= 1);
        assert_eq!(result.iterations, 200);
    }

    #[test]
    fn test_root_visits_equal_children_visits() {
        let board = TicTacToe::new();
        let search = MctsSearch::new(MctsConfig::for_testing());
        let mut rng = ChaCha20Rng::seed_from_u64(3);

        let grown = search.grow_tree(&board, &mut rng).unwrap();
        let tree = &grown.tree;
        let root = tree.get(tree.root());

        let child_visits: u32 = root.children.iter().map(|&c| tree.get(c).visits()).sum();
        assert_eq!(root.visits(), child_visits);
        assert!(root.board().is_none());

        for &child in &root.children {
            let stats = tree.get(child).stats();
            assert!(stats.wins >= 0.0);
            assert!(stats.wins <= stats.visits as f64);
        }
    }

    /// Every expanded node holds its own rollout (none for the root) plus
    /// everything its children received.
    fn assert_visits_conserved<B: Board>(tree: &MctsTree<B>) {
        for index in 0..tree.len() {
            let id = NodeId(index as u32);
            let node = tree.get(id);
            if node.children.is_empty() {
                continue;
            }
            let own = if id == tree.root() { 0 } else { 1 };
            let child_visits: u32 = node.children.iter().map(|&c| tree.get(c).visits()).sum();
            assert_eq!(node.visits(), own + child_visits, "node {index}");
        }
    }

    #[test]
    fn test_visits_conserved_with_parallel_rollouts() {
        let config = MctsConfig::for_testing()
            .with_workers(4)
            .with_max_iterations(300);
        let search = MctsSearch::new(config);

        // Too shallow to reach a finished game: one rollout per created node
        let mut ten = TenBoard::new();
        assert!(ten.apply_move(TenMove::new(4, 4)));
        ten.switch_player();
        let mut rng = ChaCha20Rng::seed_from_u64(8);
        let grown = search.grow_tree(&ten, &mut rng).unwrap();
        let tree = &grown.tree;
        assert_eq!(grown.iterations, 300);
        assert_visits_conserved(tree);
        assert_eq!(tree.get(tree.root()).visits() as usize, tree.len() - 1);

        // Tic-tac-toe reaches terminal leaves, whose re-scores flow upward too
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        let grown = search.grow_tree(&TicTacToe::new(), &mut rng).unwrap();
        assert_visits_conserved(&grown.tree);
        assert!(grown.tree.get(grown.tree.root()).visits() as usize >= grown.tree.len() - 1);
    }

    #[test]
    fn test_same_seed_same_decision() {
        let board = tictactoe(&[4, 0]);
        let config = MctsConfig::for_testing().with_seed(11).with_workers(4);

        let first = select_move(&board, config.clone()).unwrap();
        let second = select_move(&board, config).unwrap();

        assert_eq!(first.mv, second.mv);
        assert_eq!(first.simulations, second.simulations);
        assert!((first.win_probability - second.win_probability).abs() < 1e-12);
    }

    #[test]
    fn test_at_least_one_iteration() {
        let config = MctsConfig::default()
            .with_time_budget(Duration::ZERO)
            .with_workers(1);
        let result = select_move(&TicTacToe::new(), config).unwrap();

        assert_eq!(result.iterations, 1);
        // The first iteration rolls out every child of the root
        assert_eq!(result.simulations, 9);
    }

    #[test]
    fn test_ten_opening_within_budget() {
        let budget = Duration::from_millis(50);
        let config = MctsConfig::default().with_time_budget(budget).with_seed(5);

        let result = select_move(&TenBoard::new(), config).unwrap();

        let openings: Vec<TenMove> = TenBoard::new().legal_moves_for_search();
        assert_eq!(openings.len(), 15);
        assert!(openings.contains(&result.mv));
        // One in-flight iteration of slack
        assert!(
            result.elapsed < budget + Duration::from_millis(300),
            "took {:?}",
            result.elapsed
        );
    }

    #[test]
    fn test_terminal_root_is_an_error() {
        let board = tictactoe(&[0, 3, 1, 4, 2]);
        assert!(board.is_terminal());

        let err = select_move(&board, MctsConfig::for_testing()).unwrap_err();
        assert!(matches!(err, SearchError::TerminalRoot));
    }

    #[test]
    #[should_panic(expected = "Board contract violation")]
    fn test_rollout_without_moves_panics() {
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        rollout(&DeadEnd { played: true }, Player::A, &mut rng);
    }

    #[test]
    #[should_panic(expected = "Board contract violation")]
    fn test_select_move_on_broken_board_panics() {
        let _ = select_move(&DeadEnd { played: true }, MctsConfig::for_testing());
    }

    #[test]
    fn test_rollout_scores_for_root_player() {
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        // A has already won
        let won = tictactoe(&[0, 3, 1, 4, 2]);
        assert_eq!(rollout(&won, Player::A, &mut rng), 1.0);
        assert_eq!(rollout(&won, Player::B, &mut rng), 0.0);

        // Full board, no line:
        // A B A
        // A B B
        // B A A
        let drawn = tictactoe(&[0, 1, 2, 4, 3, 5, 7, 6, 8]).with_draw_value(0.5);
        assert_eq!(drawn.game_status(), GameStatus::Draw);
        assert_eq!(rollout(&drawn, Player::B, &mut rng), 0.5);
    }

    #[test]
    fn test_percent_rounding() {
        assert_eq!(to_percent(0.0), 0);
        assert_eq!(to_percent(0.999), 99);
        assert_eq!(to_percent(1.0), 100);
        assert_eq!(to_percent(0.505), 50);
    }
}
