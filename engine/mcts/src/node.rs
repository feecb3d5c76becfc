//! MCTS tree node representation.
//!
//! Each node represents a position reached by playing a move from the parent.
//! Nodes store win/visit statistics used for UCB selection and the final
//! decision.

use engine_core::Board;
use parking_lot::Mutex;

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// Win/visit pair accumulated by backpropagation.
///
/// `wins` is relative to the player to move at the root of the search.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NodeStats {
    /// Sum of rollout rewards that passed through this node, each in [0, 1]
    pub wins: f64,
    /// Number of rewards that passed through this node
    pub visits: u32,
}

impl NodeStats {
    /// Mean reward. Returns 0.0 if never visited.
    #[inline]
    pub fn win_probability(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.wins / self.visits as f64
        }
    }

    #[inline]
    fn record(&mut self, reward: f64) {
        self.wins += reward;
        self.visits += 1;
    }
}

/// A node in the MCTS tree.
///
/// The owning path is parent -> `children`; `parent` is only a back-index
/// used to walk up during backpropagation.
#[derive(Debug)]
pub struct MctsNode<B: Board> {
    /// Parent node index (NONE for root)
    pub parent: NodeId,

    /// Move that led to this node from parent (None for root)
    pub mv: Option<B::Move>,

    /// Children, populated once at expansion
    pub children: Vec<NodeId>,

    /// Position at this node. Released once the node is expanded.
    board: Option<B>,

    /// Written concurrently by rollout tasks; one lock per node so the pair
    /// is never observed half-updated.
    stats: Mutex<NodeStats>,
}

impl<B: Board> MctsNode<B> {
    /// Create a new root node.
    pub fn new_root(board: B) -> Self {
        Self {
            parent: NodeId::NONE,
            mv: None,
            children: Vec::new(),
            board: Some(board),
            stats: Mutex::new(NodeStats::default()),
        }
    }

    /// Create a new child node holding the position after `mv`.
    pub fn new_child(parent: NodeId, mv: B::Move, board: B) -> Self {
        Self {
            parent,
            mv: Some(mv),
            children: Vec::new(),
            board: Some(board),
            stats: Mutex::new(NodeStats::default()),
        }
    }

    /// Position at this node, if it has not been expanded yet.
    #[inline]
    pub fn board(&self) -> Option<&B> {
        self.board.as_ref()
    }

    /// Release the position. Interior nodes never need it again.
    pub(crate) fn take_board(&mut self) -> Option<B> {
        self.board.take()
    }

    /// Snapshot of the statistics.
    #[inline]
    pub fn stats(&self) -> NodeStats {
        *self.stats.lock()
    }

    /// Add one visit carrying `reward`.
    #[inline]
    pub fn record(&self, reward: f64) {
        self.stats.lock().record(reward);
    }

    #[inline]
    pub fn visits(&self) -> u32 {
        self.stats().visits
    }

    #[inline]
    pub fn win_probability(&self) -> f64 {
        self.stats().win_probability()
    }

    /// UCB1 score for child selection.
    ///
    /// `UCB = p + c * sqrt(2 * ln(N_parent) / N)`, where `p` is the win
    /// probability when the ply being chosen belongs to the root player and
    /// `1 - p` when it belongs to the opponent.
    ///
    /// Takes pre-computed ln(parent_visits) to avoid recomputing it for
    /// every sibling. Unvisited nodes score +inf.
    #[inline]
    pub fn ucb_score(&self, parent_visits_ln: f64, exploration: f64, root_to_move: bool) -> f64 {
        let stats = self.stats();
        if stats.visits == 0 {
            return f64::INFINITY;
        }
        let p = stats.win_probability();
        let exploit = if root_to_move { p } else { 1.0 - p };
        exploit + exploration * (2.0 * parent_visits_ln / stats.visits as f64).sqrt()
    }

    /// Check if this node has been expanded (has children).
    #[inline]
    pub fn is_expanded(&self) -> bool {
        !self.children.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use games_tictactoe::TicTacToe;

    fn root() -> MctsNode<TicTacToe> {
        MctsNode::new_root(TicTacToe::new())
    }

    #[test]
    fn test_node_id_none() {
        assert!(NodeId::NONE.is_none());
        assert!(!NodeId::NONE.is_some());
        assert!(!NodeId(0).is_none());
        assert!(NodeId(0).is_some());
    }

    #[test]
    fn test_new_root() {
        let node = root();

        assert!(node.parent.is_none());
        assert!(node.mv.is_none());
        assert!(node.board().is_some());
        assert!(!node.is_expanded());
        assert_eq!(node.stats(), NodeStats::default());
    }

    #[test]
    fn test_record_and_win_probability() {
        let node = root();
        assert_eq!(node.win_probability(), 0.0);

        node.record(1.0);
        node.record(0.0);
        node.record(0.5);
        node.record(1.0);

        let stats = node.stats();
        assert_eq!(stats.visits, 4);
        assert!((stats.wins - 2.5).abs() < 1e-12);
        assert!((node.win_probability() - 0.625).abs() < 1e-12);
    }

    #[test]
    fn test_ucb_score_flips_perspective() {
        let node = root();
        for _ in 0..3 {
            node.record(1.0);
        }
        node.record(0.0);
        // p = 0.75, N = 4, N_parent = 16
        let ln = (16.0f64).ln();
        let explore = (2.0 * ln / 4.0).sqrt();

        let for_root = node.ucb_score(ln, 1.0, true);
        let for_opponent = node.ucb_score(ln, 1.0, false);
        assert!((for_root - (0.75 + explore)).abs() < 1e-12);
        assert!((for_opponent - (0.25 + explore)).abs() < 1e-12);

        // Exploration constant scales only the bonus
        let greedy = node.ucb_score(ln, 0.0, true);
        assert!((greedy - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_unvisited_node_scores_infinite() {
        let node = root();
        assert_eq!(node.ucb_score(1.0, 1.0, true), f64::INFINITY);
    }

    #[test]
    fn test_take_board_releases_snapshot() {
        let mut node = root();
        assert!(node.take_board().is_some());
        assert!(node.board().is_none());
        assert!(node.take_board().is_none());
    }
}
