//! MCTS tree structure with arena allocation.
//!
//! The tree uses arena allocation for efficient node storage and
//! cache-friendly traversal. Nodes are stored in a contiguous Vec
//! and referenced by NodeId indices.
//!
//! Structure (the arena and every `children` list) only changes during
//! expansion, which takes `&mut self`. Backpropagation takes `&self` and
//! writes through each node's stats lock, so rollout tasks can share the
//! tree while they run.

use engine_core::Board;

use crate::node::{MctsNode, NodeId};

/// MCTS tree with arena-based node storage.
#[derive(Debug)]
pub struct MctsTree<B: Board> {
    /// Arena storing all nodes
    nodes: Vec<MctsNode<B>>,

    /// Root node index (always 0 after initialization)
    root: NodeId,
}

impl<B: Board> MctsTree<B> {
    /// Create a new tree rooted at `board`.
    pub fn new(board: B) -> Self {
        Self {
            nodes: vec![MctsNode::new_root(board)],
            root: NodeId(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &MctsNode<B> {
        &self.nodes[id.0 as usize]
    }

    #[inline]
    fn get_mut(&mut self, id: NodeId) -> &mut MctsNode<B> {
        &mut self.nodes[id.0 as usize]
    }

    fn allocate(&mut self, node: MctsNode<B>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (never true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Select the child of `node_id` with the highest UCB score.
    ///
    /// `root_to_move` tells whether the ply being chosen belongs to the root
    /// player. Ties keep the first maximum in child order.
    pub fn select_child(
        &self,
        node_id: NodeId,
        exploration: f64,
        root_to_move: bool,
    ) -> Option<NodeId> {
        let node = self.get(node_id);
        // Pre-compute ln once instead of per-child comparison
        let parent_visits_ln = (node.visits() as f64).ln();

        let mut best: Option<(NodeId, f64)> = None;
        for &child_id in &node.children {
            let score = self
                .get(child_id)
                .ucb_score(parent_visits_ln, exploration, root_to_move);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((child_id, score)),
            }
        }
        best.map(|(id, _)| id)
    }

    /// Descend from the root to a node without children.
    ///
    /// The perspective flips at every ply, since adjacent plies belong to
    /// opposing players. Returns the leaf and its depth.
    pub fn select_leaf(&self, exploration: f64) -> (NodeId, u32) {
        let mut current = self.root;
        let mut root_to_move = true;
        let mut depth = 0;

        while let Some(child) = self.select_child(current, exploration, root_to_move) {
            current = child;
            root_to_move = !root_to_move;
            depth += 1;
        }

        (current, depth)
    }

    /// Expand a leaf: one child per move in `legal_moves_for_search()`.
    ///
    /// Each child holds a copy of the leaf position with the move applied
    /// and the turn switched. The leaf's own position is released.
    ///
    /// # Panics
    ///
    /// If the leaf was already expanded, or its position is ongoing but
    /// offers no moves. Both are contract violations by the caller or the
    /// `Board` implementation.
    pub fn expand(&mut self, node_id: NodeId) -> Vec<NodeId> {
        let board = match self.get_mut(node_id).take_board() {
            Some(board) => board,
            None => panic!("MCTS node {} expanded twice", node_id.0),
        };

        let moves = board.legal_moves_for_search();
        assert!(
            !moves.is_empty(),
            "Board contract violation: position at node {} reports status {:?} but has no moves for search",
            node_id.0,
            board.game_status()
        );

        let first = self.nodes.len() as u32;
        for mv in moves {
            let mut child_board = board.clone();
            child_board.apply_move_unchecked(mv);
            child_board.switch_player();
            self.allocate(MctsNode::new_child(node_id, mv, child_board));
        }
        let children: Vec<NodeId> = (first..self.nodes.len() as u32).map(NodeId).collect();

        self.get_mut(node_id).children = children.clone();
        children
    }

    /// Add `reward` and one visit to `leaf_id` and every ancestor up to the root.
    pub fn backpropagate(&self, leaf_id: NodeId, reward: f64) {
        let mut current_id = leaf_id;

        while current_id.is_some() {
            let node = self.get(current_id);
            node.record(reward);
            current_id = node.parent;
        }
    }

    /// Child of `node_id` with the highest win probability.
    ///
    /// Used for the final decision, which favours exploitation: UCB is not
    /// involved. Ties keep the first maximum.
    pub fn best_child(&self, node_id: NodeId) -> Option<NodeId> {
        let mut best: Option<(NodeId, f64)> = None;
        for &child_id in &self.get(node_id).children {
            let p = self.get(child_id).win_probability();
            match best {
                Some((_, best_p)) if p <= best_p => {}
                _ => best = Some((child_id, p)),
            }
        }
        best.map(|(id, _)| id)
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root).stats();
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: root.visits,
            root_win_probability: root.win_probability(),
            max_depth: self.compute_max_depth(self.root, 0),
        }
    }

    fn compute_max_depth(&self, node_id: NodeId, current_depth: u32) -> u32 {
        let node = self.get(node_id);
        if node.children.is_empty() {
            return current_depth;
        }

        node.children
            .iter()
            .map(|id| self.compute_max_depth(*id, current_depth + 1))
            .max()
            .unwrap_or(current_depth)
    }
}

/// Statistics about an MCTS tree.
#[derive(Debug, Clone)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub root_win_probability: f64,
    pub max_depth: u32,
}
