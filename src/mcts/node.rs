//! The node data model and arena-backed tree for Monte Carlo Tree Search.
//!
//! Nodes live in a single owning vector and refer to each other by index,
//! so parent back-references carry no ownership and the whole tree is
//! dropped in one piece when the search returns. One tree serves exactly
//! one search invocation.

use shakmaty::{Chess, Color, Move, Position};

use crate::rules;

/// Index of a node in the tree's arena.
pub type NodeId = usize;

/// Arena index of the root; the root is always inserted first.
pub const ROOT: NodeId = 0;

/// A node in the Monte Carlo search tree.
///
/// `position`, `parent` and `incoming_move` are fixed at construction;
/// only the counters, `children` and `untried_moves` mutate afterwards.
#[derive(Debug, Clone)]
pub struct Node {
    /// The position snapshot at this node. The side to move is implied by
    /// the position itself, not by tree depth.
    pub position: Chess,
    /// Back-reference to the owning node; `None` for the root. Used only
    /// to walk upward during backpropagation.
    pub parent: Option<NodeId>,
    /// The move that produced this node from its parent; `None` for the
    /// root. This is what the caller ultimately receives.
    pub incoming_move: Option<Move>,
    /// Materialized children, one per already-tried legal move.
    pub children: Vec<NodeId>,
    /// Number of rollouts that passed through this node.
    pub visits: u32,
    /// Rollouts through this node that the engine side won.
    pub wins: u32,
    /// Rollouts through this node that the engine side lost.
    pub losses: u32,
    /// Legal moves not yet materialized as children, consumed from the
    /// back one at a time.
    pub untried_moves: Vec<Move>,
    /// Cached terminal status from the rules engine.
    pub terminal: bool,
}

impl Node {
    fn new(position: Chess, parent: Option<NodeId>, incoming_move: Option<Move>) -> Self {
        let terminal = rules::is_game_over(&position);
        let untried_moves = if terminal {
            Vec::new()
        } else {
            rules::legal_moves(&position)
        };
        Node {
            position,
            parent,
            incoming_move,
            children: Vec::new(),
            visits: 0,
            wins: 0,
            losses: 0,
            untried_moves,
            terminal,
        }
    }

    /// Whether every legal move from this node has been tried. Terminal
    /// nodes are trivially fully expanded.
    pub fn is_fully_expanded(&self) -> bool {
        self.untried_moves.is_empty()
    }
}

/// The search tree grown over one `run` call.
#[derive(Debug, Clone)]
pub struct SearchTree {
    /// Node storage; all parent/child links are indices into this vector.
    pub nodes: Vec<Node>,
    /// The side the engine is selecting a move for, fixed at construction
    /// to the side to move in the root position. Win/loss tallies on every
    /// node are counted from this side's perspective.
    pub engine_side: Color,
}

impl SearchTree {
    /// Builds a tree holding only the root node for `position`.
    pub fn new(position: Chess) -> Self {
        let engine_side = position.turn();
        SearchTree {
            nodes: vec![Node::new(position, None, None)],
            engine_side,
        }
    }

    pub fn root(&self) -> &Node {
        &self.nodes[ROOT]
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Materializes one untried move of `id` as a new child and returns
    /// the child's index.
    ///
    /// Calling this on a node with no untried moves is a violation of the
    /// select/expand contract.
    pub fn expand(&mut self, id: NodeId) -> NodeId {
        let m = self.nodes[id]
            .untried_moves
            .pop()
            .expect("expand called on a node with no untried moves");
        let position = rules::apply_move(&self.nodes[id].position, &m);
        let child_id = self.nodes.len();
        self.nodes.push(Node::new(position, Some(id), Some(m)));
        self.nodes[id].children.push(child_id);
        child_id
    }

    /// UCB1 score of a non-root node, from the engine side's perspective:
    /// observed win rate plus an exploration bonus that grows for rarely
    /// visited siblings of a much-visited parent.
    ///
    /// Only defined for visited nodes; a zero-visit node must first be
    /// reached via expansion before it can be scored.
    pub fn uct_score(&self, id: NodeId, exploration_constant: f64) -> f64 {
        let node = &self.nodes[id];
        debug_assert!(node.visits > 0, "uct_score is undefined for an unvisited node");
        let parent = &self.nodes[node
            .parent
            .expect("uct_score is only defined for non-root nodes")];

        let visits = node.visits as f64;
        let exploitation = (node.wins as f64 - node.losses as f64) / visits;
        let exploration =
            exploration_constant * (2.0 * (parent.visits as f64).ln() / visits).sqrt();
        exploitation + exploration
    }

    /// The child of `id` with the maximum UCB1 score; ties go to the
    /// first-encountered child in insertion order. With an exploration
    /// constant of zero this degenerates to the highest observed win rate.
    pub fn best_child(&self, id: NodeId, exploration_constant: f64) -> NodeId {
        let children = &self.nodes[id].children;
        assert!(!children.is_empty(), "best_child called on a node with no children");

        let mut best = children[0];
        let mut best_score = f64::NEG_INFINITY;
        for &child in children {
            let score = self.uct_score(child, exploration_constant);
            if score > best_score {
                best_score = score;
                best = child;
            }
        }
        best
    }
}
