//! Monte Carlo Tree Search over chess positions.
//!
//! The driver runs the classic select/expand/simulate/backpropagate loop
//! for a fixed iteration budget, then reads the move off the most
//! promising immediate child of the root. Legality and endgame detection
//! are delegated entirely to the rules engine behind [`crate::rules`].
//!
//! The loop is strictly single-threaded: each iteration runs to completion
//! before the next begins, and the only shared state is the one tree being
//! grown.

pub mod node;
pub mod search_logger;
pub mod simulation;

use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shakmaty::{CastlingMode, Chess, Move};

use crate::error::EngineError;
use crate::rules;

pub use self::node::{Node, NodeId, SearchTree, ROOT};
pub use self::search_logger::{SearchLogger, Verbosity};
pub use self::simulation::{simulate_random_playout, RolloutOutcome};

/// Standard exploration constant for UCB1 child selection during search.
/// The final move decision always uses zero (pure exploitation).
pub const EXPLORATION_CONSTANT: f64 = 0.1;

/// Configuration for one MCTS invocation.
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// Number of select/simulate/backpropagate iterations. Must be at
    /// least 1.
    pub iterations: u32,
    /// Exploration constant used while descending the tree.
    pub exploration_constant: f64,
    /// Seed for the rollout RNG; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Search narration; `None` is silent.
    pub logger: Option<Arc<SearchLogger>>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        MctsConfig {
            iterations: 1000,
            exploration_constant: EXPLORATION_CONSTANT,
            seed: None,
            logger: None,
        }
    }
}

/// Statistics collected during one search.
#[derive(Debug, Default, Clone)]
pub struct SearchStats {
    /// Iterations actually run (always the configured budget).
    pub iterations: u32,
    /// Nodes materialized via expansion, root excluded.
    pub nodes_expanded: u32,
    /// Rollouts the engine side won.
    pub wins: u32,
    /// Rollouts that ended in any draw.
    pub draws: u32,
    /// Rollouts the engine side lost.
    pub losses: u32,
    /// Wall-clock time of the whole search.
    pub search_time: Duration,
}

/// Outcome of a completed search: the chosen move, the statistics, and
/// the fully grown tree for diagnostics.
#[derive(Debug)]
pub struct SearchOutcome {
    pub best_move: Move,
    pub stats: SearchStats,
    pub tree: SearchTree,
}

/// Selects a move for the side to move in `position` using the default
/// configuration with the given iteration budget.
///
/// Fails with [`EngineError::GameAlreadyOver`] if the position is already
/// terminal and [`EngineError::InvalidIterationBudget`] if `iterations`
/// is zero; in both cases no search is performed.
pub fn select_move(position: Chess, iterations: u32) -> Result<Move, EngineError> {
    let config = MctsConfig {
        iterations,
        ..Default::default()
    };
    mcts_search(position, &config).map(|outcome| outcome.best_move)
}

/// Runs a full MCTS and returns the chosen move together with the search
/// statistics and the grown tree.
pub fn mcts_search(position: Chess, config: &MctsConfig) -> Result<SearchOutcome, EngineError> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    mcts_search_with_rng(position, config, &mut rng)
}

/// Identical to [`mcts_search`] but drives all rollouts from a
/// caller-owned randomness source, for reproducible searches.
pub fn mcts_search_with_rng<R: Rng>(
    position: Chess,
    config: &MctsConfig,
    rng: &mut R,
) -> Result<SearchOutcome, EngineError> {
    if config.iterations == 0 {
        return Err(EngineError::InvalidIterationBudget(config.iterations));
    }
    if rules::is_game_over(&position) {
        return Err(EngineError::GameAlreadyOver);
    }

    let start_time = Instant::now();
    let logger = config.logger.as_deref();
    if let Some(log) = logger {
        log.log_search_start(&rules::position_to_fen(&position), config.iterations);
    }

    let mut tree = SearchTree::new(position);
    let mut stats = SearchStats::default();

    for iteration in 0..config.iterations {
        let before = tree.len();
        let target = select_leaf(&mut tree, ROOT, config.exploration_constant);
        stats.nodes_expanded += (tree.len() - before) as u32;

        let outcome =
            simulate_random_playout(&tree.get(target).position, tree.engine_side, rng);
        match outcome {
            RolloutOutcome::Win => stats.wins += 1,
            RolloutOutcome::Loss => stats.losses += 1,
            RolloutOutcome::Draw => stats.draws += 1,
        }
        if let Some(log) = logger {
            log.log_iteration(iteration + 1, &format!("{:?}", outcome));
        }

        backpropagate(&mut tree, target, outcome);
    }

    stats.iterations = config.iterations;
    stats.search_time = start_time.elapsed();

    let best = tree.best_child(ROOT, 0.0);
    let best_move = tree
        .get(best)
        .incoming_move
        .clone()
        .expect("a non-root node always has an incoming move");

    if let Some(log) = logger {
        for &child in &tree.root().children {
            let n = tree.get(child);
            if let Some(m) = &n.incoming_move {
                log.log_root_child(
                    &m.to_uci(CastlingMode::Standard).to_string(),
                    n.visits,
                    n.wins,
                    n.losses,
                );
            }
        }
        log.log_best_move(
            &best_move.to_uci(CastlingMode::Standard).to_string(),
            tree.root().visits,
        );
    }

    Ok(SearchOutcome {
        best_move,
        stats,
        tree,
    })
}

/// Descends from `from` to the node the next rollout starts at: the first
/// node on the UCB1-best path that still has untried moves is expanded and
/// its new child returned; a terminal node on the path is its own rollout
/// target, its result already being decided by the rules engine.
fn select_leaf(tree: &mut SearchTree, from: NodeId, exploration_constant: f64) -> NodeId {
    let mut current = from;
    loop {
        if tree.get(current).terminal {
            return current;
        }
        if !tree.get(current).is_fully_expanded() {
            return tree.expand(current);
        }
        current = tree.best_child(current, exploration_constant);
    }
}

/// Walks from `from` up to the root inclusive, crediting the rollout to
/// every node on the path exactly once. Draws bump only the visit count.
fn backpropagate(tree: &mut SearchTree, from: NodeId, outcome: RolloutOutcome) {
    let mut current = Some(from);
    while let Some(id) = current {
        let node = tree.get_mut(id);
        node.visits += 1;
        match outcome {
            RolloutOutcome::Win => node.wins += 1,
            RolloutOutcome::Loss => node.losses += 1,
            RolloutOutcome::Draw => {}
        }
        current = node.parent;
    }
}
