//! Kestrel selects chess moves with Monte Carlo Tree Search.
//!
//! The search core grows a tree of position snapshots, estimates each
//! candidate move by uniformly random playouts, and balances exploration
//! against exploitation with UCB1. Move legality, move application and
//! endgame detection are delegated to an external rules engine
//! ([`shakmaty`]); this crate never reimplements chess rules.
//!
//! The one operation exposed to callers is [`mcts::select_move`] (or
//! [`mcts::mcts_search`] for statistics and tree access). Positions cross
//! the crate boundary as canonical FEN text via [`rules::position_from_fen`]
//! and [`rules::position_to_fen`].

pub mod error;
pub mod mcts;
pub mod rules;

pub use error::EngineError;
pub use mcts::{mcts_search, select_move, MctsConfig, SearchOutcome, SearchStats};
