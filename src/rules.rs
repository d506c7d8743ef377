//! Boundary glue to the external chess rules engine (`shakmaty`).
//!
//! The rules engine is the single correctness authority for move legality
//! and endgame detection; nothing in this crate reimplements chess rules.
//! This module is the only place that talks to it directly, so the search
//! core stays insulated from the collaborator's API surface:
//!
//! - position codec: FEN text in and out of the engine untouched
//! - legal-move enumeration and move application
//! - terminal detection and winner reporting
//!
//! `shakmaty` reports checkmate, stalemate and insufficient material on its
//! own. The seventy-five-move rule is applied here on top of it, from the
//! halfmove clock the position snapshot already carries. Repetition draws
//! need game history that a single snapshot does not contain, so a freshly
//! decoded position can never be repetition-terminal.

use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, Move, Outcome, Position};

use crate::error::EngineError;

/// Halfmove-clock value at which the seventy-five-move rule forces a draw.
pub const DRAW_CLOCK_HALFMOVES: u32 = 150;

/// Decodes a position from canonical FEN text.
///
/// Fails with [`EngineError::MalformedPosition`] if the rules engine cannot
/// parse or validate the input.
pub fn position_from_fen(fen: &str) -> Result<Chess, EngineError> {
    let setup: Fen = fen
        .parse()
        .map_err(|e| EngineError::MalformedPosition(format!("{}: {}", e, fen)))?;
    setup
        .into_position(CastlingMode::Standard)
        .map_err(|e| EngineError::MalformedPosition(format!("{}: {}", e, fen)))
}

/// Encodes a position back to canonical FEN text.
pub fn position_to_fen(position: &Chess) -> String {
    Fen::from_position(position.clone(), EnPassantMode::Legal).to_string()
}

/// All legal moves in `position`, in the rules engine's enumeration order.
///
/// Non-empty unless the position is checkmate or stalemate.
pub fn legal_moves(position: &Chess) -> Vec<Move> {
    position.legal_moves().into_iter().collect()
}

/// Applies a legal move, producing the successor position.
///
/// The move must come from [`legal_moves`] for this exact position.
pub fn apply_move(position: &Chess, m: &Move) -> Chess {
    let mut next = position.clone();
    next.play_unchecked(m);
    next
}

/// Whether the game is over in `position` under any terminal condition:
/// checkmate, stalemate, insufficient material, or the seventy-five-move
/// rule.
pub fn is_game_over(position: &Chess) -> bool {
    position.is_game_over() || position.halfmoves() >= DRAW_CLOCK_HALFMOVES
}

/// The game result for a terminal position, `None` if the game is still on.
pub fn terminal_outcome(position: &Chess) -> Option<Outcome> {
    position.outcome().or_else(|| {
        if position.halfmoves() >= DRAW_CLOCK_HALFMOVES {
            Some(Outcome::Draw)
        } else {
            None
        }
    })
}

/// The winning side of a terminal position, `None` for any draw.
pub fn winner(position: &Chess) -> Option<Color> {
    match terminal_outcome(position) {
        Some(Outcome::Decisive { winner }) => Some(winner),
        _ => None,
    }
}
