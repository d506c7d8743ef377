//! Random rollout from a position to a terminal outcome.
//!
//! Rollout state is ephemeral: moves are played on throwaway position
//! clones, never materialized as tree nodes, and only the final outcome
//! survives. The randomness source is injected by the caller so tests can
//! fix the seed.

use rand::seq::SliceRandom;
use rand::Rng;
use shakmaty::{Chess, Color};

use crate::rules;

/// Terminal outcome of one rollout, from the engine side's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RolloutOutcome {
    /// The engine side won the playout.
    Win,
    /// The opponent won the playout.
    Loss,
    /// Any draw condition.
    Draw,
}

impl RolloutOutcome {
    /// Maps the rules engine's reported winner onto the engine side.
    pub fn from_winner(winner: Option<Color>, engine_side: Color) -> Self {
        match winner {
            Some(side) if side == engine_side => RolloutOutcome::Win,
            Some(_) => RolloutOutcome::Loss,
            None => RolloutOutcome::Draw,
        }
    }
}

/// Plays uniformly random legal moves from `position` until the rules
/// engine reports the game over, then maps the result relative to
/// `engine_side`.
///
/// Called on an already-terminal position this plays no moves at all and
/// reports the position's own result. Termination is guaranteed by the
/// rules engine's move-count draw: the halfmove clock only resets finitely
/// often, so every playout is finite.
pub fn simulate_random_playout<R: Rng>(
    position: &Chess,
    engine_side: Color,
    rng: &mut R,
) -> RolloutOutcome {
    let mut current = position.clone();
    while !rules::is_game_over(&current) {
        let moves = rules::legal_moves(&current);
        let m = moves
            .choose(rng)
            .expect("a non-terminal position has at least one legal move");
        current = rules::apply_move(&current, m);
    }
    RolloutOutcome::from_winner(rules::winner(&current), engine_side)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    // White is checkmated and Black is the winner.
    const FOOLS_MATE: &str =
        "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 0 3";

    #[test]
    fn terminal_position_reports_its_own_result() {
        let pos = rules::position_from_fen(FOOLS_MATE).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            simulate_random_playout(&pos, Color::Black, &mut rng),
            RolloutOutcome::Win
        );
        assert_eq!(
            simulate_random_playout(&pos, Color::White, &mut rng),
            RolloutOutcome::Loss
        );
    }

    #[test]
    fn playout_from_bare_kings_is_a_draw() {
        let pos = rules::position_from_fen("k7/8/8/8/8/8/8/K7 w - - 0 1").unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            simulate_random_playout(&pos, Color::White, &mut rng),
            RolloutOutcome::Draw
        );
    }

    #[test]
    fn playout_terminates_from_a_live_position() {
        // King and rook versus king: random play must still reach some
        // terminal state in finite time.
        let pos = rules::position_from_fen("6k1/8/6K1/8/8/8/8/7R w - - 0 1").unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        let _ = simulate_random_playout(&pos, Color::White, &mut rng);
    }

    #[test]
    fn outcome_mapping_is_relative_to_the_engine_side() {
        assert_eq!(
            RolloutOutcome::from_winner(Some(Color::White), Color::White),
            RolloutOutcome::Win
        );
        assert_eq!(
            RolloutOutcome::from_winner(Some(Color::White), Color::Black),
            RolloutOutcome::Loss
        );
        assert_eq!(
            RolloutOutcome::from_winner(None, Color::White),
            RolloutOutcome::Draw
        );
    }
}
