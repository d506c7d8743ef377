//! Behavioural tests for the full search pipeline.

mod common;

use std::sync::Arc;

use common::{pos, positions};
use kestrel::mcts::{mcts_search, select_move, MctsConfig, SearchLogger, Verbosity};
use kestrel::rules;
use kestrel::EngineError;
use pretty_assertions::assert_eq;
use shakmaty::CastlingMode;

#[test]
fn search_finds_mate_in_one_with_high_probability() {
    // Stochastic property: over independent seeded searches the winning
    // move must dominate. A rollout from the mating child always reports
    // a win, so its win rate is exactly 1.0 and pure exploitation at the
    // end should pick it nearly every time.
    let mut hits = 0;
    for seed in 0..10 {
        let config = MctsConfig {
            iterations: 300,
            seed: Some(seed),
            ..Default::default()
        };
        let outcome = mcts_search(pos(positions::MATE_IN_1_WHITE), &config).unwrap();
        if outcome.best_move.to_uci(CastlingMode::Standard).to_string() == "e1e8" {
            hits += 1;
        }
    }
    assert!(hits >= 8, "mate found in only {}/10 searches", hits);
}

#[test]
fn root_visit_count_equals_the_iteration_budget() {
    for iterations in [1, 10, 100] {
        let config = MctsConfig {
            iterations,
            seed: Some(3),
            ..Default::default()
        };
        let outcome = mcts_search(pos(positions::STARTING), &config).unwrap();
        assert_eq!(outcome.tree.root().visits, iterations);
        assert_eq!(outcome.stats.iterations, iterations);
    }
}

#[test]
fn a_fixed_seed_makes_the_search_reproducible() {
    let config = MctsConfig {
        iterations: 120,
        seed: Some(42),
        ..Default::default()
    };
    let first = mcts_search(pos(positions::KRK_ENDGAME), &config).unwrap();
    let second = mcts_search(pos(positions::KRK_ENDGAME), &config).unwrap();

    assert_eq!(first.best_move, second.best_move);
    assert_eq!(first.stats.wins, second.stats.wins);
    assert_eq!(first.stats.draws, second.stats.draws);
    assert_eq!(first.stats.losses, second.stats.losses);
    assert_eq!(first.stats.nodes_expanded, second.stats.nodes_expanded);
}

#[test]
fn stalemate_root_is_reported_as_game_over() {
    assert_eq!(
        select_move(pos(positions::STALEMATE), 100),
        Err(EngineError::GameAlreadyOver)
    );
}

#[test]
fn chosen_move_is_always_legal_in_the_root_position() {
    let config = MctsConfig {
        iterations: 40,
        seed: Some(5),
        ..Default::default()
    };
    let root = pos(positions::KRK_ENDGAME);
    let outcome = mcts_search(root.clone(), &config).unwrap();
    assert!(rules::legal_moves(&root).contains(&outcome.best_move));
}

#[test]
fn positions_round_trip_through_the_boundary_codec() {
    // The transport shape: FEN in, search, apply, FEN out.
    let root = pos(positions::STARTING);
    let best = select_move(root.clone(), 50).unwrap();
    let next = rules::apply_move(&root, &best);
    let fen = rules::position_to_fen(&next);

    let decoded = rules::position_from_fen(&fen).unwrap();
    assert_eq!(rules::position_to_fen(&decoded), fen);
    assert_ne!(fen, rules::position_to_fen(&root));
}

#[test]
fn logger_reports_the_final_decision() {
    let logger = Arc::new(SearchLogger::buffered(Verbosity::Minimal));
    let config = MctsConfig {
        iterations: 30,
        seed: Some(9),
        logger: Some(logger.clone()),
        ..Default::default()
    };
    let outcome = mcts_search(pos(positions::KRK_ENDGAME), &config).unwrap();

    let expected = outcome.best_move.to_uci(CastlingMode::Standard).to_string();
    assert!(logger.contents().contains(&expected));
}

#[test]
fn search_from_a_drawish_endgame_terminates() {
    // Rollouts are bounded by the rules engine's move-count draw; this
    // exercises that bound on a position where mates are rare.
    let root = pos("8/8/4k3/7r/8/8/7R/4K3 w - - 40 60");
    let m = select_move(root.clone(), 60).unwrap();
    assert!(rules::legal_moves(&root).contains(&m));
}
