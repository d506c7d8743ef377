//! Command line front end for the Kestrel search engine.
//!
//! Accepts a position as FEN and an iteration budget, runs one search,
//! and prints the chosen move followed by the position after that move.
//! This is the same request/response shape the engine is meant to sit
//! behind.
//!
//! Usage: kestrel --fen "<FEN>" [--iterations <n>] [--seed <n>] [--verbosity <level>]

use std::env;
use std::process;
use std::sync::Arc;

use shakmaty::CastlingMode;

use kestrel::mcts::{mcts_search, MctsConfig, SearchLogger, Verbosity};
use kestrel::rules;

const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

fn main() {
    let args: Vec<String> = env::args().collect();
    let fen = parse_arg(&args, "--fen").unwrap_or_else(|| STARTING_FEN.to_string());
    let iterations = parse_arg_u32(&args, "--iterations").unwrap_or(1000);
    let seed = parse_arg_u64(&args, "--seed");
    let verbosity = match parse_arg(&args, "--verbosity").as_deref() {
        None | Some("normal") => Verbosity::Normal,
        Some("silent") => Verbosity::Silent,
        Some("minimal") => Verbosity::Minimal,
        Some("debug") => Verbosity::Debug,
        Some(other) => {
            eprintln!("unknown verbosity level: {}", other);
            process::exit(2);
        }
    };

    let position = match rules::position_from_fen(&fen) {
        Ok(position) => position,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    let config = MctsConfig {
        iterations,
        seed,
        logger: Some(Arc::new(SearchLogger::new(verbosity))),
        ..Default::default()
    };

    match mcts_search(position.clone(), &config) {
        Ok(outcome) => {
            let next = rules::apply_move(&position, &outcome.best_move);
            println!("move: {}", outcome.best_move.to_uci(CastlingMode::Standard));
            println!("position: {}", rules::position_to_fen(&next));
            println!(
                "stats: {} iterations, {} nodes, +{} ={} -{} in {:?}",
                outcome.stats.iterations,
                outcome.stats.nodes_expanded,
                outcome.stats.wins,
                outcome.stats.draws,
                outcome.stats.losses,
                outcome.stats.search_time,
            );
        }
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    }
}

fn parse_arg(args: &[String], name: &str) -> Option<String> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn parse_arg_u32(args: &[String], name: &str) -> Option<u32> {
    parse_arg(args, name).and_then(|v| v.parse().ok())
}

fn parse_arg_u64(args: &[String], name: &str) -> Option<u64> {
    parse_arg(args, name).and_then(|v| v.parse().ok())
}
