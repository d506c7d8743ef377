//! Narration of search progress at configurable verbosity.
//!
//! The driver never prints directly; it hands lines to a `SearchLogger`
//! whose sink is either the console or an in-memory buffer, so tests can
//! capture exactly what a search reported.

use std::io::{self, Write};
use std::sync::Mutex;

/// Verbosity level for the search logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// No output.
    Silent = 0,
    /// Only the final move decision.
    Minimal = 1,
    /// Search header and root-child summary as well.
    Normal = 2,
    /// Per-iteration rollout outcomes.
    Debug = 3,
}

impl Default for Verbosity {
    fn default() -> Self {
        Verbosity::Normal
    }
}

/// Output destination for log lines.
#[derive(Debug)]
pub enum LogSink {
    /// Write to stdout.
    Console,
    /// Accumulate in a string buffer (for testing).
    Buffer(Mutex<String>),
}

impl LogSink {
    fn writeln(&self, msg: &str) {
        match self {
            LogSink::Console => {
                println!("{}", msg);
                io::stdout().flush().ok();
            }
            LogSink::Buffer(buf) => {
                if let Ok(mut b) = buf.lock() {
                    b.push_str(msg);
                    b.push('\n');
                }
            }
        }
    }
}

/// Logger carried through one search invocation.
#[derive(Debug)]
pub struct SearchLogger {
    verbosity: Verbosity,
    sink: LogSink,
}

impl SearchLogger {
    pub fn new(verbosity: Verbosity) -> Self {
        SearchLogger {
            verbosity,
            sink: LogSink::Console,
        }
    }

    /// A logger that accumulates output in memory instead of printing.
    pub fn buffered(verbosity: Verbosity) -> Self {
        SearchLogger {
            verbosity,
            sink: LogSink::Buffer(Mutex::new(String::new())),
        }
    }

    /// Contents of the buffer sink; empty for a console logger.
    pub fn contents(&self) -> String {
        match &self.sink {
            LogSink::Buffer(buf) => buf.lock().map(|b| b.clone()).unwrap_or_default(),
            LogSink::Console => String::new(),
        }
    }

    fn log(&self, level: Verbosity, msg: &str) {
        if self.verbosity >= level {
            self.sink.writeln(msg);
        }
    }

    pub fn log_search_start(&self, fen: &str, iterations: u32) {
        self.log(
            Verbosity::Normal,
            &format!("search: {} iterations from {}", iterations, fen),
        );
    }

    pub fn log_iteration(&self, iteration: u32, outcome: &str) {
        self.log(
            Verbosity::Debug,
            &format!("  iter {:>5}: rollout {}", iteration, outcome),
        );
    }

    pub fn log_root_child(&self, uci: &str, visits: u32, wins: u32, losses: u32) {
        let rate = if visits > 0 {
            (wins as f64 - losses as f64) / visits as f64
        } else {
            0.0
        };
        self.log(
            Verbosity::Normal,
            &format!("  {:<7} n={:<6} w={:<6} l={:<6} q={:+.3}", uci, visits, wins, losses, rate),
        );
    }

    pub fn log_best_move(&self, uci: &str, visits: u32) {
        self.log(
            Verbosity::Minimal,
            &format!("best move: {} (root visits {})", uci, visits),
        );
    }
}
