//! Shared test utilities for the Kestrel test suite.

use kestrel::rules;
use shakmaty::Chess;

/// Decode a FEN fixture, panicking on malformed input.
pub fn pos(fen: &str) -> Chess {
    rules::position_from_fen(fen).expect("test fixture FEN must be valid")
}

/// Standard test positions with known properties.
pub mod positions {
    /// Initial position, 20 legal moves.
    pub const STARTING: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
    /// Fool's mate: White is checkmated, Black has won.
    pub const FOOLS_MATE: &str =
        "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 0 3";
    /// Black is stalemated.
    pub const STALEMATE: &str = "k7/1R6/K7/8/8/8/8/8 b - - 0 1";
    /// White to move mates with Re8#.
    pub const MATE_IN_1_WHITE: &str = "6k1/5ppp/8/8/8/8/8/4R1K1 w - - 0 1";
    /// White is in check and Kxb2 is the only legal move; the capture
    /// leaves bare kings, so the game is then drawn.
    pub const ONE_LEGAL_MOVE: &str = "k7/8/8/8/8/8/1q6/K7 w - - 0 1";
    /// King and rook versus king, not yet terminal.
    pub const KRK_ENDGAME: &str = "6k1/8/6K1/8/8/8/8/7R w - - 0 1";
}
