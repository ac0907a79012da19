//! Canonical chess-rule constants.
//!
//! Stores the standard starting arrangement and the fixed search depths tied
//! to each difficulty level.

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

pub const EASY_SEARCH_DEPTH: u8 = 2;
pub const MEDIUM_SEARCH_DEPTH: u8 = 3;
pub const HARD_SEARCH_DEPTH: u8 = 4;
