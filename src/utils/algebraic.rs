//! Conversions between board squares and coordinate text (for example `e4`).
//!
//! Used for display, FEN en-passant fields and the terminal driver's
//! coordinate input.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::Square;

/// Convert coordinate text (for example: "e4") to a square.
pub fn algebraic_to_square(square: &str) -> ChessResult<Square> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessError::InvalidSquare(square.to_owned()));
    }

    let file = bytes[0].to_ascii_lowercase();
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(ChessError::InvalidSquare(square.to_owned()));
    }

    // Rank 8 is row 0.
    Ok(Square::new(b'8' - rank, file - b'a'))
}

/// Convert a square to coordinate text (for example: "e4").
#[inline]
pub fn square_to_algebraic(square: Square) -> String {
    square.to_string()
}
