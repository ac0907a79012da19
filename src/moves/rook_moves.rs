//! Rook movement pattern.

use crate::game_state::chess_types::Square;
use crate::game_state::game_state::Position;
use crate::moves::rays::trace_rays;

pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Squares a rook on `from` attacks, including the first blocker on each
/// file or rank direction.
pub fn rook_attacks(position: &Position, from: Square) -> Vec<Square> {
    let mut out = Vec::with_capacity(14);
    trace_rays(position, from, &ROOK_DIRECTIONS, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::rook_attacks;
    use crate::game_state::game_state::Position;
    use crate::utils::algebraic::algebraic_to_square;

    #[test]
    fn rook_on_open_board_sees_fourteen_squares() {
        let position = Position::from_fen("7k/8/8/8/3R4/8/8/K7 w - - 0 1").expect("FEN should parse");
        let d4 = algebraic_to_square("d4").expect("d4 should parse");
        assert_eq!(rook_attacks(&position, d4).len(), 14);
    }
}
