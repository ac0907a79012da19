//! Bishop movement pattern.

use crate::game_state::chess_types::Square;
use crate::game_state::game_state::Position;
use crate::moves::rays::trace_rays;

pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Squares a bishop on `from` attacks, including the first blocker on each
/// diagonal.
pub fn bishop_attacks(position: &Position, from: Square) -> Vec<Square> {
    let mut out = Vec::with_capacity(13);
    trace_rays(position, from, &BISHOP_DIRECTIONS, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::bishop_attacks;
    use crate::game_state::game_state::Position;
    use crate::utils::algebraic::algebraic_to_square;

    #[test]
    fn bishop_on_open_board_sees_thirteen_squares() {
        let position = Position::from_fen("4k3/8/8/8/3B4/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let d4 = algebraic_to_square("d4").expect("d4 should parse");
        assert_eq!(bishop_attacks(&position, d4).len(), 13);
    }

    #[test]
    fn bishop_ray_stops_on_blocker() {
        let position =
            Position::from_fen("4k3/8/8/4p3/3B4/2P5/8/4K3 w - - 0 1").expect("FEN should parse");
        let d4 = algebraic_to_square("d4").expect("d4 should parse");
        let attacks = bishop_attacks(&position, d4);
        let e5 = algebraic_to_square("e5").expect("e5 should parse");
        let f6 = algebraic_to_square("f6").expect("f6 should parse");
        let c3 = algebraic_to_square("c3").expect("c3 should parse");
        assert!(attacks.contains(&e5));
        assert!(!attacks.contains(&f6));
        // Own-piece blockers are still attacked (defended).
        assert!(attacks.contains(&c3));
    }
}
