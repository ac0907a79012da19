//! Attack detection.
//!
//! Answers "is this square attacked by that colour?" without any legality
//! filtering: an attacker counts even if moving it would expose its own king.
//! Pawns attack their forward diagonals only.

use crate::game_state::chess_types::*;
use crate::game_state::game_state::Position;
use crate::moves::bishop_moves::{bishop_attacks, BISHOP_DIRECTIONS};
use crate::moves::king_moves::king_attacks;
use crate::moves::knight_moves::knight_attacks;
use crate::moves::pawn_moves::pawn_attacks;
use crate::moves::queen_moves::queen_attacks;
use crate::moves::rays::ray_hits;
use crate::moves::rook_moves::{rook_attacks, ROOK_DIRECTIONS};

#[inline]
pub fn is_king_in_check(position: &Position, color: Color) -> bool {
    is_square_attacked(position, position.king_square(color), color.opposite())
}

/// Looks outward from `square` for an attacker of `attacker_color`, one
/// pattern per piece kind.
pub fn is_square_attacked(position: &Position, square: Square, attacker_color: Color) -> bool {
    let holds = |sq: Square, kinds: &[PieceKind]| {
        matches!(
            position.piece_at(sq),
            Some(piece) if piece.color == attacker_color && kinds.contains(&piece.kind)
        )
    };

    // A pawn attacks `square` from the squares a defending pawn would attack.
    if pawn_attacks(attacker_color.opposite(), square).any(|sq| holds(sq, &[PieceKind::Pawn])) {
        return true;
    }

    if knight_attacks(square).any(|sq| holds(sq, &[PieceKind::Knight])) {
        return true;
    }

    if king_attacks(square).any(|sq| holds(sq, &[PieceKind::King])) {
        return true;
    }

    if ray_hits(position, square, &BISHOP_DIRECTIONS, |sq| {
        holds(sq, &[PieceKind::Bishop, PieceKind::Queen])
    }) {
        return true;
    }

    ray_hits(position, square, &ROOK_DIRECTIONS, |sq| {
        holds(sq, &[PieceKind::Rook, PieceKind::Queen])
    })
}

/// Every square attacked by the piece standing on `from`.
pub fn attacks_from(position: &Position, from: Square, piece: Piece) -> Vec<Square> {
    match piece.kind {
        PieceKind::Pawn => pawn_attacks(piece.color, from).collect(),
        PieceKind::Knight => knight_attacks(from).collect(),
        PieceKind::Bishop => bishop_attacks(position, from),
        PieceKind::Rook => rook_attacks(position, from),
        PieceKind::Queen => queen_attacks(position, from),
        PieceKind::King => king_attacks(from).collect(),
    }
}

/// Pieces of `attacker_color` attacking `square`, found by scanning every
/// attacker's pattern.
pub fn attackers_to_square(
    position: &Position,
    square: Square,
    attacker_color: Color,
) -> Vec<(Square, PieceKind)> {
    position
        .pieces_of(attacker_color)
        .filter(|&(from, piece)| attacks_from(position, from, piece).contains(&square))
        .map(|(from, piece)| (from, piece.kind))
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::seq::IndexedRandom;
    use rand::SeedableRng;

    use super::*;
    use crate::move_generation::legal_move_apply::apply_move;
    use crate::move_generation::legal_move_generator::all_legal_moves;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(text: &str) -> Square {
        algebraic_to_square(text).expect("test square should parse")
    }

    #[test]
    fn pawn_pushes_are_not_attacks() {
        let position = Position::from_fen("4k3/8/8/8/8/8/4P3/4K3 b - - 0 1").expect("FEN should parse");
        assert!(!is_square_attacked(&position, sq("e3"), Color::White));
        assert!(is_square_attacked(&position, sq("d3"), Color::White));
        assert!(is_square_attacked(&position, sq("f3"), Color::White));
    }

    #[test]
    fn sliding_attack_is_blocked_by_any_piece() {
        let position =
            Position::from_fen("4k3/8/8/8/8/8/1N6/R3K3 b - - 0 1").expect("FEN should parse");
        assert!(is_square_attacked(&position, sq("a8"), Color::White));
        assert!(is_square_attacked(&position, sq("d1"), Color::White));
        // The e1 king stops the rook before h1.
        assert!(!is_square_attacked(&position, sq("h1"), Color::White));
    }

    #[test]
    fn check_detection_uses_tracked_king_square() {
        let position =
            Position::from_fen("4k3/8/8/8/8/8/8/4RK2 b - - 0 1").expect("FEN should parse");
        assert!(is_king_in_check(&position, Color::Black));
        assert!(!is_king_in_check(&position, Color::White));
        assert_eq!(
            attackers_to_square(&position, sq("e8"), Color::White),
            vec![(sq("e1"), PieceKind::Rook)]
        );
    }

    #[test]
    fn reverse_lookup_agrees_with_attacker_scan_on_random_games() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..8 {
            let mut position = Position::new_game();
            for _ in 0..40 {
                for square in Square::all() {
                    for color in Color::ALL {
                        assert_eq!(
                            is_square_attacked(&position, square, color),
                            !attackers_to_square(&position, square, color).is_empty(),
                            "attack mismatch on {square} by {color} in {}",
                            position.get_fen()
                        );
                    }
                }

                let moves = all_legal_moves(&position);
                let Some(mv) = moves.choose(&mut rng) else {
                    break;
                };
                position = apply_move(&position, mv);
            }
        }
    }
}
