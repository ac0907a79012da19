//! Legal move generation pipeline.
//!
//! Dispatches to the per-piece pseudo-legal generators, applies each
//! candidate and drops those that leave the mover's king attacked. Castling
//! is only synthesised at the legal stage since it depends on attacks.

use crate::game_state::chess_types::*;
use crate::game_state::game_state::Position;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_moves_bishop::generate_bishop_moves;
use crate::move_generation::legal_moves_king::{generate_castling_moves, generate_king_moves};
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_queen::generate_queen_moves;
use crate::move_generation::legal_moves_rook::generate_rook_moves;

/// Pseudo-legal moves of whatever piece stands on `from`, regardless of
/// whose turn it is.
pub fn pseudo_legal_moves_from(position: &Position, from: Square) -> Vec<Move> {
    let mut out = Vec::with_capacity(28);
    if let Some(piece) = position.piece_at(from) {
        push_pseudo_legal(position, from, piece, &mut out);
    }
    out
}

/// Pseudo-legal destination squares for the piece on `square`.
pub fn pseudo_legal_moves(position: &Position, square: Square) -> Vec<Square> {
    destinations(pseudo_legal_moves_from(position, square))
}

/// Legal moves of the piece on `from`. Empty when the square is empty or the
/// piece does not belong to the side to move.
pub fn legal_moves_from(position: &Position, from: Square) -> Vec<Move> {
    let mut out = Vec::new();
    collect_legal_from(position, from, &mut out);
    out
}

/// Legal destination squares for the piece on `square`, castling included.
pub fn legal_moves(position: &Position, square: Square) -> Vec<Square> {
    destinations(legal_moves_from(position, square))
}

/// Every legal move of the side to move, scanning the board from a8 to h1.
pub fn all_legal_moves(position: &Position) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    for (from, _) in position.pieces_of(position.side_to_move()) {
        collect_legal_from(position, from, &mut out);
    }
    out
}

pub fn has_any_legal_move(position: &Position) -> bool {
    position
        .pieces_of(position.side_to_move())
        .any(|(from, _)| !legal_moves_from(position, from).is_empty())
}

fn collect_legal_from(position: &Position, from: Square, out: &mut Vec<Move>) {
    let Some(piece) = position.piece_at(from) else {
        return;
    };
    if piece.color != position.side_to_move() {
        return;
    }

    let mut pseudo = Vec::with_capacity(28);
    push_pseudo_legal(position, from, piece, &mut pseudo);

    // Illegal if own king is in check after move.
    out.extend(
        pseudo
            .into_iter()
            .filter(|mv| !is_king_in_check(&apply_move(position, mv), piece.color)),
    );

    if piece.kind == PieceKind::King {
        generate_castling_moves(position, from, piece, out);
    }
}

fn push_pseudo_legal(position: &Position, from: Square, piece: Piece, out: &mut Vec<Move>) {
    match piece.kind {
        PieceKind::Pawn => generate_pawn_moves(position, from, piece, out),
        PieceKind::Knight => generate_knight_moves(position, from, piece, out),
        PieceKind::Bishop => generate_bishop_moves(position, from, piece, out),
        PieceKind::Rook => generate_rook_moves(position, from, piece, out),
        PieceKind::Queen => generate_queen_moves(position, from, piece, out),
        PieceKind::King => generate_king_moves(position, from, piece, out),
    }
}

/// Destination squares in generation order, promotion duplicates removed.
fn destinations(moves: Vec<Move>) -> Vec<Square> {
    let mut squares: Vec<Square> = Vec::with_capacity(moves.len());
    for mv in moves {
        if !squares.contains(&mv.to) {
            squares.push(mv.to);
        }
    }
    squares
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::seq::IndexedRandom;
    use rand::SeedableRng;

    use super::*;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(text: &str) -> Square {
        algebraic_to_square(text).expect("test square should parse")
    }

    fn names(squares: &[Square]) -> Vec<String> {
        let mut names: Vec<String> = squares.iter().map(|s| s.to_string()).collect();
        names.sort();
        names
    }

    #[test]
    fn starting_position_has_twenty_moves() {
        let position = Position::new_game();
        assert_eq!(all_legal_moves(&position).len(), 20);
        assert_eq!(names(&legal_moves(&position, sq("g1"))), vec!["f3", "h3"]);
        assert!(legal_moves(&position, sq("e7")).is_empty());
        assert!(legal_moves(&position, sq("e4")).is_empty());
    }

    #[test]
    fn pinned_piece_keeps_only_moves_along_the_pin() {
        // The e8 rook pins the e2 rook to its king.
        let position =
            Position::from_fen("4r1k1/8/8/8/8/8/4R3/4K3 w - - 0 1").expect("FEN should parse");
        assert_eq!(pseudo_legal_moves(&position, sq("e2")).len(), 13);
        assert_eq!(
            names(&legal_moves(&position, sq("e2"))),
            vec!["e3", "e4", "e5", "e6", "e7", "e8"]
        );
    }

    #[test]
    fn promotion_destinations_are_reported_once() {
        let position = Position::from_fen("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        assert_eq!(legal_moves_from(&position, sq("b7")).len(), 4);
        assert_eq!(legal_moves(&position, sq("b7")), vec![sq("b8")]);
    }

    #[test]
    fn castling_destination_is_listed_with_king_steps() {
        let position =
            Position::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").expect("FEN should parse");
        assert_eq!(
            names(&legal_moves(&position, sq("e1"))),
            vec!["d1", "d2", "e2", "f1", "f2", "g1"]
        );
    }

    #[test]
    fn no_legal_move_leaves_own_king_attacked() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..12 {
            let mut position = Position::new_game();
            for _ in 0..60 {
                let moves = all_legal_moves(&position);
                assert_eq!(has_any_legal_move(&position), !moves.is_empty());
                for mv in &moves {
                    let next = apply_move(&position, mv);
                    assert!(
                        !is_king_in_check(&next, mv.moving_piece.color),
                        "{mv} leaves the king attacked in {}",
                        position.get_fen()
                    );
                }
                let Some(mv) = moves.choose(&mut rng) else {
                    break;
                };
                position = apply_move(&position, mv);
            }
        }
    }
}
