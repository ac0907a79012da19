//! Pawn move generation: pushes, double steps, diagonal captures, en passant
//! and promotion expansion.

use crate::game_state::chess_types::*;
use crate::game_state::game_state::Position;
use crate::move_generation::legal_move_shared::enemy_piece_on;
use crate::moves::pawn_moves::pawn_attacks;

pub fn generate_pawn_moves(position: &Position, from: Square, pawn: Piece, out: &mut Vec<Move>) {
    let color = pawn.color;
    let dir = color.pawn_direction();

    if let Some(one) = from.offset(dir, 0) {
        if position.is_empty(one) {
            push_pawn_move(Move::quiet_or_capture(from, one, pawn, None), out);

            if from.row() == color.pawn_start_row() {
                if let Some(two) = from.offset(2 * dir, 0) {
                    if position.is_empty(two) {
                        out.push(Move::quiet_or_capture(from, two, pawn, None));
                    }
                }
            }
        }
    }

    for to in pawn_attacks(color, from) {
        if let Some(victim) = enemy_piece_on(position, to, color) {
            push_pawn_move(Move::quiet_or_capture(from, to, pawn, Some(victim)), out);
        } else if position.en_passant_target() == Some(to) {
            // The victim sits beside the mover, on the destination file.
            let victim_square = Square::new(from.row(), to.col());
            let victim = enemy_piece_on(position, victim_square, color)
                .filter(|victim| victim.kind == PieceKind::Pawn);
            if let Some(victim) = victim {
                out.push(Move {
                    is_en_passant: true,
                    ..Move::quiet_or_capture(from, to, pawn, Some(victim))
                });
            }
        }
    }
}

fn push_pawn_move(mv: Move, out: &mut Vec<Move>) {
    if mv.is_promotion() {
        out.extend(
            PieceKind::PROMOTION_CHOICES
                .iter()
                .map(|&kind| mv.with_promotion(kind)),
        );
    } else {
        out.push(mv);
    }
}
