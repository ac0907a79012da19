use crate::game_state::chess_types::*;
use crate::game_state::game_state::Position;
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_move_shared::push_step_or_capture;
use crate::moves::king_moves::king_attacks;

/// Single steps only; castling is added by [`generate_castling_moves`].
pub fn generate_king_moves(position: &Position, from: Square, king: Piece, out: &mut Vec<Move>) {
    push_step_or_capture(position, from, king, king_attacks(from), out);
}

/// Castling for the king on `from`. The king must be on its home square and
/// not in check, the right must be held, the rook must still be in its
/// corner, every square between them must be empty, and the king may not
/// cross or land on an attacked square.
pub fn generate_castling_moves(position: &Position, from: Square, king: Piece, out: &mut Vec<Move>) {
    let color = king.color;
    let enemy = color.opposite();
    let home_row = color.home_row();

    if from != Square::new(home_row, KING_HOME_COL) {
        return;
    }

    // Cannot castle out of check.
    if is_square_attacked(position, from, enemy) {
        return;
    }

    for side in CastleSide::BOTH {
        if !position.castling_rights().has(color, side) {
            continue;
        }

        let rook_square = Square::new(home_row, side.rook_home_col());
        if position.piece_at(rook_square) != Some(Piece::new(PieceKind::Rook, color)) {
            continue;
        }

        let (low, high) = if side.rook_home_col() > KING_HOME_COL {
            (KING_HOME_COL + 1, side.rook_home_col())
        } else {
            (side.rook_home_col() + 1, KING_HOME_COL)
        };
        if (low..high).any(|col| !position.is_empty(Square::new(home_row, col))) {
            continue;
        }

        let crossed = Square::new(home_row, side.rook_target_col());
        let target = Square::new(home_row, side.king_target_col());
        if is_square_attacked(position, crossed, enemy) || is_square_attacked(position, target, enemy) {
            continue;
        }

        out.push(Move {
            is_castle: true,
            ..Move::quiet_or_capture(from, target, king, None)
        });
    }
}
