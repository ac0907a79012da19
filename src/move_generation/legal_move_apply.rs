//! Move execution.
//!
//! `apply_move` turns a generator-produced move into the successor position.
//! `attempt_move` is the checked entry point for user input: it validates the
//! request against the legal move list and suspends when a promotion piece
//! still has to be chosen.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::game_state::game_state::Position;
use crate::move_generation::legal_move_generator::legal_moves_from;

/// Result of a successfully executed move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMove {
    pub position: Position,
    pub played: Move,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    Completed(AppliedMove),
    /// A pawn reached the last rank without a chosen piece. Nothing was
    /// changed; retry with a promotion kind.
    PromotionRequired { from: Square, to: Square },
}

/// Applies `mv`, which must come from the legal move generator for
/// `position`.
pub fn apply_move(position: &Position, mv: &Move) -> Position {
    let mover = mv.moving_piece.color;
    let mut next = position.clone();

    next.take(mv.from);

    if mv.is_en_passant {
        next.set(Square::new(mv.from.row(), mv.to.col()), None);
    }

    let placed = match mv.promotion_piece {
        Some(kind) => Piece::new(kind, mover),
        None => mv.moving_piece,
    };
    next.set(mv.to, Some(placed));

    if let Some(side) = mv.castle_side() {
        let row = mover.home_row();
        let rook = next.take(Square::new(row, side.rook_home_col()));
        next.set(Square::new(row, side.rook_target_col()), rook);
    }

    if mv.moving_piece.kind == PieceKind::King {
        next.castling_rights.revoke_all(mover);
        next.king_squares[mover.index()] = mv.to;
    }
    // A rook leaving its corner, or anything landing on one.
    next.castling_rights.revoke_for_corner(mv.from);
    next.castling_rights.revoke_for_corner(mv.to);

    next.en_passant_target = if mv.is_double_pawn_push() {
        Square::try_new(
            (mv.from.row() as i8 + mv.to.row() as i8) / 2,
            mv.from.col() as i8,
        )
    } else {
        None
    };

    next.side_to_move = mover.opposite();
    next
}

/// Checked move request from `from` to `to`.
///
/// `promotion` is only consulted for pawn moves onto the last rank; for
/// every other move it is ignored.
pub fn attempt_move(
    position: &Position,
    from: Square,
    to: Square,
    promotion: Option<PieceKind>,
) -> ChessResult<MoveOutcome> {
    let piece = position
        .piece_at(from)
        .ok_or(ChessError::EmptySquare(from))?;
    if piece.color != position.side_to_move() {
        return Err(ChessError::NotSideToMove {
            square: from,
            owner: piece.color,
            to_move: position.side_to_move(),
        });
    }

    let candidates: Vec<Move> = legal_moves_from(position, from)
        .into_iter()
        .filter(|mv| mv.to == to)
        .collect();
    let Some(first) = candidates.first() else {
        return Err(ChessError::IllegalMove { from, to });
    };

    let chosen = if first.is_promotion() {
        let Some(kind) = promotion else {
            return Ok(MoveOutcome::PromotionRequired { from, to });
        };
        candidates
            .iter()
            .find(|mv| mv.promotion_piece == Some(kind))
            .ok_or(ChessError::InvalidPromotion(kind))?
    } else {
        first
    };

    Ok(MoveOutcome::Completed(AppliedMove {
        position: apply_move(position, chosen),
        played: *chosen,
    }))
}
