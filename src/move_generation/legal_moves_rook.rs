//! Rook move generation: orthogonal rays up to the first blocker.

use crate::game_state::chess_types::*;
use crate::game_state::game_state::Position;
use crate::move_generation::legal_move_shared::push_step_or_capture;
use crate::moves::rook_moves::rook_attacks;

pub fn generate_rook_moves(position: &Position, from: Square, rook: Piece, out: &mut Vec<Move>) {
    push_step_or_capture(position, from, rook, rook_attacks(position, from), out);
}
