//! Bishop move generation: diagonal rays up to the first blocker.

use crate::game_state::chess_types::*;
use crate::game_state::game_state::Position;
use crate::move_generation::legal_move_shared::push_step_or_capture;
use crate::moves::bishop_moves::bishop_attacks;

pub fn generate_bishop_moves(position: &Position, from: Square, bishop: Piece, out: &mut Vec<Move>) {
    push_step_or_capture(position, from, bishop, bishop_attacks(position, from), out);
}
