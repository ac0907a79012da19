use crate::game_state::chess_types::*;
use crate::game_state::game_state::Position;
use crate::move_generation::legal_move_shared::push_step_or_capture;
use crate::moves::queen_moves::queen_attacks;

pub fn generate_queen_moves(position: &Position, from: Square, queen: Piece, out: &mut Vec<Move>) {
    push_step_or_capture(position, from, queen, queen_attacks(position, from), out);
}
