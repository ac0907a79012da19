use crate::game_state::chess_types::*;
use crate::game_state::game_state::Position;
use crate::move_generation::legal_move_shared::push_step_or_capture;
use crate::moves::knight_moves::knight_attacks;

pub fn generate_knight_moves(position: &Position, from: Square, knight: Piece, out: &mut Vec<Move>) {
    push_step_or_capture(position, from, knight, knight_attacks(from), out);
}
