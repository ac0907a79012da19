use crate::game_state::chess_types::Square;
use crate::game_state::game_state::Position;
use crate::moves::bishop_moves::BISHOP_DIRECTIONS;
use crate::moves::rays::trace_rays;
use crate::moves::rook_moves::ROOK_DIRECTIONS;

/// Squares a queen on `from` attacks: rook and bishop rays combined.
pub fn queen_attacks(position: &Position, from: Square) -> Vec<Square> {
    let mut out = Vec::with_capacity(27);
    trace_rays(position, from, &ROOK_DIRECTIONS, &mut out);
    trace_rays(position, from, &BISHOP_DIRECTIONS, &mut out);
    out
}
