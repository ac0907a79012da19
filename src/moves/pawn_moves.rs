use crate::game_state::chess_types::{Color, Square};

/// The (at most two) diagonal squares a pawn of `color` on `from` attacks.
#[inline]
pub fn pawn_attacks(color: Color, from: Square) -> impl Iterator<Item = Square> {
    let d_row = color.pawn_direction();
    [-1i8, 1i8]
        .into_iter()
        .filter_map(move |d_col| from.offset(d_row, d_col))
}
