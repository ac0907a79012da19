//! Ray tracing shared by the sliding pieces.

use crate::game_state::chess_types::Square;
use crate::game_state::game_state::Position;

/// Walks from `from` (exclusive) in each direction, stopping at the board
/// edge or at the first occupied square, which is included whatever its
/// colour.
pub fn trace_rays(position: &Position, from: Square, directions: &[(i8, i8)], out: &mut Vec<Square>) {
    for &(d_row, d_col) in directions {
        let mut cursor = from.offset(d_row, d_col);
        while let Some(sq) = cursor {
            out.push(sq);
            if !position.is_empty(sq) {
                break;
            }
            cursor = sq.offset(d_row, d_col);
        }
    }
}

/// True when some square on the rays from `from` holds a piece accepted by
/// `is_attacker` before any other blocker.
pub fn ray_hits(
    position: &Position,
    from: Square,
    directions: &[(i8, i8)],
    mut is_attacker: impl FnMut(Square) -> bool,
) -> bool {
    for &(d_row, d_col) in directions {
        let mut cursor = from.offset(d_row, d_col);
        while let Some(sq) = cursor {
            if !position.is_empty(sq) {
                if is_attacker(sq) {
                    return true;
                }
                break;
            }
            cursor = sq.offset(d_row, d_col);
        }
    }
    false
}
