//! Terminal-oriented Unicode board renderer.
//!
//! Creates a human-readable board view for the terminal driver, tests and
//! diagnostics.

use crate::game_state::chess_types::Square;
use crate::game_state::game_state::Position;

/// Render the board with white at the bottom. Empty squares print as `·`;
/// squares listed in `highlights` print as `*` when empty.
pub fn render_with_highlights(position: &Position, highlights: &[Square]) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for row in 0..8u8 {
        let rank_label = char::from(b'8' - row);
        out.push(rank_label);
        out.push(' ');

        for col in 0..8u8 {
            let sq = Square::new(row, col);
            match position.piece_at(sq) {
                Some(piece) => out.push(piece.glyph()),
                None if highlights.contains(&sq) => out.push('*'),
                None => out.push('·'),
            }

            if col < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(rank_label);
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");

    out
}

#[inline]
pub fn render_game_state(position: &Position) -> String {
    render_with_highlights(position, &[])
}
