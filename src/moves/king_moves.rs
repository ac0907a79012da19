use crate::game_state::chess_types::Square;

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[inline]
pub fn king_attacks(from: Square) -> impl Iterator<Item = Square> {
    KING_OFFSETS
        .iter()
        .filter_map(move |&(d_row, d_col)| from.offset(d_row, d_col))
}

#[cfg(test)]
mod tests {
    use super::king_attacks;
    use crate::game_state::chess_types::Square;

    #[test]
    fn king_attacks_from_edge_and_center() {
        assert_eq!(king_attacks(Square::new(4, 4)).count(), 8);
        assert_eq!(king_attacks(Square::new(7, 4)).count(), 5);
        assert_eq!(king_attacks(Square::new(0, 0)).count(), 3);
    }
}
