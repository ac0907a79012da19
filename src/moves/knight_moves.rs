use crate::game_state::chess_types::Square;

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

#[inline]
pub fn knight_attacks(from: Square) -> impl Iterator<Item = Square> {
    KNIGHT_OFFSETS
        .iter()
        .filter_map(move |&(d_row, d_col)| from.offset(d_row, d_col))
}

#[cfg(test)]
mod tests {
    use super::knight_attacks;
    use crate::game_state::chess_types::Square;

    #[test]
    fn knight_attacks_from_d4_has_eight_targets() {
        let d4 = Square::new(4, 3);
        assert_eq!(knight_attacks(d4).count(), 8);
    }

    #[test]
    fn knight_attacks_from_corner_has_two_targets() {
        let a1 = Square::new(7, 0);
        assert_eq!(knight_attacks(a1).count(), 2);
    }
}
