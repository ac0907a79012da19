//! Static position evaluation.
//!
//! Search delegates scoring to [`BoardScorer`] so alternate heuristics can be
//! swapped in without touching the search code.

use crate::game_state::chess_types::*;
use crate::game_state::game_state::Position;

pub trait BoardScorer: Send + Sync {
    /// Score from white's point of view: positive favours white.
    fn score(&self, position: &Position) -> i32;
}

/// Plain material count with no positional terms.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl MaterialScorer {
    #[inline]
    pub const fn piece_value(kind: PieceKind) -> i32 {
        match kind {
            PieceKind::Pawn => 1,
            PieceKind::Knight => 3,
            PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 100,
        }
    }
}

impl BoardScorer for MaterialScorer {
    fn score(&self, position: &Position) -> i32 {
        position
            .pieces()
            .map(|(_, piece)| {
                let value = Self::piece_value(piece.kind);
                match piece.color {
                    Color::White => value,
                    Color::Black => -value,
                }
            })
            .sum()
    }
}

/// Material balance of `position`, white positive.
#[inline]
pub fn evaluate(position: &Position) -> i32 {
    MaterialScorer.score(position)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_is_balanced() {
        assert_eq!(evaluate(&Position::new_game()), 0);
    }

    #[test]
    fn material_is_signed_by_colour() {
        // White: K, Q, P. Black: K, R, N.
        let position =
            Position::from_fen("4k3/8/2n5/8/8/8/4P3/3QK2r w - - 0 1").expect("FEN should parse");
        assert_eq!(evaluate(&position), (100 + 9 + 1) - (100 + 5 + 3));
    }
}
