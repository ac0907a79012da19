//! Terminal-state detection.

use std::fmt;

use crate::game_state::game_state::Position;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::has_any_legal_move;

/// Status of the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Playing,
    Check,
    Checkmate,
    Stalemate,
}

impl GameStatus {
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Checkmate | GameStatus::Stalemate)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            GameStatus::Playing => "playing",
            GameStatus::Check => "check",
            GameStatus::Checkmate => "checkmate",
            GameStatus::Stalemate => "stalemate",
        };
        f.write_str(text)
    }
}

pub fn classify(position: &Position) -> GameStatus {
    let in_check = is_king_in_check(position, position.side_to_move());
    let has_moves = has_any_legal_move(position);
    match (in_check, has_moves) {
        (true, false) => GameStatus::Checkmate,
        (false, false) => GameStatus::Stalemate,
        (true, true) => GameStatus::Check,
        (false, true) => GameStatus::Playing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_apply::{attempt_move, MoveOutcome};
    use crate::utils::algebraic::algebraic_to_square;

    fn status(fen: &str) -> GameStatus {
        classify(&Position::from_fen(fen).expect("FEN should parse"))
    }

    #[test]
    fn starting_position_is_playing() {
        assert_eq!(classify(&Position::new_game()), GameStatus::Playing);
    }

    #[test]
    fn fools_mate_is_checkmate() {
        let mut position = Position::new_game();
        for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
            let from = algebraic_to_square(from).expect("square should parse");
            let to = algebraic_to_square(to).expect("square should parse");
            position = match attempt_move(&position, from, to, None).expect("move should be legal") {
                MoveOutcome::Completed(applied) => applied.position,
                other => panic!("unexpected outcome {other:?}"),
            };
        }
        let result = classify(&position);
        assert_eq!(result, GameStatus::Checkmate);
        assert!(result.is_terminal());
    }

    #[test]
    fn cornered_king_without_moves_is_stalemate() {
        assert_eq!(status("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1"), GameStatus::Stalemate);
    }

    #[test]
    fn check_with_escape_is_check() {
        let result = status("4k3/8/8/8/8/8/8/4RK2 b - - 0 1");
        assert_eq!(result, GameStatus::Check);
        assert!(!result.is_terminal());
    }
}
