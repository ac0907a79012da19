//! Uniform random mover, used to vary self-play games and as a fast
//! opponent in tests.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use crate::engines::engine_trait::Engine;
use crate::errors::{ChessError, ChessResult};
use crate::game_state::game_state::Position;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_generator::all_legal_moves;
use crate::search::board_scoring::evaluate;
use crate::search::minimax::SearchResult;

pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "Random"
    }

    fn choose_move(&mut self, position: &Position) -> ChessResult<SearchResult> {
        let legal_moves = all_legal_moves(position);
        let mv = *legal_moves
            .choose(&mut self.rng)
            .ok_or(ChessError::NoLegalMoves)?;

        Ok(SearchResult {
            mv,
            score: evaluate(&apply_move(position, &mv)),
            nodes: 1,
            depth: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_engines_repeat_their_choices() {
        let position = Position::new_game();
        let mut a = RandomEngine::seeded(5);
        let mut b = RandomEngine::seeded(5);
        for _ in 0..5 {
            let left = a.choose_move(&position).expect("start has moves");
            let right = b.choose_move(&position).expect("start has moves");
            assert_eq!(left.mv, right.mv);
            assert!(all_legal_moves(&position).contains(&left.mv));
        }
    }
}
